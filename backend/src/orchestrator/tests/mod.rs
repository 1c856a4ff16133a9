mod test_queue_admission;
