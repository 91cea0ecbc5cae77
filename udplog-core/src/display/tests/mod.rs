mod queue_tests;
mod retention_tests;
