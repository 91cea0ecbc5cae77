mod command_tests;
mod replay_tests;
mod simulate_tests;
mod status_tests;
mod viewer_tests;
