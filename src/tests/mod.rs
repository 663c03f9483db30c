mod error_tests;
mod scenario_tests;
