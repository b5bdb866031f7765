mod support;

mod run_app_tests;
