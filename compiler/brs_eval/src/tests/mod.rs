//! Evaluator tests that span several interpreter modules.

mod globals_tests;
