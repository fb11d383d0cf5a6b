//! Injector integration tests

mod resolution_tests;
