// src/documents/tests/mod.rs

mod status_tests;
mod validators_tests;
