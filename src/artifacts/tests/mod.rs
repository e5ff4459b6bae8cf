//! Unit tests for the generic artifacts module.
//!
//! Tests are organised by layer: command composition, request parsing,
//! server lifecycle, and end-to-end orchestration with failure injection.

mod lifecycle_tests;
