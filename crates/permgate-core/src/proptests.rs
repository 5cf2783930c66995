//! Property-based tests for the permission checker.
