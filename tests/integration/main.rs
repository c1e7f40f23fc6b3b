//! Integration tests: the full router over the in-memory backend.

mod helpers;
mod publish_test;
