//! Integration tests for poly-edge

mod common;
mod e2e_test;
mod engine_test;
