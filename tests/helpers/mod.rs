//! Test helpers module
//!
//! This module provides the test context, request envelope builders and
//! store doubles shared by the integration tests.

#![allow(dead_code)]

pub mod test_context;
pub mod test_data;

pub use test_context::*;
pub use test_data::*;
