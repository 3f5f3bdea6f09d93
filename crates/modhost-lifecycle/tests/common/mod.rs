//! Common test utilities for modhost-lifecycle
//!
//! This module provides shared test infrastructure including:
//! - Module builders for registry fixtures
//! - Mock license gates and recording entry points

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;
