//! Common test utilities for the machine config CLI.
//!
//! This module provides infrastructure for integration testing:
//! - `fixtures`: Temporary configuration file generation
#![allow(dead_code)]

pub mod fixtures;
