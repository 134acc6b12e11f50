//! Machine configuration library - layered profiles for laser cutters and
//! 3D printers.
//!
//! This library exposes the core functionality of the `mcfg` CLI for use in
//! tests and potentially other applications.
//!
//! # Modules
//!
//! - `config`: Record store, config resolution, color table, persistence
//! - `error`: Error types with user-recoverable hints
//! - `cli`: Command-line argument definitions
//! - `logging`: Structured logging setup
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
