//! Core building blocks for check-alpha-spec
//!
//! - **config**: the injected policy configuration (mode, tracked packages,
//!   CUDA-suffix conventions, sentinel specifier)
//! - **error**: error types with contextual help messages and exit codes
//! - **span**: byte-offset source ranges shared by the YAML tree and the linter

pub mod config;
pub mod error;
pub mod span;
