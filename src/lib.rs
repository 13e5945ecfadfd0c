//! labup - provisioning for a containerized coursework notebook environment
//!
//! This library implements the readiness-gated provisioning sequence (check
//! tooling, check input data, build, start, poll for readiness, extract,
//! verify) and the independent static precondition validator (notebook JSON
//! well-formedness plus expected data files).

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod data;
pub mod interrupt;
pub mod output;
pub mod pipeline;
pub mod probe;
pub mod runtime;
pub mod validate;
