//! labup - provisioning for a containerized coursework notebook environment
//!
//! This tool automates the setup of a Docker-hosted notebook environment for
//! a data-analysis exercise: it checks prerequisites, builds and starts the
//! environment, waits for the notebook service to become reachable, triggers
//! data extraction inside the container, and prints follow-up instructions.

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

mod cli;

/// Main entry point for the labup CLI
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
