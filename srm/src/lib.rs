// srm/src/lib.rs
//! # srm
//!
//! The command-line front end for `srm-core`: argument parsing, the
//! confirmation prompt, logger set-up and presentation of the run summary
//! and secure log.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
