//! contactbook: an in-memory contact directory on an unbalanced binary search tree
//!
//! Layers:
//! - `domain`: contact records and the directory tree (no I/O)
//! - `application`: the interactive menu session
//! - `cli`: argument parsing and command dispatch
//! - `config`: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    ContactDirectory, ContactRecord, ContactUpdate, DeleteOutcome, DomainError, InsertOutcome,
};
