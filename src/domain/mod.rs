//! Domain layer: contact entities and the directory tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod contact;
pub mod directory;
pub mod error;

pub use contact::{ContactRecord, ContactUpdate};
pub use directory::{ContactDirectory, DeleteOutcome, InOrder, InsertOutcome};
pub use error::{DomainError, DomainResult};
