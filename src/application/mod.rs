//! Application layer: the interactive session and its terminal plumbing
//!
//! This layer drives the domain directory and depends only on `BufRead`/`Write`
//! for I/O, so it can run against stdin/stdout or scripted buffers.

pub mod console;
pub mod error;
pub mod error_ext;
pub mod render;
pub mod session;

pub use console::Console;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use session::{MenuChoice, Session};
