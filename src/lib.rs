//! importfix
//!
//! Resolves short, partially typed class names in Java/Kotlin source to
//! fully qualified import statements by indexing the classes found in
//! installed jar archives, then rewrites or organizes the import block.
pub mod cli;
pub mod discovery;
pub mod error;
pub mod index;
pub mod logging;
pub mod resolver;
pub mod rewrite;

pub use error::{Error, Result};
pub use index::ClassIndex;
pub use resolver::Resolver;
pub use rewrite::{import_block, organized_imports, rewrite_source, RewriteOptions};
