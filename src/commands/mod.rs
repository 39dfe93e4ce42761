//! Command implementations
//!
//! Commands are `impl Session` blocks, split the way git splits its own:
//!
//! - `plumbing`: Low-level object access (cat-file, ls-tree, objects, fsck)
//! - `porcelain`: User-facing views (log)

pub mod plumbing;
pub mod porcelain;
