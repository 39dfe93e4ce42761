//! Plumbing commands (low-level object access)
//!
//! - `cat-file`: Print an object's content, type, or size
//! - `ls-tree`: List the entries of a tree (or of a commit's tree)
//! - `objects`: Enumerate every loose object in the store
//! - `fsck`: Decode and hash-check every loose object

pub mod cat_file;
pub mod fsck;
pub mod list_objects;
pub mod ls_tree;
