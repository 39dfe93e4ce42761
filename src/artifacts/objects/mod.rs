//! Git object types and parsing
//!
//! Git stores all content as objects identified by SHA-1 hashes. There are four types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//! - **Tag**: Annotated reference to another object
//!
//! Every loose object decompresses to `<type> <size>\0<content>`; `raw_object`
//! splits that envelope and `object::DecodedObject` dispatches the payload to
//! the grammar of its type.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod headers;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod raw_object;
pub mod signature;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes, as packed in tree entries
pub const OBJECT_ID_RAW_LENGTH: usize = 20;
