//! Read-only browser for a git repository's loose object store
//!
//! ```text
//! RepositoryLocator::locate(dir) -> Repository handle
//! RepositoryModel holds the current handle, replaced wholesale by `open`
//! Database::load(oid)        -> RawObject (inflated, header checked)
//! DecodedObject::parse(raw)  -> Blob | Tree | Commit | Tag
//! Ancestry / TreeWalk        -> lazy walks over addresses, one decode per step
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::locator::RepositoryLocator;
pub use areas::model::RepositoryModel;
pub use areas::repository::Repository;
pub use artifacts::graph::ancestry::TraversalMode;
pub use artifacts::objects::object::DecodedObject;
pub use artifacts::objects::object_id::ObjectId;
pub use errors::{ErrorKind, StoreError, StoreResult};
