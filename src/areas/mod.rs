//! Core repository components
//!
//! - `locator`: Validates a directory as a repository and finds its git directory
//! - `database`: Loose object database (decode, enumerate, look up by prefix)
//! - `repository`: Immutable handle on one opened repository
//! - `model`: The currently opened repository, replaced wholesale on open
//! - `session`: Model plus output writer, the context commands run in

pub mod database;
pub mod locator;
pub mod model;
pub mod repository;
pub mod session;
