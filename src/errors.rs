//! Error taxonomy for the object store
//!
//! Every core operation returns [`StoreError`]. Repository-open failures are
//! detected from filesystem state, decode/parse failures name the offending
//! address, and history walks report cycles instead of looping.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Coarse classification of a [`StoreError`], cheap to compare and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DirectoryDoesNotExist,
    NotGitRepository,
    NotGitDirectory,
    ObjectNotFound,
    CorruptObject,
    InvalidAddress,
    AmbiguousAddress,
    CorruptHistory,
    NoRepositoryOpen,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("directory {} does not exist", .0.display())]
    DirectoryDoesNotExist(PathBuf),

    #[error("{} is not a git repository", .0.display())]
    NotGitRepository(PathBuf),

    #[error("{} exists but is not a directory", .0.display())]
    NotGitDirectory(PathBuf),

    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("corrupt object {}: {reason}", display_address(.address))]
    CorruptObject {
        address: Option<ObjectId>,
        reason: String,
    },

    #[error("invalid object address '{0}'")]
    InvalidAddress(String),

    #[error("short address {prefix} is ambiguous ({} candidates)", .candidates.len())]
    AmbiguousAddress {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("corrupt history: commit {0} is its own ancestor")]
    CorruptHistory(ObjectId),

    #[error("no repository is open")]
    NoRepositoryOpen,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_address(address: &Option<ObjectId>) -> String {
    address
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<unknown>".to_string())
}

impl StoreError {
    /// Corruption detected before the object's address is known (parsers).
    pub fn corrupt(reason: impl Into<String>) -> Self {
        StoreError::CorruptObject {
            address: None,
            reason: reason.into(),
        }
    }

    /// Attach an address to a corruption error that doesn't carry one yet.
    pub fn at(self, object_id: &ObjectId) -> Self {
        match self {
            StoreError::CorruptObject {
                address: None,
                reason,
            } => StoreError::CorruptObject {
                address: Some(object_id.clone()),
                reason,
            },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::DirectoryDoesNotExist(_) => ErrorKind::DirectoryDoesNotExist,
            StoreError::NotGitRepository(_) => ErrorKind::NotGitRepository,
            StoreError::NotGitDirectory(_) => ErrorKind::NotGitDirectory,
            StoreError::ObjectNotFound(_) => ErrorKind::ObjectNotFound,
            StoreError::CorruptObject { .. } => ErrorKind::CorruptObject,
            StoreError::InvalidAddress(_) => ErrorKind::InvalidAddress,
            StoreError::AmbiguousAddress { .. } => ErrorKind::AmbiguousAddress,
            StoreError::CorruptHistory(_) => ErrorKind::CorruptHistory,
            StoreError::NoRepositoryOpen => ErrorKind::NoRepositoryOpen,
            StoreError::Io(_) => ErrorKind::Io,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
