//! Git tree object
//!
//! Trees represent directory snapshots. They list files (blobs), sub-directories
//! (other trees) and submodules (commits) with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries keep their on-disk order, which git writes sorted by name. References
//! are plain addresses: nothing below a tree is decoded until someone asks for it.

use crate::artifacts::objects::OBJECT_ID_RAW_LENGTH;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;
use derive_new::new;
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    /// Raw name bytes; git does not require names to be UTF-8
    pub name: Vec<u8>,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// The name as a path component, byte for byte where the platform allows.
    pub fn file_name(&self) -> PathBuf {
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            PathBuf::from(std::ffi::OsStr::from_bytes(&self.name))
        }
        #[cfg(not(unix))]
        {
            PathBuf::from(self.name_lossy().into_owned())
        }
    }

    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }

    pub fn object_type(&self) -> ObjectType {
        self.mode.object_type()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    /// Addresses referenced by this tree, in entry order
    ///
    /// Nothing is decoded here; resolving a child goes back through the database.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &ObjectId> {
        self.entries.iter().map(|entry| &entry.oid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split one `<mode> <name>\0<20 bytes>` record off the front of `rest`.
    fn next_entry(rest: &[u8]) -> StoreResult<(TreeEntry, &[u8])> {
        let nul = rest
            .iter()
            .position(|&b| b == b'\0')
            .ok_or_else(|| StoreError::corrupt("tree entry name is not NUL-terminated"))?;
        let header = &rest[..nul];

        let space = header
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| StoreError::corrupt("tree entry has no mode separator"))?;
        let mode = std::str::from_utf8(&header[..space])
            .map_err(|_| StoreError::corrupt("tree entry mode is not ASCII"))?;
        let mode = EntryMode::from_octal_str(mode)?;

        let name = &header[space + 1..];
        if name.is_empty() {
            return Err(StoreError::corrupt("tree entry has an empty name"));
        }
        let name = name.to_vec();

        let oid_start = nul + 1;
        let oid_end = oid_start + OBJECT_ID_RAW_LENGTH;
        let raw_oid = rest.get(oid_start..oid_end).ok_or_else(|| {
            StoreError::corrupt(format!(
                "tree entry '{}' has a truncated object id",
                String::from_utf8_lossy(&name)
            ))
        })?;
        let oid = ObjectId::from_raw(raw_oid)?;

        Ok((TreeEntry::new(mode, name, oid), &rest[oid_end..]))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> StoreResult<Self> {
        let mut entries = Vec::new();
        let mut rest = payload.as_ref();

        while !rest.is_empty() {
            let (entry, remaining) = Self::next_entry(rest)?;
            entries.push(entry);
            rest = remaining;
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode,
                    entry.object_type(),
                    entry.oid,
                    entry.name_lossy()
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
