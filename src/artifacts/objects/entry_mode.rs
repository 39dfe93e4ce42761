use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{StoreError, StoreResult};

const TYPE_MASK: u32 = 0o170000;
const TREE_TYPE: u32 = 0o040000;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EntryMode {
    Regular,
    Executable,
    Symlink,
    Directory,
    Submodule,
    /// Any other octal mode, e.g. the group-writable `100664` of old repositories
    Other(u32),
}

impl EntryMode {
    /// Parse the ASCII octal mode of a tree entry.
    pub fn from_octal_str(value: &str) -> StoreResult<Self> {
        if value.is_empty() || !value.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return Err(StoreError::corrupt(format!("invalid entry mode '{value}'")));
        }

        let mode = u32::from_str_radix(value, 8)
            .map_err(|_| StoreError::corrupt(format!("entry mode '{value}' overflows")))?;

        Ok(EntryMode::from(mode))
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::Regular => 0o100644,
            EntryMode::Executable => 0o100755,
            EntryMode::Symlink => 0o120000,
            EntryMode::Directory => 0o40000,
            EntryMode::Submodule => 0o160000,
            EntryMode::Other(mode) => *mode,
        }
    }

    /// Kind of object an entry with this mode points at.
    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::Submodule => ObjectType::Commit,
            EntryMode::Other(mode) if mode & TYPE_MASK == TREE_TYPE => ObjectType::Tree,
            _ => ObjectType::Blob,
        }
    }

    pub fn is_tree(&self) -> bool {
        self.object_type() == ObjectType::Tree
    }
}

impl From<u32> for EntryMode {
    fn from(mode: u32) -> Self {
        match mode {
            0o100644 => EntryMode::Regular,
            0o100755 => EntryMode::Executable,
            0o120000 => EntryMode::Symlink,
            0o40000 => EntryMode::Directory,
            0o160000 => EntryMode::Submodule,
            other => EntryMode::Other(other),
        }
    }
}

/// Zero-padded six digit form, as `git ls-tree` prints it.
impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.as_u32())
    }
}
