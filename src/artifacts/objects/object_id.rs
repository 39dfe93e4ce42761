//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings naming every object in the
//! store. Parsing normalizes to lowercase, so two IDs are equal iff their
//! characters are equal after normalization.
//!
//! ## Storage
//!
//! Loose objects live at `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use crate::errors::{StoreError, StoreResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Git object identifier (SHA-1 hash)
///
/// Ordering is lexicographic on the hex characters, which gives enumeration a
/// deterministic order when it is sorted explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from its hex form
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string, either case
    ///
    /// # Returns
    ///
    /// Validated ObjectId or [`StoreError::InvalidAddress`]
    pub fn try_parse(id: impl AsRef<str>) -> StoreResult<Self> {
        let id = id.as_ref();

        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StoreError::InvalidAddress(id.to_string()));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from its 20 raw bytes, as packed inside tree entries.
    pub fn from_raw(bytes: &[u8]) -> StoreResult<Self> {
        if bytes.len() != OBJECT_ID_RAW_LENGTH {
            return Err(StoreError::corrupt(format!(
                "object id must be {OBJECT_ID_RAW_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self(hex::encode(bytes)))
    }

    /// Rebuild an object ID from a shard directory name and a file name
    ///
    /// Returns `None` for names that can't be a loose object (e.g. `pack`,
    /// `info`, temporary files).
    pub fn from_shard(dir: &str, file: &str) -> Option<Self> {
        if dir.len() != 2 || file.len() != OBJECT_ID_LENGTH - 2 {
            return None;
        }

        Self::try_parse(format!("{dir}{file}")).ok()
    }

    /// The 20 raw bytes of the hash.
    pub fn to_raw(&self) -> [u8; OBJECT_ID_RAW_LENGTH] {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        // validated as 40 hex chars on construction
        hex::decode_to_slice(&self.0, &mut raw).unwrap_or_default();
        raw
    }

    /// Relative path inside the object database
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Absolute location of the loose object under `objects_path`.
    pub fn to_path_in(&self, objects_path: &Path) -> PathBuf {
        objects_path.join(self.to_path())
    }

    /// First 7 characters of the hash (standard Git abbreviation)
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl FromStr for ObjectId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn path_is_split_after_two_chars() {
        let oid = ObjectId::try_parse("ce013625030ba8dba906f756967f9e9ca394464a").unwrap();

        assert_eq!(
            oid.to_path(),
            PathBuf::from("ce").join("013625030ba8dba906f756967f9e9ca394464a")
        );
        assert_eq!(
            oid.to_path_in(Path::new("/repo/.git/objects")),
            PathBuf::from("/repo/.git/objects/ce/013625030ba8dba906f756967f9e9ca394464a")
        );
    }

    #[test]
    fn raw_bytes_round_trip() {
        let oid = ObjectId::try_parse("00ff10a0b1c2d3e4f5061728394a5b6c7d8e9f01").unwrap();
        let raw = oid.to_raw();

        assert_eq!(raw[0], 0x00);
        assert_eq!(raw[1], 0xff);
        assert_eq!(ObjectId::from_raw(&raw).unwrap(), oid);
    }

    #[test]
    fn short_raw_ids_are_corrupt() {
        let err = ObjectId::from_raw(&[0u8; 19]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptObject);
    }

    #[test]
    fn shard_names_that_are_not_objects_are_skipped() {
        assert!(ObjectId::from_shard("pa", "ck").is_none());
        assert!(ObjectId::from_shard("ce", "tmp-obj-1234").is_none());
        assert!(ObjectId::from_shard("ce", "013625030ba8dba906f756967f9e9ca394464a").is_some());
    }

    proptest! {
        #[test]
        fn prop_hex_ids_round_trip_lowercased(id in "[0-9a-fA-F]{40}") {
            let oid = ObjectId::try_parse(&id).unwrap();
            prop_assert_eq!(oid.to_string(), id.to_ascii_lowercase());
        }

        #[test]
        fn prop_wrong_length_is_invalid(id in "[0-9a-f]{0,39}|[0-9a-f]{41,60}") {
            let err = ObjectId::try_parse(&id).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InvalidAddress);
        }

        #[test]
        fn prop_non_hex_is_invalid(prefix in "[0-9a-f]{0,39}", bad in "[g-zG-Z ./]") {
            let mut id = prefix.clone();
            id.push_str(&bad);
            while id.len() < 40 {
                id.push('0');
            }
            let err = ObjectId::try_parse(&id).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::InvalidAddress);
        }
    }
}
