//! Git commit object
//!
//! Commits reference exactly one tree and zero or more parent commits, plus
//! author/committer identities and a message.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! Other headers (`gpgsig`, `encoding`, `mergetag`, ...) are kept verbatim.

use crate::artifacts::objects::headers::HeaderBlock;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::signature::Signature;
use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;
use std::borrow::Cow;
use tracing::debug;

const KNOWN_HEADERS: [&str; 4] = ["tree", "parent", "author", "committer"];

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs, first parent first (empty for a root commit)
    parents: Vec<ObjectId>,
    /// `None` when the header is missing or not a well-formed identity
    author: Option<Signature>,
    committer: Option<Signature>,
    block: HeaderBlock,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, the one `--first-parent` history follows
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn author(&self) -> Option<&Signature> {
        self.author.as_ref()
    }

    pub fn committer(&self) -> Option<&Signature> {
        self.committer.as_ref()
    }

    /// Message text, with bytes that are not UTF-8 replaced
    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.block.message())
    }

    pub fn message_bytes(&self) -> &[u8] {
        self.block.message()
    }

    /// First line of the message, for `--oneline` style output
    pub fn short_message(&self) -> String {
        self.message().lines().next().unwrap_or("").to_string()
    }

    /// Headers other than tree/parent/author/committer, in order
    pub fn extra_headers(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.block
            .headers()
            .filter(|(key, _)| !KNOWN_HEADERS.iter().any(|known| known == key))
    }

    /// The payload exactly as stored
    pub fn as_bytes(&self) -> &Bytes {
        self.block.as_bytes()
    }

    fn parse_oid(field: &str, value: &[u8]) -> StoreResult<ObjectId> {
        std::str::from_utf8(value)
            .ok()
            .and_then(|value| ObjectId::try_parse(value).ok())
            .ok_or_else(|| {
                StoreError::corrupt(format!(
                    "malformed {field} header '{}'",
                    String::from_utf8_lossy(value)
                ))
            })
    }

    /// Identities are informational, so a damaged one is dropped rather than
    /// failing the whole commit.
    fn parse_signature(block: &HeaderBlock, field: &str) -> Option<Signature> {
        let value = block.optional(field)?;

        match Signature::try_from(String::from_utf8_lossy(value).as_ref()) {
            Ok(signature) => Some(signature),
            Err(e) => {
                debug!(field, error = %e, "ignoring unreadable identity");
                None
            }
        }
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> StoreResult<Self> {
        let block = HeaderBlock::parse(payload)?;

        let tree_oid = Self::parse_oid("tree", block.required("tree")?)?;
        let parents = block
            .all("parent")
            .map(|parent| Self::parse_oid("parent", parent))
            .collect::<StoreResult<Vec<_>>>()?;
        let author = Self::parse_signature(&block, "author");
        let committer = Self::parse_signature(&block, "committer");

        Ok(Commit {
            tree_oid,
            parents,
            author,
            committer,
            block,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.block.display()
    }
}
