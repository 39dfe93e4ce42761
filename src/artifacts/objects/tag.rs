//! Git annotated tag object
//!
//! ## Format
//!
//! ```text
//! object <sha>
//! type <blob|tree|commit|tag>
//! tag <name>
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <message>
//! ```
//!
//! `tagger` is optional: tags written by very old git versions lack it.

use crate::artifacts::objects::headers::HeaderBlock;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::signature::Signature;
use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;
use std::borrow::Cow;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    target: ObjectId,
    target_type: ObjectType,
    name: String,
    tagger: Option<Signature>,
    block: HeaderBlock,
}

impl Tag {
    pub fn target(&self) -> &ObjectId {
        &self.target
    }

    pub fn target_type(&self) -> ObjectType {
        self.target_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tagger(&self) -> Option<&Signature> {
        self.tagger.as_ref()
    }

    pub fn message(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.block.message())
    }

    /// The payload exactly as stored
    pub fn as_bytes(&self) -> &Bytes {
        self.block.as_bytes()
    }
}

impl Unpackable for Tag {
    fn deserialize(payload: Bytes) -> StoreResult<Self> {
        let block = HeaderBlock::parse(payload)?;

        let object = block.required_str("object")?;
        let target = ObjectId::try_parse(object)
            .map_err(|_| StoreError::corrupt(format!("malformed object header '{object}'")))?;
        let target_type = ObjectType::try_from(block.required("type")?)?;

        let name = block.required("tag")?;
        if name.is_empty() {
            return Err(StoreError::corrupt("empty tag name"));
        }
        let name = String::from_utf8_lossy(name).into_owned();

        let tagger = block
            .optional("tagger")
            .map(|tagger| Signature::try_from(String::from_utf8_lossy(tagger).as_ref()))
            .transpose()?;

        Ok(Tag {
            target,
            target_type,
            name,
            tagger,
            block,
        })
    }
}

impl Object for Tag {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }

    fn display(&self) -> String {
        self.block.display()
    }
}
