//! Git blob object
//!
//! Blobs store file content. They carry no metadata; names and modes live in
//! the trees that reference them.

use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::StoreResult;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    /// Raw file content, possibly binary
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Unpackable for Blob {
    fn deserialize(payload: Bytes) -> StoreResult<Self> {
        Ok(Self::new(payload))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}
