//! Decompressed loose object
//!
//! ## Format
//!
//! ```text
//! <type> <length>\0<payload>
//! ```
//!
//! `<type>` is one of `blob`, `tree`, `commit`, `tag` and `<length>` is the
//! ASCII decimal size of the payload. A length that disagrees with the payload
//! is corruption, never a silent truncation.

use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;
use sha1::{Digest, Sha1};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    object_type: ObjectType,
    payload: Bytes,
}

impl RawObject {
    pub fn new(object_type: ObjectType, payload: impl Into<Bytes>) -> Self {
        RawObject {
            object_type,
            payload: payload.into(),
        }
    }

    /// Split decompressed bytes into type tag, declared length and payload.
    pub fn parse(data: Bytes) -> StoreResult<Self> {
        let header_end = data
            .iter()
            .position(|&b| b == b'\0')
            .ok_or_else(|| StoreError::corrupt("object header is not NUL-terminated"))?;
        let header = &data[..header_end];

        let space = header
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| StoreError::corrupt("object header has no length field"))?;

        let object_type = ObjectType::try_from(&header[..space])?;
        let declared_length = Self::parse_length(&header[space + 1..])?;

        let payload = data.slice(header_end + 1..);
        if payload.len() != declared_length {
            return Err(StoreError::corrupt(format!(
                "declared length {declared_length} but payload has {} bytes",
                payload.len()
            )));
        }

        Ok(RawObject {
            object_type,
            payload,
        })
    }

    fn parse_length(field: &[u8]) -> StoreResult<usize> {
        if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
            return Err(StoreError::corrupt(format!(
                "invalid length field '{}'",
                String::from_utf8_lossy(field)
            )));
        }
        if field.len() > 1 && field[0] == b'0' {
            return Err(StoreError::corrupt(format!(
                "length field '{}' has a leading zero",
                String::from_utf8_lossy(field)
            )));
        }

        // digits only, so this can only fail on overflow
        std::str::from_utf8(field)
            .ok()
            .and_then(|field| field.parse::<usize>().ok())
            .ok_or_else(|| StoreError::corrupt("length field overflows"))
    }

    /// Encode back into the wire form `<type> <length>\0<payload>`.
    pub fn encode(&self) -> Bytes {
        let header = format!("{} {}\0", self.object_type.as_str(), self.payload.len());
        let mut bytes = Vec::with_capacity(header.len() + self.payload.len());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&self.payload);

        Bytes::from(bytes)
    }

    /// SHA-1 of the encoded object, i.e. the address it should be stored under.
    pub fn hash_hex(&self) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.encode());

        format!("{:x}", hasher.finalize())
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn declared_length(&self) -> usize {
        self.payload.len()
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}
