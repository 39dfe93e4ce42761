//! Line-oriented header block shared by commits and tags
//!
//! ```text
//! key value
//! key value
//!  continuation of the previous value
//!
//! free-text message
//! ```
//!
//! Values and message stay raw bytes: a commit may declare `encoding ISO-8859-1`
//! and carry a message that is not UTF-8. Text is decoded only for display.

use crate::errors::{StoreError, StoreResult};
use bytes::Bytes;

/// Ordered `key value` pairs followed by a message body.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HeaderBlock {
    raw: Bytes,
    headers: Vec<(String, Vec<u8>)>,
    message: Bytes,
}

impl HeaderBlock {
    pub fn parse(payload: Bytes) -> StoreResult<Self> {
        let blank_line = payload.windows(2).position(|pair| pair == b"\n\n");

        let (head_end, message) = match blank_line {
            Some(at) => (at, payload.slice(at + 2..)),
            None => {
                let end = payload
                    .iter()
                    .rposition(|&b| b != b'\n')
                    .map_or(0, |last| last + 1);
                (end, Bytes::new())
            }
        };

        let mut headers: Vec<(String, Vec<u8>)> = Vec::new();
        for line in payload[..head_end].split(|&b| b == b'\n') {
            if let Some(continuation) = line.strip_prefix(b" ") {
                let (_, value) = headers.last_mut().ok_or_else(|| {
                    StoreError::corrupt("continuation line before any header")
                })?;
                value.push(b'\n');
                value.extend_from_slice(continuation);
                continue;
            }

            let space = line.iter().position(|&b| b == b' ').ok_or_else(|| {
                StoreError::corrupt(format!(
                    "malformed header line '{}'",
                    String::from_utf8_lossy(line)
                ))
            })?;
            let key = std::str::from_utf8(&line[..space])
                .map_err(|_| StoreError::corrupt("header key is not ASCII"))?;
            headers.push((key.to_string(), line[space + 1..].to_vec()));
        }

        Ok(HeaderBlock {
            raw: payload,
            headers,
            message,
        })
    }

    /// Every header in payload order, continuation lines folded into the value
    pub fn headers(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.headers
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_slice()))
    }

    pub fn message(&self) -> &Bytes {
        &self.message
    }

    /// The payload exactly as it was parsed.
    pub fn as_bytes(&self) -> &Bytes {
        &self.raw
    }

    /// Every value recorded under `key`, in order.
    pub fn all<'h, 'k>(&'h self, key: &'k str) -> impl Iterator<Item = &'h [u8]> {
        self.headers
            .iter()
            .filter(move |(name, _)| name.as_str() == key)
            .map(|(_, value)| value.as_slice())
    }

    /// The single value under `key`; absent or repeated is corruption.
    pub fn required(&self, key: &str) -> StoreResult<&[u8]> {
        let mut values = self.all(key);
        let value = values
            .next()
            .ok_or_else(|| StoreError::corrupt(format!("missing {key} header")))?;
        if values.next().is_some() {
            return Err(StoreError::corrupt(format!("duplicate {key} header")));
        }

        Ok(value)
    }

    /// [`HeaderBlock::required`] for structural headers, which must be UTF-8.
    pub fn required_str(&self, key: &str) -> StoreResult<&str> {
        std::str::from_utf8(self.required(key)?)
            .map_err(|_| StoreError::corrupt(format!("{key} header is not UTF-8")))
    }

    pub fn optional(&self, key: &str) -> Option<&[u8]> {
        self.all(key).next()
    }

    /// Lossy text rendering of the whole payload.
    pub fn display(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }
}
