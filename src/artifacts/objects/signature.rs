use crate::errors::{StoreError, StoreResult};
use chrono::{DateTime, FixedOffset};

/// Identity line of a commit or tag (author, committer, tagger)
///
/// Format: `name <email> <unix-seconds> <+hhmm|-hhmm>`
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Signature {
    pub fn new(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Signature {
            name,
            email,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// `Name <email@example.com>`
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Full identity in on-disk form: `Name <email> timestamp timezone`
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Timestamp like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn parse_offset(timezone: &str) -> Option<FixedOffset> {
        let (sign, digits) = match timezone.as_bytes().first()? {
            b'+' => (1, &timezone[1..]),
            b'-' => (-1, &timezone[1..]),
            _ => return None,
        };
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let hours: i32 = digits[..2].parse().ok()?;
        let minutes: i32 = digits[2..].parse().ok()?;
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
    }
}

impl TryFrom<&str> for Signature {
    type Error = StoreError;

    fn try_from(value: &str) -> StoreResult<Self> {
        let malformed = || StoreError::corrupt(format!("malformed signature '{value}'"));

        let email_start = value.find('<').ok_or_else(malformed)?;
        let email_end = value.rfind('>').ok_or_else(malformed)?;
        if email_end < email_start {
            return Err(malformed());
        }

        let name = value[..email_start].trim().to_string();
        let email = value[email_start + 1..email_end].to_string();

        let mut when = value[email_end + 1..].split_whitespace();
        let seconds = when
            .next()
            .and_then(|seconds| seconds.parse::<i64>().ok())
            .ok_or_else(malformed)?;
        let offset = when
            .next()
            .and_then(Self::parse_offset)
            .ok_or_else(malformed)?;
        if when.next().is_some() {
            return Err(malformed());
        }

        let timestamp = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(malformed)?
            .with_timezone(&offset);

        Ok(Signature::new(name, email, timestamp))
    }
}
