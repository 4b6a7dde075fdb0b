//! Invite code value type

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a generated invite code in characters
pub const CODE_LENGTH: usize = 10;

/// Error for malformed invite codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invite code must be a non-empty URL-safe string")]
pub struct InviteCodeError;

/// An unguessable single-use invite code.
///
/// Generated codes are `CODE_LENGTH` characters of base64url alphabet
/// (roughly 60 bits of entropy). Parsing accepts any non-empty URL-safe
/// string so lookups of foreign or legacy codes still hit the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl InviteCode {
    /// Create a code after validation
    pub fn new(code: impl Into<String>) -> Result<Self, InviteCodeError> {
        let code = code.into();

        if code.is_empty() || !code.bytes().all(is_url_safe) {
            return Err(InviteCodeError);
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Construct from generator output. The caller guarantees the string
    /// is already in the URL-safe alphabet.
    pub(crate) fn from_generated(code: String) -> Self {
        debug_assert!(!code.is_empty() && code.bytes().all(is_url_safe));
        Self(code)
    }
}

fn is_url_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl TryFrom<String> for InviteCode {
    type Error = InviteCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InviteCode> for String {
    fn from(code: InviteCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for InviteCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
