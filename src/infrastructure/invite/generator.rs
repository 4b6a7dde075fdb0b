//! Invite code generation
//!
//! Draws from the process CSPRNG and encodes to the base64url alphabet.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use crate::domain::invite::{CODE_LENGTH, InviteCode};

/// Generator for unguessable invite codes.
///
/// Eight random bytes encode to eleven base64url characters; the code
/// keeps the first ten, roughly sixty bits of entropy. Collisions are
/// left to the store's unique constraint.
#[derive(Debug, Clone)]
pub struct InviteCodeGenerator {
    /// Number of random bytes to draw per code
    code_bytes: usize,
}

impl InviteCodeGenerator {
    pub fn new() -> Self {
        Self { code_bytes: 8 }
    }

    /// Generate a fresh code
    pub fn generate(&self) -> InviteCode {
        let mut random_bytes = vec![0u8; self.code_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let mut encoded = URL_SAFE_NO_PAD.encode(&random_bytes);
        encoded.truncate(CODE_LENGTH);

        InviteCode::from_generated(encoded)
    }
}

impl Default for InviteCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
