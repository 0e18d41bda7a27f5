//! Password hashing.
//!
//! PBKDF2-HMAC-SHA256 with a random per-password salt, stored as
//! `pbkdf2$<iterations>$<salt-hex>$<digest-hex>`. The iteration count is
//! part of the stored string so it can be raised later without invalidating
//! existing hashes. Verification is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Iterations applied to newly created hashes.
const DEFAULT_ITERATIONS: u32 = 100_000;

/// Derived key length; matches the SHA-256 output so a single PBKDF2 block
/// suffices.
const KEY_LENGTH: usize = 32;

/// Hashes and verifies member passwords.
#[derive(Clone)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the default iteration count.
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Creates a hasher with a custom iteration count (tests use a low one).
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> String {
        let salt = *Uuid::new_v4().as_bytes();
        let digest = pbkdf2_sha256(plaintext.as_bytes(), &salt, self.iterations);
        format!(
            "pbkdf2${}${}${}",
            self.iterations,
            hex_encode(&salt),
            hex_encode(&digest)
        )
    }

    /// Verifies a plaintext password against a stored hash string.
    ///
    /// Returns false for malformed hashes rather than erroring; a corrupt
    /// row should fail login, not 500.
    pub fn verify(&self, plaintext: &str, stored: &str) -> bool {
        let mut parts = stored.split('$');
        let (scheme, iterations, salt, digest) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(scheme), Some(iter), Some(salt), Some(digest), None) => {
                (scheme, iter, salt, digest)
            }
            _ => return false,
        };
        if scheme != "pbkdf2" {
            return false;
        }
        let iterations: u32 = match iterations.parse() {
            Ok(n) if n > 0 => n,
            _ => return false,
        };
        let (salt, expected) = match (hex_decode(salt), hex_decode(digest)) {
            (Some(salt), Some(digest)) => (salt, digest),
            _ => return false,
        };

        let actual = pbkdf2_sha256(plaintext.as_bytes(), &salt, iterations);
        actual.ct_eq(expected.as_slice()).unwrap_u8() == 1
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// PBKDF2 with HMAC-SHA256 for a single 32-byte block (RFC 8018, F with i=1).
fn pbkdf2_sha256(password: &[u8], salt: &[u8], iterations: u32) -> [u8; KEY_LENGTH] {
    let mac = |data: &[u8]| -> [u8; KEY_LENGTH] {
        let mut mac =
            HmacSha256::new_from_slice(password).expect("HMAC can take key of any size");
        mac.update(data);
        mac.finalize().into_bytes().into()
    };

    // U_1 = PRF(P, S || INT(1))
    let mut salted = salt.to_vec();
    salted.extend_from_slice(&1u32.to_be_bytes());
    let mut u = mac(&salted);
    let mut out = u;

    for _ in 1..iterations {
        u = mac(&u);
        for (o, b) in out.iter_mut().zip(u.iter()) {
            *o ^= b;
        }
    }
    out
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
