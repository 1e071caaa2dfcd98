//! Password hashing shared across CodeCamp crates
//!
//! Secrets are stretched with PBKDF2-HMAC-SHA256 under a random salt. The
//! iteration count travels with the hash so it can be raised without
//! invalidating existing rows.

use constant_time_eq::constant_time_eq;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

const SCHEME: &str = "pbkdf2_sha256";

/// Salt length in bytes
const SALT_LEN: usize = 16;

/// Derived key length in bytes
const KEY_LEN: usize = 32;

/// Iteration count for newly hashed passwords
pub const PASSWORD_HASH_ITERATIONS: u32 = 600_000;

fn derive(secret: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut output = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt, iterations, &mut output);
    output
}

/// Hash a secret with a fresh random salt and the default iteration count.
///
/// Output format is `pbkdf2_sha256$<iterations>$hex(salt)$hex(key)`.
pub fn hash_secret(secret: &str) -> Result<String, getrandom::Error> {
    hash_secret_with_iterations(secret, PASSWORD_HASH_ITERATIONS)
}

/// Hash a secret with an explicit iteration count
pub fn hash_secret_with_iterations(
    secret: &str,
    iterations: u32,
) -> Result<String, getrandom::Error> {
    let iterations = iterations.max(1);
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt)?;

    Ok(format!(
        "{SCHEME}${iterations}${}${}",
        hex::encode(salt),
        hex::encode(derive(secret, &salt, iterations))
    ))
}

/// Verify a secret against a stored hash using constant-time comparison
pub fn verify_secret_hash(candidate: &str, stored_hash: &str) -> bool {
    let mut parts = stored_hash.split('$');
    let (Some(scheme), Some(iterations), Some(salt_hex), Some(key_hex), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    if scheme != SCHEME {
        return false;
    }

    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(key_hex)) else {
        return false;
    };

    constant_time_eq(&derive(candidate, &salt, iterations), &expected)
}
