//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

/// Argon2id cost parameters.
///
/// Defaults follow the OWASP ASVS recommendation: m=19456 (19 MiB),
/// t=2, p=1.
#[derive(Debug, Clone)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

fn argon2(params: &HashParams) -> Result<Argon2<'static>, AuthError> {
    let params = argon2::Params::new(params.memory_kib, params.iterations, params.parallelism, None)
        .map_err(|e| AuthError::Crypto(format!("argon2 params error: {e}")))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

fn peppered<'a>(password: &'a str, pepper: Option<&str>, buf: &'a mut String) -> &'a [u8] {
    match pepper {
        Some(p) => {
            *buf = format!("{p}{password}");
            buf.as_bytes()
        }
        None => password.as_bytes(),
    }
}

/// Hash a password with Argon2id, returning a PHC-format digest string.
///
/// A fresh random salt is generated for every call — hashing the same
/// password twice yields two different digests. If `pepper` is provided
/// it is prepended to the password before hashing and the same pepper
/// must be supplied at verification time.
pub fn hash_password(
    password: &str,
    params: &HashParams,
    pepper: Option<&str>,
) -> Result<String, AuthError> {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);

    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2(params)?
        .hash_password(input, &salt)
        .map_err(|e| AuthError::Crypto(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a PHC-format digest.
///
/// Recomputes with the salt and cost parameters embedded in `digest`
/// and compares in constant time. A malformed digest verifies as
/// `false` — library-internal failures are never surfaced as anything
/// other than a non-match.
pub fn verify_password(password: &str, digest: &str, pepper: Option<&str>) -> bool {
    let mut buf = String::new();
    let input = peppered(password, pepper, &mut buf);

    let Ok(parsed) = argon2::PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default().verify_password(input, &parsed).is_ok()
}
