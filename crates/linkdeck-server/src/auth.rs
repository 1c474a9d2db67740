// SPDX-License-Identifier: Apache-2.0

//! Credential hashing and account identity helpers. Salted, iterated
//! SHA-256 with a constant-time comparison; the iteration count comes from
//! [`crate::ApiConfig`].

use sha2::{Digest, Sha256};
use std::fmt::Write as _;

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(64);
    for b in digest {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

#[must_use]
pub fn mint_salt(username: &str, nanos: u128, counter: u64) -> String {
    sha256_hex(format!("salt:{username}:{nanos}:{counter}").as_bytes())[..32].to_string()
}

#[must_use]
pub fn user_id_for(username: &str, nanos: u128) -> String {
    format!(
        "u-{}",
        &sha256_hex(format!("user:{username}:{nanos}").as_bytes())[..12]
    )
}

#[must_use]
pub fn hash_password(salt: &str, password: &str, iterations: u32) -> String {
    let mut digest = sha256_hex(format!("{salt}:{password}").as_bytes());
    for _ in 1..iterations.max(1) {
        digest = sha256_hex(digest.as_bytes());
    }
    digest
}

#[must_use]
pub fn verify_password(salt: &str, password: &str, iterations: u32, expected_hash: &str) -> bool {
    constant_time_eq(&hash_password(salt, password, iterations), expected_hash)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Lowercases and checks the one structural rule worth enforcing here:
/// a non-empty local part and domain around a single '@'.
pub fn normalize_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err("email must look like user@domain"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic_per_salt() {
        let a = hash_password("salt-a", "secret", 100);
        let b = hash_password("salt-a", "secret", 100);
        let c = hash_password("salt-b", "secret", 100);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn iteration_count_changes_the_digest() {
        assert_ne!(
            hash_password("salt", "secret", 10),
            hash_password("salt", "secret", 11)
        );
    }

    #[test]
    fn verify_accepts_the_right_password_only() {
        let salt = mint_salt("nitesh", 42, 1);
        let hash = hash_password(&salt, "secret", 100);
        assert!(verify_password(&salt, "secret", 100, &hash));
        assert!(!verify_password(&salt, "wrong", 100, &hash));
        assert!(!verify_password(&salt, "secret", 101, &hash));
    }

    #[test]
    fn email_normalization_lowercases_and_validates() {
        assert_eq!(
            normalize_email(" Nitesh@Example.COM ").expect("valid"),
            "nitesh@example.com"
        );
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@missing-local").is_err());
        assert!(normalize_email("missing-domain@").is_err());
        assert!(normalize_email("two@@ats").is_err());
    }

    #[test]
    fn minted_identities_vary_with_inputs() {
        assert_ne!(mint_salt("a", 1, 1), mint_salt("a", 1, 2));
        assert_ne!(user_id_for("a", 1), user_id_for("b", 1));
        assert!(user_id_for("a", 1).starts_with("u-"));
    }
}
