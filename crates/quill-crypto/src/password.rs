//! Salted password hashing in the stored format `"<hex digest>,<salt>"`.
//!
//! The digest is `sha256(name + password + salt)`. The 5-letter salt length
//! is a format constraint carried by existing user records; the salt itself
//! comes from the thread-local CSPRNG. This is not a modern KDF — swapping
//! one in means migrating every stored hash.

use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 5;
const SALT_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Five random ASCII letters.
pub fn make_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LEN)
        .map(|_| SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())] as char)
        .collect()
}

/// Hash `password` for `name`, generating a salt when none is supplied.
/// Deterministic given identical (name, password, salt).
pub fn make_hash(name: &str, password: &str, salt: Option<&str>) -> String {
    let salt = match salt {
        Some(salt) => salt.to_owned(),
        None => make_salt(),
    };

    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());

    format!("{},{}", hex::encode(hasher.finalize()), salt)
}

/// Recompute with the salt embedded in `stored` and compare. A malformed
/// stored hash (no comma field) never verifies.
pub fn verify(name: &str, password: &str, stored: &str) -> bool {
    let Some((_, salt)) = stored.split_once(',') else {
        return false;
    };
    make_hash(name, password, Some(salt)) == stored
}
