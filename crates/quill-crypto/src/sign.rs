//! Tamper-evident cookie values: `"<value>|<hex hmac-sha256>"`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies cookie values with a process-wide secret.
///
/// Pure over (input, secret); a malformed or forged value verifies to `None`
/// rather than an error so callers can fall back to an anonymous session.
#[derive(Clone)]
pub struct Signer {
    secret: String,
}

impl Signer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, value: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can accept any key length");
        mac.update(value.as_bytes());
        mac
    }

    /// `value` concatenated with `|` and its hex signature.
    pub fn sign(&self, value: &str) -> String {
        let sig = self.mac(value).finalize().into_bytes();
        format!("{}|{}", value, hex::encode(sig))
    }

    /// Split on the first `|`, recompute the MAC over the prefix, and return
    /// the prefix only when the signature matches (constant-time compare).
    pub fn verify<'a>(&self, signed: &'a str) -> Option<&'a str> {
        let (value, sig) = signed.split_once('|')?;
        let sig = hex::decode(sig).ok()?;
        self.mac(value).verify_slice(&sig).ok()?;
        Some(value)
    }
}
