//! Issued passwords and stored credential digests.
//!
//! Student accounts are created by staff, so the initial password is
//! generated server-side, delivered through the notifier, and stored only as
//! a salted digest. The plaintext lives in a zeroizing buffer for the short
//! window between generation and dispatch.

use rand::Rng;
use rand::seq::SliceRandom;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of generated passwords.
const PASSWORD_LEN: usize = 16;
/// Length of the random salt in bytes.
const SALT_LEN: usize = 16;
/// Separator between the salt and digest halves of the stored form.
const DIGEST_SEPARATOR: char = '$';

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*-_=+";

fn pick(rng: &mut impl Rng, set: &[u8]) -> u8 {
    *set.get(rng.gen_range(0..set.len())).unwrap_or(&b'a')
}

/// A freshly generated plaintext password.
///
/// The buffer is zeroised on drop; callers should not copy the plaintext out
/// beyond handing it to the notifier.
pub struct IssuedPassword(Zeroizing<String>);

impl IssuedPassword {
    /// Generate a strong random password.
    ///
    /// The password is [`PASSWORD_LEN`] characters long and guaranteed to
    /// contain at least one lowercase letter, uppercase letter, digit, and
    /// symbol.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut bytes = Vec::with_capacity(PASSWORD_LEN);
        bytes.push(pick(&mut rng, LOWER));
        bytes.push(pick(&mut rng, UPPER));
        bytes.push(pick(&mut rng, DIGITS));
        bytes.push(pick(&mut rng, SYMBOLS));
        let all: Vec<u8> = [LOWER, UPPER, DIGITS, SYMBOLS].concat();
        while bytes.len() < PASSWORD_LEN {
            bytes.push(pick(&mut rng, &all));
        }
        bytes.shuffle(&mut rng);
        Self(Zeroizing::new(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Borrow the plaintext for hashing or dispatch.
    pub fn reveal(&self) -> &str {
        self.0.as_str()
    }
}

/// Salted SHA-256 digest of a password, stored as `salt$digest` in hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Derive a digest from a plaintext password using a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill(&mut salt);
        let digest = Self::digest_with_salt(&salt, password);
        Self(format!("{}{}{}", hex::encode(salt), DIGEST_SEPARATOR, digest))
    }

    /// Wrap a digest previously produced by [`PasswordDigest::derive`].
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Stored representation, suitable for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `candidate` matches the stored digest.
    ///
    /// A malformed stored value never matches.
    pub fn matches(&self, candidate: &str) -> bool {
        let Some((salt_hex, expected)) = self.0.split_once(DIGEST_SEPARATOR) else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        Self::digest_with_salt(&salt, candidate) == expected
    }

    fn digest_with_salt(salt: &[u8], password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_passwords_cover_all_character_classes() {
        let password = IssuedPassword::generate();
        let plaintext = password.reveal();

        assert_eq!(plaintext.len(), PASSWORD_LEN);
        assert!(plaintext.bytes().any(|b| LOWER.contains(&b)));
        assert!(plaintext.bytes().any(|b| UPPER.contains(&b)));
        assert!(plaintext.bytes().any(|b| DIGITS.contains(&b)));
        assert!(plaintext.bytes().any(|b| SYMBOLS.contains(&b)));
    }

    #[test]
    fn generated_passwords_differ() {
        let first = IssuedPassword::generate();
        let second = IssuedPassword::generate();
        assert_ne!(first.reveal(), second.reveal());
    }

    #[test]
    fn derive_and_match_round_trip() {
        let digest = PasswordDigest::derive("s3cret!");
        assert!(digest.matches("s3cret!"));
        assert!(!digest.matches("S3cret!"));
    }

    #[test]
    fn digests_are_salted() {
        let first = PasswordDigest::derive("same-password");
        let second = PasswordDigest::derive("same-password");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn malformed_stored_digest_never_matches() {
        let digest = PasswordDigest::from_stored("not-a-digest");
        assert!(!digest.matches("anything"));
    }

    #[test]
    fn stored_form_survives_persistence_round_trip() {
        let digest = PasswordDigest::derive("pw");
        let restored = PasswordDigest::from_stored(digest.as_str().to_owned());
        assert!(restored.matches("pw"));
    }
}
