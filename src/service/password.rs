use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;

/// Digest used for stored password hashes. Hashes are unsalted hex strings,
/// so changing the algorithm invalidates every existing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn hash(self, password: &str) -> String {
        match self {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(password.as_bytes());
                format!("{:x}", hasher.finalize())
            }
            HashAlgorithm::Sha512 => {
                let mut hasher = Sha512::new();
                hasher.update(password.as_bytes());
                format!("{:x}", hasher.finalize())
            }
        }
    }

    pub fn verify(self, password: &str, stored_hash: &str) -> bool {
        let candidate = self.hash(password);
        bool::from(candidate.as_bytes().ct_eq(stored_hash.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_digest() {
        assert_eq!(
            HashAlgorithm::Sha256.hash("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn hashing_is_deterministic_and_distinct() {
        for algo in [HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
            assert_eq!(algo.hash("pi=3.14159"), algo.hash("pi=3.14159"));
            assert_ne!(algo.hash("pi=3.14159"), algo.hash("e=2.71828"));
        }
        assert_eq!(HashAlgorithm::Sha512.hash("x").len(), 128);
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let stored = HashAlgorithm::Sha256.hash("correct horse");
        assert!(HashAlgorithm::Sha256.verify("correct horse", &stored));
        assert!(!HashAlgorithm::Sha256.verify("battery staple", &stored));
        assert!(!HashAlgorithm::Sha512.verify("correct horse", &stored));
    }
}
