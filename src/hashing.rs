//! SHA-1 content hashes.
//!
//! The cataloguing platform identifies media by the SHA-1 of their bytes, so
//! every hash produced here is a lowercase hex SHA-1 digest.

use sha1::{Digest, Sha1};

/// Hex SHA-1 digest of `content`.
pub fn content_hash(content: &[u8]) -> String {
    hex::encode(Sha1::digest(content))
}

/// Sharded storage path for a hash: `/ab/cd/abcd...`.
pub fn hash_path(hash: &str) -> String {
    match (hash.get(..2), hash.get(2..4)) {
        (Some(first), Some(second)) => format!("/{first}/{second}/{hash}"),
        _ => format!("/{hash}"),
    }
}

/// Running hash over an ordered sequence of file digests.
///
/// Each file's hex digest (not its raw bytes) is fed in turn, so the result
/// depends on both the content and the order of the files.
#[derive(Clone, Default)]
pub struct CombinedHash {
    hasher: Sha1,
    count: usize,
}

impl CombinedHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one file digest.
    pub fn update(&mut self, file_hash: &str) {
        self.hasher.update(file_hash.as_bytes());
        self.count += 1;
    }

    /// Number of digests fed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn finalize(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_known_value() {
        assert_eq!(
            content_hash(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_hash_path() {
        assert_eq!(
            hash_path("a9993e364706816aba3e25717850c26c9cd0d89d"),
            "/a9/99/a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(hash_path("a"), "/a");
    }

    #[test]
    fn test_combined_hash_depends_on_order() {
        let first = content_hash(b"one");
        let second = content_hash(b"two");

        let mut forward = CombinedHash::new();
        forward.update(&first);
        forward.update(&second);
        assert_eq!(forward.count(), 2);

        let mut backward = CombinedHash::new();
        backward.update(&second);
        backward.update(&first);

        assert_ne!(forward.finalize(), backward.finalize());
    }

    #[test]
    fn test_combined_hash_matches_concatenated_digests() {
        let first = content_hash(b"one");
        let second = content_hash(b"two");

        let mut combined = CombinedHash::new();
        combined.update(&first);
        combined.update(&second);

        let concatenated = format!("{first}{second}");
        assert_eq!(combined.finalize(), content_hash(concatenated.as_bytes()));
    }
}
