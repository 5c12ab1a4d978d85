// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mock encryption: byte-order reversal, rewritten in place.

use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Reverse a byte sequence. Applying it twice yields the input.
pub fn reverse_bytes(content: &[u8]) -> Vec<u8> {
    content.iter().rev().copied().collect()
}

pub fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Rewrite `path` with its reversed content in one open/read/seek/write/truncate
/// sequence. Returns the digest of the content as it was before the rewrite.
pub fn transform_file(path: &Path) -> io::Result<String> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;

    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    let digest = sha256_hex(&content);

    let transformed = reverse_bytes(&content);
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&transformed)?;
    // Reversal keeps the length; truncate anyway so a length-changing transform stays correct.
    file.set_len(transformed.len() as u64)?;
    file.flush()?;

    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reversal_is_self_inverse() {
        let samples: [&[u8]; 5] = [b"", b"a", b"hello", b"\x00\xff\x10", b"abba"];
        for sample in samples {
            assert_eq!(reverse_bytes(&reverse_bytes(sample)), sample);
        }
        assert_eq!(reverse_bytes(b"hello"), b"olleh");
    }

    #[test]
    fn transform_rewrites_in_place_and_reports_original_digest() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("a.txt");
        fs::write(&path, b"hello").unwrap();

        let digest = transform_file(&path).expect("transform should succeed");
        assert_eq!(fs::read(&path).unwrap(), b"olleh");
        assert_eq!(digest, sha256_hex(b"hello"));

        transform_file(&path).expect("second transform should succeed");
        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn empty_file_stays_empty() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();
        transform_file(&path).expect("transform should succeed");
        assert!(fs::read(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir should create");
        assert!(transform_file(&dir.path().join("nope")).is_err());
    }
}
