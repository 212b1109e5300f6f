//! BLAKE3 content hashing and CRC-32 integrity checksums
//!
//! The BLAKE3 digest is the content address embedded in bundle filenames.
//! The CRC-32 is the fast checksum a loader can verify after download.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use blake3::Hasher;
use flate2::Crc;
use rayon::prelude::*;

use crate::error::{Result, fs::read_error};

/// Digest and checksum of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Lower-case hex BLAKE3 digest
    pub hash: String,
    /// CRC-32 (IEEE) of the same bytes
    pub crc: u32,
    /// Number of bytes hashed
    pub size: u64,
}

/// Calculate the BLAKE3 hash of a byte slice
pub fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Calculate the CRC-32 of a byte slice
pub fn crc_bytes(data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(data);
    crc.sum()
}

/// Calculate the BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    Ok(digest_file(path)?.hash)
}

/// Hash a file once, producing both the BLAKE3 digest and the CRC-32
pub fn digest_file(path: &Path) -> Result<FileDigest> {
    let file = File::open(path).map_err(read_error(path))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut crc = Crc::new();
    let mut buffer = [0u8; 8192];
    let mut size = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(read_error(path))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
        crc.update(&buffer[..bytes_read]);
        size += bytes_read as u64;
    }

    Ok(FileDigest {
        hash: hasher.finalize().to_hex().to_string(),
        crc: crc.sum(),
        size,
    })
}

/// Digest a batch of files in parallel, keeping input order
pub fn digest_files(paths: &[PathBuf]) -> Result<Vec<FileDigest>> {
    paths.par_iter().map(|p| digest_file(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.txt");
        std::fs::write(&file_path, "test content").unwrap();

        let hash = hash_file(&file_path).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_bytes(b"test content"));
    }

    #[test]
    fn test_hash_file_not_found() {
        let result = hash_file(Path::new("/nonexistent/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_crc_matches_known_value() {
        // CRC-32/IEEE check value
        assert_eq!(crc_bytes(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_digest_file_reports_size_and_crc() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("data.bin");
        std::fs::write(&file_path, b"123456789").unwrap();

        let digest = digest_file(&file_path).unwrap();
        assert_eq!(digest.size, 9);
        assert_eq!(digest.crc, 0xCBF4_3926);
        assert_eq!(digest.hash, hash_bytes(b"123456789"));
    }

    #[test]
    fn test_digest_files_keeps_order() {
        let temp = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..7)
            .map(|i| {
                let path = temp.path().join(format!("f{i}.txt"));
                std::fs::write(&path, format!("content {i}")).unwrap();
                path
            })
            .collect();

        let digests = digest_files(&paths).unwrap();
        assert_eq!(digests.len(), 7);
        for (i, digest) in digests.iter().enumerate() {
            assert_eq!(digest.hash, hash_bytes(format!("content {i}").as_bytes()));
        }
    }

    #[test]
    fn test_digest_files_propagates_missing_file() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("present.txt");
        std::fs::write(&present, "x").unwrap();

        let result = digest_files(&[present, temp.path().join("missing.txt")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_hash_changes_with_content() {
        assert_ne!(hash_bytes(b"a"), hash_bytes(b"b"));
        assert_eq!(hash_bytes(b"a"), hash_bytes(b"a"));
    }
}
