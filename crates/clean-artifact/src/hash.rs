//! SHA-256 digests for stored artifact files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{ArtifactError, Result};

/// Buffer size for reading files during checksum computation.
const BUFFER_SIZE: usize = 65536; // 64 KB

/// Compute the lowercase hex SHA-256 of a file.
pub fn compute_file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| ArtifactError::io("open", path, e))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| ArtifactError::io("read", path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hex_hash = hex::encode(hasher.finalize());
    debug!(path = %path.display(), sha256 = %hex_hash, "digest computed");
    Ok(hex_hash)
}

/// Verify that a file matches the expected SHA-256.
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let actual = compute_file_sha256(path)?;
    let expected = expected.to_lowercase();
    if actual != expected {
        return Err(ArtifactError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}
