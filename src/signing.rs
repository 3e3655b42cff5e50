//! Signing certificate fingerprints
//!
//! v1 (JAR) signed packages carry their PKCS#7 signature blocks as
//! `META-INF/<NAME>.RSA`, `.DSA` or `.EC`. Each block is reported with the
//! uppercase hex SHA-256 of its bytes.

use crate::archive::EntryBytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SIGNATURE_EXTENSIONS: [&str; 3] = [".rsa", ".dsa", ".ec"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDigest {
    pub entry: String,
    pub sha256: String,
}

/// True for signature block entries directly under `META-INF/`.
pub fn is_signature_block(name: &str) -> bool {
    let lowered = name.to_lowercase();
    let Some(file_name) = lowered.strip_prefix("meta-inf/") else {
        return false;
    };

    !file_name.contains('/')
        && SIGNATURE_EXTENSIONS
            .iter()
            .any(|ext| file_name.len() > ext.len() && file_name.ends_with(ext))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(bytes))
}

pub fn digest_signature_blocks(blocks: &[EntryBytes]) -> Vec<SignatureDigest> {
    blocks
        .iter()
        .map(|block| SignatureDigest {
            entry: block.name.clone(),
            sha256: sha256_hex(&block.bytes),
        })
        .collect()
}
