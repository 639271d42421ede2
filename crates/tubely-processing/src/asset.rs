//! Asset identifiers for published objects.
//!
//! An identifier is 32 bytes from the OS CSPRNG, base64url-encoded without
//! padding (43 characters), followed by an extension derived from the
//! declared content type. Identifiers carry no ordering or timestamp.

use std::fmt::{Display, Formatter, Result as FmtResult};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;
use thiserror::Error;

const TOKEN_BYTES: usize = 32;
const FALLBACK_EXTENSION: &str = ".bin";

/// The OS randomness source could not supply bytes.
#[derive(Debug, Error)]
#[error("failed to read from OS randomness source: {0}")]
pub struct EntropyError(String);

/// Storage-relative asset name, e.g. `Jc1…Q4.mp4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetIdentifier(String);

impl AssetIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for AssetIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// `.{subtype}` for a `type/subtype` content type, `.bin` for anything else.
pub fn extension_for_content_type(content_type: &str) -> String {
    let parts: Vec<&str> = content_type.split('/').collect();
    if parts.len() != 2 {
        return FALLBACK_EXTENSION.to_string();
    }
    format!(".{}", parts[1])
}

fn encode_identifier(token: &[u8; TOKEN_BYTES], content_type: &str) -> AssetIdentifier {
    AssetIdentifier(format!(
        "{}{}",
        URL_SAFE_NO_PAD.encode(token),
        extension_for_content_type(content_type)
    ))
}

/// Draw a fresh identifier from `rng`.
pub fn try_generate_with<R: TryRngCore>(
    rng: &mut R,
    content_type: &str,
) -> Result<AssetIdentifier, EntropyError> {
    let mut token = [0u8; TOKEN_BYTES];
    rng.try_fill_bytes(&mut token)
        .map_err(|e| EntropyError(e.to_string()))?;
    Ok(encode_identifier(&token, content_type))
}

/// Generates asset identifiers from the OS CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierGenerator;

impl IdentifierGenerator {
    pub fn new() -> Self {
        IdentifierGenerator
    }

    pub fn try_generate(&self, content_type: &str) -> Result<AssetIdentifier, EntropyError> {
        try_generate_with(&mut OsRng, content_type)
    }

    /// Generate an identifier, panicking when the OS cannot supply randomness.
    ///
    /// A host without working entropy cannot produce safe identifiers at all;
    /// release builds abort on panic.
    pub fn generate(&self, content_type: &str) -> AssetIdentifier {
        match self.try_generate(content_type) {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Entropy source failed while generating asset identifier");
                panic!("{}", e);
            }
        }
    }
}
