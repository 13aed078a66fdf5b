//! Cache key derivation
//!
//! Search keywords are arbitrary user text and cannot be used as file names
//! directly. [`KeyScheme::Hashed`] produces a bounded, file-system-safe key
//! with one entry per distinct (whitespace-normalized) keyword string.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RegisterError, RegisterResult};
use crate::utils::{collapse_whitespace, safe_truncate_chars};

/// Maximum characters of the readable prefix of a hashed key
const KEY_PREFIX_MAX_CHARS: usize = 40;

/// How search keywords map to cache file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// `<readable-prefix>-<xxh3 hex>`
    #[default]
    Hashed,
    /// The keywords themselves, sanitized into a valid file name.
    ///
    /// Reads caches written by earlier versions that stored pages under the
    /// raw keyword string.
    Verbatim,
}

/// Identifier a result page is cached under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for `keywords` under `scheme`
    pub fn derive(keywords: &str, scheme: KeyScheme) -> RegisterResult<Self> {
        match scheme {
            KeyScheme::Hashed => Ok(Self::hashed(keywords)),
            KeyScheme::Verbatim => Self::verbatim(keywords),
        }
    }

    /// Hash-based key; identical after whitespace normalization means
    /// identical key
    #[must_use]
    pub fn hashed(keywords: &str) -> Self {
        let normalized = collapse_whitespace(keywords);
        let digest = xxhash_rust::xxh3::xxh3_64(normalized.as_bytes());

        let prefix = readable_prefix(&normalized);
        if prefix.is_empty() {
            Self(format!("{digest:016x}"))
        } else {
            Self(format!("{prefix}-{digest:016x}"))
        }
    }

    /// Keyword string as file name
    ///
    /// Keywords that are already a valid file name are used unchanged. When
    /// sanitizing has to alter them, the xxh3 digest of the original keywords
    /// is appended so that `A/B` and `AB` stay distinct entries.
    pub fn verbatim(keywords: &str) -> RegisterResult<Self> {
        let sanitized = sanitize_filename::sanitize(keywords);
        if sanitized.trim().is_empty() {
            return Err(RegisterError::InvalidQuery(format!(
                "keywords '{keywords}' do not produce a usable cache file name"
            )));
        }
        if sanitized == keywords {
            return Ok(Self(sanitized));
        }

        let digest = xxhash_rust::xxh3::xxh3_64(keywords.as_bytes());
        Ok(Self(format!("{sanitized}-{digest:016x}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Alphanumerics kept, every other run of characters folded into `_`
fn readable_prefix(normalized: &str) -> String {
    let mut prefix = String::with_capacity(normalized.len());
    for ch in safe_truncate_chars(normalized, KEY_PREFIX_MAX_CHARS).chars() {
        if ch.is_alphanumeric() {
            prefix.push(ch);
        } else if !prefix.ends_with('_') {
            prefix.push('_');
        }
    }
    prefix.trim_matches('_').to_string()
}
