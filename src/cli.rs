//! Command-line interface
//!
//! Flag names follow the portal's German form field names and stay
//! compatible with earlier releases, including the two-letter short flag
//! `-so`, which clap cannot express and [`normalize_args`] rewrites.

use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::cache::KeyScheme;
use crate::config::{MatchModeHandling, RegisterConfig};
use crate::error::RegisterResult;
use crate::model::{MatchMode, SearchQuery};
use crate::utils::DEFAULT_CACHE_DIR;

const KEYWORD_OPTION_SHORT: &str = "-so";
const KEYWORD_OPTION_LONG: &str = "--schlagwortOptionen";

#[derive(Parser, Debug)]
#[command(name = "handelsregister", version, about = "A handelsregister CLI")]
pub struct Cli {
    /// Enable debug mode and activate logging
    #[arg(short, long)]
    pub debug: bool,

    /// Force a fresh pull and skip the cache
    #[arg(short, long)]
    pub force: bool,

    /// Search for the provided keywords
    #[arg(
        short = 's',
        long = "schlagwoerter",
        value_name = "KEYWORDS",
        allow_hyphen_values = true
    )]
    pub schlagwoerter: String,

    /// Keyword options: all=contain all keywords; min=contain at least one
    /// keyword; exact=contain the exact company name (alias: -so)
    #[arg(
        long = "schlagwortOptionen",
        value_enum,
        default_value_t = KeywordOption::All,
        value_name = "OPTION"
    )]
    pub schlagwort_optionen: KeywordOption,

    /// Select the keyword option on the search form (by default the portal's
    /// own default is used)
    #[arg(long)]
    pub apply_match_mode: bool,

    /// Directory holding cached result pages
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// How cache file names are derived from the keywords; `verbatim` reads
    /// caches written by earlier releases
    #[arg(long, value_enum, default_value_t = CacheNaming::Hashed, value_name = "SCHEME")]
    pub key_scheme: CacheNaming,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeywordOption {
    All,
    Min,
    Exact,
}

impl From<KeywordOption> for MatchMode {
    fn from(option: KeywordOption) -> Self {
        match option {
            KeywordOption::All => MatchMode::All,
            KeywordOption::Min => MatchMode::Min,
            KeywordOption::Exact => MatchMode::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheNaming {
    Hashed,
    Verbatim,
}

impl From<CacheNaming> for KeyScheme {
    fn from(naming: CacheNaming) -> Self {
        match naming {
            CacheNaming::Hashed => KeyScheme::Hashed,
            CacheNaming::Verbatim => KeyScheme::Verbatim,
        }
    }
}

impl Cli {
    /// Parse the process arguments, accepting `-so` for the keyword option
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// The search described by the flags
    pub fn query(&self) -> RegisterResult<SearchQuery> {
        Ok(
            SearchQuery::new(self.schlagwoerter.as_str(), self.schlagwort_optionen.into())?
                .with_force_refresh(self.force),
        )
    }

    /// Configuration derived from the flags, defaults for everything else
    pub fn config(&self) -> RegisterResult<RegisterConfig> {
        let handling = if self.apply_match_mode {
            MatchModeHandling::Apply
        } else {
            MatchModeHandling::Ignore
        };

        RegisterConfig::builder()
            .cache_dir(&self.cache_dir)
            .key_scheme(self.key_scheme.into())
            .headless(!self.headed)
            .match_mode_handling(handling)
            .build()
    }
}

/// Rewrite `-so` / `-so=<v>` to the long keyword option flag
///
/// A `-so` directly after `-s`/`--schlagwoerter` is the keyword value and is
/// left alone, as is everything after `--`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expects_keywords = false;
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough || expects_keywords {
            expects_keywords = false;
            normalized.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some("-s" | "--schlagwoerter") => {
                expects_keywords = true;
                None
            }
            Some(KEYWORD_OPTION_SHORT) => Some(OsString::from(KEYWORD_OPTION_LONG)),
            Some(text) => text
                .strip_prefix("-so=")
                .map(|value| OsString::from(format!("{KEYWORD_OPTION_LONG}={value}"))),
            None => None,
        };

        normalized.push(rewritten.unwrap_or(arg));
    }

    normalized
}
