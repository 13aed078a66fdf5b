//! Search queries and the company records extracted from result pages

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cache::{CacheKey, KeyScheme};
use crate::error::{RegisterError, RegisterResult};
use crate::utils::collapse_whitespace;

/// How the portal should match the search keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Company name contains all keywords
    #[default]
    All,
    /// Company name contains at least one keyword
    Min,
    /// Company name equals the keywords
    Exact,
}

impl MatchMode {
    /// Value the portal form submits for this option
    #[must_use]
    pub fn form_value(self) -> u8 {
        match self {
            Self::All => 1,
            Self::Min => 2,
            Self::Exact => 3,
        }
    }

    /// Position of the radio button within the keyword option group
    #[must_use]
    pub fn option_index(self) -> usize {
        usize::from(self.form_value() - 1)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Min => "min",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword search against the register
///
/// Immutable once constructed; the keywords are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keywords: String,
    match_mode: MatchMode,
    force_refresh: bool,
}

impl SearchQuery {
    /// Create a query, rejecting empty or whitespace-only keywords
    pub fn new(keywords: impl Into<String>, match_mode: MatchMode) -> RegisterResult<Self> {
        let keywords = keywords.into();
        let trimmed = keywords.trim();
        if trimmed.is_empty() {
            return Err(RegisterError::InvalidQuery(
                "keywords cannot be empty or whitespace-only".to_string(),
            ));
        }

        Ok(Self {
            keywords: trimmed.to_string(),
            match_mode,
            force_refresh: false,
        })
    }

    /// Skip the cache lookup and always fetch a fresh page
    #[must_use]
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    #[must_use]
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    #[must_use]
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    #[must_use]
    pub fn force_refresh(&self) -> bool {
        self.force_refresh
    }

    /// Keywords with inner whitespace runs collapsed, as used for cache keys
    #[must_use]
    pub fn normalized_keywords(&self) -> String {
        collapse_whitespace(&self.keywords)
    }

    /// Cache key this query's result page is stored under
    pub fn cache_key(&self, scheme: KeyScheme) -> RegisterResult<CacheKey> {
        CacheKey::derive(&self.keywords, scheme)
    }
}

/// A former registration of a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Name the company was registered under
    pub name: String,
    /// Seat of the company at that time
    pub location: String,
}

/// One company row of the result grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Register court, e.g. "Berlin (Charlottenburg) HRB 44343"
    pub court: String,
    pub name: String,
    /// Federal state
    pub state: String,
    /// Registration status ("aktuell", "gelöscht", ...)
    pub status: String,
    /// Raw text of the documents column
    pub documents: String,
    pub history: Vec<HistoryEntry>,
}

impl fmt::Display for CompanyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "court: {}", self.court)?;
        writeln!(f, "state: {}", self.state)?;
        writeln!(f, "status: {}", self.status)?;
        writeln!(f, "history:")?;
        for entry in &self.history {
            writeln!(f, "{} {}", entry.name, entry.location)?;
        }
        Ok(())
    }
}

/// Companies of one result page, in row-index order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResultSet {
    records: Vec<CompanyRecord>,
}

impl SearchResultSet {
    #[must_use]
    pub fn new(records: Vec<CompanyRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&CompanyRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompanyRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CompanyRecord> {
        self.records
    }
}

/// Text output: the record blocks back to back, one line per field
impl fmt::Display for SearchResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SearchResultSet {
    type Item = &'a CompanyRecord;
    type IntoIter = std::slice::Iter<'a, CompanyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for SearchResultSet {
    type Item = CompanyRecord;
    type IntoIter = std::vec::IntoIter<CompanyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
