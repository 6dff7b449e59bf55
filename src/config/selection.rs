//! Journal and year selection
//!
//! Turns what the user asked for (catalog indices, journal names, `all`,
//! year lists) into an already-resolved selection. The harvester never
//! prompts; it only consumes the result of these functions.

use crate::config::types::JournalEntry;
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;

/// Which years of a journal to harvest
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "YearSelectionRepr")]
pub enum YearSelection {
    /// Every year present in the journal's index
    #[default]
    All,
    /// Exactly these years, in the given order
    Years(Vec<u32>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearSelectionRepr {
    Keyword(String),
    List(Vec<u32>),
}

impl TryFrom<YearSelectionRepr> for YearSelection {
    type Error = ConfigError;

    fn try_from(repr: YearSelectionRepr) -> Result<Self, Self::Error> {
        match repr {
            YearSelectionRepr::Keyword(s) => parse_year_selection(&s),
            YearSelectionRepr::List(years) => Ok(Self::Years(years)),
        }
    }
}

/// Parses a year selection typed on the command line
///
/// Accepts `all` (case-insensitive, optionally quoted) or years separated
/// by whitespace and/or commas.
///
/// # Examples
///
/// ```
/// use journal_harvest::config::{parse_year_selection, YearSelection};
///
/// assert_eq!(parse_year_selection("ALL").unwrap(), YearSelection::All);
/// assert_eq!(
///     parse_year_selection("2023 2022,2021").unwrap(),
///     YearSelection::Years(vec![2023, 2022, 2021])
/// );
/// ```
pub fn parse_year_selection(input: &str) -> ConfigResult<YearSelection> {
    let trimmed = input.trim().trim_matches(|c| c == '\'' || c == '"');

    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(YearSelection::All);
    }

    let years = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidYears(format!("'{}' is not a year", token)))
        })
        .collect::<ConfigResult<Vec<u32>>>()?;

    if years.is_empty() {
        return Err(ConfigError::InvalidYears(
            "expected 'all' or at least one year".to_string(),
        ));
    }

    Ok(YearSelection::Years(years))
}

/// Resolves journal selectors against the catalog
///
/// Each selector is either a 1-based catalog index, an exact journal name,
/// or `all`. No selectors means the whole catalog. Selecting the same
/// journal twice keeps only the first occurrence.
pub fn select_journals(
    catalog: &[JournalEntry],
    selectors: &[String],
) -> ConfigResult<Vec<JournalEntry>> {
    if selectors.is_empty()
        || selectors
            .iter()
            .any(|s| s.trim().trim_matches(|c| c == '\'' || c == '"').eq_ignore_ascii_case("all"))
    {
        return Ok(catalog.to_vec());
    }

    let mut selected: Vec<JournalEntry> = Vec::new();

    for selector in selectors {
        let selector = selector.trim();
        let entry = match selector.parse::<usize>() {
            Ok(index) => index
                .checked_sub(1)
                .and_then(|i| catalog.get(i))
                .ok_or_else(|| {
                    ConfigError::UnknownJournal(format!(
                        "index {} is outside 1..={}",
                        index,
                        catalog.len()
                    ))
                })?,
            Err(_) => catalog
                .iter()
                .find(|entry| entry.name == selector)
                .ok_or_else(|| ConfigError::UnknownJournal(selector.to_string()))?,
        };

        if !selected.iter().any(|e| e.name == entry.name) {
            selected.push(entry.clone());
        }
    }

    Ok(selected)
}
