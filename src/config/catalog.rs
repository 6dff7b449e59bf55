//! Built-in journal catalog
//!
//! Used when the configuration file does not list any `[[journal]]`.

use crate::config::types::JournalEntry;

const DEFAULT_JOURNALS: &[(&str, &str)] = &[
    (
        "American Economic Review",
        "https://econpapers.repec.org/article/aeaaecrev/",
    ),
    (
        "The Quarterly Journal of Economics",
        "https://econpapers.repec.org/article/oupqjecon/",
    ),
    (
        "Journal of Political Economy",
        "https://econpapers.repec.org/article/ucpjpolec/",
    ),
    (
        "The Review of Economic Studies",
        "https://econpapers.repec.org/article/ouprestud/",
    ),
    (
        "Econometrica",
        "https://econpapers.repec.org/article/wlyemetrp/",
    ),
    (
        "The Review of Economics and Statistics",
        "https://econpapers.repec.org/article/tprrestat/",
    ),
    (
        "Journal of Econometrics",
        "https://econpapers.repec.org/article/eeeeconom/",
    ),
    (
        "Journal of Economic Literature",
        "https://econpapers.repec.org/article/aeajeclit/",
    ),
    (
        "AEJ: Applied Economics",
        "https://econpapers.repec.org/article/aeaaejapp/",
    ),
    (
        "AEJ: Economic Policy",
        "https://econpapers.repec.org/article/aeaaejpol/",
    ),
];

/// Returns the built-in catalog, every journal selecting all years
pub fn default_journals() -> Vec<JournalEntry> {
    DEFAULT_JOURNALS
        .iter()
        .map(|(name, url)| JournalEntry::new(name, url))
        .collect()
}
