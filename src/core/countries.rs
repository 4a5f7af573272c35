//! Country-of-origin code conversion.
//!
//! Turkish customs declarations identify origin by a 3-digit numeric code
//! rather than the ISO 3166-1 alpha-2 code carried on line items. The
//! built-in table covers the sourcing countries seen in practice; callers
//! can layer their own mappings on top per invocation.

use std::collections::HashMap;

/// Built-in alpha-2 → 3-digit numeric code table.
/// Sorted by alpha-2 code for binary search.
static DEFAULT_COUNTRY_CODES: &[(&str, &str)] = &[
    ("AL", "070"),
    ("AQ", "891"),
    ("CA", "404"),
    ("CM", "302"),
    ("CN", "720"),
    ("CO", "480"),
    ("GT", "416"),
    ("HK", "740"),
    ("ID", "700"),
    ("IT", "005"),
    ("JO", "628"),
    ("KH", "696"),
    ("LK", "669"),
    ("NI", "432"),
    ("PH", "708"),
    ("RO", "066"),
    ("SG", "706"),
    ("SV", "428"),
    ("TH", "680"),
    ("TR", "052"),
    ("TW", "736"),
    ("US", "400"),
    ("VN", "690"),
];

/// The country code table with per-invocation overrides layered on top.
///
/// The default table is never mutated; overrides win on key collision.
#[derive(Debug, Clone, Default)]
pub struct CountryCodeMap {
    overrides: HashMap<String, String>,
}

impl CountryCodeMap {
    /// The built-in table with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer caller-supplied mappings on top of the built-in table.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let overrides = overrides
            .into_iter()
            .map(|(alpha2, code)| (alpha2.to_uppercase(), code))
            .collect();
        Self { overrides }
    }

    /// Resolve an alpha-2 code (case-insensitive) to its 3-digit numeric
    /// code.
    ///
    /// Unmapped codes resolve to an empty string rather than failing the
    /// run; the gap is logged so upstream data quality issues stay visible.
    pub fn resolve(&self, alpha2: &str) -> String {
        if alpha2.is_empty() {
            return String::new();
        }
        let key = alpha2.to_uppercase();
        if let Some(code) = self.overrides.get(&key) {
            return code.clone();
        }
        match DEFAULT_COUNTRY_CODES.binary_search_by_key(&key.as_str(), |(alpha2, _)| alpha2) {
            Ok(index) => DEFAULT_COUNTRY_CODES[index].1.to_string(),
            Err(_) => {
                log::warn!("no numeric code for country of origin {key:?}, leaving blank");
                String::new()
            }
        }
    }
}
