use crate::domain::nav::NavRecord;
use serde::{Deserialize, Serialize};

/// Plan variant requested via `?type=`. Matching runs against the scheme
/// name, which by AMFI convention carries "Direct" or "Regular".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeType {
    Direct,
    Regular,
}

impl SchemeType {
    /// Only the exact literals are recognized; anything else is dropped by
    /// the caller rather than rejected with an error.
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "direct" => Some(Self::Direct),
            "regular" => Some(Self::Regular),
            _ => None,
        }
    }

    fn name_marker(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Regular => "regular",
        }
    }
}

/// Narrowing criteria for one request. Absent field = no constraint from
/// that dimension; present fields AND together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub id: Option<Vec<String>>,
    pub scheme_type: Option<SchemeType>,
    pub date: Option<String>,
}

impl FilterOptions {
    /// Build filters from raw query values. Lenient by contract: an
    /// unrecognized `type` is dropped silently, and empty-string values are
    /// treated as absent. `id` entries are trimmed but empty pieces are kept
    /// (a trailing comma yields an empty entry).
    pub fn from_query(
        id: Option<&str>,
        scheme_type: Option<&str>,
        date: Option<&str>,
    ) -> Self {
        let id = id.filter(|v| !v.is_empty()).map(|v| {
            v.split(',')
                .map(|piece| piece.trim().to_string())
                .collect()
        });

        let scheme_type = scheme_type.and_then(SchemeType::from_query_value);

        let date = date.filter(|v| !v.is_empty()).map(str::to_string);

        Self {
            id,
            scheme_type,
            date,
        }
    }

    fn matches(&self, record: &NavRecord) -> bool {
        if let Some(ids) = &self.id {
            // Substring match against either ISIN, case-sensitive. This is
            // deliberately looser than the by-ISIN lookup's exact equality.
            if !ids.is_empty() {
                let hit = ids.iter().any(|id| {
                    record.isin_div_payout_or_growth.contains(id.as_str())
                        || record.isin_div_reinvestment.contains(id.as_str())
                });
                if !hit {
                    return false;
                }
            }
        }

        if let Some(scheme_type) = self.scheme_type {
            if !record
                .scheme_name
                .to_lowercase()
                .contains(scheme_type.name_marker())
            {
                return false;
            }
        }

        if let Some(date) = &self.date {
            if record.date != *date {
                return false;
            }
        }

        true
    }
}

/// Apply all present predicates, preserving upstream order.
pub fn filter_records(records: &[NavRecord], filters: &FilterOptions) -> Vec<NavRecord> {
    records
        .iter()
        .filter(|record| filters.matches(record))
        .cloned()
        .collect()
}
