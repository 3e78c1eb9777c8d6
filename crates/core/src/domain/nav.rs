use serde::{Deserialize, Serialize};

/// One scheme's latest published NAV, exactly as the upstream feed states it.
/// The NAV value and date are kept as text; the feed gives no guarantee they
/// parse, and the API contract passes them through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavRecord {
    pub scheme_code: String,
    pub isin_div_payout_or_growth: String,
    pub isin_div_reinvestment: String,
    pub scheme_name: String,
    pub net_asset_value: String,
    pub date: String,
}

impl NavRecord {
    /// Exact-equality lookup key: a record is addressed by either ISIN.
    pub fn has_isin(&self, isin: &str) -> bool {
        self.isin_div_payout_or_growth == isin || self.isin_div_reinvestment == isin
    }
}

/// Projection of a record onto its identifying fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeName {
    pub scheme_code: String,
    pub scheme_name: String,
    pub isin_div_payout_or_growth: String,
    pub isin_div_reinvestment: String,
}

impl From<&NavRecord> for SchemeName {
    fn from(record: &NavRecord) -> Self {
        Self {
            scheme_code: record.scheme_code.clone(),
            scheme_name: record.scheme_name.clone(),
            isin_div_payout_or_growth: record.isin_div_payout_or_growth.clone(),
            isin_div_reinvestment: record.isin_div_reinvestment.clone(),
        }
    }
}

/// Candidate record before validation. Feed lines frequently fail to fill all
/// six fields (section headers, blanks, truncated rows); an unfilled field is
/// the normal rejection path, not an error.
#[derive(Debug, Clone, Default)]
pub struct RawNavRecord {
    pub scheme_code: Option<String>,
    pub isin_div_payout_or_growth: Option<String>,
    pub isin_div_reinvestment: Option<String>,
    pub scheme_name: Option<String>,
    pub net_asset_value: Option<String>,
    pub date: Option<String>,
}

impl RawNavRecord {
    /// All six fields must be present. Empty strings are allowed and no
    /// semantic checks run here (no NAV numeric check, no date format check,
    /// no ISIN shape check) — the feed is too unreliable for stricter gates.
    pub fn validate(self) -> Option<NavRecord> {
        Some(NavRecord {
            scheme_code: self.scheme_code?,
            isin_div_payout_or_growth: self.isin_div_payout_or_growth?,
            isin_div_reinvestment: self.isin_div_reinvestment?,
            scheme_name: self.scheme_name?,
            net_asset_value: self.net_asset_value?,
            date: self.date?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawNavRecord {
        RawNavRecord {
            scheme_code: Some("101".to_string()),
            isin_div_payout_or_growth: Some("INE001".to_string()),
            isin_div_reinvestment: Some("INE002".to_string()),
            scheme_name: Some("ABC Fund Direct Growth".to_string()),
            net_asset_value: Some("15.234".to_string()),
            date: Some("01-Jan-2024".to_string()),
        }
    }

    #[test]
    fn validates_when_all_fields_present() {
        let record = full_raw().validate().unwrap();
        assert_eq!(record.scheme_code, "101");
        assert_eq!(record.date, "01-Jan-2024");
    }

    #[test]
    fn rejects_any_missing_field() {
        let raw = RawNavRecord {
            date: None,
            ..full_raw()
        };
        assert!(raw.validate().is_none());
    }

    #[test]
    fn accepts_empty_string_fields() {
        let raw = RawNavRecord {
            isin_div_reinvestment: Some(String::new()),
            ..full_raw()
        };
        assert!(raw.validate().is_some());
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let record = full_raw().validate().unwrap();
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["schemeCode"], "101");
        assert_eq!(v["isinDivPayoutOrGrowth"], "INE001");
        assert_eq!(v["netAssetValue"], "15.234");
    }

    #[test]
    fn scheme_name_projection_drops_nav_and_date() {
        let record = full_raw().validate().unwrap();
        let name = SchemeName::from(&record);
        let v = serde_json::to_value(&name).unwrap();
        assert_eq!(v["schemeName"], "ABC Fund Direct Growth");
        assert!(v.get("netAssetValue").is_none());
        assert!(v.get("date").is_none());
    }

    #[test]
    fn has_isin_is_exact_match_only() {
        let mut record = full_raw().validate().unwrap();
        record.isin_div_payout_or_growth = "INE0011234".to_string();
        assert!(record.has_isin("INE0011234"));
        assert!(!record.has_isin("INE001"));
        assert!(record.has_isin("INE002"));
    }
}
