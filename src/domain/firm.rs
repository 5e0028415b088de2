//! Venture capital firm record.
//!
//! A [`Firm`] is one entry of the directory. Records are deserialized from the
//! corpus JSON (camelCase field names) and are never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Date format used for the "Last verified" line of a result card.
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// A venture capital firm in the directory.
///
/// # Fields
///
/// - `id`: Unique identifier within the corpus
/// - `industries`: Ordered investment focus tags, matched case-insensitively
/// - `email_validated` / `last_validated`: Contact verification status and the
///   ISO-8601 date it was last checked
/// - `founded` / `aum`: Display strings, not interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Firm {
    pub id: String,
    pub name: String,
    pub industries: Vec<String>,
    pub website: String,
    pub email: String,
    pub email_validated: bool,
    pub last_validated: String,
    pub country: String,
    pub description: String,
    pub founded: String,
    pub aum: String,
}

impl Firm {
    /// Returns `true` if any industry tag contains `needle_lower`.
    ///
    /// The needle must already be lowercased; tags are lowercased on the fly.
    #[must_use]
    pub fn has_industry_matching(&self, needle_lower: &str) -> bool {
        self.industries
            .iter()
            .any(|industry| industry.to_lowercase().contains(needle_lower))
    }

    /// Formats `last_validated` for display, e.g. `"Mar 4, 2025"`.
    ///
    /// Accepts either a plain date (`2025-03-04`) or an RFC 3339 timestamp.
    /// Anything else is returned verbatim rather than hidden.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vcfinder::domain::Firm;
    /// # let mut firm: Firm = serde_json::from_value(serde_json::json!({
    /// #     "id": "1", "name": "Acme Ventures", "industries": ["fintech"],
    /// #     "website": "https://acme.example.com", "email": "deals@acme.example.com",
    /// #     "emailValidated": true, "lastValidated": "", "country": "United States",
    /// #     "description": "", "founded": "2010", "aum": "$500M"
    /// # })).unwrap();
    /// firm.last_validated = "2025-03-04".to_string();
    /// assert_eq!(firm.last_validated_display(), "Mar 4, 2025");
    /// ```
    #[must_use]
    pub fn last_validated_display(&self) -> String {
        let raw = self.last_validated.trim();

        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format(DISPLAY_DATE_FORMAT).to_string();
        }
        if let Ok(timestamp) = chrono::DateTime::parse_from_rfc3339(raw) {
            return timestamp.date_naive().format(DISPLAY_DATE_FORMAT).to_string();
        }

        tracing::debug!(firm_id = %self.id, last_validated = %raw, "unparseable validation date");
        raw.to_string()
    }

    /// Label of the contact validation badge.
    #[must_use]
    pub const fn validation_label(&self) -> &'static str {
        if self.email_validated {
            "Verified Email"
        } else {
            "Pending"
        }
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    //! Builders shared by the unit tests.

    use super::Firm;

    /// Builds a firm with the given id and industries and placeholder contact details.
    pub fn sample(id: &str, industries: &[&str]) -> Firm {
        Firm {
            id: id.to_string(),
            name: format!("Firm {id}"),
            industries: industries.iter().map(|s| (*s).to_string()).collect(),
            website: format!("https://firm{id}.example.com"),
            email: format!("deals@firm{id}.example.com"),
            email_validated: true,
            last_validated: "2025-01-15".to_string(),
            country: "United States".to_string(),
            description: "Early-stage investor.".to_string(),
            founded: "2010".to_string(),
            aum: "$500M".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::tests_support::sample;

    #[test]
    fn industry_match_is_case_insensitive() {
        let firm = sample("1", &["FinTech", "SaaS"]);
        assert!(firm.has_industry_matching("fint"));
        assert!(firm.has_industry_matching("saas"));
        assert!(!firm.has_industry_matching("health"));
    }

    #[test]
    fn formats_plain_and_rfc3339_dates() {
        let mut firm = sample("1", &["AI"]);
        firm.last_validated = "2024-12-01".to_string();
        assert_eq!(firm.last_validated_display(), "Dec 1, 2024");

        firm.last_validated = "2024-06-30T10:00:00Z".to_string();
        assert_eq!(firm.last_validated_display(), "Jun 30, 2024");
    }

    #[test]
    fn unparseable_date_is_shown_verbatim() {
        let mut firm = sample("1", &["AI"]);
        firm.last_validated = "last spring".to_string();
        assert_eq!(firm.last_validated_display(), "last spring");
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "id": "7",
            "name": "Northwind Ventures",
            "industries": ["fintech"],
            "website": "https://northwind.example.com",
            "email": "hello@northwind.example.com",
            "emailValidated": false,
            "lastValidated": "2025-02-01",
            "country": "Canada",
            "description": "Seed fund.",
            "founded": "2015",
            "aum": "$120M"
        }"#;

        let firm: super::Firm = serde_json::from_str(json).unwrap();
        assert_eq!(firm.id, "7");
        assert!(!firm.email_validated);
        assert_eq!(firm.validation_label(), "Pending");
    }
}
