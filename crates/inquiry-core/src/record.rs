use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::InquiryConfig;
use crate::date::format_submission_date;

/// Everything the customer fills in on the inquiry form.
///
/// Optional text fields treat a blank string the same as `None`; use
/// [`present`] rather than `Option::is_some` when deciding whether to show one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDetails {
    // ── Customer ────────────────────────────────────────────
    pub company_name: String,
    pub contact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_title: Option<String>,
    pub email: String,
    pub phone: String,
    /// Postal address; may span several lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    // ── Product / service ───────────────────────────────────
    pub product_category: String,
    pub product_name: String,
    /// Numeric quantity as typed by the customer.
    pub quantity: String,
    pub unit: String,
    pub product_description: String,

    // ── Technical ───────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_specs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_system: Option<String>,
    #[serde(default)]
    pub installation_required: bool,
    #[serde(default)]
    pub training_required: bool,

    // ── Timeline ────────────────────────────────────────────
    /// Calendar date in `YYYY-MM-DD` form.
    pub expected_date: String,
    /// One of Low/Medium/High/Critical; anything else is carried verbatim.
    pub urgency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,

    // ── Metadata ────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_heard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

/// A stamped, submitted inquiry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRecord {
    pub inquiry_id: String,
    pub submission_date: String,
    #[serde(flatten)]
    pub details: InquiryDetails,
}

impl InquiryRecord {
    pub fn new(
        inquiry_id: impl Into<String>,
        submission_date: impl Into<String>,
        details: InquiryDetails,
    ) -> Self {
        Self {
            inquiry_id: inquiry_id.into(),
            submission_date: submission_date.into(),
            details,
        }
    }
}

impl InquiryDetails {
    /// Whether any field of the technical section has something to show.
    pub fn has_technical_requirements(&self) -> bool {
        present(&self.technical_specs).is_some()
            || present(&self.existing_system).is_some()
            || self.installation_required
            || self.training_required
    }

    /// Whether any field of the additional-information section has something to show.
    pub fn has_additional_info(&self) -> bool {
        present(&self.reference_number).is_some()
            || present(&self.how_heard).is_some()
            || present(&self.additional_notes).is_some()
    }

    /// Labels of the services the customer ticked, in display order.
    pub fn additional_services(&self) -> Vec<&'static str> {
        let mut services = Vec::new();
        if self.installation_required {
            services.push("Installation/Configuration");
        }
        if self.training_required {
            services.push("Training");
        }
        services
    }
}

/// An inquiry read from a JSON or TOML file. Identity fields are optional so
/// a bare set of details can be stamped on load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFile {
    #[serde(default)]
    pub inquiry_id: Option<String>,
    #[serde(default)]
    pub submission_date: Option<String>,
    #[serde(flatten)]
    pub details: InquiryDetails,
}

impl RecordFile {
    /// Parse by extension: `.toml` as TOML, anything else as JSON.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(serde_json::from_str(&contents)?)
        }
    }
}

impl RecordFile {
    /// Stamp the record. Identity already in the file wins, then the given
    /// `id` / `submitted` values, then a fresh ID and `now`.
    pub fn into_record(
        self,
        id: Option<String>,
        submitted: Option<String>,
        config: &InquiryConfig,
        now: DateTime<Local>,
    ) -> InquiryRecord {
        let inquiry_id = self
            .inquiry_id
            .or(id)
            .unwrap_or_else(|| config.generate_id());
        let submission_date = self
            .submission_date
            .or(submitted)
            .unwrap_or_else(|| format_submission_date(now));
        InquiryRecord::new(inquiry_id, submission_date, self.details)
    }
}

/// The value of an optional field if it holds non-blank text.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Turn a raw form value into an optional field (blank becomes `None`).
pub fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_are_absent() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("   ".to_string())), None);
        assert_eq!(present(&Some("Rack 4".to_string())), Some("Rack 4"));
        assert_eq!(optional(""), None);
        assert_eq!(optional(" x "), Some(" x ".to_string()));
    }

    #[test]
    fn technical_presence_covers_flags_and_text() {
        let mut details = InquiryDetails::default();
        assert!(!details.has_technical_requirements());

        details.training_required = true;
        assert!(details.has_technical_requirements());

        details.training_required = false;
        details.existing_system = Some(String::new());
        assert!(!details.has_technical_requirements());

        details.existing_system = Some("SCADA v2".to_string());
        assert!(details.has_technical_requirements());
    }

    #[test]
    fn services_listed_in_display_order() {
        let details = InquiryDetails {
            installation_required: true,
            training_required: true,
            ..Default::default()
        };
        assert_eq!(
            details.additional_services(),
            vec!["Installation/Configuration", "Training"]
        );
    }

    #[test]
    fn record_file_loads_json_and_toml() {
        let tmp = tempfile::tempdir().unwrap();

        let json_path = tmp.path().join("inquiry.json");
        std::fs::write(
            &json_path,
            r#"{
                "inquiryId": "ASA-9-001",
                "companyName": "Acme", "contactName": "Lee", "email": "lee@acme.io",
                "phone": "1", "productCategory": "Pumps", "productName": "P1",
                "quantity": "2", "unit": "pcs", "productDescription": "Two pumps",
                "expectedDate": "2030-01-01", "urgency": "Low", "trainingRequired": true
            }"#,
        )
        .unwrap();
        let from_json = RecordFile::load(&json_path).unwrap();
        assert_eq!(from_json.inquiry_id.as_deref(), Some("ASA-9-001"));
        assert_eq!(from_json.submission_date, None);
        assert!(from_json.details.training_required);

        let toml_path = tmp.path().join("inquiry.toml");
        std::fs::write(
            &toml_path,
            r#"
            companyName = "Acme"
            contactName = "Lee"
            email = "lee@acme.io"
            phone = "1"
            productCategory = "Pumps"
            productName = "P1"
            quantity = "2"
            unit = "pcs"
            productDescription = "Two pumps"
            expectedDate = "2030-01-01"
            urgency = "Low"
            trainingRequired = true
            "#,
        )
        .unwrap();
        let from_toml = RecordFile::load(&toml_path).unwrap();
        assert_eq!(from_toml.details, from_json.details);
    }

    #[test]
    fn record_file_missing_required_field_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, r#"{"companyName": "Acme"}"#).unwrap();
        assert!(matches!(
            RecordFile::load(&path),
            Err(crate::error::InquiryError::Serialization(_))
        ));
    }

    #[test]
    fn record_serializes_flat_camel_case() {
        let record = InquiryRecord::new(
            "ASA-1-001",
            "6/1/2025, 9:00:00 AM",
            InquiryDetails {
                company_name: "Acme".to_string(),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["inquiryId"], "ASA-1-001");
        assert_eq!(json["companyName"], "Acme");
        assert!(json.get("contactTitle").is_none());

        let back: InquiryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    fn bare_file() -> RecordFile {
        RecordFile {
            inquiry_id: None,
            submission_date: None,
            details: InquiryDetails {
                company_name: "Acme".to_string(),
                ..Default::default()
            },
        }
    }

    fn noon() -> DateTime<Local> {
        use chrono::TimeZone;
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn stamping_prefers_identity_from_the_file() {
        let file = RecordFile {
            inquiry_id: Some("ASA-FILE".to_string()),
            submission_date: Some("from file".to_string()),
            ..bare_file()
        };
        let record = file.into_record(
            Some("ASA-FLAG".to_string()),
            Some("from flag".to_string()),
            &InquiryConfig::default(),
            noon(),
        );
        assert_eq!(record.inquiry_id, "ASA-FILE");
        assert_eq!(record.submission_date, "from file");
        assert_eq!(record.details.company_name, "Acme");
    }

    #[test]
    fn stamping_falls_back_to_given_values() {
        let record = bare_file().into_record(
            Some("ASA-FLAG".to_string()),
            Some("from flag".to_string()),
            &InquiryConfig::default(),
            noon(),
        );
        assert_eq!(record.inquiry_id, "ASA-FLAG");
        assert_eq!(record.submission_date, "from flag");
    }

    #[test]
    fn stamping_generates_what_is_missing() {
        let mut config = InquiryConfig::default();
        config.ids.prefix = "NW".to_string();
        let record = bare_file().into_record(None, None, &config, noon());
        assert!(record.inquiry_id.starts_with("NW-"));
        assert_eq!(record.submission_date, "6/1/2025, 12:00:00 PM");
    }
}
