//! Per-session form controller.
//!
//! Owns the per-session state: whether the form has unsaved edits, and the
//! last submitted inquiry with its rendered report.
//! A UI layer calls the `on_*` methods in response to user events and asks
//! for any confirmation itself before calling them.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::config::InquiryConfig;
use crate::date::format_submission_date;
use crate::error::{InquiryError, Result};
use crate::export::{self, Clipboard};
use crate::record::{InquiryDetails, InquiryRecord};
use crate::report::format_report;
use crate::validate::validate;

/// A stamped inquiry together with its rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub record: InquiryRecord,
    pub report: String,
}

impl Submission {
    pub fn inquiry_id(&self) -> &str {
        &self.record.inquiry_id
    }
}

/// What the UI should be showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// The form is open for input.
    Editing,
    /// The form is hidden and the summary of this submission is shown.
    Submitted(Submission),
}

pub struct InquiryController {
    config: InquiryConfig,
    view: ViewState,
    /// Set by any input into the form; cleared on submit, reset and close.
    changed: bool,
}

impl InquiryController {
    pub fn new(config: InquiryConfig) -> Self {
        Self {
            config,
            view: ViewState::Editing,
            changed: false,
        }
    }

    pub fn config(&self) -> &InquiryConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn submission(&self) -> Option<&Submission> {
        match &self.view {
            ViewState::Submitted(submission) => Some(submission),
            ViewState::Editing => None,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Record that the user typed into the form.
    pub fn on_input(&mut self) {
        if self.view == ViewState::Editing {
            self.changed = true;
        }
    }

    /// Validate, stamp and render the inquiry, then switch to the summary.
    pub fn on_submit(&mut self, details: InquiryDetails, now: DateTime<Local>) -> Result<&Submission> {
        if let Err(errors) = validate(&details, now.date_naive()) {
            debug!(%errors, "Inquiry rejected");
            return Err(InquiryError::Validation(errors));
        }

        let record = InquiryRecord::new(
            self.config.generate_id(),
            format_submission_date(now),
            details,
        );
        let report = format_report(&record);

        info!(
            inquiry_id = %record.inquiry_id,
            company = %record.details.company_name,
            urgency = %record.details.urgency,
            "Inquiry submitted to technical department"
        );
        debug!(report = %report, "Formatted summary");

        self.changed = false;
        self.view = ViewState::Submitted(Submission { record, report });
        self.submission().ok_or(InquiryError::NothingSubmitted)
    }

    /// The form was cleared.
    pub fn on_reset(&mut self) {
        self.changed = false;
    }

    /// Copy the current report to `clipboard`.
    pub fn on_copy(&self, clipboard: &mut dyn Clipboard) -> Result<()> {
        let submission = self.submission().ok_or(InquiryError::NothingSubmitted)?;
        clipboard.set_text(&submission.report).inspect_err(|e| {
            warn!(error = %e, "Copy to clipboard failed");
        })?;
        info!(inquiry_id = %submission.inquiry_id(), "Report copied to clipboard");
        Ok(())
    }

    /// Save the current report as `inquiry_<id>.txt` in the download directory.
    pub fn on_download(&self) -> Result<PathBuf> {
        let submission = self.submission().ok_or(InquiryError::NothingSubmitted)?;
        export::write_download(
            &self.config.export.download_dir,
            submission.inquiry_id(),
            &submission.report,
        )
        .inspect_err(|e| warn!(error = %e, "Download failed"))
    }

    /// Leave the summary and start a fresh inquiry.
    pub fn on_close(&mut self) {
        self.view = ViewState::Editing;
        self.changed = false;
    }

    /// Whether leaving now would lose typed input.
    pub fn should_guard_exit(&self) -> bool {
        self.changed && self.view == ViewState::Editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemoryClipboard;
    use crate::form::FieldId;
    use crate::validate::Problem;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 15, 4, 5).unwrap()
    }

    fn details() -> InquiryDetails {
        InquiryDetails {
            company_name: "Northwind Traders".to_string(),
            contact_name: "Sam Ortiz".to_string(),
            email: "sam@northwind.example".to_string(),
            phone: "+1 555 0100".to_string(),
            product_category: "Sensors".to_string(),
            product_name: "FM-200".to_string(),
            quantity: "12".to_string(),
            unit: "units".to_string(),
            product_description: "Flow meters".to_string(),
            expected_date: "2025-06-15".to_string(),
            urgency: "Critical".to_string(),
            ..Default::default()
        }
    }

    fn controller(download_dir: PathBuf) -> InquiryController {
        let mut config = InquiryConfig::default();
        config.export.download_dir = download_dir;
        InquiryController::new(config)
    }

    #[test]
    fn submit_stamps_and_renders() {
        let mut ctl = controller(PathBuf::from("."));
        ctl.on_input();
        assert!(ctl.should_guard_exit());

        let submission = ctl.on_submit(details(), now()).unwrap().clone();
        assert!(submission.inquiry_id().starts_with("ASA-"));
        assert_eq!(submission.record.submission_date, "6/1/2025, 3:04:05 PM");
        assert!(submission.report.contains(submission.inquiry_id()));
        assert!(submission.report.contains("Expected Date:    June 15, 2025"));

        assert!(!ctl.is_changed());
        assert!(!ctl.should_guard_exit());
        assert_eq!(ctl.view(), &ViewState::Submitted(submission));
    }

    #[test]
    fn invalid_submit_keeps_form_open() {
        let mut ctl = controller(PathBuf::from("."));
        ctl.on_input();
        let mut bad = details();
        bad.expected_date = "2025-05-01".to_string();

        match ctl.on_submit(bad, now()) {
            Err(InquiryError::Validation(errors)) => {
                let first = errors.first().unwrap();
                assert_eq!(first.field, FieldId::ExpectedDate);
                assert_eq!(first.problem, Problem::DateInPast);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(ctl.view(), &ViewState::Editing);
        assert!(ctl.should_guard_exit());
    }

    #[test]
    fn exports_need_a_submission() {
        let ctl = controller(PathBuf::from("."));
        let mut clipboard = MemoryClipboard::default();
        assert!(matches!(
            ctl.on_copy(&mut clipboard),
            Err(InquiryError::NothingSubmitted)
        ));
        assert!(matches!(ctl.on_download(), Err(InquiryError::NothingSubmitted)));
        assert!(clipboard.contents.is_none());
    }

    #[test]
    fn copy_and_download_export_the_report() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ctl = controller(tmp.path().to_path_buf());
        let submission = ctl.on_submit(details(), now()).unwrap().clone();

        let mut clipboard = MemoryClipboard::default();
        ctl.on_copy(&mut clipboard).unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some(submission.report.as_str()));

        let path = ctl.on_download().unwrap();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("inquiry_{}.txt", submission.inquiry_id())
        );
        assert_eq!(std::fs::read_to_string(path).unwrap(), submission.report);
    }

    #[test]
    fn failing_clipboard_is_reported() {
        struct Broken;
        impl Clipboard for Broken {
            fn set_text(&mut self, _: &str) -> Result<()> {
                Err(InquiryError::Clipboard("no display".to_string()))
            }
        }

        let mut ctl = controller(PathBuf::from("."));
        ctl.on_submit(details(), now()).unwrap();
        assert!(matches!(
            ctl.on_copy(&mut Broken),
            Err(InquiryError::Clipboard(_))
        ));
    }

    #[test]
    fn close_returns_to_clean_form() {
        let mut ctl = controller(PathBuf::from("."));
        ctl.on_submit(details(), now()).unwrap();
        ctl.on_input();
        assert!(!ctl.is_changed(), "input while the summary shows is ignored");

        ctl.on_close();
        assert_eq!(ctl.view(), &ViewState::Editing);
        assert!(ctl.submission().is_none());

        ctl.on_input();
        ctl.on_reset();
        assert!(!ctl.should_guard_exit());
    }
}
