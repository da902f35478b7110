//! Checks run on form input before an inquiry is stamped and formatted.
//!
//! The report formatter assumes these have passed; it never validates.

use chrono::NaiveDate;
use thiserror::Error;

use crate::date::parse_iso_date;
use crate::form::FieldId;
use crate::priority::Urgency;
use crate::record::{present, InquiryDetails};

/// What is wrong with a field; reads as the tail of "<label> ...".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    #[error("is required")]
    Missing,
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("must be a positive number")]
    InvalidQuantity,
    #[error("must be a date (YYYY-MM-DD)")]
    InvalidDate,
    #[error("cannot be in the past")]
    DateInPast,
    #[error("must be Low, Medium, High or Critical")]
    UnknownUrgency,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} {}", .field.label(), .problem)]
pub struct FieldError {
    pub field: FieldId,
    pub problem: Problem,
}

/// All problems found in one pass over the form, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    messages.join("; ")
}

/// Validate every field. `today` is the earliest acceptable expected date.
pub fn validate(details: &InquiryDetails, today: NaiveDate) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = FieldId::all()
        .iter()
        .filter_map(|field| validate_field(*field, details, today))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Validate a single field, as done when focus leaves it.
pub fn validate_field(field: FieldId, details: &InquiryDetails, today: NaiveDate) -> Option<FieldError> {
    let value = field_value(field, details);

    if field.is_required() && value.map_or(true, |v| v.trim().is_empty()) {
        return Some(FieldError {
            field,
            problem: Problem::Missing,
        });
    }
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    let problem = match field {
        FieldId::Email if !is_email(value) => Some(Problem::InvalidEmail),
        FieldId::Quantity if !is_positive_number(value) => Some(Problem::InvalidQuantity),
        FieldId::ExpectedDate => match parse_iso_date(value) {
            None => Some(Problem::InvalidDate),
            Some(date) if date < today => Some(Problem::DateInPast),
            Some(_) => None,
        },
        FieldId::Urgency if value.parse::<Urgency>().is_err() => Some(Problem::UnknownUrgency),
        _ => None,
    };
    problem.map(|problem| FieldError { field, problem })
}

/// Text value of a field; `None` for checkboxes and absent optional text.
fn field_value(field: FieldId, d: &InquiryDetails) -> Option<&str> {
    match field {
        FieldId::CompanyName => Some(&d.company_name),
        FieldId::ContactName => Some(&d.contact_name),
        FieldId::ContactTitle => present(&d.contact_title),
        FieldId::Email => Some(&d.email),
        FieldId::Phone => Some(&d.phone),
        FieldId::Address => present(&d.address),
        FieldId::ProductCategory => Some(&d.product_category),
        FieldId::ProductName => Some(&d.product_name),
        FieldId::Quantity => Some(&d.quantity),
        FieldId::Unit => Some(&d.unit),
        FieldId::ProductDescription => Some(&d.product_description),
        FieldId::TechnicalSpecs => present(&d.technical_specs),
        FieldId::ExistingSystem => present(&d.existing_system),
        FieldId::InstallationRequired | FieldId::TrainingRequired => None,
        FieldId::ExpectedDate => Some(&d.expected_date),
        FieldId::Urgency => Some(&d.urgency),
        FieldId::BudgetRange => present(&d.budget_range),
        FieldId::ReferenceNumber => present(&d.reference_number),
        FieldId::HowHeard => present(&d.how_heard),
        FieldId::AdditionalNotes => present(&d.additional_notes),
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn is_positive_number(value: &str) -> bool {
    value
        .parse::<f64>()
        .map(|n| n.is_finite() && n > 0.0)
        .unwrap_or(false)
}
