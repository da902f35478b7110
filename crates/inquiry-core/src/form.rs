//! Form-side view of an inquiry: the list of fields, their kinds, and the raw
//! values a UI collects before they become [`InquiryDetails`].

use std::collections::{BTreeMap, BTreeSet};

use crate::record::{optional, InquiryDetails};

/// Every input on the inquiry form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    CompanyName,
    ContactName,
    ContactTitle,
    Email,
    Phone,
    Address,
    ProductCategory,
    ProductName,
    Quantity,
    Unit,
    ProductDescription,
    TechnicalSpecs,
    ExistingSystem,
    InstallationRequired,
    TrainingRequired,
    ExpectedDate,
    Urgency,
    BudgetRange,
    ReferenceNumber,
    HowHeard,
    AdditionalNotes,
}

/// What sort of input a field is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Text that may contain line breaks.
    MultiLine,
    /// `YYYY-MM-DD`.
    Date,
    /// One of the urgency levels.
    Choice,
    Checkbox,
}

impl FieldId {
    pub fn all() -> &'static [FieldId] {
        use FieldId::*;
        &[
            CompanyName,
            ContactName,
            ContactTitle,
            Email,
            Phone,
            Address,
            ProductCategory,
            ProductName,
            Quantity,
            Unit,
            ProductDescription,
            TechnicalSpecs,
            ExistingSystem,
            InstallationRequired,
            TrainingRequired,
            ExpectedDate,
            Urgency,
            BudgetRange,
            ReferenceNumber,
            HowHeard,
            AdditionalNotes,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::CompanyName => "Company Name",
            FieldId::ContactName => "Contact Name",
            FieldId::ContactTitle => "Job Title",
            FieldId::Email => "Email",
            FieldId::Phone => "Phone",
            FieldId::Address => "Address",
            FieldId::ProductCategory => "Product Category",
            FieldId::ProductName => "Product/Service Name",
            FieldId::Quantity => "Quantity",
            FieldId::Unit => "Unit",
            FieldId::ProductDescription => "Description",
            FieldId::TechnicalSpecs => "Technical Specifications",
            FieldId::ExistingSystem => "Existing System/Infrastructure",
            FieldId::InstallationRequired => "Installation/Configuration Required",
            FieldId::TrainingRequired => "Training Required",
            FieldId::ExpectedDate => "Expected Date",
            FieldId::Urgency => "Urgency",
            FieldId::BudgetRange => "Budget Range",
            FieldId::ReferenceNumber => "Reference Number",
            FieldId::HowHeard => "How Did You Hear About Us",
            FieldId::AdditionalNotes => "Additional Notes",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::Address
            | FieldId::ProductDescription
            | FieldId::TechnicalSpecs
            | FieldId::ExistingSystem
            | FieldId::AdditionalNotes => FieldKind::MultiLine,
            FieldId::InstallationRequired | FieldId::TrainingRequired => FieldKind::Checkbox,
            FieldId::ExpectedDate => FieldKind::Date,
            FieldId::Urgency => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FieldId::CompanyName
                | FieldId::ContactName
                | FieldId::Email
                | FieldId::Phone
                | FieldId::ProductCategory
                | FieldId::ProductName
                | FieldId::Quantity
                | FieldId::Unit
                | FieldId::ProductDescription
                | FieldId::ExpectedDate
                | FieldId::Urgency
        )
    }

    /// Form group heading the field sits under.
    pub fn group(&self) -> &'static str {
        match self {
            FieldId::CompanyName
            | FieldId::ContactName
            | FieldId::ContactTitle
            | FieldId::Email
            | FieldId::Phone
            | FieldId::Address => "Customer",
            FieldId::ProductCategory
            | FieldId::ProductName
            | FieldId::Quantity
            | FieldId::Unit
            | FieldId::ProductDescription => "Product / Service",
            FieldId::TechnicalSpecs
            | FieldId::ExistingSystem
            | FieldId::InstallationRequired
            | FieldId::TrainingRequired => "Technical",
            FieldId::ExpectedDate | FieldId::Urgency | FieldId::BudgetRange => "Timeline",
            FieldId::ReferenceNumber | FieldId::HowHeard | FieldId::AdditionalNotes => {
                "Additional"
            }
        }
    }
}

/// Raw values typed into the form. Text fields hold whatever was typed;
/// checkboxes are tracked as a set of ticked fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    text: BTreeMap<FieldId, String>,
    checked: BTreeSet<FieldId>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, field: FieldId) -> &str {
        self.text.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn text_mut(&mut self, field: FieldId) -> &mut String {
        self.text.entry(field).or_default()
    }

    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) {
        self.text.insert(field, value.into());
    }

    pub fn is_checked(&self, field: FieldId) -> bool {
        self.checked.contains(&field)
    }

    pub fn set_checked(&mut self, field: FieldId, checked: bool) {
        if checked {
            self.checked.insert(field);
        } else {
            self.checked.remove(&field);
        }
    }

    pub fn toggle(&mut self, field: FieldId) {
        let checked = self.is_checked(field);
        self.set_checked(field, !checked);
    }

    /// Whether nothing has been entered at all.
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty() && self.text.values().all(|v| v.is_empty())
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.checked.clear();
    }

    /// Collect the values into the record shape. Blank optional inputs become `None`.
    pub fn to_details(&self) -> InquiryDetails {
        let req = |f: FieldId| self.text(f).trim().to_string();
        let opt = |f: FieldId| optional(self.text(f));
        InquiryDetails {
            company_name: req(FieldId::CompanyName),
            contact_name: req(FieldId::ContactName),
            contact_title: opt(FieldId::ContactTitle),
            email: req(FieldId::Email),
            phone: req(FieldId::Phone),
            address: opt(FieldId::Address),
            product_category: req(FieldId::ProductCategory),
            product_name: req(FieldId::ProductName),
            quantity: req(FieldId::Quantity),
            unit: req(FieldId::Unit),
            product_description: self.text(FieldId::ProductDescription).to_string(),
            technical_specs: opt(FieldId::TechnicalSpecs),
            existing_system: opt(FieldId::ExistingSystem),
            installation_required: self.is_checked(FieldId::InstallationRequired),
            training_required: self.is_checked(FieldId::TrainingRequired),
            expected_date: req(FieldId::ExpectedDate),
            urgency: req(FieldId::Urgency),
            budget_range: opt(FieldId::BudgetRange),
            reference_number: opt(FieldId::ReferenceNumber),
            how_heard: opt(FieldId::HowHeard),
            additional_notes: opt(FieldId::AdditionalNotes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_table_is_consistent() {
        assert_eq!(FieldId::all().len(), 21);
        let required: Vec<_> = FieldId::all().iter().filter(|f| f.is_required()).collect();
        assert_eq!(required.len(), 11);
        assert!(FieldId::all()
            .iter()
            .filter(|f| f.kind() == FieldKind::Checkbox)
            .all(|f| !f.is_required()));
    }

    #[test]
    fn values_become_details() {
        let mut values = FormValues::new();
        values.set_text(FieldId::CompanyName, "  Acme  ");
        values.set_text(FieldId::ContactTitle, "   ");
        values.set_text(FieldId::Address, "1 Main St\nSpringfield");
        values.set_text(FieldId::Urgency, "High");
        values.toggle(FieldId::TrainingRequired);

        let details = values.to_details();
        assert_eq!(details.company_name, "Acme");
        assert_eq!(details.contact_title, None);
        assert_eq!(details.address.as_deref(), Some("1 Main St\nSpringfield"));
        assert_eq!(details.urgency, "High");
        assert!(details.training_required);
        assert!(!details.installation_required);
    }

    #[test]
    fn clear_and_empty() {
        let mut values = FormValues::new();
        assert!(values.is_empty());
        values.text_mut(FieldId::Phone).push('5');
        values.set_checked(FieldId::InstallationRequired, true);
        assert!(!values.is_empty());
        values.clear();
        assert!(values.is_empty());
        assert_eq!(values.text(FieldId::Phone), "");
    }
}
