//! Plain-text technical summary of a submitted inquiry.
//!
//! The report is a fixed sequence of sections. Each section is described by a
//! [`Section`] entry in [`SECTIONS`]: a heading, a presence predicate and a
//! body renderer. Optional sections are skipped when their predicate is false.

use crate::date::format_long_date;
use crate::priority::priority_label;
use crate::record::{present, InquiryDetails, InquiryRecord};
use crate::wrap::wrap;

/// Width of every rule line.
pub const RULE_WIDTH: usize = 67;

/// Column at which free-text blocks are wrapped.
pub const WRAP_WIDTH: usize = 65;

/// Width of the label column in `Label:  value` lines.
const LABEL_WIDTH: usize = 18;

const ACTION_ITEMS: [&str; 6] = [
    "Review technical specifications",
    "Verify product availability",
    "Prepare cost estimate",
    "Check integration requirements",
    "Schedule follow-up call",
    "Prepare proposal/quote",
];

/// How a section is introduced.
#[derive(Debug, Clone, Copy)]
enum Heading {
    /// Heavy rules around a centred title.
    Banner(&'static str),
    /// Light rules around a left-aligned title.
    Titled(&'static str),
    /// No heading; the body follows the previous section directly.
    Bare,
}

struct Section {
    heading: Heading,
    present: fn(&InquiryDetails) -> bool,
    render: fn(&InquiryRecord, &mut Vec<String>),
}

fn always(_: &InquiryDetails) -> bool {
    true
}

const SECTIONS: &[Section] = &[
    Section {
        heading: Heading::Banner("ASA SALES INQUIRY SUMMARY"),
        present: always,
        render: render_identity,
    },
    Section {
        heading: Heading::Titled("CUSTOMER INFORMATION"),
        present: always,
        render: render_customer,
    },
    Section {
        heading: Heading::Titled("PRODUCT/SERVICE INFORMATION"),
        present: always,
        render: render_product,
    },
    Section {
        heading: Heading::Titled("TECHNICAL REQUIREMENTS"),
        present: InquiryDetails::has_technical_requirements,
        render: render_technical,
    },
    Section {
        heading: Heading::Titled("TIMELINE AND BUDGET"),
        present: always,
        render: render_timeline,
    },
    Section {
        heading: Heading::Titled("ADDITIONAL INFORMATION"),
        present: InquiryDetails::has_additional_info,
        render: render_additional,
    },
    Section {
        heading: Heading::Banner("TECHNICAL DEPARTMENT ACTION ITEMS"),
        present: always,
        render: render_action_items,
    },
    Section {
        heading: Heading::Bare,
        present: always,
        render: render_priority,
    },
];

/// Render the full report. Lines are separated by `\n` with no trailing newline.
pub fn format_report(record: &InquiryRecord) -> String {
    let mut lines = Vec::new();

    for section in SECTIONS {
        if !(section.present)(&record.details) {
            continue;
        }
        match section.heading {
            Heading::Banner(title) => {
                lines.push(heavy_rule());
                lines.push(format!("{:^width$}", title, width = RULE_WIDTH));
                lines.push(heavy_rule());
            }
            Heading::Titled(title) => {
                lines.push(light_rule());
                lines.push(title.to_string());
                lines.push(light_rule());
            }
            Heading::Bare => {}
        }
        (section.render)(record, &mut lines);
    }

    lines.push(heavy_rule());
    lines.join("\n")
}

fn heavy_rule() -> String {
    "═".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// `Label:` padded to the label column, followed by the value.
fn field(label: &str, value: &str) -> String {
    format!("{:<width$}{}", format!("{label}:"), value, width = LABEL_WIDTH)
}

/// A multi-line value whose continuation lines line up under the value column.
fn indented(value: &str) -> String {
    let indent = format!("\n{}", " ".repeat(LABEL_WIDTH));
    value.replace("\r\n", "\n").replace('\n', &indent)
}

fn render_identity(record: &InquiryRecord, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(field("Inquiry ID", &record.inquiry_id));
    lines.push(field("Submission Date", &record.submission_date));
    lines.push(String::new());
}

fn render_customer(record: &InquiryRecord, lines: &mut Vec<String>) {
    let d = &record.details;
    lines.push(field("Company Name", &d.company_name));
    lines.push(field("Contact Name", &d.contact_name));
    if let Some(title) = present(&d.contact_title) {
        lines.push(field("Job Title", title));
    }
    lines.push(field("Email", &d.email));
    lines.push(field("Phone", &d.phone));
    if let Some(address) = present(&d.address) {
        lines.push(field("Address", &indented(address)));
    }
    lines.push(String::new());
}

fn render_product(record: &InquiryRecord, lines: &mut Vec<String>) {
    let d = &record.details;
    lines.push(field("Category", &d.product_category));
    lines.push(field("Product/Service", &d.product_name));
    lines.push(field("Quantity", &format!("{} {}", d.quantity, d.unit)));
    lines.push(String::new());
    lines.push("Description:".to_string());
    lines.push(wrap(&d.product_description, WRAP_WIDTH));
    lines.push(String::new());
}

fn render_technical(record: &InquiryRecord, lines: &mut Vec<String>) {
    let d = &record.details;
    if let Some(specs) = present(&d.technical_specs) {
        lines.push("Technical Specifications:".to_string());
        lines.push(wrap(specs, WRAP_WIDTH));
        lines.push(String::new());
    }
    if let Some(existing) = present(&d.existing_system) {
        lines.push("Existing System/Infrastructure:".to_string());
        lines.push(wrap(existing, WRAP_WIDTH));
        lines.push(String::new());
    }
    let services = d.additional_services();
    if !services.is_empty() {
        lines.push(format!(
            "Additional Services Required: {}",
            services.join(", ")
        ));
        lines.push(String::new());
    }
}

fn render_timeline(record: &InquiryRecord, lines: &mut Vec<String>) {
    let d = &record.details;
    lines.push(field("Expected Date", &format_long_date(&d.expected_date)));
    lines.push(field("Urgency Level", &d.urgency));
    if let Some(budget) = present(&d.budget_range) {
        lines.push(field("Budget Range", budget));
    }
    lines.push(String::new());
}

fn render_additional(record: &InquiryRecord, lines: &mut Vec<String>) {
    let d = &record.details;
    if let Some(reference) = present(&d.reference_number) {
        lines.push(field("Reference Number", reference));
    }
    if let Some(source) = present(&d.how_heard) {
        lines.push(field("Source", source));
    }
    if let Some(notes) = present(&d.additional_notes) {
        lines.push(String::new());
        lines.push("Additional Notes:".to_string());
        lines.push(wrap(notes, WRAP_WIDTH));
    }
    lines.push(String::new());
}

fn render_action_items(_: &InquiryRecord, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.extend(ACTION_ITEMS.iter().map(|item| format!("☐ {item}")));
    lines.push(String::new());
}

fn render_priority(record: &InquiryRecord, lines: &mut Vec<String>) {
    lines.push(format!(
        "Priority Level: {}",
        priority_label(&record.details.urgency)
    ));
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn minimal() -> InquiryRecord {
        InquiryRecord::new(
            "ASA-1748768400000-042",
            "6/1/2025, 9:00:00 AM",
            InquiryDetails {
                company_name: "Northwind Traders".to_string(),
                contact_name: "Sam Ortiz".to_string(),
                email: "sam@northwind.example".to_string(),
                phone: "+1 555 0100".to_string(),
                product_category: "Sensors".to_string(),
                product_name: "Flow meter FM-200".to_string(),
                quantity: "12".to_string(),
                unit: "units".to_string(),
                product_description: "Inline flow meters for the bottling line.".to_string(),
                expected_date: "2025-06-01".to_string(),
                urgency: "Medium".to_string(),
                ..Default::default()
            },
        )
    }

    fn banner(title: &str) -> Vec<String> {
        let pad = (RULE_WIDTH - title.len()) / 2;
        let left = " ".repeat(pad);
        let right = " ".repeat(RULE_WIDTH - title.len() - pad);
        vec![heavy_rule(), format!("{left}{title}{right}"), heavy_rule()]
    }

    fn titled(title: &str) -> Vec<String> {
        vec![light_rule(), title.to_string(), light_rule()]
    }

    #[test]
    fn minimal_report_layout() {
        let mut expected: Vec<String> = Vec::new();
        expected.extend(banner("ASA SALES INQUIRY SUMMARY"));
        expected.extend(
            [
                "",
                "Inquiry ID:       ASA-1748768400000-042",
                "Submission Date:  6/1/2025, 9:00:00 AM",
                "",
            ]
            .map(String::from),
        );
        expected.extend(titled("CUSTOMER INFORMATION"));
        expected.extend(
            [
                "Company Name:     Northwind Traders",
                "Contact Name:     Sam Ortiz",
                "Email:            sam@northwind.example",
                "Phone:            +1 555 0100",
                "",
            ]
            .map(String::from),
        );
        expected.extend(titled("PRODUCT/SERVICE INFORMATION"));
        expected.extend(
            [
                "Category:         Sensors",
                "Product/Service:  Flow meter FM-200",
                "Quantity:         12 units",
                "",
                "Description:",
                "Inline flow meters for the bottling line.",
                "",
            ]
            .map(String::from),
        );
        expected.extend(titled("TIMELINE AND BUDGET"));
        expected.extend(
            [
                "Expected Date:    June 1, 2025",
                "Urgency Level:    Medium",
                "",
            ]
            .map(String::from),
        );
        expected.extend(banner("TECHNICAL DEPARTMENT ACTION ITEMS"));
        expected.extend(
            [
                "",
                "☐ Review technical specifications",
                "☐ Verify product availability",
                "☐ Prepare cost estimate",
                "☐ Check integration requirements",
                "☐ Schedule follow-up call",
                "☐ Prepare proposal/quote",
                "",
                "Priority Level: ●● (Medium - Standard Priority)",
                "",
            ]
            .map(String::from),
        );
        expected.push(heavy_rule());

        assert_eq!(format_report(&minimal()), expected.join("\n"));
    }

    #[test]
    fn rules_are_fixed_width() {
        let report = format_report(&minimal());
        let rules: Vec<&str> = report
            .lines()
            .filter(|l| l.starts_with('═') || l.starts_with('─'))
            .collect();
        assert!(!rules.is_empty());
        for rule in rules {
            assert_eq!(rule.chars().count(), RULE_WIDTH);
        }
    }

    #[test]
    fn deterministic() {
        let record = minimal();
        assert_eq!(format_report(&record), format_report(&record));
    }

    #[test]
    fn optional_sections_absent_without_data() {
        let report = format_report(&minimal());
        assert!(!report.contains("TECHNICAL REQUIREMENTS"));
        assert!(!report.contains("ADDITIONAL INFORMATION"));
        assert!(!report.contains("Job Title:"));
        assert!(!report.contains("Budget Range:"));
    }

    #[test]
    fn blank_optional_text_counts_as_absent() {
        let mut record = minimal();
        record.details.technical_specs = Some("  ".to_string());
        record.details.how_heard = Some(String::new());
        let report = format_report(&record);
        assert!(!report.contains("TECHNICAL REQUIREMENTS"));
        assert!(!report.contains("ADDITIONAL INFORMATION"));
    }

    #[test]
    fn installation_only_service_line() {
        let mut record = minimal();
        record.details.installation_required = true;
        let report = format_report(&record);
        assert!(report.contains("TECHNICAL REQUIREMENTS"));
        assert!(report
            .lines()
            .any(|l| l == "Additional Services Required: Installation/Configuration"));
        assert!(!report.contains("Technical Specifications:"));
    }

    #[test]
    fn technical_section_blocks() {
        let mut record = minimal();
        record.details.technical_specs = Some("4-20 mA output, IP67".to_string());
        record.details.existing_system = Some("Siemens S7 PLC".to_string());
        record.details.training_required = true;
        let report = format_report(&record);
        let expected = [
            "TECHNICAL REQUIREMENTS".to_string(),
            light_rule(),
            "Technical Specifications:".to_string(),
            "4-20 mA output, IP67".to_string(),
            String::new(),
            "Existing System/Infrastructure:".to_string(),
            "Siemens S7 PLC".to_string(),
            String::new(),
            "Additional Services Required: Training".to_string(),
            String::new(),
            light_rule(),
            "TIMELINE AND BUDGET".to_string(),
        ]
        .join("\n");
        assert!(report.contains(&expected), "report was:\n{report}");
    }

    #[test]
    fn additional_information_block() {
        let mut record = minimal();
        record.details.reference_number = Some("PO-7731".to_string());
        record.details.how_heard = Some("Trade show".to_string());
        record.details.additional_notes = Some("Call before noon.".to_string());
        let report = format_report(&record);
        let expected = [
            "ADDITIONAL INFORMATION".to_string(),
            light_rule(),
            "Reference Number: PO-7731".to_string(),
            "Source:           Trade show".to_string(),
            String::new(),
            "Additional Notes:".to_string(),
            "Call before noon.".to_string(),
            String::new(),
            heavy_rule(),
        ]
        .join("\n");
        assert!(report.contains(&expected), "report was:\n{report}");
    }

    #[test]
    fn address_continuation_lines_align() {
        let mut record = minimal();
        record.details.address = Some("12 Dock Road\r\nUnit 4\nPortsmouth".to_string());
        record.details.contact_title = Some("Plant Engineer".to_string());
        let report = format_report(&record);
        let expected = [
            "Job Title:        Plant Engineer",
            "Email:            sam@northwind.example",
            "Phone:            +1 555 0100",
            "Address:          12 Dock Road",
            "                  Unit 4",
            "                  Portsmouth",
        ]
        .join("\n");
        assert!(report.contains(&expected), "report was:\n{report}");
    }

    #[test]
    fn long_description_is_wrapped() {
        let mut record = minimal();
        record.details.product_description = "word ".repeat(40);
        let report = format_report(&record);
        let start = report.find("Description:\n").unwrap() + "Description:\n".len();
        let block: Vec<&str> = report[start..].lines().take_while(|l| !l.is_empty()).collect();
        assert!(block.len() > 1);
        assert!(block.iter().all(|l| l.chars().count() <= WRAP_WIDTH));
    }

    #[test]
    fn priority_and_urgency_lines() {
        let mut record = minimal();
        record.details.urgency = "Critical".to_string();
        let report = format_report(&record);
        assert!(report.contains("Urgency Level:    Critical"));
        assert!(report
            .contains("Priority Level: ●●●● (Critical - Urgent - Immediate Action Required)"));

        record.details.urgency = "Yesterday".to_string();
        let report = format_report(&record);
        assert!(report.contains("Priority Level: Yesterday"));
    }

    #[test]
    fn bad_expected_date_still_renders() {
        let mut record = minimal();
        record.details.expected_date = "soon".to_string();
        let report = format_report(&record);
        assert!(report.contains("Expected Date:    Invalid Date"));
        assert!(report.ends_with(&heavy_rule()));
    }
}
