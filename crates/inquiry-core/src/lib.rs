pub mod config;
pub mod controller;
pub mod date;
pub mod error;
pub mod export;
pub mod form;
pub mod id;
pub mod priority;
pub mod record;
pub mod report;
pub mod validate;
pub mod wrap;

pub use config::InquiryConfig;
pub use controller::{InquiryController, Submission, ViewState};
pub use error::{InquiryError, Result};
pub use record::{InquiryDetails, InquiryRecord};
pub use report::format_report;
