//! Inquiry ID generation.
//!
//! The default scheme is `<prefix>-<epoch millis>-<3 random digits>`, which
//! is only unique enough for a single desk. The `uuid` scheme swaps the time
//! and random parts for a v4 UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "ASA";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// `ASA-1717243200000-042`
    #[default]
    Timestamp,
    /// `ASA-67e5504410b1426f9247bb680e5fe0c8`
    Uuid,
}

impl IdScheme {
    pub fn generate(&self, prefix: &str) -> String {
        match self {
            IdScheme::Timestamp => {
                let millis = chrono::Utc::now().timestamp_millis();
                format!("{}-{}-{:03}", prefix, millis, random_suffix())
            }
            IdScheme::Uuid => format!("{}-{}", prefix, Uuid::new_v4().simple()),
        }
    }
}

/// Generate an inquiry ID with the default scheme and prefix.
pub fn generate_id() -> String {
    IdScheme::default().generate(DEFAULT_PREFIX)
}

/// A number in `0..1000` taken from the random bits of a v4 UUID.
fn random_suffix() -> u16 {
    (Uuid::new_v4().as_u128() % 1000) as u16
}
