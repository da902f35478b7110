use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How soon the customer needs an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn all() -> &'static [Urgency] {
        &[
            Urgency::Low,
            Urgency::Medium,
            Urgency::High,
            Urgency::Critical,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        }
    }

    /// Label with one glyph per severity step.
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "● (Low - Flexible Timeline)",
            Urgency::Medium => "●● (Medium - Standard Priority)",
            Urgency::High => "●●● (High - Important)",
            Urgency::Critical => "●●●● (Critical - Urgent - Immediate Action Required)",
        }
    }

    /// Next level, wrapping from Critical back to Low.
    pub fn next(&self) -> Urgency {
        match self {
            Urgency::Low => Urgency::Medium,
            Urgency::Medium => Urgency::High,
            Urgency::High => Urgency::Critical,
            Urgency::Critical => Urgency::Low,
        }
    }

    /// Previous level, wrapping from Low to Critical.
    pub fn prev(&self) -> Urgency {
        match self {
            Urgency::Low => Urgency::Critical,
            Urgency::Medium => Urgency::Low,
            Urgency::High => Urgency::Medium,
            Urgency::Critical => Urgency::High,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown urgency level '{0}'")]
pub struct UnknownUrgency(pub String);

impl FromStr for Urgency {
    type Err = UnknownUrgency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Urgency::all()
            .iter()
            .copied()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| UnknownUrgency(s.to_string()))
    }
}

/// Display label for a raw urgency value. Unknown values come back unchanged.
pub fn priority_label(urgency: &str) -> Cow<'_, str> {
    match urgency.parse::<Urgency>() {
        Ok(level) => Cow::Borrowed(level.label()),
        Err(_) => Cow::Borrowed(urgency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_map_to_labels() {
        assert_eq!(priority_label("Low"), "● (Low - Flexible Timeline)");
        assert_eq!(priority_label("Medium"), "●● (Medium - Standard Priority)");
        assert_eq!(priority_label("High"), "●●● (High - Important)");
        assert_eq!(
            priority_label("Critical"),
            "●●●● (Critical - Urgent - Immediate Action Required)"
        );
    }

    #[test]
    fn unknown_level_passes_through() {
        assert_eq!(priority_label("Whenever"), "Whenever");
        assert_eq!(priority_label("critical"), "critical");
        assert_eq!(priority_label(""), "");
    }

    #[test]
    fn cycling_visits_every_level() {
        let mut level = Urgency::Low;
        for expected in [Urgency::Medium, Urgency::High, Urgency::Critical, Urgency::Low] {
            level = level.next();
            assert_eq!(level, expected);
        }
        assert_eq!(Urgency::Low.prev(), Urgency::Critical);
        assert_eq!(Urgency::Critical.prev().next(), Urgency::Critical);
    }

    #[test]
    fn parses_exact_names_only() {
        assert_eq!("High".parse::<Urgency>(), Ok(Urgency::High));
        assert!("HIGH".parse::<Urgency>().is_err());
    }

    #[test]
    fn unknown_level_error_names_the_value() {
        let err = "ASAP".parse::<Urgency>().unwrap_err();
        assert_eq!(err.to_string(), "unknown urgency level 'ASAP'");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
