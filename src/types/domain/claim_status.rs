use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Claim lifecycle state
///
/// `Pending -> {Approved, Rejected}` is the review track; `Processing -> Completed`
/// is set independently by payment handling. Nothing is strictly terminal and any
/// other string is preserved verbatim in `Other`. A missing and an empty status
/// are the same thing (`Unset`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClaimStatus {
    #[default]
    Unset,
    Pending,
    Approved,
    Rejected,
    Processing,
    Completed,
    Other(String),
}

/// Bootstrap contextual class used by the UI for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    Warning,
    Success,
    Danger,
    Info,
    Primary,
    Secondary,
}

impl BadgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeClass::Warning => "warning",
            BadgeClass::Success => "success",
            BadgeClass::Danger => "danger",
            BadgeClass::Info => "info",
            BadgeClass::Primary => "primary",
            BadgeClass::Secondary => "secondary",
        }
    }
}

impl ClaimStatus {
    /// Exact, case-sensitive mapping of a stored status string
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => ClaimStatus::Unset,
            Some("Pending") => ClaimStatus::Pending,
            Some("Approved") => ClaimStatus::Approved,
            Some("Rejected") => ClaimStatus::Rejected,
            Some("Processing") => ClaimStatus::Processing,
            Some("Completed") => ClaimStatus::Completed,
            Some(other) => ClaimStatus::Other(other.to_string()),
        }
    }

    /// The stored representation; `Unset` is the empty string
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Unset => "",
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Processing => "Processing",
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Other(raw) => raw,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ClaimStatus::Unset)
    }

    pub fn display_name(&self) -> &str {
        match self {
            ClaimStatus::Pending => "Under Review",
            ClaimStatus::Processing => "Processing Payment",
            ClaimStatus::Completed => "Settled",
            other => other.as_str(),
        }
    }

    pub fn badge_class(&self) -> BadgeClass {
        match self {
            ClaimStatus::Pending => BadgeClass::Warning,
            ClaimStatus::Approved => BadgeClass::Success,
            ClaimStatus::Rejected => BadgeClass::Danger,
            ClaimStatus::Processing => BadgeClass::Info,
            ClaimStatus::Completed => BadgeClass::Primary,
            ClaimStatus::Unset | ClaimStatus::Other(_) => BadgeClass::Secondary,
        }
    }

    /// Completion percentage shown in progress bars
    pub fn progress(&self) -> u8 {
        match self {
            ClaimStatus::Pending => 25,
            ClaimStatus::Processing => 90,
            ClaimStatus::Approved | ClaimStatus::Rejected | ClaimStatus::Completed => 100,
            ClaimStatus::Unset | ClaimStatus::Other(_) => 0,
        }
    }

    /// Whether the claim currently counts as approved.
    /// Tolerates stray whitespace and casing in hand-edited data.
    pub fn is_approved(&self) -> bool {
        self.as_str().trim().eq_ignore_ascii_case("Approved")
    }

    /// Case-insensitive exact match against a filter value
    pub fn matches(&self, filter: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(filter)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ClaimStatus {
    fn from(raw: &str) -> Self {
        ClaimStatus::parse(Some(raw))
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClaimStatus::Unset => serializer.serialize_none(),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for ClaimStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(ClaimStatus::parse(raw.as_deref()))
    }
}
