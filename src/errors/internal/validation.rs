use rust_decimal::Decimal;
use thiserror::Error;

/// User-correctable input problems
///
/// Every variant names the form field it belongs to (see [`ValidationError::field`])
/// so the API layer can report it next to the offending input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Hours worked must be between 0.1 and 168")]
    HoursOutOfRange,

    #[error("Hourly rate must be greater than 0")]
    NonPositiveRate,

    #[error("Hourly rate cannot be negative")]
    NegativeRate,

    #[error("Hourly rate must be at least 0.01")]
    RateTooSmall,

    #[error("Hours worked multiplied by the hourly rate is too large")]
    AmountTooLarge,

    #[error("A valid user must be selected")]
    InvalidUser,

    #[error("This submission would exceed the monthly limit of {cap} hours. You have {remaining:.1} hours remaining this month.")]
    MonthlyCapExceeded { cap: Decimal, remaining: Decimal },

    #[error("You have reached the maximum limit of {cap} hours for this month. Cannot submit more claims.")]
    MonthlyCapReached { cap: Decimal },

    #[error("{label} is required")]
    Required {
        field: &'static str,
        label: &'static str,
    },

    #[error("{label} cannot exceed {max} characters")]
    TooLong {
        field: &'static str,
        label: &'static str,
        max: usize,
    },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("A user with this email already exists")]
    DuplicateEmail,

    #[error("A role with this name already exists")]
    DuplicateRoleName,

    #[error("Role {0} does not exist")]
    UnknownRole(i32),

    #[error("Please select a file to upload.")]
    EmptyUpload,

    #[error("File size cannot exceed {max_mb}MB.")]
    FileTooLarge { max_mb: u64 },

    #[error("Only {allowed} files are allowed.")]
    FileTypeNotAllowed { allowed: String },
}

impl ValidationError {
    /// Name of the request field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::HoursOutOfRange
            | ValidationError::MonthlyCapExceeded { .. } => Some("hoursWorked"),
            ValidationError::NonPositiveRate
            | ValidationError::NegativeRate
            | ValidationError::RateTooSmall
            | ValidationError::AmountTooLarge => Some("hourlyRate"),
            ValidationError::InvalidUser => Some("userId"),
            ValidationError::MonthlyCapReached { .. } => None,
            ValidationError::Required { field, .. } | ValidationError::TooLong { field, .. } => {
                Some(field)
            }
            ValidationError::InvalidEmail | ValidationError::DuplicateEmail => Some("email"),
            ValidationError::DuplicateRoleName => Some("name"),
            ValidationError::UnknownRole(_) => Some("roleId"),
            ValidationError::EmptyUpload
            | ValidationError::FileTooLarge { .. }
            | ValidationError::FileTypeNotAllowed { .. } => Some("file"),
        }
    }
}
