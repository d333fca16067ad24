#[cfg(test)]
mod tests {
    use crate::errors::internal::{InternalError, StorageError, ValidationError};
    use crate::types::internal::EntityKind;
    use rust_decimal::Decimal;
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("save_claims", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("save_claims"));
        assert!(error_string.contains("Database error"));
    }

    #[test]
    fn test_io_error_includes_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = InternalError::io("write_collection", std::path::Path::new("Data/users.json"), io_err);

        let error_string = error.to_string();
        assert!(error_string.contains("write_collection"));
        assert!(error_string.contains("Data/users.json"));
    }

    #[test]
    fn test_not_found_message() {
        let error = InternalError::not_found(EntityKind::Approval, 7);
        assert_eq!(error.to_string(), "Approval #7 not found.");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_malformed_storage_message() {
        let error = StorageError::Malformed { path: "Data/roles.json".to_string() };
        assert_eq!(error.to_string(), "Storage error: Data/roles.json does not contain a JSON array");
    }

    #[test]
    fn test_monthly_cap_messages() {
        let exceeded = ValidationError::MonthlyCapExceeded {
            cap: Decimal::from(180),
            remaining: Decimal::new(205, 1),
        };
        assert_eq!(
            exceeded.to_string(),
            "This submission would exceed the monthly limit of 180 hours. You have 20.5 hours remaining this month."
        );
        assert_eq!(exceeded.field(), Some("hoursWorked"));

        let reached = ValidationError::MonthlyCapReached { cap: Decimal::from(180) };
        assert!(reached.to_string().contains("maximum limit of 180 hours"));
        assert_eq!(reached.field(), None);
    }

    #[test]
    fn test_required_and_too_long_report_their_field() {
        let required = ValidationError::Required { field: "firstName", label: "First name" };
        assert_eq!(required.to_string(), "First name is required");
        assert_eq!(required.field(), Some("firstName"));

        let too_long = ValidationError::TooLong { field: "name", label: "Role name", max: 50 };
        assert_eq!(too_long.to_string(), "Role name cannot exceed 50 characters");
        assert_eq!(too_long.field(), Some("name"));
    }
}
