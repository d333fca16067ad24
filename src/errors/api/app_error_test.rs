#[cfg(test)]
mod tests {
    use crate::errors::api::ApiError;
    use crate::errors::internal::{InternalError, StorageError, ValidationError};
    use crate::types::internal::EntityKind;

    #[test]
    fn test_validation_error_maps_to_400_with_field() {
        let err = ApiError::from_internal_error(ValidationError::HoursOutOfRange.into());

        match err {
            ApiError::Validation(json) => {
                assert_eq!(json.0.status_code, 400);
                assert_eq!(json.0.error, "validation_failed");
                assert_eq!(json.0.field.as_deref(), Some("hoursWorked"));
                assert_eq!(json.0.message, "Hours worked must be between 0.1 and 168");
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_redirects_to_entity_listing() {
        let err = ApiError::from_internal_error(InternalError::not_found(EntityKind::Claim, 42));

        match err {
            ApiError::NotFound(location, message) => {
                assert_eq!(location, "/api/Claim");
                assert_eq!(message, "Claim #42 not found.");
            }
            other => panic!("Expected NotFound redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_storage_error_is_generic_500() {
        let err = ApiError::from_internal_error(InternalError::Storage(StorageError::Malformed {
            path: "Data/claims.json".to_string(),
        }));

        match &err {
            ApiError::InternalError(json) => {
                assert_eq!(json.0.status_code, 500);
                assert_eq!(json.0.message, "An error occurred");
                assert!(!json.0.message.contains("claims.json"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
        assert_eq!(err.to_string(), "An error occurred");
    }

    #[test]
    fn test_missing_stored_file_redirects_to_documents() {
        let err = ApiError::from_internal_error(InternalError::StoredFileMissing {
            file_name: "timesheet.pdf".to_string(),
        });

        match err {
            ApiError::NotFound(location, message) => {
                assert_eq!(location, "/api/SupportingDocument");
                assert_eq!(message, "File not found: timesheet.pdf");
            }
            other => panic!("Expected NotFound redirect, got {:?}", other),
        }
    }
}
