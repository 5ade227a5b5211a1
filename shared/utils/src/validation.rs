use crate::error::{LabstockError, LabstockResult};
use labstock_models::SearchQuery;
use validator::{Validate, ValidationErrors};

/// Longest filter accepted from a search form
pub const MAX_FILTER_LENGTH: usize = 128;

pub fn validate_model<T: Validate>(model: &T) -> LabstockResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(LabstockError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
    field_errors.sort_by_key(|(field, _)| *field);

    for (field, field_errors) in field_errors {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => message.to_string(),
                (None, "length") => format!("Length validation failed for field '{}'", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

/// A search needs at least one populated filter, none of them oversized.
pub fn validate_search_query(query: &SearchQuery) -> LabstockResult<()> {
    if query.is_empty() {
        return Err(LabstockError::validation(
            "query",
            "Enter a part number, a component name/value or a footprint to search",
        ));
    }

    let filters = [
        ("part_number", query.part_number()),
        ("value", query.value()),
        ("footprint", query.footprint()),
    ];

    for (field, filter) in filters {
        if let Some(filter) = filter {
            if filter.chars().count() > MAX_FILTER_LENGTH {
                return Err(LabstockError::validation(
                    field,
                    format!("Filter must be at most {} characters", MAX_FILTER_LENGTH),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use labstock_models::ReorderRequest;

    #[test]
    fn test_search_query_requires_a_filter() {
        let error = validate_search_query(&SearchQuery::new()).unwrap_err();
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert!(validate_search_query(&SearchQuery::new().with_footprint("0805")).is_ok());
    }

    #[test]
    fn test_search_query_rejects_oversized_filter() {
        let query = SearchQuery::new().with_value("x".repeat(MAX_FILTER_LENGTH + 1));
        match validate_search_query(&query) {
            Err(LabstockError::Validation { field, .. }) => assert_eq!(field, "value"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_model_reports_field_messages() {
        let request = ReorderRequest::new(String::new(), "RES 10K".to_string(), String::new());
        match validate_model(&request) {
            Err(LabstockError::Validation { message, .. }) => {
                assert!(message.contains("Part number must be between 1 and 200 characters"));
                assert!(message.contains("Requester name must be between 1 and 100 characters"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
