// Requests
pub mod create_task_request;
pub mod list_tasks_query;
pub mod update_task_request;

// Responses
pub mod list_tasks_response;
pub mod task_get_response;

pub(crate) const NAME_MAX_LENGTH: usize = 200;
pub(crate) const DESCRIPTION_MAX_LENGTH: usize = 5000;

pub(crate) fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(format!("name must be at most {NAME_MAX_LENGTH} characters"));
    }
    Ok(())
}

pub(crate) fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("description must not be empty".to_string());
    }
    if description.chars().count() > DESCRIPTION_MAX_LENGTH {
        return Err(format!(
            "description must be at most {DESCRIPTION_MAX_LENGTH} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_bounds() {
        assert!(validate_name("Write the report").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(NAME_MAX_LENGTH)).is_ok());
        assert!(validate_name(&"x".repeat(NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn description_bounds() {
        assert!(validate_description("Details of the report").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"x".repeat(DESCRIPTION_MAX_LENGTH)).is_ok());
        assert!(validate_description(&"x".repeat(DESCRIPTION_MAX_LENGTH + 1)).is_err());
    }
}
