//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Author record. A soft-deleted author (non-null `deleted_at`) is
/// invisible to all find operations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 255, message = "firstName must be between 1 and 255 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "lastName must be between 1 and 255 characters"))]
    pub last_name: String,
    #[validate(length(max = 1000, message = "bio must not exceed 1000 characters"))]
    pub bio: Option<String>,
    /// Birth date (YYYY-MM-DD)
    #[validate(custom(
        function = "crate::models::validation::validate_iso_date",
        message = "birthDate must be a valid ISO 8601 date string (YYYY-MM-DD)"
    ))]
    pub birth_date: Option<String>,
}

/// Update author request; only provided fields are written
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 255, message = "firstName must be between 1 and 255 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "lastName must be between 1 and 255 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 1000, message = "bio must not exceed 1000 characters"))]
    pub bio: Option<String>,
    #[validate(custom(
        function = "crate::models::validation::validate_iso_date",
        message = "birthDate must be a valid ISO 8601 date string (YYYY-MM-DD)"
    ))]
    pub birth_date: Option<String>,
}

/// Author list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorQuery {
    /// Case-insensitive partial match on first name
    pub first_name: Option<String>,
    /// Case-insensitive partial match on last name
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_author_rejects_empty_first_name() {
        let author = CreateAuthor {
            first_name: String::new(),
            last_name: "Alam".to_string(),
            bio: None,
            birth_date: None,
        };
        let errors = author.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_create_author_rejects_bad_birth_date() {
        let author = CreateAuthor {
            first_name: "Tanjin".to_string(),
            last_name: "Alam".to_string(),
            bio: None,
            birth_date: Some("next tuesday".to_string()),
        };
        assert!(author.validate().is_err());
    }

    #[test]
    fn test_update_author_skips_absent_fields() {
        let update = UpdateAuthor {
            first_name: None,
            last_name: None,
            bio: None,
            birth_date: None,
        };
        assert!(update.validate().is_ok());
    }
}
