use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user, as listed by `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub name: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Payload for `POST /users`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUser {
    #[validate(email(message = "email must be a valid address"))]
    #[schema(example = "alice@grit.com")]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Alice")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_user_rejects_unknown_fields() {
        let result = serde_json::from_value::<CreateUser>(json!({
            "email": "alice@grit.com",
            "role": "admin"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUser {
            email: "alice@grit.com".into(),
            name: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateUser {
            email: "not-an-email".into(),
            name: Some("Alice".into()),
        };
        let errors = bad_email.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let empty_name = CreateUser {
            email: "alice@grit.com".into(),
            name: Some(String::new()),
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_summary_serializes_null_name() {
        let summary = UserSummary { id: 3, name: None };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({"id": 3, "name": null})
        );
    }
}
