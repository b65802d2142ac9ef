//! User domain entity and related types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::constants::{RULE_EMAIL, RULE_MIN, RULE_REQUIRED};
use crate::validation::{not_empty, Rule, ValidationMessages};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A user ready to be persisted; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// A JSON `null` reads as an empty string, so it fails the required rule
/// instead of the parse.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Registration input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct RegisterUser {
    /// User email address
    #[validate(custom(function = "not_empty"), email(code = "email"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(custom(function = "not_empty"), length(min = 8, code = "min"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    #[validate(custom(function = "not_empty"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[validate(custom(function = "not_empty"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
}

impl ValidationMessages for RegisterUser {
    const RULES: &'static [Rule] = &[
        Rule::new("email", RULE_REQUIRED, "email is required"),
        Rule::new("email", RULE_EMAIL, "email format is wrong"),
        Rule::new("password", RULE_REQUIRED, "password is required"),
        Rule::new("password", RULE_MIN, "password minimum length is 8"),
        Rule::new("first_name", RULE_REQUIRED, "first_name is required"),
        Rule::new("last_name", RULE_REQUIRED, "last_name is required"),
    ];
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct LoginUser {
    #[validate(custom(function = "not_empty"), email(code = "email"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[validate(custom(function = "not_empty"), length(min = 8, code = "min"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

impl ValidationMessages for LoginUser {
    const RULES: &'static [Rule] = &[
        Rule::new("email", RULE_REQUIRED, "email is required"),
        Rule::new("email", RULE_EMAIL, "email format is wrong"),
        Rule::new("password", RULE_REQUIRED, "password is required"),
        Rule::new("password", RULE_MIN, "password minimum length is 8"),
    ];
}

/// User response (safe to return to client)
///
/// Timestamps are RFC 3339 strings, the same shape the user service puts on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: i64,
    /// User email address
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Account creation timestamp
    pub created_at: String,
    pub updated_at: String,
    /// Soft delete timestamp (if deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

/// Format a timestamp the way it travels between services.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: format_timestamp(&user.created_at),
            updated_at: format_timestamp(&user.updated_at),
            deleted_at: user.deleted_at.as_ref().map(format_timestamp),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use chrono::TimeZone;

    fn valid_register() -> RegisterUser {
        RegisterUser {
            email: "a@b.com".to_string(),
            password: "longenough".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        }
    }

    #[test]
    fn test_register_valid() {
        assert!(validate(&valid_register()).is_ok());
    }

    #[test]
    fn test_register_all_missing() {
        let err = validate(&RegisterUser::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "email is required, password is required, first_name is required, last_name is required"
        );
    }

    #[test]
    fn test_register_format_and_length() {
        let input = RegisterUser {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            ..valid_register()
        };
        let err = validate(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "email format is wrong, password minimum length is 8"
        );
    }

    #[test]
    fn test_register_missing_fields_from_json() {
        let input: RegisterUser =
            serde_json::from_str(r#"{"email":"a@b.com","password":"longenough"}"#).unwrap();
        let err = validate(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "first_name is required, last_name is required"
        );
    }

    #[test]
    fn test_null_fields_fail_required_rule() {
        let input: RegisterUser = serde_json::from_str(
            r#"{"email":null,"password":"longenough","first_name":"A","last_name":null}"#,
        )
        .unwrap();
        assert_eq!(input.email, "");

        let err = validate(&input).unwrap_err();
        assert_eq!(err.to_string(), "email is required, last_name is required");

        let login: LoginUser = serde_json::from_str(r#"{"email":"a@b.com","password":null}"#).unwrap();
        assert_eq!(validate(&login).unwrap_err().to_string(), "password is required");
    }

    #[test]
    fn test_login_rules() {
        let input = LoginUser {
            email: String::new(),
            password: "short".to_string(),
        };
        let err = validate(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "email is required, password minimum length is 8"
        );
    }

    #[test]
    fn test_user_response_hides_password() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let user = User {
            id: 7,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            created_at: at,
            updated_at: at,
            deleted_at: None,
        };

        let response = UserResponse::from(&user);
        assert_eq!(response.created_at, "2024-01-02T03:04:05Z");
        assert_eq!(response.deleted_at, None);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("deleted_at").is_none());

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
