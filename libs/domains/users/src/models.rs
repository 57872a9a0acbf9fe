use crud::{MongoResource, Resource};
use domain_roles::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// Spanish national identity number: eight digits and a control letter.
fn validate_dni(dni: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new("invalid_dni");

    if dni.len() != 9 || !dni.is_ascii() {
        return Err(invalid());
    }
    let (digits, letter) = dni.split_at(8);
    let number: u32 = digits
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| digits.parse().ok())
        .flatten()
        .ok_or_else(invalid)?;

    let expected = DNI_LETTERS[(number % 23) as usize];
    if letter.as_bytes()[0].to_ascii_uppercase() != expected {
        return Err(invalid());
    }
    Ok(())
}

/// A registered participant, keyed by username.
///
/// `password` holds an Argon2 PHC string once stored; use [`UserResponse`]
/// for anything leaving the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[validate(length(min = 1, max = 64), custom(function = "crud::validate_key"))]
    #[schema(example = "alba")]
    pub username: String,
    #[validate(length(max = 128))]
    pub name: String,
    #[validate(length(max = 128))]
    pub surname: String,
    #[validate(custom(function = "validate_dni"))]
    #[schema(example = "20582770R")]
    pub dni: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    /// Milliseconds since the Unix epoch
    pub birth_date: Option<i64>,
    #[validate(length(max = 4096))]
    pub medical_information: Option<String>,
    #[validate(length(min = 1))]
    #[schema(write_only)]
    pub password: String,
    #[validate(nested)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }
}

impl Resource for User {
    type Id = String;
    const NAME: &'static str = "User";

    fn id(&self) -> String {
        self.username.clone()
    }

    fn set_id(&mut self, id: String) {
        self.username = id;
    }
}

impl MongoResource for User {
    const COLLECTION: &'static str = "users";
    const KEY_FIELD: &'static str = "username";
}

/// User as exposed over the API, without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    pub surname: String,
    pub dni: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<i64>,
    pub medical_information: Option<String>,
    pub roles: Vec<Role>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
            surname: user.surname,
            dni: user.dni,
            email: user.email,
            phone: user.phone,
            birth_date: user.birth_date,
            medical_information: user.medical_information,
            roles: user.roles,
        }
    }
}

/// Credentials for `POST /login`
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alba() -> User {
        User {
            name: "Alba".into(),
            surname: "Ríos".into(),
            dni: Some("20582770R".into()),
            email: Some("alba@example.com".into()),
            phone: Some("+34 600 000 000".into()),
            ..User::new("alba", "secret")
        }
    }

    #[test]
    fn test_valid_user() {
        assert!(alba().validate().is_ok());
    }

    #[test]
    fn test_dni_control_letter() {
        assert!(validate_dni("20582770R").is_ok());
        assert!(validate_dni("20582770r").is_ok());
        assert!(validate_dni("20582770T").is_err());
        assert!(validate_dni("2058277R").is_err());
        assert!(validate_dni("2058277AR").is_err());
        assert!(validate_dni("20582770ñ").is_err());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let user = User {
            dni: Some("12345678A".into()),
            email: Some("not-an-email".into()),
            phone: Some("0".repeat(21)),
            ..User::new("", "")
        };

        let errors = user.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["username", "dni", "email", "phone", "password"] {
            assert!(fields.contains_key(field), "missing violation for {field}");
        }
    }

    #[test]
    fn test_response_never_carries_password() {
        let json = serde_json::to_value(UserResponse::from(alba())).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alba");
        assert_eq!(json["dni"], "20582770R");
    }

    #[test]
    fn test_update_copy_keeps_username() {
        let mut stored = User {
            surname: "old".into(),
            ..User::new("a", "x")
        };
        stored.copy_from(User {
            surname: "new".into(),
            ..User::new("someone-else", "x")
        });
        assert_eq!(stored.username, "a");
        assert_eq!(stored.surname, "new");
    }
}
