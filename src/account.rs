use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Ages the signup form offers.
pub const AGE_RANGE: RangeInclusive<u8> = 18..=80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Forbidden,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Forbidden => "FORBIDDEN",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            "FORBIDDEN" => Some(Gender::Forbidden),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("age must be a number between 18 and 80")]
    InvalidAge,
    #[error("unknown gender '{0}'")]
    UnknownGender(String),
}

/// Raw signup form as submitted. Every field arrives as text, the age select
/// included, and may be blank.
#[derive(Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("age", &self.age)
            .field("gender", &self.gender)
            .finish()
    }
}

/// Payload the customer API accepts for a new account.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct CustomerRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub username: String,
    pub age: u8,
    pub gender: Gender,
}

impl fmt::Debug for CustomerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("username", &self.username)
            .field("age", &self.age)
            .field("gender", &self.gender)
            .finish()
    }
}

/// Login form as submitted.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Checked login credentials, ready for the customer API.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let email = required(&self.email, "email")?;
        if !looks_like_email(email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.trim().is_empty() {
            return Err(FormError::Missing("password"));
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

impl SignupForm {
    /// Checks the form and builds the registration. The username is the email
    /// address; it is set here and nowhere else.
    pub fn validate(&self) -> Result<CustomerRegistration, FormError> {
        let name = required(&self.name, "name")?;
        let email = required(&self.email, "email")?;
        if !looks_like_email(email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::Missing("password"));
        }
        let age = required(&self.age, "age")?
            .parse::<u8>()
            .ok()
            .filter(|age| AGE_RANGE.contains(age))
            .ok_or(FormError::InvalidAge)?;
        let gender = required(&self.gender, "gender")?;
        let gender =
            Gender::parse(gender).ok_or_else(|| FormError::UnknownGender(gender.to_string()))?;

        Ok(CustomerRegistration {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            username: email.to_string(),
            age,
            gender,
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(value)
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
