//! Inbound contact request types and validation.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{RequiredField, ValidationError};

/// Raw contact form body as posted by the site.
///
/// Every field is optional at the wire level so that a missing field is a
/// validation error rather than a body parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

/// Form fields posted as numbers or booleans are kept as their text;
/// `null` counts as absent. Objects and arrays are still rejected.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Request metadata captured alongside the form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_agent: String,
    pub source_address: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(user_agent: impl Into<String>, source_address: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            source_address: source_address.into(),
        }
    }
}

/// A validated contact request that has not been persisted yet.
///
/// The only way to obtain one is [`Submission::validate`], so holding a
/// `Submission` means `name`, `email` and `message` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    name: String,
    email: String,
    phone: String,
    service: String,
    message: String,
    user_agent: String,
    source_address: String,
}

impl Submission {
    /// Trim the input and check the required fields.
    ///
    /// No format checks are made: any non-blank email string is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming every required field that is absent
    /// or blank after trimming.
    pub fn validate(input: ContactInput, context: RequestContext) -> Result<Self, ValidationError> {
        let name = trimmed(input.name);
        let email = trimmed(input.email);
        let message = trimmed(input.message);

        let missing: Vec<RequiredField> = [
            (RequiredField::Name, &name),
            (RequiredField::Email, &email),
            (RequiredField::Message, &message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::missing(missing));
        }

        Ok(Self {
            name,
            email,
            phone: trimmed(input.phone),
            service: trimmed(input.service),
            message,
            user_agent: context.user_agent,
            source_address: context.source_address,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn source_address(&self) -> &str {
        &self.source_address
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
