//! Self-service profile updates.
//!
//! The payload has no admin field and rejects unknown fields, so a user cannot sneak
//! `is_system_admin` (or anything else) through their own profile.

use serde::{Deserialize, Serialize};

use plannr_core::{DomainError, DomainResult};

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pronouns {
    #[serde(rename = "she/her")]
    SheHer,
    #[serde(rename = "he/him")]
    HeHim,
    #[serde(rename = "they/them")]
    TheyThem,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "prefer not to say")]
    PreferNotToSay,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<Pronouns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
}

impl ProfileUpdate {
    /// Validate and normalize: names are trimmed, emails trimmed and lowercased.
    pub fn normalize(self) -> DomainResult<Self> {
        let name = match self.name {
            Some(name) => {
                let name = name.trim().to_string();
                let len = name.chars().count();
                if len == 0 || len > NAME_MAX {
                    return Err(DomainError::validation(format!(
                        "name must be 1-{NAME_MAX} characters"
                    )));
                }
                Some(name)
            }
            None => None,
        };

        let email = match self.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                if !email.contains('@') || email.chars().count() > EMAIL_MAX {
                    return Err(DomainError::validation("invalid email format"));
                }
                Some(email)
            }
            None => None,
        };

        Ok(Self {
            name,
            email,
            ..self
        })
    }
}
