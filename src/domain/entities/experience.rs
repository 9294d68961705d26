use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::domain::{entities::profile::EmbeddedEntry, validation::{new_validation_error, not_blank}};

/// A job held by the profile owner, embedded in the profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl EmbeddedEntry for Experience {
    fn entry_id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewExperience {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Company is required"))]
    pub company: String,

    pub location: Option<String>,

    #[validate(required(message = "From date is required"))]
    pub from: Option<NaiveDate>,

    pub to: Option<NaiveDate>,

    #[serde(default)]
    pub current: bool,

    pub description: Option<String>,
}

impl TryFrom<NewExperience> for Experience {
    type Error = ValidationErrors;

    fn try_from(value: NewExperience) -> Result<Self, Self::Error> {
        value.validate()?;

        let Some(from) = value.from else {
            let mut errors = ValidationErrors::new();
            errors.add("from", new_validation_error("required", "From date is required"));
            return Err(errors);
        };

        Ok(Experience {
            id: Uuid::new_v4(),
            title: value.title.trim().to_string(),
            company: value.company.trim().to_string(),
            location: value.location,
            from,
            to: value.to,
            current: value.current,
            description: value.description,
        })
    }
}
