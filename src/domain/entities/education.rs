use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::domain::{entities::profile::EmbeddedEntry, validation::{new_validation_error, not_blank}};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub major: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl EmbeddedEntry for Education {
    fn entry_id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewEducation {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "School is required"))]
    pub school: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Degree is required"))]
    pub degree: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Field of study is required"))]
    pub major: String,

    #[validate(required(message = "From date is required"))]
    pub from: Option<NaiveDate>,

    pub to: Option<NaiveDate>,

    #[serde(default)]
    pub current: bool,

    pub description: Option<String>,
}

impl TryFrom<NewEducation> for Education {
    type Error = ValidationErrors;

    fn try_from(value: NewEducation) -> Result<Self, Self::Error> {
        value.validate()?;

        let Some(from) = value.from else {
            let mut errors = ValidationErrors::new();
            errors.add("from", new_validation_error("required", "From date is required"));
            return Err(errors);
        };

        Ok(Education {
            id: Uuid::new_v4(),
            school: value.school.trim().to_string(),
            degree: value.degree.trim().to_string(),
            major: value.major.trim().to_string(),
            from,
            to: value.to,
            current: value.current,
            description: value.description,
        })
    }
}
