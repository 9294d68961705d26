use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::validation::not_blank;
use crate::utils::gravatar::gravatar_url;


#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UserInsert {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserInsert> for User {
    fn from(insert: UserInsert) -> Self {
        User {
            id: insert.id,
            name: insert.name,
            email: insert.email,
            password_hash: insert.password_hash,
            avatar: insert.avatar,
            created_at: insert.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Please enter a password with 6 or more characters"))]
    pub password: String,
}

impl NewUser {
    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        let email = normalize_email(&self.email);

        UserInsert {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            avatar: gravatar_url(&email),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}


#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[serde(default)]
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User as exposed over the API, without the password hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_normalizes_email_and_sets_avatar() {
        let new_user = NewUser {
            name: " Ada Lovelace ".into(),
            email: " Ada@Example.COM ".into(),
            password: "secret1".into(),
        };

        let insert = new_user.prepare_for_insert("hash".into());
        assert_eq!(insert.email, "ada@example.com");
        assert_eq!(insert.name, "Ada Lovelace");
        assert_eq!(insert.avatar, gravatar_url("ada@example.com"));
    }

    #[test]
    fn short_password_fails_validation() {
        let new_user = NewUser {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "12345".into(),
        };

        let errors = new_user.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
