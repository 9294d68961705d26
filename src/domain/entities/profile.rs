use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    domain::validation::not_blank,
    entities::{education::Education, experience::Experience},
    errors::AppError,
};

// ───── Embedded documents ────────────────────────────────────────────

/// Entries of the embedded experience/education lists.
pub trait EmbeddedEntry {
    fn entry_id(&self) -> Uuid;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl SocialLinks {
    /// Overwrites only the links present in `other`.
    pub fn merge(&mut self, other: &SocialLinks) {
        merge_field(&mut self.youtube, &other.youtube);
        merge_field(&mut self.twitter, &other.twitter);
        merge_field(&mut self.facebook, &other.facebook);
        merge_field(&mut self.instagram, &other.instagram);
        merge_field(&mut self.linkedin, &other.linkedin);
    }

    pub fn is_empty(&self) -> bool {
        *self == SocialLinks::default()
    }
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Json<SocialLinks>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A profile row joined with the owner's public fields.
#[derive(Debug, sqlx::FromRow)]
pub struct PopulatedProfileRow {
    #[sqlx(flatten)]
    pub profile: ProfileRow,
    pub owner_name: String,
    pub owner_avatar: String,
}

// ───── API Models ────────────────────────────────────────────────────

/// The public `{id, name, avatar}` view of a profile owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

/// A profile document. `U` is the owner reference: the bare user id, or a
/// [`ProfileOwner`] once the owner has been joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile<U = Uuid> {
    pub id: Uuid,
    pub user: U,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: SocialLinks,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type PopulatedProfile = Profile<ProfileOwner>;

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user: row.user_id,
            company: row.company,
            website: row.website,
            location: row.location,
            bio: row.bio,
            status: row.status,
            githubusername: row.githubusername,
            skills: row.skills,
            social: row.social.0,
            experience: row.experience.0,
            education: row.education.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PopulatedProfileRow> for PopulatedProfile {
    fn from(row: PopulatedProfileRow) -> Self {
        let owner = ProfileOwner {
            id: row.profile.user_id,
            name: row.owner_name,
            avatar: row.owner_avatar,
        };
        let profile: Profile = row.profile.into();
        profile.with_owner(owner)
    }
}

impl Profile {
    /// Creates a profile for `user_id` holding only the supplied fields.
    pub fn new(user_id: Uuid, fields: &ProfileFields) -> Self {
        let now = Utc::now();
        let mut profile = Profile {
            id: Uuid::new_v4(),
            user: user_id,
            company: None,
            website: None,
            location: None,
            bio: None,
            status: String::new(),
            githubusername: None,
            skills: Vec::new(),
            social: SocialLinks::default(),
            experience: Vec::new(),
            education: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        fields.apply(&mut profile);
        profile
    }

    pub fn with_owner(self, owner: ProfileOwner) -> PopulatedProfile {
        Profile {
            id: self.id,
            user: owner,
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status,
            githubusername: self.githubusername,
            skills: self.skills,
            social: self.social,
            experience: self.experience,
            education: self.education,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Newest entries go first.
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.insert(0, entry);
        self.touch();
    }

    pub fn remove_experience(&mut self, id: Uuid) -> Result<Experience, AppError> {
        let removed = remove_entry(&mut self.experience, id)
            .ok_or_else(|| AppError::NotFound("Experience entry doesn't exist".into()))?;
        self.touch();
        Ok(removed)
    }

    pub fn add_education(&mut self, entry: Education) {
        self.education.insert(0, entry);
        self.touch();
    }

    pub fn remove_education(&mut self, id: Uuid) -> Result<Education, AppError> {
        let removed = remove_entry(&mut self.education, id)
            .ok_or_else(|| AppError::NotFound("Education entry doesn't exist".into()))?;
        self.touch();
        Ok(removed)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn remove_entry<T: EmbeddedEntry>(entries: &mut Vec<T>, id: Uuid) -> Option<T> {
    let index = entries.iter().position(|entry| entry.entry_id() == id)?;
    Some(entries.remove(index))
}

// ───── Input & partial update ────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Status is required"))]
    pub status: String,

    pub githubusername: Option<String>,

    /// Comma separated, e.g. `"rust, sql"`.
    #[serde(default)]
    #[validate(custom(function = "has_skills", message = "Skills is required"))]
    pub skills: String,

    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

/// The fields a profile write actually carries. `None` leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: SocialLinks,
}

impl ProfileFields {
    pub fn apply(&self, profile: &mut Profile) {
        merge_field(&mut profile.company, &self.company);
        merge_field(&mut profile.website, &self.website);
        merge_field(&mut profile.location, &self.location);
        merge_field(&mut profile.bio, &self.bio);
        merge_field(&mut profile.githubusername, &self.githubusername);

        if let Some(status) = &self.status {
            profile.status = status.clone();
        }
        if let Some(skills) = &self.skills {
            profile.skills = skills.clone();
        }

        profile.social.merge(&self.social);
        profile.updated_at = Utc::now();
    }
}

impl From<ProfileRequest> for ProfileFields {
    fn from(request: ProfileRequest) -> Self {
        let skills = present(Some(request.skills))
            .map(|raw| split_skills(&raw))
            .filter(|skills| !skills.is_empty());

        ProfileFields {
            company: present(request.company),
            website: present(request.website),
            location: present(request.location),
            bio: present(request.bio),
            status: present(Some(request.status)),
            githubusername: present(request.githubusername),
            skills,
            social: SocialLinks {
                youtube: present(request.youtube),
                twitter: present(request.twitter),
                facebook: present(request.facebook),
                instagram: present(request.instagram),
                linkedin: present(request.linkedin),
            },
        }
    }
}

/// `"js, css"` becomes `["js", "css"]`; empty items are dropped.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn has_skills(raw: &str) -> Result<(), ValidationError> {
    if split_skills(raw).is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn merge_field(target: &mut Option<String>, update: &Option<String>) {
    if let Some(value) = update {
        *target = Some(value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> ProfileRequest {
        ProfileRequest {
            status: "Developer".into(),
            skills: "js, css".into(),
            ..Default::default()
        }
    }

    fn experience(title: &str) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            title: title.into(),
            company: "Acme".into(),
            location: None,
            from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            to: None,
            current: false,
            description: None,
        }
    }

    #[test]
    fn skills_are_split_and_trimmed() {
        let fields = ProfileFields::from(request());
        assert_eq!(fields.skills, Some(vec!["js".to_string(), "css".to_string()]));
        assert_eq!(split_skills(" rust ,, sql ,"), vec!["rust", "sql"]);
    }

    #[test]
    fn skills_without_any_item_are_rejected() {
        for skills in ["", " ", ",", " , ,"] {
            let req = ProfileRequest { skills: skills.into(), ..request() };
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("skills"), "accepted {:?}", skills);
        }
        assert!(request().validate().is_ok());
    }

    #[test]
    fn empty_inputs_are_not_carried() {
        let mut req = request();
        req.company = Some("   ".into());
        req.bio = Some(String::new());

        let fields = ProfileFields::from(req);
        assert_eq!(fields.company, None);
        assert_eq!(fields.bio, None);
        assert!(fields.social.is_empty());
    }

    #[test]
    fn apply_leaves_absent_fields_untouched() {
        let mut first = request();
        first.company = Some("Acme".into());
        first.twitter = Some("https://twitter.com/acme".into());
        let mut profile = Profile::new(Uuid::new_v4(), &ProfileFields::from(first));

        let mut second = request();
        second.status = "Senior Developer".into();
        second.linkedin = Some("https://linkedin.com/in/acme".into());
        ProfileFields::from(second).apply(&mut profile);

        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.status, "Senior Developer");
        assert_eq!(profile.social.twitter.as_deref(), Some("https://twitter.com/acme"));
        assert_eq!(profile.social.linkedin.as_deref(), Some("https://linkedin.com/in/acme"));
    }

    #[test]
    fn new_experience_goes_first() {
        let mut profile = Profile::new(Uuid::new_v4(), &ProfileFields::from(request()));
        profile.add_experience(experience("first"));
        profile.add_experience(experience("second"));

        assert_eq!(profile.experience[0].title, "second");
        assert_eq!(profile.experience[1].title, "first");
    }

    #[test]
    fn removing_unknown_entry_keeps_list() {
        let mut profile = Profile::new(Uuid::new_v4(), &ProfileFields::from(request()));
        profile.add_experience(experience("only"));
        let before = profile.experience.clone();

        let result = profile.remove_experience(Uuid::new_v4());
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(profile.experience, before);
    }

    #[test]
    fn populated_profile_serializes_owner_object() {
        let owner_id = Uuid::new_v4();
        let profile = Profile::new(owner_id, &ProfileFields::from(request())).with_owner(ProfileOwner {
            id: owner_id,
            name: "Ada".into(),
            avatar: "https://example.com/a.png".into(),
        });

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["user"]["name"], "Ada");
        assert_eq!(json["skills"], serde_json::json!(["js", "css"]));
        assert_eq!(json["social"], serde_json::json!({}));
    }
}
