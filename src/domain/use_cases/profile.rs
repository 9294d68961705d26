use uuid::Uuid;
use validator::Validate;

use crate::entities::education::{Education, NewEducation};
use crate::entities::experience::{Experience, NewExperience};
use crate::entities::profile::{PopulatedProfile, Profile, ProfileFields, ProfileRequest};
use crate::errors::AppError;
use crate::repositories::profile::ProfileRepository;
use crate::repositories::user::UserRepository;
use crate::utils::valid_uuid::valid_uuid;

const NO_PROFILE: &str = "There is no profile for this user";
const PROFILE_NOT_FOUND: &str = "Profile not found";

pub struct ProfileHandler<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    pub profile_repo: P,
    pub user_repo: U,
}

impl<P, U> ProfileHandler<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    pub fn new(profile_repo: P, user_repo: U) -> Self {
        ProfileHandler { profile_repo, user_repo }
    }

    pub async fn get_own_profile(&self, user_id: &Uuid) -> Result<PopulatedProfile, AppError> {
        self.profile_repo
            .get_profile_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(NO_PROFILE.into()))
    }

    /// Creates the caller's profile or merges the submitted fields into it.
    pub async fn upsert_profile(&self, user_id: &Uuid, request: ProfileRequest) -> Result<Profile, AppError> {
        request.validate()?;

        let fields = ProfileFields::from(request);
        let profile = self.profile_repo.upsert_profile(user_id, &fields).await?;

        tracing::info!(%user_id, profile_id = %profile.id, "Profile saved");
        Ok(profile)
    }

    pub async fn list_profiles(&self) -> Result<Vec<PopulatedProfile>, AppError> {
        self.profile_repo.list_profiles().await
    }

    /// Looks up another user's profile; malformed ids read as missing.
    pub async fn get_profile_by_user_id(&self, user_id: &str) -> Result<PopulatedProfile, AppError> {
        let user_id = valid_uuid(user_id, PROFILE_NOT_FOUND)?;

        self.profile_repo
            .get_profile_by_user(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(PROFILE_NOT_FOUND.into()))
    }

    /// Removes the caller's profile and user record.
    pub async fn delete_own_account(&self, user_id: &Uuid) -> Result<(), AppError> {
        let removed = self.user_repo.delete_user(user_id).await?;
        if !removed {
            tracing::warn!(%user_id, "Account delete found no user");
        }

        tracing::info!(%user_id, "Account removed");
        Ok(())
    }

    pub async fn add_experience(&self, user_id: &Uuid, request: NewExperience) -> Result<Profile, AppError> {
        let entry = Experience::try_from(request)?;
        self.profile_repo.add_experience(user_id, entry).await
    }

    pub async fn remove_experience(&self, user_id: &Uuid, exp_id: &str) -> Result<Profile, AppError> {
        let exp_id = valid_uuid(exp_id, "Experience entry doesn't exist")?;
        self.profile_repo.remove_experience(user_id, &exp_id).await
    }

    pub async fn add_education(&self, user_id: &Uuid, request: NewEducation) -> Result<Profile, AppError> {
        let entry = Education::try_from(request)?;
        self.profile_repo.add_education(user_id, entry).await
    }

    pub async fn remove_education(&self, user_id: &Uuid, edu_id: &str) -> Result<Profile, AppError> {
        let edu_id = valid_uuid(edu_id, "Education entry doesn't exist")?;
        self.profile_repo.remove_education(user_id, &edu_id).await
    }
}
