use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{types::Json, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    entities::{
        education::Education,
        experience::Experience,
        profile::{PopulatedProfile, PopulatedProfileRow, Profile, ProfileFields, ProfileRow},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

const POPULATED_SELECT: &str = r#"
    SELECT p.*, u.name AS owner_name, u.avatar AS owner_avatar
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile of `user_id` with the owner's name and avatar joined in
    async fn get_profile_by_user(&self, user_id: &Uuid) -> Result<Option<PopulatedProfile>, AppError>;

    /// Every profile, owners joined, in insertion order
    async fn list_profiles(&self) -> Result<Vec<PopulatedProfile>, AppError>;

    /// Merges `fields` into the user's profile, creating it when absent
    async fn upsert_profile(&self, user_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError>;

    async fn add_experience(&self, user_id: &Uuid, entry: Experience) -> Result<Profile, AppError>;

    async fn remove_experience(&self, user_id: &Uuid, exp_id: &Uuid) -> Result<Profile, AppError>;

    async fn add_education(&self, user_id: &Uuid, entry: Education) -> Result<Profile, AppError>;

    async fn remove_education(&self, user_id: &Uuid, edu_id: &Uuid) -> Result<Profile, AppError>;
}

#[async_trait]
impl<T: ProfileRepository + ?Sized> ProfileRepository for Arc<T> {
    async fn get_profile_by_user(&self, user_id: &Uuid) -> Result<Option<PopulatedProfile>, AppError> {
        (**self).get_profile_by_user(user_id).await
    }

    async fn list_profiles(&self) -> Result<Vec<PopulatedProfile>, AppError> {
        (**self).list_profiles().await
    }

    async fn upsert_profile(&self, user_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError> {
        (**self).upsert_profile(user_id, fields).await
    }

    async fn add_experience(&self, user_id: &Uuid, entry: Experience) -> Result<Profile, AppError> {
        (**self).add_experience(user_id, entry).await
    }

    async fn remove_experience(&self, user_id: &Uuid, exp_id: &Uuid) -> Result<Profile, AppError> {
        (**self).remove_experience(user_id, exp_id).await
    }

    async fn add_education(&self, user_id: &Uuid, entry: Education) -> Result<Profile, AppError> {
        (**self).add_education(user_id, entry).await
    }

    async fn remove_education(&self, user_id: &Uuid, edu_id: &Uuid) -> Result<Profile, AppError> {
        (**self).remove_education(user_id, edu_id).await
    }
}

impl SqlxProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProfileRepo { pool }
    }

    /// Loads the user's profile under a row lock, applies `change` and
    /// writes the result back in the same transaction.
    async fn modify_profile<F>(&self, user_id: &Uuid, change: F) -> Result<Profile, AppError>
    where
        F: FnOnce(&mut Profile) -> Result<(), AppError> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let mut profile = lock_profile(&mut tx, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("There is no profile for this user".into()))?;

        change(&mut profile)?;

        let saved = save_profile(&mut tx, &profile).await?;
        tx.commit().await?;
        Ok(saved)
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn get_profile_by_user(&self, user_id: &Uuid) -> Result<Option<PopulatedProfile>, AppError> {
        let row = sqlx::query_as::<_, PopulatedProfileRow>(&format!("{POPULATED_SELECT} WHERE p.user_id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PopulatedProfile::from))
    }

    async fn list_profiles(&self) -> Result<Vec<PopulatedProfile>, AppError> {
        let profiles = sqlx::query_as::<_, PopulatedProfileRow>(&format!("{POPULATED_SELECT} ORDER BY p.created_at, p.id"))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(PopulatedProfile::from)
            .collect();

        Ok(profiles)
    }

    async fn upsert_profile(&self, user_id: &Uuid, fields: &ProfileFields) -> Result<Profile, AppError> {
        let mut tx = self.pool.begin().await?;

        // A concurrent first save blocks on the insert, then falls through to the update.
        let saved = match insert_profile(&mut tx, &Profile::new(*user_id, fields)).await? {
            Some(created) => created,
            None => {
                let mut profile = lock_profile(&mut tx, user_id)
                    .await?
                    .ok_or_else(|| AppError::InternalError("Profile vanished during upsert".into()))?;
                fields.apply(&mut profile);
                save_profile(&mut tx, &profile).await?
            }
        };

        tx.commit().await?;
        Ok(saved)
    }

    async fn add_experience(&self, user_id: &Uuid, entry: Experience) -> Result<Profile, AppError> {
        self.modify_profile(user_id, move |profile| {
            profile.add_experience(entry);
            Ok(())
        })
        .await
    }

    async fn remove_experience(&self, user_id: &Uuid, exp_id: &Uuid) -> Result<Profile, AppError> {
        let exp_id = *exp_id;
        self.modify_profile(user_id, move |profile| profile.remove_experience(exp_id).map(|_| ()))
            .await
    }

    async fn add_education(&self, user_id: &Uuid, entry: Education) -> Result<Profile, AppError> {
        self.modify_profile(user_id, move |profile| {
            profile.add_education(entry);
            Ok(())
        })
        .await
    }

    async fn remove_education(&self, user_id: &Uuid, edu_id: &Uuid) -> Result<Profile, AppError> {
        let edu_id = *edu_id;
        self.modify_profile(user_id, move |profile| profile.remove_education(edu_id).map(|_| ()))
            .await
    }
}

async fn lock_profile(
    tx: &mut Transaction<'static, Postgres>,
    user_id: &Uuid,
) -> Result<Option<Profile>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(row.map(Profile::from))
}

/// Inserts `profile` unless its owner already has one; `None` on conflict.
async fn insert_profile(
    tx: &mut Transaction<'static, Postgres>,
    profile: &Profile,
) -> Result<Option<Profile>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles (
            id, user_id, company, website, location, bio, status, githubusername,
            skills, social, experience, education, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(profile.user)
    .bind(&profile.company)
    .bind(&profile.website)
    .bind(&profile.location)
    .bind(&profile.bio)
    .bind(&profile.status)
    .bind(&profile.githubusername)
    .bind(&profile.skills)
    .bind(Json(profile.social.clone()))
    .bind(Json(profile.experience.clone()))
    .bind(Json(profile.education.clone()))
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(Profile::from))
}

async fn save_profile(
    tx: &mut Transaction<'static, Postgres>,
    profile: &Profile,
) -> Result<Profile, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE profiles SET
            company = $2,
            website = $3,
            location = $4,
            bio = $5,
            status = $6,
            githubusername = $7,
            skills = $8,
            social = $9,
            experience = $10,
            education = $11,
            updated_at = $12
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(profile.id)
    .bind(&profile.company)
    .bind(&profile.website)
    .bind(&profile.location)
    .bind(&profile.bio)
    .bind(&profile.status)
    .bind(&profile.githubusername)
    .bind(&profile.skills)
    .bind(Json(profile.social.clone()))
    .bind(Json(profile.experience.clone()))
    .bind(Json(profile.education.clone()))
    .bind(profile.updated_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row.into())
}
