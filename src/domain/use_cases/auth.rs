use uuid::Uuid;
use validator::Validate;

use crate::entities::token::AuthResponse;
use crate::entities::user::{normalize_email, LoginUser, NewUser, PublicUser, User};
use crate::errors::{AppError, AuthError};
use crate::interfaces::repositories::user::UserRepository;
use crate::auth::password::{hash_password, verify_password};
use crate::repositories::token::TokenServiceRepository;

pub struct AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub user_repo: R,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: R, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            token_service
        }
    }

    /// Registers a new user after validation and password hashing, then signs them in
    pub async fn register(&self, request: NewUser) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let email = normalize_email(&request.email);
        if self.user_repo.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);
        let user = self.user_repo.create_user(&user_insert).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(self.create_auth_response(&user)?)
    }

    /// Logs in a user by validating credentials and issuing a JWT
    pub async fn login(&self, request: LoginUser) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = self.user_repo
            .get_user_by_email(&normalize_email(&request.email))
            .await?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!(user_id = %user.id, "Stored password hash unusable: {}", e);
                AuthError::WrongCredentials
            })?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials.into());
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(response)
    }

    pub async fn current_user(&self, user_id: &Uuid) -> Result<PublicUser, AppError> {
        self.user_repo
            .get_user_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let token = self.token_service.create_jwt(user)?;
        Ok(AuthResponse::new(token))
    }
}
