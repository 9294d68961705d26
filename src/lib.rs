use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases, validation};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, github, utils, web};

use auth::jwt::JwtService;
use errors::AppError;
use github::ReqwestGithubClient;
use repositories::{
    github::GithubClient,
    profile::ProfileRepository,
    sqlx_repo::{SqlxProfileRepo, SqlxUserRepo},
    user::UserRepository,
};
use use_cases::{auth::AuthHandler, github::GithubHandler, profile::ProfileHandler};

pub type SharedUserRepo = Arc<dyn UserRepository>;
pub type SharedProfileRepo = Arc<dyn ProfileRepository>;
pub type SharedGithubClient = Arc<dyn GithubClient>;

pub type AppAuthHandler = AuthHandler<SharedUserRepo, JwtService>;
pub type AppProfileHandler = ProfileHandler<SharedProfileRepo, SharedUserRepo>;
pub type AppGithubHandler = GithubHandler<SharedGithubClient>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub profile_handler: AppProfileHandler,
    pub github_handler: AppGithubHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        let user_repo: SharedUserRepo = Arc::new(SqlxUserRepo::new(pool.clone()));
        let profile_repo: SharedProfileRepo = Arc::new(SqlxProfileRepo::new(pool));
        let github_client: SharedGithubClient = Arc::new(ReqwestGithubClient::new(config)?);

        Ok(Self::from_parts(config, user_repo, profile_repo, github_client))
    }

    /// Wires the handlers over arbitrary storage and GitHub backends.
    pub fn from_parts(
        config: &settings::AppConfig,
        user_repo: SharedUserRepo,
        profile_repo: SharedProfileRepo,
        github_client: SharedGithubClient,
    ) -> Self {
        AppState {
            auth_handler: AuthHandler::new(user_repo.clone(), JwtService::new(config)),
            profile_handler: ProfileHandler::new(profile_repo, user_repo),
            github_handler: GithubHandler::new(github_client),
        }
    }
}
