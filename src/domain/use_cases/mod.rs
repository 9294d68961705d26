pub mod auth;
pub mod extractors;
pub mod github;
pub mod profile;
