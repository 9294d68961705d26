pub mod education;
pub mod experience;
pub mod profile;
pub mod token;
pub mod user;
