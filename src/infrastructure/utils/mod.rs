pub mod gravatar;
pub mod valid_uuid;
