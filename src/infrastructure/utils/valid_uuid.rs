use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path identifier. A malformed id can never match a stored record,
/// so it is reported as `NotFound` with the caller's message.
pub fn valid_uuid(id: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        let err = valid_uuid("not-a-uuid", "Profile not found").unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Profile not found"));
    }

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(valid_uuid(&id.to_string(), "x").unwrap(), id);
    }
}
