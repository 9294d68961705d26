use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://www.gravatar.com/avatar";

/// Gravatar URL for `email`: 200px, PG rated, mystery-person fallback.
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("{GRAVATAR_BASE}/{digest:x}?s=200&r=pg&d=mm")
}
