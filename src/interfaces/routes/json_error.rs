use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

const JSON_LIMIT_BYTES: usize = 64 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, _req| json_payload_error(err).into()),
    );
}

fn json_payload_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::ContentType => AppError::InvalidInput("Expected a JSON body".into()),
        JsonPayloadError::Deserialize(e) => AppError::InvalidInput(format!("Malformed JSON: {}", e)),
        other => AppError::InvalidInput(other.to_string()),
    }
}
