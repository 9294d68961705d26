use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::NormalizePath,
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::{home::home, system::health_check};
use crate::middlewares::auth::AuthMiddleware;
use crate::AppState;

mod auth;
mod json_error;
mod profile;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .configure(auth::config_routes)
            .configure(profile::config_routes)
    );

    cfg.configure(json_error::config_routes);
}

/// The full application: shared state, middleware stack and route table.
/// Middleware registered last runs first, so paths are normalized before auth sees them.
pub fn build_app(
    state: web::Data<AppState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(AuthMiddleware)
        .wrap(NormalizePath::trim())
        .wrap(TracingLogger::default())
        .wrap(cors)
        .configure(configure_routes)
}
