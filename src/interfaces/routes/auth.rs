use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/auth")
            .route(web::post().to(auth::login))
            .route(web::get().to(auth::current_user))
    );

    cfg.service(
        web::resource("/users")
            .route(web::post().to(auth::register))
    );
}
