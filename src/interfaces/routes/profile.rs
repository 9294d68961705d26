use actix_web::web;

use crate::handlers::profile;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(
                web::resource("")
                    .route(web::get().to(profile::get_all_profiles))
                    .route(web::post().to(profile::upsert_profile))
                    .route(web::delete().to(profile::delete_account))
            )
            .service(
                web::resource("/me")
                    .route(web::get().to(profile::get_own_profile))
            )
            .service(
                web::resource("/user/{user_id}")
                    .route(web::get().to(profile::get_profile_by_user_id))
            )
            .service(
                web::resource("/experience")
                    .route(web::put().to(profile::add_experience))
            )
            .service(
                web::resource("/experience/{exp_id}")
                    .route(web::delete().to(profile::delete_experience))
            )
            .service(
                web::resource("/education")
                    .route(web::put().to(profile::add_education))
            )
            .service(
                web::resource("/education/{edu_id}")
                    .route(web::delete().to(profile::delete_education))
            )
            .service(
                web::resource("/github/{username}")
                    .route(web::get().to(profile::get_github_repos))
            )
    );
}
