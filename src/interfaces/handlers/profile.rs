use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{education::NewEducation, experience::NewExperience, profile::ProfileRequest},
    errors::AppError,
    use_cases::extractors::AuthClaims,
    AppState,
};

#[instrument(skip(claims, state))]
pub async fn get_own_profile(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let profile = state.profile_handler.get_own_profile(&user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state, data))]
pub async fn upsert_profile(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<ProfileRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let profile = state
        .profile_handler
        .upsert_profile(&user_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state))]
pub async fn get_all_profiles(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profiles = state.profile_handler.list_profiles().await?;
    Ok(HttpResponse::Ok().json(profiles))
}

#[instrument(skip(state))]
pub async fn get_profile_by_user_id(
    user_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler.get_profile_by_user_id(&user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state))]
pub async fn delete_account(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    state.profile_handler.delete_own_account(&user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"msg": "User removed"})))
}

#[instrument(skip(claims, state, data))]
pub async fn add_experience(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<NewExperience>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let profile = state
        .profile_handler
        .add_experience(&user_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state))]
pub async fn delete_experience(
    claims: AuthClaims,
    exp_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let profile = state
        .profile_handler
        .remove_experience(&user_id, &exp_id)
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state, data))]
pub async fn add_education(
    claims: AuthClaims,
    state: web::Data<AppState>,
    data: web::Json<NewEducation>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let profile = state
        .profile_handler
        .add_education(&user_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(claims, state))]
pub async fn delete_education(
    claims: AuthClaims,
    edu_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let profile = state
        .profile_handler
        .remove_education(&user_id, &edu_id)
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state))]
pub async fn get_github_repos(
    username: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let repos = state.github_handler.get_repos(&username).await?;
    Ok(HttpResponse::Ok().json(repos))
}
