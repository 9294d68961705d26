use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::user::{LoginUser, NewUser};
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[instrument(skip(state, user))]
pub async fn register(
    state: web::Data<AppState>,
    user: web::Json<NewUser>
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.register(user.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, user))]
pub async fn login(
    state: web::Data<AppState>,
    user: web::Json<LoginUser>
) -> Result<impl Responder, AppError> {
    let response = state.auth_handler.login(user.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(claims, state))]
pub async fn current_user(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;

    let user = state.auth_handler.current_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
