pub mod form;
pub mod response;

use std::ops::Add;

use actix_web::http::StatusCode;
use actix_web::web::{Data, Json};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::context::{Claim, UserInfo};
use crate::core::ports::tokener::Tokener;
use crate::core::services::user as user_service;
use crate::database::sqlx::PgStoreManager;
use crate::error::Error;
use crate::impls::tokener::jwt::JWT;
use crate::response::Created;

#[derive(Debug, Deserialize)]
pub struct Signup {
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub password: String,
}

pub async fn signup(Json(body): Json<Signup>, db: Data<PgStoreManager>) -> Result<Json<Created>, Error> {
    let mut store = db.acquire().await?;
    let id = user_service::signup(&mut store, body.name, body.business_name, body.email, body.password).await?;
    Ok(Json(Created { id }))
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn login(Json(body): Json<Login>, db: Data<PgStoreManager>, tokener: Data<JWT>) -> Result<Json<TokenResponse>, Error> {
    let mut store = db.acquire().await?;
    let user = user_service::verify_login(&mut store, &body.email, &body.password).await?;
    let claim = Claim {
        user: user.id.to_string(),
        exp: chrono::Utc::now().add(chrono::Duration::days(30)).timestamp(),
    };
    let token = tokener.gen_token(&claim)?;
    Ok(Json(TokenResponse { token }))
}

pub async fn me(user_info: UserInfo, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let mut store = db.acquire().await?;
    let user = user_service::current_user(&mut store, user_info.id).await?;
    Ok(HttpResponse::build(StatusCode::OK).json(user))
}
