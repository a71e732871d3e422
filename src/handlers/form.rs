use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;

use crate::context::{MaybeUser, UserInfo};
use crate::core::models::form::{Create as FormCreate, Update as FormUpdate};
use crate::core::services::form as form_service;
use crate::database::sqlx::PgStoreManager;
use crate::error::Error;
use crate::response::List;

pub async fn create(user_info: UserInfo, Json(body): Json<FormCreate>, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let mut store = db.acquire().await?;
    let form = form_service::create_form(&mut store, user_info.id, body).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(form))
}

pub async fn list(user_info: UserInfo, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let mut store = db.acquire().await?;
    let forms = form_service::list_forms(&mut store, user_info.id).await?;
    let total = forms.len() as i64;
    Ok(HttpResponse::build(StatusCode::OK).json(List::new(forms, total)))
}

pub async fn detail(user: MaybeUser, id_or_handle: Path<(String,)>, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let mut store = db.acquire().await?;
    let detail = form_service::form_detail(&mut store, &id_or_handle.into_inner().0, user.0.map(|u| u.id)).await?;
    Ok(HttpResponse::build(StatusCode::OK).json(detail))
}

pub async fn update(user_info: UserInfo, form_id: Path<(i32,)>, Json(body): Json<FormUpdate>, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let mut store = db.acquire().await?;
    let form = form_service::update_form(&mut store, user_info.id, form_id.into_inner().0, body).await?;
    Ok(HttpResponse::build(StatusCode::OK).json(form))
}

pub async fn delete_form(user_info: UserInfo, form_id: Path<(i32,)>, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let store = db.begin().await?;
    form_service::delete_form(store, user_info.id, form_id.into_inner().0).await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}
