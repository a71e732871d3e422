use actix_web::http::{header, StatusCode};
use actix_web::web::{Data, Json, Path};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use crate::context::UserInfo;
use crate::core::models::response::{Create as ResponseCreate, Response};
use crate::core::models::summary::QuestionSummary;
use crate::core::services::response as response_service;
use crate::database::sqlx::PgStoreManager;
use crate::error::Error;
use crate::response::Created;

pub async fn submit(req: HttpRequest, Json(body): Json<ResponseCreate>, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let origin = req.connection_info().realip_remote_addr().map(|addr| addr.to_owned());
    let mut store = db.acquire().await?;
    let id = response_service::submit_response(&mut store, body, origin).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(Created { id }))
}

#[derive(Debug, Serialize)]
pub struct ResponsesPayload {
    pub responses: Vec<Response>,
    pub summaries: Vec<QuestionSummary>,
    pub total: i64,
}

pub async fn list(user_info: UserInfo, form_id: Path<(i32,)>, db: Data<PgStoreManager>) -> Result<Json<ResponsesPayload>, Error> {
    let mut store = db.acquire().await?;
    let listing = response_service::form_responses(&mut store, user_info.id, form_id.into_inner().0).await?;
    Ok(Json(ResponsesPayload {
        responses: listing.responses,
        summaries: listing.summaries,
        total: listing.total,
    }))
}

pub async fn export(user_info: UserInfo, form_id: Path<(i32,)>, db: Data<PgStoreManager>) -> Result<HttpResponse, Error> {
    let mut store = db.acquire().await?;
    let (filename, csv) = response_service::export_responses(&mut store, user_info.id, form_id.into_inner().0).await?;
    Ok(HttpResponse::build(StatusCode::OK)
        .insert_header((header::CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)))
        .body(csv))
}
