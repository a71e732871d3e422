use std::future::{ready, Ready};

use actix_web::web::Data;
use actix_web::{dev, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::ports::tokener::{Payload, Tokener};
use crate::error::Error;
use crate::impls::tokener::jwt::JWT;

#[derive(Debug, Deserialize, Serialize)]
pub struct Claim {
    pub user: String,
    pub exp: i64,
}

impl Payload for Claim {
    fn user(&self) -> &str {
        &self.user
    }
}

#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: i32,
}

// For routes that serve both the owner dashboard and the public form page: a
// missing token is anonymous, a bad token is still an error.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserInfo>);

fn authenticate(req: &HttpRequest) -> Result<Option<UserInfo>, Error> {
    let header = match req.headers().get("Authorization") {
        None => return Ok(None),
        Some(header) => header,
    };
    let token = header.to_str().map_err(|_| Error::Unauthorized)?;
    let token = token.strip_prefix("Bearer ").unwrap_or(token);
    let tokener = req
        .app_data::<Data<JWT>>()
        .ok_or_else(|| Error::ServerError("tokener not configured".into()))?;
    let claim: Claim = tokener.verify_token(token).map_err(|_| Error::Unauthorized)?;
    let id = claim.user.parse::<i32>().map_err(|_| Error::Unauthorized)?;
    Ok(Some(UserInfo { id }))
}

impl FromRequest for UserInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        ready(authenticate(req).and_then(|user| user.ok_or(Error::Unauthorized)))
    }
}

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        ready(authenticate(req).map(MaybeUser))
    }
}
