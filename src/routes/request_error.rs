use log::error;
use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::{catch, Request};

use crate::store::StoreError;

/// Public error shape. Detail stays in the server log.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    error: &'static str,
}

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid client input; the store was not touched.
    InvalidData,
    /// The store failed the request. Carries only the public message.
    Store { message: &'static str },
}

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

impl ApiError {
    /// Logs the store failure in full and keeps a generic message for the
    /// client.
    pub fn store(error: StoreError, message: &'static str) -> Self {
        error!("{}: {}", message, error);
        Self::Store { message }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let (code, error) = match self {
            Self::InvalidData => (Status::BadRequest, "Invalid data"),
            Self::Store { message } => (Status::InternalServerError, message),
        };
        status::Custom(code, Json(ErrorBody { error })).respond_to(request)
    }
}

#[catch(404)]
pub fn not_found() -> Json<ErrorBody> {
    Json(ErrorBody { error: "Not found" })
}

#[catch(500)]
pub fn internal_error() -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "Internal server error",
    })
}
