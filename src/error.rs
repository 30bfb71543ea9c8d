use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::dotenv::Error as DotError;
use crate::serde::Serialize;
use crate::thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("please provide at least 2 options")]
    InsufficientOptions,

    #[error("poll title must not be empty")]
    EmptyTitle,

    #[error("no changes detected")]
    NoChangesDetected,

    #[error("poll is not active")]
    PollInactive,

    #[error("invalid option")]
    OptionNotFound,

    #[error("poll not found")]
    PollNotFound,

    #[error("pending edit not found")]
    PendingEditNotFound,

    #[error("poll has been edited since this change was proposed")]
    StaleEdit,

    #[error("config error: {0}")]
    Config(String),

    #[error("dotenv error")]
    DotEnvError(#[from] DotError),

    #[error("server error: {0}")]
    ServerError(String),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::InsufficientOptions => "INSUFFICIENT_OPTIONS",
            Error::EmptyTitle => "EMPTY_TITLE",
            Error::NoChangesDetected => "NO_CHANGES_DETECTED",
            Error::PollInactive => "POLL_INACTIVE",
            Error::OptionNotFound => "OPTION_NOT_FOUND",
            Error::PollNotFound => "POLL_NOT_FOUND",
            Error::PendingEditNotFound => "PENDING_EDIT_NOT_FOUND",
            Error::StaleEdit => "STALE_EDIT",
            Error::Config(_) | Error::DotEnvError(_) | Error::ServerError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InsufficientOptions | Error::EmptyTitle | Error::NoChangesDetected | Error::PollInactive | Error::OptionNotFound => StatusCode::BAD_REQUEST,
            Error::PollNotFound | Error::PendingEditNotFound => StatusCode::NOT_FOUND,
            Error::StaleEdit => StatusCode::CONFLICT,
            Error::Config(_) | Error::DotEnvError(_) | Error::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            log::error!("{}", self);
            "an internal error occurred".to_owned()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error: self.code(), message })
    }
}
