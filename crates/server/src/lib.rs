use api_types::error::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod extract;
mod server;
mod transactions;
mod wallets;

#[derive(Debug)]
pub enum ServerError {
    /// The request carried no session token.
    LoginRequired,
    /// A required field is absent from the request body.
    MissingField(String),
    /// The request body, path or query could not be read.
    BadRequest(String),
    Engine(EngineError),
}

/// Status and numeric error code reported for an engine error.
fn status_for_engine_error(err: &EngineError) -> (StatusCode, i32) {
    match err {
        EngineError::MissingField(_) => (StatusCode::BAD_REQUEST, 1),
        EngineError::InvalidAmount(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidType(_)
        | EngineError::InvalidSort(_)
        | EngineError::InvalidTransfer(_) => (StatusCode::BAD_REQUEST, 2),
        EngineError::ExistingKey(_) => (StatusCode::BAD_REQUEST, 3),
        EngineError::Unauthenticated => (StatusCode::UNAUTHORIZED, 105),
        EngineError::SessionExpired => (StatusCode::UNAUTHORIZED, 106),
        EngineError::KeyNotFound(_) => (StatusCode::NOT_FOUND, 107),
        EngineError::BrokenTransfer(_) | EngineError::Database(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, 500)
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::BrokenTransfer(msg) => {
            tracing::error!("broken transfer: {msg}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            ServerError::LoginRequired => (
                StatusCode::UNAUTHORIZED,
                100,
                "login required".to_string(),
            ),
            ServerError::MissingField(message) => (StatusCode::BAD_REQUEST, 1, message),
            ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, 2, message),
            ServerError::Engine(err) => {
                let (status, code) = status_for_engine_error(&err);
                (status, code, message_for_engine_error(err))
            }
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_code(err: EngineError) -> (StatusCode, i32) {
        status_for_engine_error(&err)
    }

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(
            status_and_code(EngineError::MissingField("value".to_string())),
            (StatusCode::BAD_REQUEST, 1)
        );
        assert_eq!(
            status_and_code(EngineError::InvalidSort("x".to_string())),
            (StatusCode::BAD_REQUEST, 2)
        );
        assert_eq!(
            status_and_code(EngineError::ExistingKey("x".to_string())),
            (StatusCode::BAD_REQUEST, 3)
        );
    }

    #[test]
    fn access_errors_map_to_401() {
        assert_eq!(
            status_and_code(EngineError::Unauthenticated),
            (StatusCode::UNAUTHORIZED, 105)
        );
        assert_eq!(
            status_and_code(EngineError::SessionExpired),
            (StatusCode::UNAUTHORIZED, 106)
        );
        let res = ServerError::LoginRequired.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unreadable_requests_map_to_400() {
        let missing = ServerError::MissingField("missing field `name`".to_string());
        assert_eq!(missing.into_response().status(), StatusCode::BAD_REQUEST);
        let malformed = ServerError::BadRequest("expected i32".to_string());
        assert_eq!(malformed.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn broken_transfer_is_a_generic_failure() {
        let res =
            ServerError::from(EngineError::BrokenTransfer("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
