use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, header::AUTHORIZATION},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{ServerError, transactions, wallets};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Id of the user a request was authenticated as.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub i32);

/// `TypedHeader` for the session token.
///
/// Accepts both `Authorization: Bearer <token>` and a bare
/// `Authorization: <token>`.
#[derive(Debug)]
struct SessionToken(String);

impl Header for SessionToken {
    fn name() -> &'static HeaderName {
        &AUTHORIZATION
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let value = value.trim();
        let token = match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => value,
        };

        Ok(SessionToken(token.to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match HeaderValue::from_str(&format!("Bearer {}", self.0)) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode authorization header"),
        }
    }
}

async fn auth(
    session: Option<TypedHeader<SessionToken>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(SessionToken(token))) = session else {
        tracing::warn!("rejected request: missing session token");
        return Err(ServerError::LoginRequired);
    };

    let user_id = state.engine.authenticate(&token, Utc::now()).await?;

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/transaction/new", post(transactions::create))
        .route("/transaction/list", get(transactions::list))
        .route("/transaction/get/{id}", get(transactions::get))
        .route("/transaction/edit/{id}", post(transactions::edit))
        .route("/transaction/delete/{id}", get(transactions::delete))
        .route("/transaction/graph", get(transactions::graph))
        .route("/wallet/new", post(wallets::create))
        .route("/wallet/list", get(wallets::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
