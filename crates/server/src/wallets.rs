//! Wallets API endpoints

use api_types::wallet::{WalletCreated, WalletNew, WalletView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::Money;

use crate::{
    ServerError,
    extract::ApiJson,
    server::{AuthUser, ServerState},
};

pub async fn create(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<WalletNew>,
) -> Result<(StatusCode, Json<WalletCreated>), ServerError> {
    let value: Money = payload.value.parse()?;
    let id = state
        .engine
        .new_wallet(user_id, &payload.name, &payload.color, value)
        .await?;
    Ok((StatusCode::CREATED, Json(WalletCreated { id })))
}

pub async fn list(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<WalletView>>, ServerError> {
    let wallets = state.engine.list_wallets(user_id).await?;
    Ok(Json(
        wallets
            .into_iter()
            .map(|wallet| WalletView {
                id: wallet.id,
                name: wallet.name,
                color: wallet.color,
                value: wallet.value.to_string(),
            })
            .collect(),
    ))
}
