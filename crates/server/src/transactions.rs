//! Transactions API endpoints

use api_types::{
    graph::{LineGraph, Point},
    transaction::{
        Transaction, TransactionCreated, TransactionForm, TransactionList, TransactionTableView,
    },
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use engine::{BalanceSeries, SortSpec, TransactionCmd, TransactionRow};

use crate::{
    ServerError,
    extract::{ApiJson, ApiPath, ApiQuery},
    server::{AuthUser, ServerState},
};

fn command(user_id: i32, form: TransactionForm) -> TransactionCmd {
    TransactionCmd {
        user_id,
        description: form.description,
        date: form.date,
        value: form.value,
        wallet_id: form.wallet,
        wallet_destination_id: form.wallet_destination,
        type_id: form.type_id,
    }
}

fn transaction_view(tx: engine::Transaction) -> Transaction {
    Transaction {
        id: tx.id,
        description: tx.description,
        date: tx.date,
        value: tx.value.to_string(),
        wallet: tx.wallet_id,
        type_id: tx.type_id,
        transaction_destination_id: tx.transaction_destination_id,
    }
}

fn table_view(row: TransactionRow) -> TransactionTableView {
    let tx = row.transaction;
    TransactionTableView {
        id: tx.id,
        description: tx.description,
        date: tx.date,
        value: tx.value.to_string(),
        wallet_id: tx.wallet_id,
        wallet: row.wallet_name,
        type_id: tx.type_id,
        type_name: row.type_name,
        transaction_destination_id: tx.transaction_destination_id,
    }
}

fn line_graph(series: BalanceSeries) -> LineGraph {
    LineGraph {
        id: series.label,
        color: series.color,
        data: series
            .points
            .into_iter()
            .map(|point| Point {
                x: point.date,
                y: point.balance.to_string(),
            })
            .collect(),
    }
}

pub async fn create(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<TransactionForm>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let id = state
        .engine
        .create_transaction(command(user_id, payload))
        .await?;
    Ok(Json(TransactionCreated { id }))
}

pub async fn list(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<TransactionList>,
) -> Result<Json<Vec<TransactionTableView>>, ServerError> {
    let sort = SortSpec::decode(query.sort.as_deref())?;
    let rows = state.engine.list_transactions(user_id, &sort).await?;
    Ok(Json(rows.into_iter().map(table_view).collect()))
}

pub async fn get(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Transaction>, ServerError> {
    let tx = state.engine.transaction(id, user_id).await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn edit(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<TransactionForm>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .edit_transaction(id, command(user_id, payload))
        .await?;
    Ok(StatusCode::OK)
}

pub async fn delete(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(id, user_id).await?;
    Ok(StatusCode::OK)
}

pub async fn graph(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<LineGraph>>, ServerError> {
    let today = Utc::now().date_naive();
    let series = state.engine.balance_graph(user_id, today).await?;
    Ok(Json(series.into_iter().map(line_graph).collect()))
}
