//! Access guard: token resolution and ownership checks.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Session, transaction_types, transactions, users,
    util::normalize_required_name, wallets,
};

use super::{Engine, with_tx};

/// Generates a `require_*` lookup for a row owned by a user.
///
/// Foreign rows are reported exactly like missing ones.
macro_rules! impl_owned_by_user {
    ($require_fn:ident, $entity:path, $model:ty, $owner_col:expr, $err_msg:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            id: i32,
            user_id: i32,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id)
                .filter($owner_col.eq(user_id))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

/// Random URL-safe session token.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}

impl Engine {
    impl_owned_by_user!(
        require_wallet_owned,
        wallets::Entity,
        wallets::Model,
        wallets::Column::OwnerId,
        "wallet not exists"
    );

    impl_owned_by_user!(
        require_transaction_owned,
        transactions::Entity,
        transactions::Model,
        transactions::Column::UserId,
        "transaction not exists"
    );

    pub(super) async fn require_type(
        &self,
        db: &DatabaseTransaction,
        type_id: i32,
    ) -> ResultEngine<()> {
        let exists = transaction_types::Entity::find_by_id(type_id)
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::InvalidType(format!(
                "unknown transaction type: {type_id}"
            )));
        }
        Ok(())
    }

    /// Resolve a bearer token to the session it belongs to.
    ///
    /// Returns `None` when no user currently holds the token (unknown or
    /// superseded).
    pub async fn resolve(&self, token: &str, now: DateTime<Utc>) -> ResultEngine<Option<Session>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        with_tx!(self, |db_tx| {
            let user = users::Entity::find()
                .filter(users::Column::Token.eq(token))
                .one(&db_tx)
                .await?;
            Ok(user.map(|model| Session::from_model(&model, now)))
        })
    }

    /// Resolve a bearer token to a user id, failing when the session is not
    /// usable.
    pub async fn authenticate(&self, token: &str, now: DateTime<Utc>) -> ResultEngine<i32> {
        let Some(session) = self.resolve(token, now).await? else {
            tracing::warn!("rejected request: token does not match any user");
            return Err(EngineError::Unauthenticated);
        };
        if !session.valid {
            tracing::warn!(user_id = session.user_id, "rejected request: session expired");
            return Err(EngineError::SessionExpired);
        }
        Ok(session.user_id)
    }

    /// Create a user. Usernames are unique.
    pub async fn new_user(&self, username: &str, password: &str) -> ResultEngine<i32> {
        let username = normalize_required_name(username, "user")?;
        if password.is_empty() {
            return Err(EngineError::MissingField("password".to_string()));
        }
        with_tx!(self, |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Username.eq(username.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(username));
            }

            let user = users::ActiveModel {
                id: ActiveValue::NotSet,
                username: ActiveValue::Set(username.clone()),
                password: ActiveValue::Set(password.to_string()),
                token: ActiveValue::Set(None),
                token_expires_at: ActiveValue::Set(None),
            }
            .insert(&db_tx)
            .await?;
            tracing::info!(user_id = user.id, "created user {username}");
            Ok(user.id)
        })
    }

    /// Id of the user called `username`.
    pub async fn user_id(&self, username: &str) -> ResultEngine<i32> {
        with_tx!(self, |db_tx| {
            users::Entity::find()
                .filter(users::Column::Username.eq(username.trim()))
                .one(&db_tx)
                .await?
                .map(|user| user.id)
                .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
        })
    }

    /// Issue a fresh session token for `username`, valid for `ttl` from
    /// `now`. Any previous token of the user stops resolving.
    pub async fn issue_token(
        &self,
        username: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> ResultEngine<String> {
        with_tx!(self, |db_tx| {
            let user = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

            let token = generate_token();
            let mut active: users::ActiveModel = user.into();
            active.token = ActiveValue::Set(Some(token.clone()));
            active.token_expires_at = ActiveValue::Set(Some(now + ttl));
            let user = active.update(&db_tx).await?;
            tracing::info!(user_id = user.id, "issued session token");
            Ok(token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_url_safe_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
