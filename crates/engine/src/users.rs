//! Users table and the session view the access guard works with.
//!
//! A user holds at most one session token at a time; issuing a new token
//! supersedes the previous one, which then no longer resolves.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    #[sea_orm(unique)]
    pub token: Option<String>,
    pub token_expires_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wallets::Entity")]
    Wallets,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Outcome of resolving a bearer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    /// `false` when the session has no expiry or the expiry is not in the
    /// future.
    pub valid: bool,
}

impl Session {
    pub(crate) fn from_model(model: &Model, now: DateTime<Utc>) -> Self {
        Self {
            user_id: model.id,
            valid: model.token_expires_at.is_some_and(|expires| expires > now),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn user(expires: Option<DateTime<Utc>>) -> Model {
        Model {
            id: 7,
            username: "alice".to_string(),
            password: "secret".to_string(),
            token: Some("tok".to_string()),
            token_expires_at: expires,
        }
    }

    #[test]
    fn session_valid_until_expiry() {
        let now = Utc::now();
        let session = Session::from_model(&user(Some(now + Duration::hours(1))), now);
        assert_eq!(
            session,
            Session {
                user_id: 7,
                valid: true
            }
        );
    }

    #[test]
    fn session_invalid_at_or_after_expiry() {
        let now = Utc::now();
        assert!(!Session::from_model(&user(Some(now)), now).valid);
        assert!(!Session::from_model(&user(Some(now - Duration::seconds(1))), now).valid);
        assert!(!Session::from_model(&user(None), now).valid);
    }
}
