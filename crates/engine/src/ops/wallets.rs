use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, Money, ResultEngine, Wallet, util::normalize_required_name, wallets,
};

use super::{Engine, with_tx};

impl Engine {
    /// Add a new wallet owned by `owner_id`, opening at `value`.
    ///
    /// Names are unique per owner.
    pub async fn new_wallet(
        &self,
        owner_id: i32,
        name: &str,
        color: &str,
        value: Money,
    ) -> ResultEngine<i32> {
        let name = normalize_required_name(name, "wallet")?;
        let color = color.trim();
        if color.is_empty() {
            return Err(EngineError::MissingField("color".to_string()));
        }
        with_tx!(self, |db_tx| {
            let exists = wallets::Entity::find()
                .filter(wallets::Column::OwnerId.eq(owner_id))
                .filter(wallets::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let wallet = Wallet {
                id: 0,
                name,
                color: color.to_string(),
                value,
                owner_id,
            };
            let wallet_model: wallets::ActiveModel = (&wallet).into();
            let model = wallet_model.insert(&db_tx).await?;
            tracing::info!(owner_id, wallet_id = model.id, "created wallet {}", model.name);
            Ok(model.id)
        })
    }

    /// Wallets owned by `user_id`, in creation order.
    pub async fn list_wallets(&self, user_id: i32) -> ResultEngine<Vec<Wallet>> {
        with_tx!(self, |db_tx| {
            let models = wallets::Entity::find()
                .filter(wallets::Column::OwnerId.eq(user_id))
                .order_by_asc(wallets::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(models.into_iter().map(Wallet::from).collect())
        })
    }
}
