//! Transaction CRUD.
//!
//! Every write also moves the live balance of the wallets it touches, inside
//! the same DB transaction as the row change.

use sea_orm::{ActiveValue, DatabaseTransaction, prelude::*};

use crate::{
    EngineError, Money, ResultEngine,
    transactions::{self, NewLeg},
    util::TransactionForm,
    wallets,
};

use super::Engine;

mod create;
mod delete;
mod list;
mod transfer;
mod update;

impl Engine {
    /// Add `delta` to the live balance of a wallet. A balance leaving the
    /// `i64` range is refused with `InvalidAmount`.
    pub(super) async fn shift_wallet(
        &self,
        db: &DatabaseTransaction,
        wallet_id: i32,
        delta: Money,
    ) -> ResultEngine<()> {
        if delta.is_zero() {
            return Ok(());
        }
        let wallet = wallets::Entity::find_by_id(wallet_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("wallet not exists".to_string()))?;
        let balance = Money::new(wallet.value_minor).checked_add(delta)?;

        let mut active: wallets::ActiveModel = wallet.into();
        active.value_minor = ActiveValue::Set(balance.minor());
        active.update(db).await?;
        Ok(())
    }

    /// Insert one row and apply it to its wallet. Returns the new id.
    pub(super) async fn insert_leg(
        &self,
        db: &DatabaseTransaction,
        leg: &NewLeg,
    ) -> ResultEngine<i32> {
        let model = transactions::ActiveModel::from(leg).insert(db).await?;
        self.shift_wallet(db, leg.wallet_id, leg.value).await?;
        Ok(model.id)
    }

    /// Delete one row and take its value back from its wallet.
    pub(super) async fn remove_leg(
        &self,
        db: &DatabaseTransaction,
        model: transactions::Model,
    ) -> ResultEngine<()> {
        transactions::Entity::delete_by_id(model.id).exec(db).await?;
        self.shift_wallet(db, model.wallet_id, Money::new(model.value_minor).reversed()?)
            .await
    }

    /// Overwrite the editable fields of an existing row with `form`, storing
    /// `value` on `wallet_id`.
    ///
    /// The old value is taken back from the old wallet before the new one is
    /// applied, so moving a row between wallets keeps both balances right.
    pub(super) async fn overwrite_leg(
        &self,
        db: &DatabaseTransaction,
        model: transactions::Model,
        form: &TransactionForm,
        value: Money,
        wallet_id: i32,
        destination: Option<i32>,
    ) -> ResultEngine<transactions::Model> {
        self.shift_wallet(db, model.wallet_id, Money::new(model.value_minor).reversed()?)
            .await?;
        self.shift_wallet(db, wallet_id, value).await?;

        let mut active: transactions::ActiveModel = model.into();
        active.description = ActiveValue::Set(form.description.clone());
        active.date = ActiveValue::Set(form.date);
        active.value_minor = ActiveValue::Set(value.minor());
        active.wallet_id = ActiveValue::Set(wallet_id);
        active.type_id = ActiveValue::Set(form.type_id);
        active.transaction_destination_id = ActiveValue::Set(destination);
        Ok(active.update(db).await?)
    }

    /// Check everything a form refers to exists and belongs to its user.
    pub(super) async fn check_form_refs(
        &self,
        db: &DatabaseTransaction,
        form: &TransactionForm,
    ) -> ResultEngine<()> {
        self.require_type(db, form.type_id).await?;
        self.require_wallet_owned(db, form.wallet_id, form.user_id)
            .await?;
        if form.is_exchange() {
            self.require_wallet_owned(db, form.destination()?, form.user_id)
                .await?;
        }
        Ok(())
    }
}

/// The leg a form describes on its own wallet.
fn source_leg(form: &TransactionForm, value: Money) -> NewLeg {
    NewLeg {
        description: form.description.clone(),
        date: form.date,
        value,
        wallet_id: form.wallet_id,
        user_id: form.user_id,
        type_id: form.type_id,
        transaction_destination_id: None,
    }
}
