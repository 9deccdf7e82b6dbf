//! Transfer legs.
//!
//! A transfer of `amount` from wallet A to wallet B is two rows: `-amount` on
//! A and `+amount` on B, each holding the other's id in
//! `transaction_destination_id`. Callers run these steps inside their own DB
//! transaction so a failure leaves neither leg behind.

use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*, sea_query::Expr};

use crate::{
    ResultEngine,
    transactions::{self, NewLeg},
    util::TransactionForm,
};

use super::{Engine, source_leg};

impl Engine {
    /// Insert both legs of the transfer described by `form` and link them.
    /// Returns the source leg id.
    pub(super) async fn link_transfer(
        &self,
        db: &DatabaseTransaction,
        form: &TransactionForm,
    ) -> ResultEngine<i32> {
        let (source_value, _) = form.amount.transfer_legs()?;
        let source_id = self.insert_leg(db, &source_leg(form, source_value)).await?;
        self.attach_counterpart(db, source_id, form).await?;
        Ok(source_id)
    }

    /// Insert the destination leg for an existing source leg and point the
    /// source at it. Returns the destination leg id.
    pub(super) async fn attach_counterpart(
        &self,
        db: &DatabaseTransaction,
        source_id: i32,
        form: &TransactionForm,
    ) -> ResultEngine<i32> {
        let (_, destination_value) = form.amount.transfer_legs()?;
        let counterpart = NewLeg {
            description: form.description.clone(),
            date: form.date,
            value: destination_value,
            wallet_id: form.destination()?,
            user_id: form.user_id,
            type_id: form.type_id,
            transaction_destination_id: Some(source_id),
        };
        let counterpart_id = self.insert_leg(db, &counterpart).await?;

        transactions::Entity::update_many()
            .col_expr(
                transactions::Column::TransactionDestinationId,
                Expr::value(counterpart_id),
            )
            .filter(transactions::Column::Id.eq(source_id))
            .exec(db)
            .await?;

        tracing::debug!(source_id, counterpart_id, "linked transfer legs");
        Ok(counterpart_id)
    }
}
