use sea_orm::{DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, TransactionCmd, transactions, util::TransactionForm};

use super::{super::with_tx, Engine};

impl Engine {
    /// Overwrite an owned transaction with `cmd`.
    ///
    /// The edited row is the source side of the form. When it is a transfer
    /// leg, its linked leg is rewritten too; a row that is not yet a transfer
    /// gets a new linked leg when the form asks for one. A transfer leg edited
    /// into a plain transaction drops its linked leg, taking that leg's value
    /// back from its wallet.
    pub async fn edit_transaction(&self, id: i32, cmd: TransactionCmd) -> ResultEngine<()> {
        let form = TransactionForm::try_from(&cmd)?;
        with_tx!(self, |db_tx| {
            let model = self
                .require_transaction_owned(&db_tx, id, form.user_id)
                .await?;
            self.check_form_refs(&db_tx, &form).await?;

            match (model.is_exchange(), form.is_exchange()) {
                (true, false) => {
                    match self.linked_leg(&db_tx, &model).await? {
                        Some(linked) => {
                            tracing::debug!(
                                transaction_id = id,
                                linked_id = linked.id,
                                "transfer edited into a plain transaction"
                            );
                            self.remove_leg(&db_tx, linked).await?;
                        }
                        None => tracing::warn!(
                            transaction_id = id,
                            linked_ref = ?model.transaction_destination_id,
                            "linked leg already gone"
                        ),
                    }
                    self.overwrite_leg(&db_tx, model, &form, form.amount, form.wallet_id, None)
                        .await?;
                }
                (true, true) => {
                    let linked_ref = model.transaction_destination_id;
                    let linked = self.linked_leg(&db_tx, &model).await?.ok_or_else(|| {
                        tracing::error!(transaction_id = id, ?linked_ref, "linked leg is missing");
                        EngineError::BrokenTransfer(format!(
                            "linked transaction of {id} not exists"
                        ))
                    })?;

                    let (source_value, destination_value) = form.amount.transfer_legs()?;
                    let linked_id = linked.id;
                    self.overwrite_leg(
                        &db_tx,
                        model,
                        &form,
                        source_value,
                        form.wallet_id,
                        Some(linked_id),
                    )
                    .await?;
                    self.overwrite_leg(
                        &db_tx,
                        linked,
                        &form,
                        destination_value,
                        form.destination()?,
                        Some(id),
                    )
                    .await?;
                }
                (false, true) => {
                    let (source_value, _) = form.amount.transfer_legs()?;
                    self.overwrite_leg(&db_tx, model, &form, source_value, form.wallet_id, None)
                        .await?;
                    self.attach_counterpart(&db_tx, id, &form).await?;
                }
                (false, false) => {
                    self.overwrite_leg(&db_tx, model, &form, form.amount, form.wallet_id, None)
                        .await?;
                }
            }

            tracing::info!(user_id = form.user_id, transaction_id = id, "edited transaction");
            Ok(())
        })
    }

    /// The other leg of a transfer, if it still exists.
    async fn linked_leg(
        &self,
        db: &DatabaseTransaction,
        model: &transactions::Model,
    ) -> ResultEngine<Option<transactions::Model>> {
        let Some(linked_id) = model.transaction_destination_id else {
            return Ok(None);
        };
        Ok(transactions::Entity::find_by_id(linked_id)
            .filter(transactions::Column::UserId.eq(model.user_id))
            .one(db)
            .await?)
    }
}
