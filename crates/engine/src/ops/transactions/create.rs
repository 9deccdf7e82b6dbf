use sea_orm::TransactionTrait;

use crate::{ResultEngine, TransactionCmd, util::TransactionForm};

use super::{super::with_tx, Engine, source_leg};

impl Engine {
    /// Record a transaction for `cmd.user_id`.
    ///
    /// A transfer is stored as two linked legs; the returned id is the one of
    /// the source leg.
    pub async fn create_transaction(&self, cmd: TransactionCmd) -> ResultEngine<i32> {
        let form = TransactionForm::try_from(&cmd)?;
        with_tx!(self, |db_tx| {
            self.check_form_refs(&db_tx, &form).await?;

            let id = if form.is_exchange() {
                self.link_transfer(&db_tx, &form).await?
            } else {
                self.insert_leg(&db_tx, &source_leg(&form, form.amount))
                    .await?
            };
            tracing::info!(
                user_id = form.user_id,
                transaction_id = id,
                type_id = form.type_id,
                "created transaction"
            );
            Ok(id)
        })
    }
}
