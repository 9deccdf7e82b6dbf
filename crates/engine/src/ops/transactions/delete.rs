use sea_orm::TransactionTrait;

use crate::ResultEngine;

use super::{super::with_tx, Engine};

impl Engine {
    /// Delete one owned transaction and take its value back from the wallet.
    ///
    /// Only the matching row goes: the other leg of a transfer stays, still
    /// pointing at the deleted id.
    pub async fn delete_transaction(&self, id: i32, user_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_transaction_owned(&db_tx, id, user_id).await?;
            let linked_ref = model.transaction_destination_id;
            self.remove_leg(&db_tx, model).await?;

            if let Some(linked_id) = linked_ref {
                tracing::warn!(
                    transaction_id = id,
                    linked_id,
                    "deleted one leg of a transfer, the other leg now dangles"
                );
            }
            tracing::info!(user_id, transaction_id = id, "deleted transaction");
            Ok(())
        })
    }
}
