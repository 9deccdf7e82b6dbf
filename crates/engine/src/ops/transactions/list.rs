use std::collections::HashMap;

use sea_orm::{
    JoinType, Order, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
    prelude::*,
};

use crate::{
    ResultEngine, SortDirection, SortField, SortSpec, Transaction, TransactionRow,
    transaction_types, transactions, wallets,
};

use super::{super::with_tx, Engine};

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

impl Engine {
    /// Transactions of `user_id`, ordered by `sort` and then by id.
    pub async fn list_transactions(
        &self,
        user_id: i32,
        sort: &SortSpec,
    ) -> ResultEngine<Vec<TransactionRow>> {
        with_tx!(self, |db_tx| {
            let type_names: HashMap<i32, String> = transaction_types::Entity::find()
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|model| (model.id, model.name))
                .collect();

            let mut query = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id))
                .find_also_related(wallets::Entity)
                .join(
                    JoinType::InnerJoin,
                    transactions::Relation::TransactionTypes.def(),
                );
            for key in sort.keys() {
                let order = Order::from(key.direction);
                query = match key.field {
                    SortField::Id => query.order_by(transactions::Column::Id, order),
                    SortField::Description => {
                        query.order_by(transactions::Column::Description, order)
                    }
                    SortField::Date => query.order_by(transactions::Column::Date, order),
                    SortField::Value => query.order_by(transactions::Column::ValueMinor, order),
                    SortField::Wallet => query.order_by(wallets::Column::Name, order),
                    SortField::Type => query.order_by(transaction_types::Column::Name, order),
                };
            }
            let rows = query
                .order_by_asc(transactions::Column::Id)
                .all(&db_tx)
                .await?;

            Ok(rows
                .into_iter()
                .map(|(model, wallet)| {
                    let type_name = type_names.get(&model.type_id).cloned().unwrap_or_default();
                    TransactionRow {
                        transaction: Transaction::from(model),
                        wallet_name: wallet.map(|w| w.name).unwrap_or_default(),
                        type_name,
                    }
                })
                .collect())
        })
    }

    /// One transaction, if `user_id` owns it.
    pub async fn transaction(&self, id: i32, user_id: i32) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let model = self.require_transaction_owned(&db_tx, id, user_id).await?;
            Ok(Transaction::from(model))
        })
    }
}
