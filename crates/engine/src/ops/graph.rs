use chrono::NaiveDate;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{
    BalanceSeries, Money, ResultEngine, anchor_balance, running_balance, transactions, wallets,
};

use super::{Engine, with_tx};

impl Engine {
    /// Running balance of every wallet owned by `user_id`, one series per
    /// wallet in creation order.
    ///
    /// Each series starts from the wallet's balance before any movement dated
    /// up to `today` and adds the wallet's movements by date. A balance that
    /// cannot be represented fails with `InvalidAmount`.
    pub async fn balance_graph(
        &self,
        user_id: i32,
        today: NaiveDate,
    ) -> ResultEngine<Vec<BalanceSeries>> {
        // 1970-01-01
        let epoch = NaiveDate::default();
        with_tx!(self, |db_tx| {
            let wallet_models = wallets::Entity::find()
                .filter(wallets::Column::OwnerId.eq(user_id))
                .order_by_asc(wallets::Column::Id)
                .all(&db_tx)
                .await?;

            let mut series = Vec::with_capacity(wallet_models.len());
            for wallet in wallet_models {
                let recorded: Option<i64> = transactions::Entity::find()
                    .select_only()
                    .column_as(
                        Expr::col((transactions::Entity, transactions::Column::ValueMinor)).sum(),
                        "total",
                    )
                    .filter(transactions::Column::WalletId.eq(wallet.id))
                    .filter(transactions::Column::UserId.eq(user_id))
                    .filter(transactions::Column::Date.between(epoch, today))
                    .into_tuple::<Option<i64>>()
                    .one(&db_tx)
                    .await?
                    .flatten();
                let anchor = anchor_balance(
                    Money::new(wallet.value_minor),
                    Money::new(recorded.unwrap_or(0)),
                )?;

                let movements = transactions::Entity::find()
                    .filter(transactions::Column::WalletId.eq(wallet.id))
                    .filter(transactions::Column::UserId.eq(user_id))
                    .order_by_asc(transactions::Column::Date)
                    .order_by_asc(transactions::Column::Id)
                    .all(&db_tx)
                    .await?
                    .into_iter()
                    .map(|model| (model.date, Money::new(model.value_minor)));

                series.push(BalanceSeries {
                    wallet_id: wallet.id,
                    label: wallet.name,
                    color: wallet.color,
                    points: running_balance(anchor, movements)?,
                });
            }
            Ok(series)
        })
    }
}
