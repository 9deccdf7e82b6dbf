//! Transaction primitives.
//!
//! A `Transaction` is a dated, signed movement of money on one wallet. A
//! transfer between two wallets is stored as two transactions (legs) of the
//! exchange type, each pointing at the other through
//! `transaction_destination_id`.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::Money;

/// Reserved transaction type marking a transfer leg.
pub const EXCHANGE_TYPE_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub description: String,
    pub date: NaiveDate,
    pub value: Money,
    pub wallet_id: i32,
    pub user_id: i32,
    pub type_id: i32,
    /// The other leg of a transfer. May dangle once that leg is deleted.
    pub transaction_destination_id: Option<i32>,
}

/// A transaction joined with the names shown in the transaction table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub wallet_name: String,
    pub type_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    pub date: Date,
    pub value_minor: i64,
    pub wallet_id: i32,
    pub user_id: i32,
    pub type_id: i32,
    pub transaction_destination_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Wallets,
    #[sea_orm(
        belongs_to = "super::transaction_types::Entity",
        from = "Column::TypeId",
        to = "super::transaction_types::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    TransactionTypes,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl Related<super::transaction_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this row is one leg of a transfer.
    pub fn is_exchange(&self) -> bool {
        self.type_id == EXCHANGE_TYPE_ID
    }
}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            date: model.date,
            value: Money::new(model.value_minor),
            wallet_id: model.wallet_id,
            user_id: model.user_id,
            type_id: model.type_id,
            transaction_destination_id: model.transaction_destination_id,
        }
    }
}

/// A row about to be inserted; the id is assigned by the store.
#[derive(Clone, Debug)]
pub(crate) struct NewLeg {
    pub description: String,
    pub date: NaiveDate,
    pub value: Money,
    pub wallet_id: i32,
    pub user_id: i32,
    pub type_id: i32,
    pub transaction_destination_id: Option<i32>,
}

impl From<&NewLeg> for ActiveModel {
    fn from(leg: &NewLeg) -> Self {
        Self {
            id: ActiveValue::NotSet,
            description: ActiveValue::Set(leg.description.clone()),
            date: ActiveValue::Set(leg.date),
            value_minor: ActiveValue::Set(leg.value.minor()),
            wallet_id: ActiveValue::Set(leg.wallet_id),
            user_id: ActiveValue::Set(leg.user_id),
            type_id: ActiveValue::Set(leg.type_id),
            transaction_destination_id: ActiveValue::Set(leg.transaction_destination_id),
        }
    }
}
