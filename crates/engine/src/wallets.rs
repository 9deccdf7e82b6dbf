//! The module contains `Wallet` struct and its table mapping.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::Money;

/// A wallet.
///
/// A wallet is a representation of a real wallet, a bank account or anything
/// else where money are kept. `value` is the live balance: every recorded
/// transaction has already been applied to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i32,
    pub name: String,
    /// Display color used by the balance graph.
    pub color: String,
    pub value: Money,
    pub owner_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub color: String,
    pub value_minor: i64,
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Wallet {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
            value: Money::new(model.value_minor),
            owner_id: model.owner_id,
        }
    }
}

impl From<&Wallet> for ActiveModel {
    fn from(value: &Wallet) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(value.name.clone()),
            color: ActiveValue::Set(value.color.clone()),
            value_minor: ActiveValue::Set(value.value.minor()),
            owner_id: ActiveValue::Set(value.owner_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_maps_to_wallet() {
        let wallet = Wallet::from(Model {
            id: 3,
            name: "Cash".to_string(),
            color: "#ff0000".to_string(),
            value_minor: -1050,
            owner_id: 1,
        });

        assert_eq!(wallet.id, 3);
        assert_eq!(wallet.value, Money::new(-1050));
        assert_eq!(wallet.color, "#ff0000");
    }

    #[test]
    fn new_wallet_leaves_id_to_the_store() {
        let wallet = Wallet {
            id: 0,
            name: "Bank".to_string(),
            color: "#00ff00".to_string(),
            value: Money::new(10_000),
            owner_id: 2,
        };
        let active: ActiveModel = (&wallet).into();

        assert_eq!(active.id, ActiveValue::NotSet);
        assert_eq!(active.value_minor, ActiveValue::Set(10_000));
        assert_eq!(active.owner_id, ActiveValue::Set(2));
    }
}
