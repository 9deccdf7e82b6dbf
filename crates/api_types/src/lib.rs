use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts a decimal amount given either as a JSON string (`"12,50"`) or as
/// a JSON number (`12.5`), keeping it as text for the server to parse.
fn decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
    })
}

pub mod transaction {
    use super::*;

    /// Body of `/transaction/new` and `/transaction/edit/{id}`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionForm {
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub date: String,
        #[serde(default, deserialize_with = "decimal_text")]
        pub value: String,
        pub wallet: Option<i32>,
        pub wallet_destination: Option<i32>,
        pub type_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: i32,
    }

    /// A stored transaction.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: i32,
        pub description: String,
        pub date: NaiveDate,
        /// Signed amount with two fraction digits, e.g. `"-30.00"`.
        pub value: String,
        pub wallet: i32,
        pub type_id: i32,
        pub transaction_destination_id: Option<i32>,
    }

    /// A row of the transaction table.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionTableView {
        pub id: i32,
        pub description: String,
        pub date: NaiveDate,
        pub value: String,
        pub wallet_id: i32,
        /// Wallet name.
        pub wallet: String,
        pub type_id: i32,
        /// Type name.
        #[serde(rename = "type")]
        pub type_name: String,
        pub transaction_destination_id: Option<i32>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        pub sort: Option<String>,
    }
}

pub mod graph {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Point {
        pub x: NaiveDate,
        pub y: String,
    }

    /// Running balance of one wallet.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LineGraph {
        /// Wallet name.
        pub id: String,
        pub color: String,
        pub data: Vec<Point>,
    }
}

pub mod wallet {
    use super::*;

    fn zero() -> String {
        "0".to_string()
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct WalletNew {
        pub name: String,
        pub color: String,
        /// Opening balance.
        #[serde(default = "zero", deserialize_with = "decimal_text")]
        pub value: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletCreated {
        pub id: i32,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WalletView {
        pub id: i32,
        pub name: String,
        pub color: String,
        pub value: String,
    }
}

pub mod error {
    use super::*;

    /// JSON body of every error response.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub code: i32,
        pub message: String,
    }
}
