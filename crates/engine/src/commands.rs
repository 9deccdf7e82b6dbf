//! Command structs for engine operations.
//!
//! These types group parameters for write operations (create/edit), keeping
//! call sites readable and avoiding long argument lists. Values arrive as
//! they were typed by the user and are validated by the engine.

/// Create or edit a transaction.
///
/// For the exchange type, `wallet_id` is the source wallet and
/// `wallet_destination_id` the destination one.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub user_id: i32,
    pub description: String,
    /// ISO-8601 timestamp, see [`crate::parse_form_date`].
    pub date: String,
    /// Decimal amount, see [`crate::Money`].
    pub value: String,
    pub wallet_id: Option<i32>,
    pub wallet_destination_id: Option<i32>,
    pub type_id: Option<i32>,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(user_id: i32, date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            user_id,
            description: String::new(),
            date: date.into(),
            value: value.into(),
            wallet_id: None,
            wallet_destination_id: None,
            type_id: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn wallet_id(mut self, wallet_id: i32) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    #[must_use]
    pub fn wallet_destination_id(mut self, wallet_id: i32) -> Self {
        self.wallet_destination_id = Some(wallet_id);
        self
    }

    #[must_use]
    pub fn type_id(mut self, type_id: i32) -> Self {
        self.type_id = Some(type_id);
        self
    }
}
