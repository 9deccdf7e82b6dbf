//! Domain engine: wallets, transactions, transfer legs and the balance graph.
//!
//! Every public operation takes the caller's user id (resolved through
//! [`Engine::authenticate`]) and only reads or writes rows owned by it.

pub use commands::TransactionCmd;
pub use dates::parse_form_date;
pub use error::EngineError;
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use projection::{BalancePoint, BalanceSeries, anchor_balance, running_balance};
pub use sort::{SortDirection, SortField, SortKey, SortSpec};
pub use transactions::{EXCHANGE_TYPE_ID, Transaction, TransactionRow};
pub use users::Session;
pub use wallets::Wallet;

mod commands;
mod dates;
mod error;
mod money;
mod ops;
mod projection;
mod sort;
mod transaction_types;
mod transactions;
mod users;
mod util;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
