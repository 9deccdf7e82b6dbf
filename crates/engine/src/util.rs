//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use chrono::NaiveDate;

use crate::{
    EngineError, Money, ResultEngine, TransactionCmd, parse_form_date,
    transactions::EXCHANGE_TYPE_ID,
};

/// Trim a required name, rejecting blank input.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingField(format!("{label} name")));
    }
    Ok(trimmed.to_string())
}

/// A [`TransactionCmd`] whose fields parsed successfully.
///
/// Store-dependent checks (type exists, wallets owned by the caller) happen
/// later, inside the write transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TransactionForm {
    pub user_id: i32,
    pub description: String,
    pub date: NaiveDate,
    /// Amount as entered. For transfers it is always positive.
    pub amount: Money,
    pub wallet_id: i32,
    pub wallet_destination_id: Option<i32>,
    pub type_id: i32,
}

impl TransactionForm {
    pub fn is_exchange(&self) -> bool {
        self.type_id == EXCHANGE_TYPE_ID
    }

    /// Destination wallet of a transfer.
    pub fn destination(&self) -> ResultEngine<i32> {
        self.wallet_destination_id
            .ok_or_else(|| EngineError::MissingField("walletDestination".to_string()))
    }
}

impl TryFrom<&TransactionCmd> for TransactionForm {
    type Error = EngineError;

    fn try_from(cmd: &TransactionCmd) -> Result<Self, Self::Error> {
        let type_id = cmd
            .type_id
            .ok_or_else(|| EngineError::MissingField("typeId".to_string()))?;
        let wallet_id = cmd
            .wallet_id
            .ok_or_else(|| EngineError::MissingField("wallet".to_string()))?;
        if cmd.value.trim().is_empty() {
            return Err(EngineError::MissingField("value".to_string()));
        }
        let amount: Money = cmd.value.parse()?;
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount(
                "amount must not be zero".to_string(),
            ));
        }
        let date = parse_form_date(&cmd.date)?;

        let form = Self {
            user_id: cmd.user_id,
            description: cmd.description.trim().to_string(),
            date,
            amount,
            wallet_id,
            wallet_destination_id: cmd.wallet_destination_id,
            type_id,
        };

        if form.is_exchange() {
            let destination = form.destination()?;
            if !amount.is_positive() {
                return Err(EngineError::InvalidAmount(
                    "transfer amount must be > 0".to_string(),
                ));
            }
            if destination == wallet_id {
                return Err(EngineError::InvalidTransfer(
                    "wallet and walletDestination must differ".to_string(),
                ));
            }
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> TransactionCmd {
        TransactionCmd::new(1, "2024-03-01T10:00:00.000Z", "12,50")
            .description("  groceries ")
            .wallet_id(10)
            .type_id(3)
    }

    #[test]
    fn parses_regular_form() {
        let form = TransactionForm::try_from(&cmd()).unwrap();
        assert_eq!(form.amount, Money::new(1250));
        assert_eq!(form.description, "groceries");
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(!form.is_exchange());
    }

    #[test]
    fn regular_form_keeps_sign() {
        let form = TransactionForm::try_from(&TransactionCmd {
            value: "-3".to_string(),
            ..cmd()
        })
        .unwrap();
        assert_eq!(form.amount, Money::new(-300));
    }

    #[test]
    fn missing_fields_are_reported() {
        let no_type = TransactionCmd {
            type_id: None,
            ..cmd()
        };
        assert_eq!(
            TransactionForm::try_from(&no_type).unwrap_err(),
            EngineError::MissingField("typeId".to_string())
        );

        let no_wallet = TransactionCmd {
            wallet_id: None,
            ..cmd()
        };
        assert_eq!(
            TransactionForm::try_from(&no_wallet).unwrap_err(),
            EngineError::MissingField("wallet".to_string())
        );

        let no_value = TransactionCmd {
            value: " ".to_string(),
            ..cmd()
        };
        assert_eq!(
            TransactionForm::try_from(&no_value).unwrap_err(),
            EngineError::MissingField("value".to_string())
        );
    }

    #[test]
    fn rejects_zero_amount() {
        let zero = TransactionCmd {
            value: "0.00".to_string(),
            ..cmd()
        };
        assert!(matches!(
            TransactionForm::try_from(&zero),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn transfer_needs_a_distinct_destination_and_positive_amount() {
        let transfer = cmd().type_id(EXCHANGE_TYPE_ID);
        assert_eq!(
            TransactionForm::try_from(&transfer).unwrap_err(),
            EngineError::MissingField("walletDestination".to_string())
        );

        let same_wallet = transfer.clone().wallet_destination_id(10);
        assert!(matches!(
            TransactionForm::try_from(&same_wallet),
            Err(EngineError::InvalidTransfer(_))
        ));

        let negative = TransactionCmd {
            value: "-5".to_string(),
            ..transfer.clone().wallet_destination_id(11)
        };
        assert!(matches!(
            TransactionForm::try_from(&negative),
            Err(EngineError::InvalidAmount(_))
        ));

        let ok = TransactionForm::try_from(&transfer.wallet_destination_id(11)).unwrap();
        assert_eq!(ok.destination().unwrap(), 11);
    }
}
