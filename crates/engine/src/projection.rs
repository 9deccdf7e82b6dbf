//! Running-balance projection used by the balance graph.
//!
//! A wallet's series starts from an anchor balance (the live wallet value
//! minus every movement dated up to today) and walks the wallet's movements
//! in date order, emitting the cumulative balance after each one.

use chrono::NaiveDate;

use crate::{Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Money,
}

/// One labelled line of the balance graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSeries {
    pub wallet_id: i32,
    pub label: String,
    pub color: String,
    pub points: Vec<BalancePoint>,
}

/// Balance of a wallet before any recorded movement.
pub fn anchor_balance(current: Money, movements_until_today: Money) -> ResultEngine<Money> {
    current.checked_sub(movements_until_today)
}

/// Forward cumulative sum seeded at `seed`.
///
/// Movements are stable-sorted by date, so same-day movements keep the order
/// they were given in. No movements means no points. A balance leaving the
/// representable range fails the whole walk with `InvalidAmount`.
pub fn running_balance<I>(seed: Money, movements: I) -> ResultEngine<Vec<BalancePoint>>
where
    I: IntoIterator<Item = (NaiveDate, Money)>,
{
    let mut movements: Vec<(NaiveDate, Money)> = movements.into_iter().collect();
    movements.sort_by_key(|(date, _)| *date);

    let mut running = seed;
    movements
        .into_iter()
        .map(|(date, value)| -> ResultEngine<BalancePoint> {
            running = running.checked_add(value)?;
            Ok(BalancePoint {
                date,
                balance: running,
            })
        })
        .collect()
}
