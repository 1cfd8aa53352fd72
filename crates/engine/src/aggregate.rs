//! Subtotal, percent adjustment and grand total.
//!
//! Always recomputed from scratch over the rows. Row counts are in the tens,
//! so a full pass on every keystroke is cheap and can never go stale.

use serde::{Deserialize, Serialize};
use smeta_core::NumberStyle;

use crate::row::{finite_or_zero, Row};
use crate::table::TableModel;

/// Derived totals of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateState {
    /// Sum of all row totals.
    pub subtotal: f64,
    /// Markup (positive) or discount (negative) in percent.
    pub percent: f64,
    /// `subtotal * percent / 100`.
    pub percent_amount: f64,
    /// `subtotal + percent_amount`.
    pub grand_total: f64,
}

impl AggregateState {
    pub fn subtotal_display(&self, style: &NumberStyle) -> String {
        style.format_money(self.subtotal)
    }

    pub fn percent_amount_display(&self, style: &NumberStyle) -> String {
        style.format_money(self.percent_amount)
    }

    pub fn grand_total_display(&self, style: &NumberStyle) -> String {
        style.format_money(self.grand_total)
    }
}

/// Recompute totals for a table. `percent` is raw input text; malformed
/// input counts as 0.
pub fn recompute(table: &TableModel, percent: &str) -> AggregateState {
    recompute_rows(table.rows(), smeta_core::parse(percent))
}

/// Recompute totals over a slice of rows with an already-parsed percent.
pub fn recompute_rows(rows: &[Row], percent: f64) -> AggregateState {
    let percent = finite_or_zero(percent);
    let subtotal = finite_or_zero(rows.iter().map(Row::total).sum());
    let percent_amount = finite_or_zero(subtotal * (percent / 100.0));
    AggregateState {
        subtotal,
        percent,
        percent_amount,
        grand_total: finite_or_zero(subtotal + percent_amount),
    }
}
