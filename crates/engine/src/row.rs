use serde::{Deserialize, Serialize};

/// Stable identity of a row within its table. Never reused after removal,
/// unlike the displayed index which is positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub(crate) u64);

impl RowId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Editable field of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Unit,
    Quantity,
    UnitPrice,
    /// Free-text slot for the user-added column at this position (0-based).
    Extra(usize),
}

impl Field {
    /// Whether editing this field can change any total.
    pub fn affects_totals(&self) -> bool {
        matches!(self, Field::Quantity | Field::UnitPrice)
    }
}

/// One line item. `total` is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub(crate) id: RowId,
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) unit: String,
    pub(crate) quantity: f64,
    pub(crate) unit_price: f64,
    pub(crate) extras: Vec<String>,
}

impl Row {
    pub fn id(&self) -> RowId {
        self.id
    }

    /// 1-based display position.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// `quantity × unit_price`. A product that overflows reads as 0, like
    /// any other input that does not make a usable number.
    pub fn total(&self) -> f64 {
        finite_or_zero(self.quantity * self.unit_price)
    }
}

/// Initial values for a new row. Absent quantity/price mean 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowInit {
    pub name: String,
    pub unit: String,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
}

impl RowInit {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            ..Self::default()
        }
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Quantities and prices are non-negative finite numbers; anything else is 0.
pub(crate) fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
