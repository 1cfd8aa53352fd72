//! The line-item table: rows, user-added columns, and live totals.
//!
//! Every mutating call leaves the table consistent:
//! - each row has exactly one extra slot per user column,
//! - row indices are `1..=len` in display order,
//! - the aggregate reflects the current rows and percent input.

use crate::aggregate::{self, AggregateState};
use crate::column::{ColumnDef, FIXED_HEADERS};
use crate::events::{EventCollector, TableEvent};
use crate::row::{sanitize_amount, Field, Row, RowId, RowInit};

/// Rows a fresh session starts with when seeding is enabled.
pub const SEED_ROWS: [(&str, &str); 2] = [("PVC 5–10 мм", "м²"), ("Крепёж / рама", "комплект")];

#[derive(Debug, Clone, Default)]
pub struct TableModel {
    rows: Vec<Row>,
    columns: Vec<ColumnDef>,
    next_id: u64,
    percent_input: String,
    aggregate: AggregateState,
    events: EventCollector,
}

impl TableModel {
    /// Empty table, percent 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-seeded with the two default line items.
    pub fn seeded() -> Self {
        let mut table = Self::new();
        for (name, unit) in SEED_ROWS {
            table.add_row(RowInit::new(name, unit));
        }
        table.events.clear();
        table
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Fixed headers followed by user column names.
    pub fn headers(&self) -> Vec<String> {
        FIXED_HEADERS
            .iter()
            .map(|h| h.to_string())
            .chain(self.columns.iter().map(|c| c.name.clone()))
            .collect()
    }

    pub fn aggregate(&self) -> &AggregateState {
        &self.aggregate
    }

    /// The percent field exactly as typed.
    pub fn percent_input(&self) -> &str {
        &self.percent_input
    }

    pub fn events(&self) -> &[TableEvent] {
        self.events.events()
    }

    /// Events discarded because nobody drained in time. A UI seeing a
    /// non-zero count should re-render everything.
    pub fn events_dropped(&self) -> usize {
        self.events.dropped()
    }

    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        self.events.drain()
    }

    // ── Structural edits ────────────────────────────────────────────

    /// Append a row. Its extras match the current column count.
    pub fn add_row(&mut self, init: RowInit) -> &Row {
        self.next_id += 1;
        let id = RowId(self.next_id);
        self.rows.push(Row {
            id,
            index: self.rows.len() + 1,
            name: init.name,
            unit: init.unit,
            quantity: sanitize_amount(init.quantity.unwrap_or(0.0)),
            unit_price: sanitize_amount(init.unit_price.unwrap_or(0.0)),
            extras: vec![String::new(); self.columns.len()],
        });
        log::debug!("row {} added ({} rows)", id.raw(), self.rows.len());
        self.events.push(TableEvent::RowAdded(id));
        self.renumber();
        self.recompute();

        let last = self.rows.len() - 1;
        &self.rows[last]
    }

    /// Remove a row by identity. Removing an absent row is a no-op.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let Some(pos) = self.rows.iter().position(|r| r.id == id) else {
            return false;
        };
        self.rows.remove(pos);
        log::debug!("row {} removed ({} rows)", id.raw(), self.rows.len());
        self.events.push(TableEvent::RowRemoved(id));
        self.renumber();
        self.recompute();
        true
    }

    /// Remove every row. Columns and the percent input are kept.
    pub fn clear_rows(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.rows.clear();
        log::debug!("rows cleared");
        self.events.push(TableEvent::RowsCleared);
        self.renumber();
        self.recompute();
    }

    /// Append a user column. A blank name is ignored (returns false).
    pub fn add_column(&mut self, name: &str) -> bool {
        let Some(column) = ColumnDef::new(name) else {
            return false;
        };
        for row in &mut self.rows {
            row.extras.push(String::new());
        }
        log::debug!("column '{}' added", column.name);
        self.events.push(TableEvent::ColumnAdded { name: column.name.clone() });
        self.columns.push(column);
        true
    }

    /// Drop all user columns and their values. Idempotent.
    pub fn reset_columns(&mut self) {
        if self.columns.is_empty() {
            return;
        }
        let removed = self.columns.len();
        self.columns.clear();
        for row in &mut self.rows {
            row.extras.clear();
        }
        log::debug!("{} column(s) reset", removed);
        self.events.push(TableEvent::ColumnsReset { removed });
    }

    // ── Value edits ─────────────────────────────────────────────────

    /// Set one field from raw input text. Quantity and price are parsed
    /// immediately (malformed input reads as 0) and trigger a recompute;
    /// text fields do not. Returns false if the row or extra slot is absent.
    pub fn set_field(&mut self, id: RowId, field: Field, value: &str) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        match field {
            Field::Name => row.name = value.to_string(),
            Field::Unit => row.unit = value.to_string(),
            Field::Quantity => row.quantity = sanitize_amount(smeta_core::parse(value)),
            Field::UnitPrice => row.unit_price = sanitize_amount(smeta_core::parse(value)),
            Field::Extra(slot) => match row.extras.get_mut(slot) {
                Some(cell) => *cell = value.to_string(),
                None => return false,
            },
        }
        self.events.push(TableEvent::FieldChanged { row: id, field });
        if field.affects_totals() {
            self.recompute();
        }
        true
    }

    /// Set the percent markup/discount from raw input text.
    pub fn set_percent(&mut self, raw: &str) {
        self.percent_input = raw.to_string();
        self.events.push(TableEvent::PercentChanged);
        self.recompute();
    }

    /// Percent text as it goes into records: trimmed input, or `0` when empty.
    pub fn percent_text(&self) -> String {
        let trimmed = self.percent_input.trim();
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Describe any broken invariant. Empty when the table is consistent.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (pos, row) in self.rows.iter().enumerate() {
            if row.index != pos + 1 {
                problems.push(format!("row {} at position {} has index {}", row.id.raw(), pos, row.index));
            }
            if row.extras.len() != self.columns.len() {
                problems.push(format!(
                    "row {} has {} extras for {} columns",
                    row.id.raw(),
                    row.extras.len(),
                    self.columns.len()
                ));
            }
        }
        let expected = aggregate::recompute(self, &self.percent_input);
        if expected != self.aggregate {
            problems.push(format!("stale aggregate: {:?} != {:?}", self.aggregate, expected));
        }
        problems
    }

    fn renumber(&mut self) {
        for (pos, row) in self.rows.iter_mut().enumerate() {
            row.index = pos + 1;
        }
        self.events.push(TableEvent::Renumbered { count: self.rows.len() });
    }

    fn recompute(&mut self) {
        self.aggregate = aggregate::recompute(self, &self.percent_input);
        self.events.push(TableEvent::Recomputed(self.aggregate));
    }
}
