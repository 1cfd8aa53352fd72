//! Change notifications emitted by [`TableModel`](crate::TableModel).
//!
//! A presentation layer drains these after each input event and re-renders
//! only what changed. Rendering is a projection of the model; nothing is ever
//! read back from the rendered text.

use crate::aggregate::AggregateState;
use crate::row::{Field, RowId};

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// A row was appended.
    RowAdded(RowId),
    /// A row was removed.
    RowRemoved(RowId),
    /// Every row was removed.
    RowsCleared,
    /// Row indices were reassigned to `1..=count`.
    Renumbered { count: usize },
    /// A user column was appended; every row gained an empty slot.
    ColumnAdded { name: String },
    /// All user columns were dropped.
    ColumnsReset { removed: usize },
    /// One field of one row changed.
    FieldChanged { row: RowId, field: Field },
    /// The percent input changed.
    PercentChanged,
    /// Totals were recomputed.
    Recomputed(AggregateState),
}

/// Most events held between drains. Past this the oldest half is dropped.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Collects events until the caller drains them. Bounded: a table nobody
/// drains keeps only recent events and counts the rest as dropped.
#[derive(Debug, Default, Clone)]
pub struct EventCollector {
    events: Vec<TableEvent>,
    dropped: usize,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TableEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let excess = MAX_PENDING_EVENTS / 2;
            self.events.drain(..excess);
            self.dropped += excess;
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[TableEvent] {
        &self.events
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn drain(&mut self) -> Vec<TableEvent> {
        self.dropped = 0;
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of recompute passes recorded.
    pub fn recomputes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TableEvent::Recomputed(_)))
            .count()
    }
}
