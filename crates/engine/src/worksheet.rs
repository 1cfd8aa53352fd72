//! The simple estimate page: one table, a project name and a notes box.

use smeta_core::NumberStyle;
use smeta_protocol::SenderPayload;

use crate::record::{EstimateRecord, RecordBuilder, SheetNotes};
use crate::table::TableModel;

#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    table: TableModel,
    meta: SheetNotes,
    builder: RecordBuilder,
}

impl Worksheet {
    /// Empty worksheet.
    pub fn new(style: NumberStyle) -> Self {
        Self {
            table: TableModel::new(),
            meta: SheetNotes::default(),
            builder: RecordBuilder::new(style),
        }
    }

    /// Worksheet pre-seeded with the default line items.
    pub fn seeded(style: NumberStyle) -> Self {
        Self {
            table: TableModel::seeded(),
            ..Self::new(style)
        }
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableModel {
        &mut self.table
    }

    pub fn style(&self) -> &NumberStyle {
        self.builder.style()
    }

    pub fn project_name(&self) -> &str {
        &self.meta.project
    }

    pub fn set_project_name(&mut self, name: &str) {
        self.meta.project = name.to_string();
    }

    pub fn notes(&self) -> &str {
        &self.meta.notes
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.meta.notes = notes.to_string();
    }

    /// Remove every row and the notes. The project name, user columns and
    /// percent stay.
    pub fn clear(&mut self) {
        self.table.clear_rows();
        self.meta.notes.clear();
        log::debug!("worksheet cleared");
    }

    /// Row total as displayed, e.g. `"200.00 ₸"`.
    pub fn row_total_display(&self, index: usize) -> Option<String> {
        self.table
            .rows()
            .get(index.checked_sub(1)?)
            .map(|row| self.style().format_money(row.total()))
    }

    pub fn record(&self) -> EstimateRecord {
        self.builder.build(&self.table, self.table.aggregate(), &self.meta)
    }

    pub fn payload(&self) -> SenderPayload {
        self.record().to_payload()
    }
}
