//! Point-in-time snapshots of a table for export and forwarding.
//!
//! A [`Record`] owns all of its data. Building one never mutates the table,
//! and later edits to the table never reach a record already built, so a
//! record can be handed to a background sender while editing continues.

use serde::{Deserialize, Serialize};
use smeta_core::NumberStyle;
use smeta_protocol::{PayloadRow, SenderPayload};

use crate::aggregate::AggregateState;
use crate::metadata::ProjectMetadata;
use crate::table::TableModel;

/// Project name used when the worksheet's name field is blank.
pub const UNTITLED_PROJECT: &str = "Проект без названия";

/// Project name used when the wizard's company field is blank.
pub const UNTITLED_ORDER: &str = "Заказ Grace";

/// What a record carries besides the table, and how it flattens into the
/// sender payload's `project` and `notes` fields.
pub trait RecordMetadata: Clone {
    fn project(&self) -> String;
    fn notes(&self) -> String;
}

/// Metadata of the simple worksheet: a project name and a notes box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetNotes {
    pub project: String,
    pub notes: String,
}

impl RecordMetadata for SheetNotes {
    fn project(&self) -> String {
        non_blank_or(&self.project, UNTITLED_PROJECT)
    }

    fn notes(&self) -> String {
        self.notes.clone()
    }
}

impl RecordMetadata for ProjectMetadata {
    fn project(&self) -> String {
        non_blank_or(&self.info.company, UNTITLED_ORDER)
    }

    fn notes(&self) -> String {
        let info = &self.info;
        [
            format!("Клиент: {} ({})", info.client, info.phone),
            format!("Менеджер: {}", info.manager),
            format!("Сроки: {} → {}", info.start, info.due),
            format!("Назначение: {}", self.brief.purpose),
            format!("Материал: {}", self.brief.materials),
            format!("Финальный макет: {}", self.design.final_layout),
            format!("Цех/Монтаж: {} | {}", self.production.terms, self.production.montage),
        ]
        .join("\n")
    }
}

/// One line item as exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub index: usize,
    pub name: String,
    pub unit: String,
    /// Quantity as a number, fractional allowed.
    pub qty: f64,
    /// Unit price as a number.
    pub price: f64,
    /// Row total as a display amount with currency (`"200.00 ₸"`).
    pub total: String,
    /// Values of the user columns, in column order.
    pub extras: Vec<String>,
}

/// Immutable snapshot of a table, its totals and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<M> {
    /// Fixed headers followed by user column names.
    pub columns: Vec<String>,
    pub rows: Vec<RecordRow>,
    pub subtotal: String,
    /// Percent as typed (`"10"`), `"0"` when blank.
    pub percent: String,
    pub percent_amount: String,
    pub grand_total: String,
    /// Numeric totals the display strings were rendered from.
    pub totals: AggregateState,
    /// Currency marker used in the display strings.
    pub currency: String,
    pub metadata: M,
}

/// Snapshot of the simple worksheet.
pub type EstimateRecord = Record<SheetNotes>;

/// Snapshot of the wizard: table plus project metadata.
pub type ProjectRecord = Record<ProjectMetadata>;

/// Builds records using one number style.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    style: NumberStyle,
}

impl RecordBuilder {
    pub fn new(style: NumberStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &NumberStyle {
        &self.style
    }

    pub fn build<M: RecordMetadata>(
        &self,
        table: &TableModel,
        aggregate: &AggregateState,
        metadata: &M,
    ) -> Record<M> {
        let rows = table
            .rows()
            .iter()
            .map(|row| RecordRow {
                index: row.index(),
                name: row.name().to_string(),
                unit: row.unit().to_string(),
                qty: row.quantity(),
                price: row.unit_price(),
                total: self.style.format_money(row.total()),
                extras: row.extras().to_vec(),
            })
            .collect();

        Record {
            columns: table.headers(),
            rows,
            subtotal: aggregate.subtotal_display(&self.style),
            percent: table.percent_text(),
            percent_amount: aggregate.percent_amount_display(&self.style),
            grand_total: aggregate.grand_total_display(&self.style),
            totals: *aggregate,
            currency: self.style.currency.clone(),
            metadata: metadata.clone(),
        }
    }
}

impl<M: RecordMetadata> Record<M> {
    /// Flatten into the payload consumed by the outbound senders.
    pub fn to_payload(&self) -> SenderPayload {
        SenderPayload {
            project: self.metadata.project(),
            rows: self
                .rows
                .iter()
                .map(|row| PayloadRow {
                    index: row.index,
                    name: row.name.clone(),
                    unit: row.unit.clone(),
                    qty: smeta_core::plain(row.qty),
                    price: smeta_core::plain(row.price),
                    total: self.strip_currency(&row.total),
                })
                .collect(),
            notes: self.metadata.notes(),
            percent: self.percent.clone(),
            percent_amount: self.percent_amount.clone(),
            grand_total: self.grand_total.clone(),
        }
    }
}

impl<M> Record<M> {
    /// Display amount without the currency marker (`"200.00 ₸"` → `"200.00"`).
    pub fn strip_currency(&self, amount: &str) -> String {
        if self.currency.is_empty() {
            return amount.trim().to_string();
        }
        amount.replace(self.currency.as_str(), "").trim().to_string()
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{Field, RowInit};

    fn scenario_table() -> TableModel {
        let mut table = TableModel::new();
        table.add_row(RowInit::new("PVC", "м²").quantity(2.0).unit_price(100.0));
        table.add_row(RowInit::new("Рама", "шт").quantity(1.0).unit_price(250.0));
        table.set_percent("10");
        table
    }

    #[test]
    fn test_build_record_formats_totals() {
        let table = scenario_table();
        let record = RecordBuilder::default().build(&table, table.aggregate(), &SheetNotes::default());

        assert_eq!(record.rows[0].total, "200.00 ₸");
        assert_eq!(record.rows[1].total, "250.00 ₸");
        assert_eq!(record.rows[0].qty, 2.0);
        assert_eq!(record.rows[0].price, 100.0);
        assert_eq!(record.subtotal, "450.00 ₸");
        assert_eq!(record.percent, "10");
        assert_eq!(record.percent_amount, "45.00 ₸");
        assert_eq!(record.grand_total, "495.00 ₸");
    }

    #[test]
    fn test_record_is_independent_of_later_edits() {
        let mut table = scenario_table();
        let record = RecordBuilder::default().build(&table, table.aggregate(), &SheetNotes::default());

        let first = table.rows()[0].id();
        table.set_field(first, Field::Name, "changed");
        table.set_field(first, Field::Quantity, "50");
        table.add_column("Цвет");
        table.remove_row(table.rows()[1].id());

        assert_eq!(record.rows.len(), 2);
        assert_eq!(record.rows[0].name, "PVC");
        assert_eq!(record.rows[0].total, "200.00 ₸");
        assert!(record.rows[0].extras.is_empty());
        assert_eq!(record.columns.len(), 6);
    }

    #[test]
    fn test_payload_shape() {
        let table = scenario_table();
        let meta = SheetNotes {
            project: "  Вывеска ".into(),
            notes: "до пятницы".into(),
        };
        let payload = RecordBuilder::default().build(&table, table.aggregate(), &meta).to_payload();

        assert_eq!(payload.project, "Вывеска");
        assert_eq!(payload.notes, "до пятницы");
        assert_eq!(payload.rows[0].index, 1);
        assert_eq!(payload.rows[0].qty, "2");
        assert_eq!(payload.rows[0].price, "100");
        assert_eq!(payload.rows[0].total, "200.00");
        assert_eq!(payload.percent, "10");
        assert_eq!(payload.percent_amount, "45.00 ₸");
        assert_eq!(payload.grand_total, "495.00 ₸");
    }

    #[test]
    fn test_untitled_fallbacks() {
        assert_eq!(SheetNotes::default().project(), UNTITLED_PROJECT);
        assert_eq!(ProjectMetadata::default().project(), UNTITLED_ORDER);
    }

    #[test]
    fn test_project_notes_lines() {
        let mut meta = ProjectMetadata::default();
        meta.info.client = "Иванов".into();
        meta.info.phone = "+7 700 000 00 00".into();
        meta.info.start = "2026-10-01".into();
        meta.info.due = "2026-10-15".into();
        meta.production.terms = "3 дня".into();
        meta.production.montage = "ночью".into();

        let notes = meta.notes();
        let lines: Vec<&str> = notes.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Клиент: Иванов (+7 700 000 00 00)");
        assert_eq!(lines[2], "Сроки: 2026-10-01 → 2026-10-15");
        assert_eq!(lines[6], "Цех/Монтаж: 3 дня | ночью");
    }

    #[test]
    fn test_strip_currency_custom_marker() {
        let table = scenario_table();
        let builder = RecordBuilder::new(NumberStyle::default().with_currency("KZT"));
        let record = builder.build(&table, table.aggregate(), &SheetNotes::default());
        assert_eq!(record.rows[0].total, "200.00 KZT");
        assert_eq!(record.to_payload().rows[0].total, "200.00");
    }
}
