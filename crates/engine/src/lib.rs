//! `smeta-engine`: the live cost-estimate table.
//!
//! One [`TableModel`] per table on screen. The simple worksheet and the
//! multi-step wizard are thin adapters over the same model, and both
//! snapshot it into a [`Record`] for export and forwarding.

pub mod aggregate;
pub mod column;
pub mod events;
pub mod metadata;
pub mod record;
pub mod row;
pub mod table;
pub mod wizard;
pub mod worksheet;

pub use aggregate::AggregateState;
pub use metadata::ProjectMetadata;
pub use record::{EstimateRecord, ProjectRecord, Record, RecordBuilder, RecordMetadata, RecordRow, SheetNotes};
pub use row::{Field, Row, RowId, RowInit};
pub use table::TableModel;
pub use wizard::{Wizard, WizardSteps};
pub use worksheet::Worksheet;
