//! The multi-step order wizard: project metadata across steps plus the same
//! calculation table the worksheet uses.

use smeta_core::NumberStyle;
use smeta_protocol::SenderPayload;

use crate::metadata::ProjectMetadata;
use crate::record::{ProjectRecord, RecordBuilder};
use crate::table::TableModel;

/// Info, brief, design, calculation, production.
pub const DEFAULT_STEP_COUNT: usize = 5;

/// Position within the wizard's steps. Navigation clamps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardSteps {
    current: usize,
    count: usize,
}

impl WizardSteps {
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    /// 0-based current step.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.count == 0 || self.current + 1 >= self.count
    }

    /// Advance one step. Returns false at the last step.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Go back one step. Returns false at the first step.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a step; out-of-range targets clamp to the last step.
    pub fn go_to(&mut self, step: usize) {
        self.current = step.min(self.count.saturating_sub(1));
    }

    /// Progress bar width: `round((current + 1) / count * 100)`.
    pub fn progress_percent(&self) -> u8 {
        if self.count == 0 {
            return 0;
        }
        let pct = ((self.current + 1) as f64 / self.count as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }
}

impl Default for WizardSteps {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_COUNT)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    table: TableModel,
    metadata: ProjectMetadata,
    steps: WizardSteps,
    builder: RecordBuilder,
}

impl Wizard {
    pub fn new(style: NumberStyle) -> Self {
        Self {
            table: TableModel::new(),
            metadata: ProjectMetadata::default(),
            steps: WizardSteps::default(),
            builder: RecordBuilder::new(style),
        }
    }

    /// Wizard whose calculation step starts with the default line items.
    pub fn seeded(style: NumberStyle) -> Self {
        Self {
            table: TableModel::seeded(),
            ..Self::new(style)
        }
    }

    pub fn with_step_count(mut self, count: usize) -> Self {
        self.steps = WizardSteps::new(count);
        self
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableModel {
        &mut self.table
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut ProjectMetadata {
        &mut self.metadata
    }

    pub fn steps(&self) -> &WizardSteps {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut WizardSteps {
        &mut self.steps
    }

    /// Empty the calculation table. Metadata is untouched.
    pub fn clear_calc(&mut self) {
        self.table.clear_rows();
        log::debug!("wizard calculation cleared");
    }

    pub fn record(&self) -> ProjectRecord {
        self.builder.build(&self.table, self.table.aggregate(), &self.metadata)
    }

    pub fn payload(&self) -> SenderPayload {
        self.record().to_payload()
    }
}
