//! Fixed-capacity cut-filter cascade.

use crate::biquad::{Biquad, Coefficients};
use crate::design::{CutBank, MAX_CUT_SECTIONS};

/// One cut band: four biquad slots of which the first N are active.
///
/// Capacity is fixed at the steepest slope so changing the slope at runtime
/// never allocates or restructures anything. Inactive slots hold identity
/// coefficients with cleared delay lines; `process` skips them entirely.
#[derive(Debug, Clone, Default)]
pub struct CutFilter {
    stages: [Biquad; MAX_CUT_SECTIONS],
    active: usize,
}

impl CutFilter {
    /// A cascade with every slot bypassed.
    pub fn new() -> Self {
        Self {
            stages: [Biquad::new(), Biquad::new(), Biquad::new(), Biquad::new()],
            active: 0,
        }
    }

    /// Install a designed bank.
    ///
    /// Slots below the bank's active count get its coefficients; slots at or
    /// above it are forced to identity and their delay lines cleared, so a
    /// stage left over from a steeper slope can never ring back in later.
    pub fn install(&mut self, bank: &CutBank) {
        for (k, stage) in self.stages.iter_mut().enumerate() {
            if k < bank.active {
                stage.set_coefficients(bank.sections[k]);
            } else {
                stage.set_coefficients(Coefficients::identity());
                stage.clear();
            }
        }
        self.active = bank.active;
    }

    /// Run one sample through the active prefix of the cascade.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut sample = input;
        for stage in &mut self.stages[..self.active] {
            sample = stage.process(sample);
        }
        sample
    }

    /// Clear every slot's delay state.
    pub fn clear(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
    }

    /// Number of live sections.
    pub fn active_sections(&self) -> usize {
        self.active
    }

    /// Total slot capacity, constant regardless of slope.
    pub fn capacity(&self) -> usize {
        MAX_CUT_SECTIONS
    }

    /// Coefficients currently installed in each slot.
    pub fn coefficients(&self) -> [Coefficients; MAX_CUT_SECTIONS] {
        [
            self.stages[0].coefficients(),
            self.stages[1].coefficients(),
            self.stages[2].coefficients(),
            self.stages[3].coefficients(),
        ]
    }
}
