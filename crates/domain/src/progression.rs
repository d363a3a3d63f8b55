use std::slice::Iter;

use derive_more::Display;

use crate::{Effort, IntensityError, REP_CAP, max_perc_1rm};

/// Coefficients of the bilinear progression model.
///
/// The realized adjustment for a rep count `r` at progression step `s` is
/// `(inc_start + inc_step * (r - 1)) * -s + rep_start + rep_step * (r - 1)
/// + adjustment`. Depending on the table family the result is either an
/// RIR-equivalent rep increment or a %1RM delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionParams {
    pub rep_start: f32,
    pub rep_step: f32,
    pub inc_start: f32,
    pub inc_step: f32,
    pub adjustment: f32,
}

impl ProgressionParams {
    #[must_use]
    pub fn adjustment_at(&self, reps: f32, step: i32) -> f32 {
        let increment = self.inc_start + self.inc_step * (reps - 1.0);
        let base = self.rep_start + self.rep_step * (reps - 1.0);

        #[allow(clippy::cast_precision_loss)]
        let distance = -step as f32;

        increment * distance + base + self.adjustment
    }
}

/// Steepness preset of a progression model.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Volume {
    #[display("intensive")]
    Intensive,
    #[display("normal")]
    Normal,
    #[display("extensive")]
    Extensive,
}

impl Volume {
    pub fn iter() -> Iter<'static, Volume> {
        static VOLUMES: [Volume; 3] = [Volume::Intensive, Volume::Normal, Volume::Extensive];
        VOLUMES.iter()
    }
}

/// The two progression-table families.
///
/// An RIR-increment table perturbs the effective rep count before the
/// max-%1RM lookup, a percent-drop table adds its adjustment to the
/// baseline %1RM directly.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TableFamily {
    #[display("RIR increment")]
    RirIncrement,
    #[display("percent drop")]
    PercDrop,
}

const RIR_INCREMENT_INTENSIVE: ProgressionParams = ProgressionParams {
    rep_start: 0.0,
    rep_step: 0.0,
    inc_start: 0.6,
    inc_step: 0.05,
    adjustment: 0.0,
};

const RIR_INCREMENT_NORMAL: ProgressionParams = ProgressionParams {
    rep_start: 0.0,
    rep_step: 0.0,
    inc_start: 1.0,
    inc_step: 0.1,
    adjustment: 0.0,
};

const RIR_INCREMENT_EXTENSIVE: ProgressionParams = ProgressionParams {
    rep_start: 0.0,
    rep_step: 0.0,
    inc_start: 1.4,
    inc_step: 0.15,
    adjustment: 0.0,
};

const PERC_DROP_INTENSIVE: ProgressionParams = ProgressionParams {
    rep_start: 0.0,
    rep_step: 0.0,
    inc_start: -0.025,
    inc_step: -0.001,
    adjustment: 0.0,
};

const PERC_DROP_NORMAL: ProgressionParams = ProgressionParams {
    rep_start: 0.0,
    rep_step: 0.0,
    inc_start: -0.035,
    inc_step: -0.0015,
    adjustment: 0.0,
};

const PERC_DROP_EXTENSIVE: ProgressionParams = ProgressionParams {
    rep_start: 0.0,
    rep_step: 0.0,
    inc_start: -0.045,
    inc_step: -0.002,
    adjustment: 0.0,
};

/// Steps are snapped to this grid by the fixed-granularity model variants.
static FIXED_STEPS: [i32; 4] = [0, -1, -2, -3];

/// A fully parametrized progression table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionModel {
    pub family: TableFamily,
    pub volume: Volume,
    pub effort: Effort,
    pub params: ProgressionParams,
    fixed: bool,
}

/// Intensity and adjustment prescribed for one (reps, step) combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableEntry {
    pub adjustment: f32,
    pub perc_1rm: f32,
}

impl ProgressionModel {
    #[must_use]
    pub fn new(family: TableFamily, volume: Volume) -> Self {
        let params = match (family, volume) {
            (TableFamily::RirIncrement, Volume::Intensive) => RIR_INCREMENT_INTENSIVE,
            (TableFamily::RirIncrement, Volume::Normal) => RIR_INCREMENT_NORMAL,
            (TableFamily::RirIncrement, Volume::Extensive) => RIR_INCREMENT_EXTENSIVE,
            (TableFamily::PercDrop, Volume::Intensive) => PERC_DROP_INTENSIVE,
            (TableFamily::PercDrop, Volume::Normal) => PERC_DROP_NORMAL,
            (TableFamily::PercDrop, Volume::Extensive) => PERC_DROP_EXTENSIVE,
        };
        Self {
            family,
            volume,
            effort: Effort::Grinding,
            params,
            fixed: false,
        }
    }

    #[must_use]
    pub fn rir_increment(volume: Volume) -> Self {
        Self::new(TableFamily::RirIncrement, volume)
    }

    #[must_use]
    pub fn perc_drop(volume: Volume) -> Self {
        Self::new(TableFamily::PercDrop, volume)
    }

    /// Variant that snaps step inputs to the nearest value of a small
    /// discrete grid before evaluation.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    #[must_use]
    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    /// Extra offset added to every adjustment produced by the model.
    #[must_use]
    pub fn with_adjustment(mut self, adjustment: f32) -> Self {
        self.params.adjustment = adjustment;
        self
    }

    /// Adjustment and %1RM for a single (reps, step) combination.
    pub fn entry(&self, reps: u32, step: i32) -> Result<TableEntry, ProgressionError> {
        if reps == 0 {
            return Err(ProgressionError::InvalidInput);
        }

        let step = if self.fixed { snap_step(step) } else { step };

        #[allow(clippy::cast_precision_loss)]
        let reps = reps as f32;
        let adjustment = self.params.adjustment_at(reps, step);

        let perc_1rm = match self.family {
            TableFamily::RirIncrement => max_perc_1rm(reps + adjustment, self.effort)?,
            TableFamily::PercDrop => max_perc_1rm(reps, self.effort)? + adjustment,
        };

        Ok(TableEntry {
            adjustment,
            perc_1rm,
        })
    }

    /// Pairwise lookup for rep and step sequences of equal length.
    pub fn entries(&self, reps: &[u32], steps: &[i32]) -> Result<Vec<TableEntry>, ProgressionError> {
        if reps.len() != steps.len() {
            return Err(ProgressionError::LengthMismatch {
                reps: reps.len(),
                steps: steps.len(),
            });
        }

        std::iter::zip(reps, steps)
            .map(|(reps, step)| self.entry(*reps, *step))
            .collect()
    }

    /// Lookup for a single rep count broadcast over a step sequence.
    pub fn entries_for_steps(
        &self,
        reps: u32,
        steps: &[i32],
    ) -> Result<Vec<TableEntry>, ProgressionError> {
        steps.iter().map(|step| self.entry(reps, *step)).collect()
    }
}

fn snap_step(step: i32) -> i32 {
    let mut nearest = FIXED_STEPS[0];
    for candidate in FIXED_STEPS {
        if (step - candidate).abs() < (step - nearest).abs() {
            nearest = candidate;
        }
    }
    nearest
}

/// One row of the dense progression-table enumeration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionRow {
    pub reps: u32,
    pub step: i32,
    pub volume: Volume,
    pub effort: Effort,
    pub adjustment: f32,
    pub perc_1rm: f32,
}

/// Enumerates one table family over every rep count up to the tabulated
/// cap, every given step, every volume preset and both effort types.
///
/// This is the dense grid used for visualization and inspection; the
/// result has `REP_CAP * steps.len() * 3 * 2` rows.
pub fn generate_progression_table(
    family: TableFamily,
    steps: &[i32],
) -> Result<Vec<ProgressionRow>, ProgressionError> {
    let mut rows =
        Vec::with_capacity(REP_CAP as usize * steps.len() * Volume::iter().len() * Effort::iter().len());

    for volume in Volume::iter() {
        for effort in Effort::iter() {
            let model = ProgressionModel::new(family, *volume).with_effort(*effort);
            for reps in 1..=REP_CAP {
                for step in steps {
                    let entry = model.entry(reps, *step)?;
                    rows.push(ProgressionRow {
                        reps,
                        step: *step,
                        volume: *volume,
                        effort: *effort,
                        adjustment: entry.adjustment,
                        perc_1rm: entry.perc_1rm,
                    });
                }
            }
        }
    }

    Ok(rows)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgressionError {
    #[error("Rep count must be positive")]
    InvalidInput,
    #[error("Rep and step sequences must have equal length ({reps} != {steps})")]
    LengthMismatch { reps: usize, steps: usize },
    #[error(transparent)]
    Intensity(#[from] IntensityError),
}
