//! Generation of set and rep prescriptions from parametrized progression
//! models.
//!
//! A [`ProgressionModel`] maps (reps, step) combinations to an adjustment
//! and a %1RM via the empirical reps-to-failure curves in [`intensity`].
//! The vertical-planning generators expand a base rep sequence across
//! progression steps, and [`scheme`] joins the two into a full set/rep/
//! intensity table. All operations are pure transformations of numeric
//! inputs into flat row sequences.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod intensity;
mod planning;
mod progression;
mod scheme;

pub use intensity::{Effort, IntensityError, REP_CAP, max_perc_1rm};
pub use planning::{
    PlanningError, VerticalPlanRow, vertical_block, vertical_block_variant, vertical_constant,
    vertical_linear, vertical_linear_reverse, vertical_planning, vertical_rep_accumulation,
    vertical_set_accumulation, vertical_set_accumulation_reverse, vertical_undulating,
    vertical_undulating_reverse, vertical_volume_intensity,
};
pub use progression::{
    ProgressionError, ProgressionModel, ProgressionParams, ProgressionRow, TableEntry, TableFamily,
    Volume, generate_progression_table,
};
pub use scheme::{SchemeRow, scheme};
