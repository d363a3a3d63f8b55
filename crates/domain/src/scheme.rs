use std::collections::BTreeMap;

use crate::{ProgressionError, ProgressionModel, VerticalPlanRow};

/// One prescribed set of a composed scheme.
///
/// `set` is the 1-based position of the row within its `index` group,
/// derived from insertion order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeRow {
    pub index: u32,
    pub set: u32,
    pub reps: u32,
    pub adjustment: f32,
    pub perc_1rm: f32,
}

/// Joins a vertical plan against a progression model into a full scheme.
///
/// Each plan row is looked up by its (reps, step) combination; row order
/// is preserved. This is the integration surface consumed by plotting and
/// reporting collaborators.
pub fn scheme(
    plan: &[VerticalPlanRow],
    model: &ProgressionModel,
) -> Result<Vec<SchemeRow>, ProgressionError> {
    let mut sets_per_index: BTreeMap<u32, u32> = BTreeMap::new();

    plan.iter()
        .map(|row| {
            let entry = model.entry(row.reps, row.step)?;
            let set = sets_per_index
                .entry(row.index)
                .and_modify(|set| *set += 1)
                .or_insert(1);
            Ok(SchemeRow {
                index: row.index,
                set: *set,
                reps: row.reps,
                adjustment: entry.adjustment,
                perc_1rm: entry.perc_1rm,
            })
        })
        .collect()
}
