use std::slice::Iter;

use derive_more::Display;

/// Character of a lift, determining which reps-to-failure curve applies.
///
/// Ballistic movements lose %1RM capacity more slowly as reps increase, so
/// their curve lies above the grinding curve for any rep count greater
/// than one.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Effort {
    #[display("grinding")]
    Grinding,
    #[display("ballistic")]
    Ballistic,
}

impl Effort {
    pub fn iter() -> Iter<'static, Effort> {
        static EFFORTS: [Effort; 2] = [Effort::Grinding, Effort::Ballistic];
        EFFORTS.iter()
    }
}

/// Highest rep count with an empirically backed %1RM value. Lookups beyond
/// this clamp to the last tabulated value.
pub const REP_CAP: u32 = 12;

static GRINDING: [f32; REP_CAP as usize] = [
    1.000, 0.955, 0.922, 0.892, 0.863, 0.837, 0.811, 0.786, 0.762, 0.739, 0.717, 0.695,
];

static BALLISTIC: [f32; REP_CAP as usize] = [
    1.000, 0.970, 0.945, 0.921, 0.897, 0.874, 0.851, 0.829, 0.807, 0.786, 0.765, 0.744,
];

/// Estimated %1RM for performing `reps` repetitions to failure, as a
/// fraction of the one-repetition maximum.
///
/// Fractional rep counts are interpolated linearly between the tabulated
/// values. Rep counts beyond [`REP_CAP`] clamp to the last tabulated value,
/// since the methodology only tolerates approximate values at high rep
/// counts.
pub fn max_perc_1rm(reps: f32, effort: Effort) -> Result<f32, IntensityError> {
    if !reps.is_finite() || reps <= 0.0 {
        return Err(IntensityError::InvalidInput);
    }

    let table = match effort {
        Effort::Grinding => &GRINDING,
        Effort::Ballistic => &BALLISTIC,
    };

    #[allow(clippy::cast_precision_loss)]
    let cap = REP_CAP as f32;

    if reps > cap {
        log::warn!("clamping {reps} reps to the tabulated maximum of {REP_CAP}");
        return Ok(table[table.len() - 1]);
    }

    let reps = reps.max(1.0);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = reps.floor() as usize;
    let fraction = reps - reps.floor();

    if lower >= table.len() {
        return Ok(table[table.len() - 1]);
    }

    let value = table[lower - 1];

    if fraction == 0.0 {
        Ok(value)
    } else {
        Ok(value + fraction * (table[lower] - value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum IntensityError {
    #[error("Rep count must be positive")]
    InvalidInput,
}
