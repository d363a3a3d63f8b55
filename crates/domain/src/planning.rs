use std::{iter::zip, ops::RangeInclusive};

/// One planned set position: a rep target at a progression step.
///
/// `index` is the 1-based ordinal of the progression step the row belongs
/// to. It is the join key against week/step ordering, so insertion order
/// within an index group is significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalPlanRow {
    pub reps: u32,
    pub index: u32,
    pub step: i32,
}

/// Expands a base rep sequence across a sequence of progression steps.
///
/// Exactly one of `reps_change` and `step` may be omitted. An omitted
/// `reps_change` defaults to all zero, an omitted `step` defaults to the
/// countdown `0, -1, ..., -(n - 1)` from the reference step. When both are
/// given their lengths must match. Every base rep is emitted once per
/// progression step, shifted by that step's rep change.
pub fn vertical_planning(
    reps: &[u32],
    reps_change: Option<&[i32]>,
    step: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    let (reps_change, step): (Vec<i32>, Vec<i32>) = match (reps_change, step) {
        (None, None) => return Err(PlanningError::MissingArgument),
        (Some(reps_change), Some(step)) => {
            if reps_change.len() != step.len() {
                return Err(PlanningError::LengthMismatch {
                    reps_change: reps_change.len(),
                    step: step.len(),
                });
            }
            (reps_change.to_vec(), step.to_vec())
        }
        (Some(reps_change), None) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let step = (0..reps_change.len()).map(|i| -(i as i32)).collect();
            (reps_change.to_vec(), step)
        }
        (None, Some(step)) => (vec![0; step.len()], step.to_vec()),
    };

    let mut rows = Vec::with_capacity(reps.len() * step.len());

    for (i, (change, step)) in zip(&reps_change, &step).enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let index = i as u32 + 1;
        for reps in reps {
            let adjusted = i64::from(*reps) + i64::from(*change);
            if adjusted < 1 {
                return Err(PlanningError::InvalidReps);
            }
            rows.push(VerticalPlanRow {
                reps: u32::try_from(adjusted).map_err(|_| PlanningError::InvalidReps)?,
                index,
                step: *step,
            });
        }
    }

    Ok(rows)
}

/// Same reps at every step.
pub fn vertical_constant(
    reps: &[u32],
    n_steps: usize,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, Some(&vec![0; n_steps]), None)
}

/// Reps drop linearly while approaching the reference step.
pub fn vertical_linear(
    reps: &[u32],
    reps_change: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, Some(reps_change.unwrap_or(&[0, -1, -2, -3])), None)
}

/// Reps grow linearly while approaching the reference step.
pub fn vertical_linear_reverse(
    reps: &[u32],
    reps_change: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, Some(reps_change.unwrap_or(&[0, 1, 2, 3])), None)
}

/// Fixed reps over a non-monotonic step ordering with a deload before the
/// final step.
pub fn vertical_block(
    reps: &[u32],
    step: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, None, Some(step.unwrap_or(&[-2, -1, 0, -3])))
}

/// Block with the deload moved before the peak step.
pub fn vertical_block_variant(
    reps: &[u32],
    step: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, None, Some(step.unwrap_or(&[-2, -1, -3, 0])))
}

/// Non-monotonic rep changes alternating harder and easier steps.
pub fn vertical_undulating(
    reps: &[u32],
    reps_change: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, Some(reps_change.unwrap_or(&[0, -2, -1, -3])), None)
}

/// Sign-flipped undulating pattern.
pub fn vertical_undulating_reverse(
    reps: &[u32],
    reps_change: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, Some(reps_change.unwrap_or(&[0, 2, 1, 3])), None)
}

/// Two volume steps followed by two intensity steps.
pub fn vertical_volume_intensity(
    reps: &[u32],
    reps_change: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    vertical_planning(reps, Some(reps_change.unwrap_or(&[0, 0, -3, -3])), None)
}

/// Reps accumulate toward the base prescription while the progression step
/// stays at the reference.
pub fn vertical_rep_accumulation(
    reps: &[u32],
    reps_change: Option<&[i32]>,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    let reps_change = reps_change.unwrap_or(&[-3, -2, -1, 0]);
    vertical_planning(reps, Some(reps_change), Some(&vec![0; reps_change.len()]))
}

/// Holds rep values fixed but grows the number of sets at the accumulated
/// rep position across progression steps.
///
/// `accumulate_rep` is a 1-based inclusive range into `reps` selecting the
/// segment to repeat; it defaults to the last position. At step `i` the
/// segment appears `set_increment * (i - 1) + 1` times, flanked by the
/// untouched positions before and after it. The default step sequence
/// counts up to the reference step, so peak set volume coincides with the
/// peak step.
pub fn vertical_set_accumulation(
    reps: &[u32],
    step: Option<&[i32]>,
    accumulate_rep: Option<RangeInclusive<usize>>,
    set_increment: usize,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    let expansions = set_accumulation_expansions(reps, step, accumulate_rep, set_increment)?;
    let mut rows = Vec::new();

    for (i, (new_reps, step)) in expansions.into_iter().enumerate() {
        rows.extend(indexed_rows(&new_reps, step, i)?);
    }

    Ok(rows)
}

/// Set accumulation working backward from peak volume: the expansion that
/// would come last under the forward scheme is emitted first, with the
/// step sequence reversed accordingly.
pub fn vertical_set_accumulation_reverse(
    reps: &[u32],
    step: Option<&[i32]>,
    accumulate_rep: Option<RangeInclusive<usize>>,
    set_increment: usize,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    let expansions = set_accumulation_expansions(reps, step, accumulate_rep, set_increment)?;
    let mut rows = Vec::new();

    for (i, (new_reps, step)) in expansions.into_iter().rev().enumerate() {
        rows.extend(indexed_rows(&new_reps, step, i)?);
    }

    Ok(rows)
}

const DEFAULT_ACCUMULATION_STEPS: [i32; 4] = [-3, -2, -1, 0];

/// Expanded rep sequence and step for each progression step, in forward
/// order.
fn set_accumulation_expansions(
    reps: &[u32],
    step: Option<&[i32]>,
    accumulate_rep: Option<RangeInclusive<usize>>,
    set_increment: usize,
) -> Result<Vec<(Vec<u32>, i32)>, PlanningError> {
    let step = step.unwrap_or(&DEFAULT_ACCUMULATION_STEPS);
    let accumulate_rep = accumulate_rep.unwrap_or(reps.len()..=reps.len());
    let (first, last) = (*accumulate_rep.start(), *accumulate_rep.end());

    if first < 1 || last > reps.len() || first > last {
        return Err(PlanningError::InvalidAccumulateRep);
    }

    let before = &reps[..first - 1];
    let segment = &reps[first - 1..last];
    let after = &reps[last..];

    Ok(step
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let mut new_reps = Vec::with_capacity(reps.len() + i * set_increment * segment.len());
            new_reps.extend_from_slice(before);
            for _ in 0..=i * set_increment {
                new_reps.extend_from_slice(segment);
            }
            new_reps.extend_from_slice(after);
            (new_reps, *step)
        })
        .collect())
}

fn indexed_rows(
    reps: &[u32],
    step: i32,
    i: usize,
) -> Result<Vec<VerticalPlanRow>, PlanningError> {
    #[allow(clippy::cast_possible_truncation)]
    let index = i as u32 + 1;

    Ok(vertical_planning(reps, None, Some(&[step]))?
        .into_iter()
        .map(|row| VerticalPlanRow { index, ..row })
        .collect())
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PlanningError {
    #[error("Either reps_change or step must be given")]
    MissingArgument,
    #[error("reps_change and step must have equal length ({reps_change} != {step})")]
    LengthMismatch { reps_change: usize, step: usize },
    #[error("Adjusted rep count must be positive")]
    InvalidReps,
    #[error("accumulate_rep must select positions within the rep sequence")]
    InvalidAccumulateRep,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn row(reps: u32, index: u32, step: i32) -> VerticalPlanRow {
        VerticalPlanRow { reps, index, step }
    }

    #[test]
    fn test_vertical_planning_pairwise() {
        assert_eq!(
            vertical_planning(&[5, 5, 5], Some(&[0, -1, -2]), None).unwrap(),
            vec![
                row(5, 1, 0),
                row(5, 1, 0),
                row(5, 1, 0),
                row(4, 2, -1),
                row(4, 2, -1),
                row(4, 2, -1),
                row(3, 3, -2),
                row(3, 3, -2),
                row(3, 3, -2),
            ]
        );
    }

    #[test]
    fn test_vertical_planning_step_only() {
        assert_eq!(
            vertical_planning(&[8, 6], None, Some(&[-2, 0])).unwrap(),
            vec![row(8, 1, -2), row(6, 1, -2), row(8, 2, 0), row(6, 2, 0)]
        );
    }

    #[test]
    fn test_vertical_planning_derived_step_countdown() {
        let rows = vertical_planning(&[5], Some(&[0, 0, 0]), None).unwrap();
        assert_eq!(
            rows.iter().map(|r| r.step).collect::<Vec<_>>(),
            vec![0, -1, -2]
        );
    }

    #[test]
    fn test_vertical_planning_missing_argument() {
        assert_eq!(
            vertical_planning(&[5, 5], None, None),
            Err(PlanningError::MissingArgument)
        );
    }

    #[test]
    fn test_vertical_planning_length_mismatch() {
        assert_eq!(
            vertical_planning(&[5], Some(&[0, -1]), Some(&[0, -1, -2])),
            Err(PlanningError::LengthMismatch {
                reps_change: 2,
                step: 3
            })
        );
    }

    #[test]
    fn test_vertical_planning_invalid_adjusted_reps() {
        assert_eq!(
            vertical_planning(&[2], Some(&[0, -2]), None),
            Err(PlanningError::InvalidReps)
        );
    }

    #[rstest]
    #[case::three_steps(3)]
    #[case::four_steps(4)]
    fn test_row_count_and_index_coverage(#[case] n_steps: usize) {
        let reps = [5, 4, 3];
        let rows = vertical_constant(&reps, n_steps).unwrap();

        assert_eq!(rows.len(), n_steps * reps.len());
        for index in 1..=n_steps {
            #[allow(clippy::cast_possible_truncation)]
            let index = index as u32;
            assert_eq!(
                rows.iter().filter(|r| r.index == index).count(),
                reps.len()
            );
        }
    }

    #[test]
    fn test_vertical_constant() {
        let rows = vertical_constant(&[5, 5, 5], 4).unwrap();

        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.reps == 5));
        assert_eq!(rows.iter().map(|r| r.index).max(), Some(4));
    }

    #[test]
    fn test_vertical_linear_defaults() {
        let rows = vertical_linear(&[8], None).unwrap();
        assert_eq!(
            rows,
            vec![row(8, 1, 0), row(7, 2, -1), row(6, 3, -2), row(5, 4, -3)]
        );
    }

    #[test]
    fn test_vertical_linear_reverse_defaults() {
        let rows = vertical_linear_reverse(&[5], None).unwrap();
        assert_eq!(
            rows.iter().map(|r| r.reps).collect::<Vec<_>>(),
            vec![5, 6, 7, 8]
        );
    }

    #[test]
    fn test_vertical_block_defaults() {
        let rows = vertical_block(&[5], None).unwrap();
        assert_eq!(
            rows,
            vec![row(5, 1, -2), row(5, 2, -1), row(5, 3, 0), row(5, 4, -3)]
        );
    }

    #[test]
    fn test_vertical_block_variant_defaults() {
        let rows = vertical_block_variant(&[5], None).unwrap();
        assert_eq!(
            rows.iter().map(|r| r.step).collect::<Vec<_>>(),
            vec![-2, -1, -3, 0]
        );
    }

    #[test]
    fn test_vertical_undulating_defaults() {
        let rows = vertical_undulating(&[6], None).unwrap();
        assert_eq!(
            rows.iter().map(|r| r.reps).collect::<Vec<_>>(),
            vec![6, 4, 5, 3]
        );
    }

    #[test]
    fn test_vertical_undulating_reverse_defaults() {
        let rows = vertical_undulating_reverse(&[6], None).unwrap();
        assert_eq!(
            rows.iter().map(|r| r.reps).collect::<Vec<_>>(),
            vec![6, 8, 7, 9]
        );
    }

    #[test]
    fn test_vertical_volume_intensity_defaults() {
        let rows = vertical_volume_intensity(&[8], None).unwrap();
        assert_eq!(
            rows.iter().map(|r| r.reps).collect::<Vec<_>>(),
            vec![8, 8, 5, 5]
        );
    }

    #[test]
    fn test_vertical_rep_accumulation_defaults() {
        let rows = vertical_rep_accumulation(&[8], None).unwrap();
        assert_eq!(
            rows,
            vec![row(5, 1, 0), row(6, 2, 0), row(7, 3, 0), row(8, 4, 0)]
        );
    }

    #[test]
    fn test_vertical_set_accumulation() {
        let rows = vertical_set_accumulation(&[3, 2, 1], Some(&[-1, -1, -1]), None, 1).unwrap();

        assert_eq!(
            rows,
            vec![
                row(3, 1, -1),
                row(2, 1, -1),
                row(1, 1, -1),
                row(3, 2, -1),
                row(2, 2, -1),
                row(1, 2, -1),
                row(1, 2, -1),
                row(3, 3, -1),
                row(2, 3, -1),
                row(1, 3, -1),
                row(1, 3, -1),
                row(1, 3, -1),
            ]
        );
    }

    #[test]
    fn test_vertical_set_accumulation_reverse_mirrors_counts() {
        let forward = vertical_set_accumulation(&[3, 2, 1], Some(&[-1, -1, -1]), None, 1).unwrap();
        let reverse =
            vertical_set_accumulation_reverse(&[3, 2, 1], Some(&[-1, -1, -1]), None, 1).unwrap();

        let count = |rows: &[VerticalPlanRow], index: u32| {
            rows.iter().filter(|r| r.index == index).count()
        };

        assert_eq!(forward.len(), reverse.len());
        assert_eq!(count(&reverse, 1), count(&forward, 3));
        assert_eq!(count(&reverse, 2), count(&forward, 2));
        assert_eq!(count(&reverse, 3), count(&forward, 1));
    }

    #[test]
    fn test_vertical_set_accumulation_reverse_reverses_steps() {
        let rows =
            vertical_set_accumulation_reverse(&[5], Some(&[-2, -1, 0]), None, 1).unwrap();

        assert_eq!(
            rows.iter().map(|r| (r.index, r.step)).collect::<Vec<_>>(),
            vec![(1, 0), (1, 0), (1, 0), (2, -1), (2, -1), (3, -2)]
        );
    }

    #[test]
    fn test_vertical_set_accumulation_range() {
        let rows =
            vertical_set_accumulation(&[3, 2, 1], Some(&[0, 0]), Some(2..=3), 1).unwrap();

        assert_eq!(
            rows.iter().map(|r| r.reps).collect::<Vec<_>>(),
            vec![3, 2, 1, 3, 2, 1, 2, 1]
        );
    }

    #[test]
    fn test_vertical_set_accumulation_first_position() {
        // Accumulating the first position leaves the before segment empty.
        let rows = vertical_set_accumulation(&[3, 2], Some(&[0, 0]), Some(1..=1), 1).unwrap();

        assert_eq!(
            rows.iter().map(|r| r.reps).collect::<Vec<_>>(),
            vec![3, 2, 3, 3, 2]
        );
    }

    #[test]
    fn test_vertical_set_accumulation_set_increment() {
        let rows = vertical_set_accumulation(&[1], Some(&[0, 0, 0]), None, 2).unwrap();

        assert_eq!(
            rows.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![1, 2, 2, 2, 3, 3, 3, 3, 3]
        );
    }

    #[rstest]
    #[case::zero_start(0..=1)]
    #[case::past_end(2..=4)]
    #[case::inverted(3..=2)]
    fn test_vertical_set_accumulation_invalid_range(#[case] accumulate_rep: RangeInclusive<usize>) {
        assert_eq!(
            vertical_set_accumulation(&[3, 2, 1], None, Some(accumulate_rep), 1),
            Err(PlanningError::InvalidAccumulateRep)
        );
    }

    #[test]
    fn test_vertical_planning_idempotent() {
        assert_eq!(
            vertical_undulating(&[5, 5], None).unwrap(),
            vertical_undulating(&[5, 5], None).unwrap()
        );
    }
}
