//! Mechanic allocation validation
//!
//! A block's labor revenue may be split across assigned mechanics. The
//! split is validated at save time, not on every keystroke: an empty
//! split list is allowed (unattributed labor), a single split normalizes
//! to 100, and a multi-way split must be all-positive and sum to 100
//! within a cent. A bad split refuses the save with a field-addressable
//! error; it is never clamped or redistributed behind the user's back.

use crate::money::{round2, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::MechanicSplit;

/// Tolerance on the 100% sum check
pub const SPLIT_SUM_TOLERANCE: f64 = 0.01;

/// Validate a block's mechanic splits at save time.
///
/// Normalizes a lone split to 100% when its percent is absent or
/// non-positive. Multi-way splits are rejected, never adjusted, when
/// any percent is missing/non-positive or the sum is off by more than
/// [`SPLIT_SUM_TOLERANCE`].
///
/// `block_index` is used to address the offending field in the error.
pub fn validate_splits(splits: &mut [MechanicSplit], block_index: usize) -> AppResult<()> {
    match splits.len() {
        0 => Ok(()),
        1 => {
            let split = &mut splits[0];
            let percent = split.percent.filter(|p| p.is_finite() && *p > 0.0);
            if percent.is_none() {
                split.percent = Some(100.0);
            }
            Ok(())
        }
        _ => {
            let mut sum = Decimal::ZERO;
            for (i, split) in splits.iter().enumerate() {
                let percent = split
                    .percent
                    .filter(|p| p.is_finite() && *p > 0.0)
                    .ok_or_else(|| {
                        AppError::new(ErrorCode::SplitPercentInvalid).with_field(format!(
                            "blocks[{}].assigned_mechanics[{}].percent",
                            block_index, i
                        ))
                    })?;
                sum += to_decimal(percent);
            }

            let sum = to_f64(round2(sum));
            if (sum - 100.0).abs() > SPLIT_SUM_TOLERANCE {
                return Err(AppError::with_message(
                    ErrorCode::SplitSumMismatch,
                    format!(
                        "Mechanic split percentages must total 100, got {:.2}",
                        sum
                    ),
                )
                .with_field(format!("blocks[{}].assigned_mechanics", block_index)));
            }
            Ok(())
        }
    }
}

/// Selection-time convenience: spread 100% evenly across the splits,
/// rounding to 2 decimal places with the remainder on the first split so
/// the set sums to exactly 100. This is a data-entry helper only; save
/// time never redistributes.
pub fn distribute_evenly(splits: &mut [MechanicSplit]) {
    let n = splits.len();
    if n == 0 {
        return;
    }

    let even = round2(Decimal::ONE_HUNDRED / Decimal::from(n));
    let first = Decimal::ONE_HUNDRED - even * Decimal::from(n - 1);

    for (i, split) in splits.iter_mut().enumerate() {
        let share = if i == 0 { first } else { even };
        split.percent = Some(to_f64(share));
    }
}
