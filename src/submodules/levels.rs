use serde::{Deserialize, Serialize};

use super::type_lib::NumericData;

const AUTO_TARGET_BANDS: usize = 8;
const NICE_STEPS: [NumericData; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// How contour band boundaries are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContourLevels {
    /// Round-numbered boundaries covering the data range.
    Auto,
    /// `n` evenly spaced boundaries from the field minimum to its maximum.
    Linear(usize),
}

impl ContourLevels {
    pub fn compute(&self, min: NumericData, max: NumericData) -> Vec<NumericData> {
        let (min, max) = nonsingular(min, max);
        match *self {
            ContourLevels::Auto => nice_levels(min, max, AUTO_TARGET_BANDS),
            ContourLevels::Linear(n) => linspace(min, max, n.max(2)),
        }
    }
}

/// Widens a zero-width range so that levels stay strictly increasing.
pub fn nonsingular(min: NumericData, max: NumericData) -> (NumericData, NumericData) {
    if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    }
}

pub fn linspace(start: NumericData, end: NumericData, n: usize) -> Vec<NumericData> {
    if n == 1 {
        return vec![start];
    }
    let delta = (end - start) / (n - 1) as NumericData;
    let mut levels: Vec<NumericData> = if delta.is_finite() {
        (0..n).map(|i| start + i as NumericData * delta).collect()
    } else {
        // the width overflows, so blend the endpoints instead
        (0..n)
            .map(|i| {
                let t = i as NumericData / (n - 1) as NumericData;
                start * (1.0 - t) + end * t
            })
            .collect()
    };
    // pin the last value so rounding never leaves max uncovered
    if let Some(last) = levels.last_mut() {
        *last = end;
    }
    levels
}

pub fn nice_levels(min: NumericData, max: NumericData, target_bands: usize) -> Vec<NumericData> {
    let raw_step = (max - min) / target_bands.max(1) as NumericData;
    if !raw_step.is_finite() {
        return linspace(min, max, target_bands.max(1) + 1);
    }
    let magnitude = (10.0 as NumericData).powf(raw_step.log10().floor());
    let step = NICE_STEPS.iter()
        .map(|factor| factor * magnitude)
        .find(|step| *step >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).floor() as i64;
    let last = (max / step).ceil() as i64;
    let mut levels: Vec<NumericData> = (first..=last).map(|k| k as NumericData * step).collect();
    if levels[0] > min {
        levels.insert(0, levels[0] - step);
    }
    if levels[levels.len() - 1] < max {
        levels.push(levels[levels.len() - 1] + step);
    }
    levels
}
