//! Reduction of page extremes into the reported price

use crate::error::{Result, SpotPriceError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reported price: the maximum alone, or the min/max pair
///
/// On the wire `Max` is a bare JSON number and `Range` is `{"min": .., "max": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregateResult {
    Max(f64),
    Range { min: f64, max: f64 },
}

impl AggregateResult {
    pub fn max(&self) -> f64 {
        match self {
            AggregateResult::Max(max) | AggregateResult::Range { max, .. } => *max,
        }
    }

    pub fn min(&self) -> Option<f64> {
        match self {
            AggregateResult::Max(_) => None,
            AggregateResult::Range { min, .. } => Some(*min),
        }
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateResult::Max(max) => write!(f, "${:.4}/hr", max),
            AggregateResult::Range { min, max } => write!(f, "${:.4}-${:.4}/hr", min, max),
        }
    }
}

/// Reduce accumulated samples to the max, or to min and max when asked
///
/// An empty input is `NoData`: reporting 0 would look like a real price.
pub fn aggregate(samples: &[f64], want_minimum: bool, instance_type: &str) -> Result<AggregateResult> {
    let (first, rest) = samples.split_first().ok_or_else(|| SpotPriceError::NoData {
        instance_type: instance_type.to_string(),
    })?;

    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(min, max), &v| (min.min(v), max.max(v)));

    Ok(if want_minimum {
        AggregateResult::Range { min, max }
    } else {
        AggregateResult::Max(max)
    })
}
