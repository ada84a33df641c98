//! Scripted controllers for baselines and tests.

use super::{Controller, Inputs};
use crate::error::ControllerFault;
use serde::{Deserialize, Serialize};

/// Hand-written flight policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedPolicy {
    /// Never flap; the bird falls to the ground.
    Never,
    /// Flap every frame.
    Always,
    /// Flap whenever the bird is below the gap center, i.e. nearer the
    /// bottom pipe than the top of the gap.
    HoldGap,
}

impl Controller for FixedPolicy {
    fn evaluate(&mut self, inputs: &Inputs) -> Result<Vec<f64>, ControllerFault> {
        let jump = match self {
            Self::Never => false,
            Self::Always => true,
            Self::HoldGap => inputs[1] > inputs[2],
        };
        Ok(vec![if jump { 1.0 } else { 0.0 }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_and_always() {
        let inputs = [350.0, 50.0, 150.0, 0.0];
        assert_eq!(FixedPolicy::Never.evaluate(&inputs), Ok(vec![0.0]));
        assert_eq!(FixedPolicy::Always.evaluate(&inputs), Ok(vec![1.0]));
    }

    #[test]
    fn test_hold_gap() {
        // Gap top at 300, bottom pipe at 500.
        let mut policy = FixedPolicy::HoldGap;
        // y = 350: upper half
        assert_eq!(policy.evaluate(&[350.0, 50.0, 150.0, 0.0]), Ok(vec![0.0]));
        // y = 450: lower half
        assert_eq!(policy.evaluate(&[450.0, 150.0, 50.0, 0.0]), Ok(vec![1.0]));
        // y = 250: above the gap
        assert_eq!(policy.evaluate(&[250.0, 50.0, 250.0, 0.0]), Ok(vec![0.0]));
        // y = 550: below the gap entirely
        assert_eq!(policy.evaluate(&[550.0, 250.0, 50.0, 0.0]), Ok(vec![1.0]));
    }

    #[test]
    fn test_hold_gap_splits_at_center() {
        // Gap top at 300, bottom pipe at 500, center 400.
        let mut policy = FixedPolicy::HoldGap;
        assert_eq!(policy.evaluate(&[400.0, 100.0, 100.0, 0.0]), Ok(vec![0.0]));
        assert_eq!(policy.evaluate(&[401.0, 101.0, 99.0, 0.0]), Ok(vec![1.0]));
        assert_eq!(policy.evaluate(&[399.0, 99.0, 101.0, 0.0]), Ok(vec![0.0]));
    }
}
