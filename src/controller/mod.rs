//! Agent controllers.
//!
//! The episode only needs a decision function: four sensor values in, one or
//! more outputs back. Anything that implements [`Controller`] can fly a bird,
//! whether it is an evolved network, a scripted policy or a closure.

pub mod network;
pub mod policy;

pub use network::{Activation, FeedForwardNetwork, Layer};
pub use policy::FixedPolicy;

use crate::error::ControllerFault;

/// Number of sensor values fed to a controller each frame.
pub const INPUT_SIZE: usize = 4;

/// Sensor vector: bird y, distance to gap-center, distance to bottom pipe,
/// lookahead pipe passed (0 or 1).
pub type Inputs = [f64; INPUT_SIZE];

/// Shared interface implemented by all bird controllers.
pub trait Controller {
    /// Evaluate the controller for one frame.
    fn evaluate(&mut self, inputs: &Inputs) -> Result<Vec<f64>, ControllerFault>;
}

/// Adapter that lets a closure act as a controller.
pub struct FnController<F>(pub F);

impl<F> Controller for FnController<F>
where
    F: FnMut(&Inputs) -> Result<Vec<f64>, ControllerFault>,
{
    fn evaluate(&mut self, inputs: &Inputs) -> Result<Vec<f64>, ControllerFault> {
        (self.0)(inputs)
    }
}

/// Wrap a closure as a [`Controller`].
pub fn from_fn<F>(f: F) -> FnController<F>
where
    F: FnMut(&Inputs) -> Result<Vec<f64>, ControllerFault>,
{
    FnController(f)
}

impl Controller for Box<dyn Controller> {
    fn evaluate(&mut self, inputs: &Inputs) -> Result<Vec<f64>, ControllerFault> {
        (**self).evaluate(inputs)
    }
}

impl<C: Controller + ?Sized> Controller for &mut C {
    fn evaluate(&mut self, inputs: &Inputs) -> Result<Vec<f64>, ControllerFault> {
        (**self).evaluate(inputs)
    }
}

/// Turn controller outputs into a jump decision.
///
/// Empty output and a non-finite first output are faults.
pub fn wants_jump(outputs: &[f64], threshold: f64) -> Result<bool, ControllerFault> {
    let first = *outputs.first().ok_or(ControllerFault::EmptyOutput)?;
    if !first.is_finite() {
        return Err(ControllerFault::NonFinite(first));
    }
    Ok(first > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_jump_threshold() {
        assert_eq!(wants_jump(&[0.51], 0.5), Ok(true));
        assert_eq!(wants_jump(&[0.5], 0.5), Ok(false));
        assert_eq!(wants_jump(&[0.9, -1.0], 0.5), Ok(true));
    }

    #[test]
    fn test_wants_jump_faults() {
        assert_eq!(wants_jump(&[], 0.5), Err(ControllerFault::EmptyOutput));
        assert!(matches!(
            wants_jump(&[f64::NAN], 0.5),
            Err(ControllerFault::NonFinite(_))
        ));
    }

    #[test]
    fn test_closure_controller() {
        let mut calls = 0;
        let mut controller = from_fn(|inputs: &Inputs| -> Result<Vec<f64>, ControllerFault> {
            calls += 1;
            Ok(vec![inputs[0]])
        });
        assert_eq!(controller.evaluate(&[1.0, 0.0, 0.0, 0.0]), Ok(vec![1.0]));
        assert_eq!(controller.evaluate(&[2.0, 0.0, 0.0, 0.0]), Ok(vec![2.0]));
        drop(controller);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_boxed_controller_forwards() {
        let mut boxed: Box<dyn Controller> = Box::new(FixedPolicy::Always);
        assert_eq!(boxed.evaluate(&[0.0; INPUT_SIZE]), Ok(vec![1.0]));
    }
}
