//! Metrics sink trait for data collection and progress reporting.

use nasch_core::Step;
use nasch_vehicle::Vehicle;

/// Callbacks invoked by [`Sim`][crate::Sim] during initialization and at every
/// step boundary.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  The simulation never reads anything back
/// from an observer.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_capture(&mut self, step: Step, average_speed: f64, _vehicles: &[Vehicle]) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: mean speed {average_speed:.2}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the compute phase of each step.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called once for the initial placement (step 0) and once after every
    /// committed step.
    ///
    /// `average_speed` is the model-level metric; `vehicles` gives each
    /// vehicle's committed position and speed.
    fn on_capture(&mut self, _step: Step, _average_speed: f64, _vehicles: &[Vehicle]) {}

    /// Called once when the step budget is exhausted.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_step_start(&mut self, step: Step) {
        (**self).on_step_start(step);
    }

    fn on_capture(&mut self, step: Step, average_speed: f64, vehicles: &[Vehicle]) {
        (**self).on_capture(step, average_speed, vehicles);
    }

    fn on_sim_end(&mut self, final_step: Step) {
        (**self).on_sim_end(final_step);
    }
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
