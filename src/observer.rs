//! Step observer trait for monitoring cloth simulation progress.

/// Trait for observing the phases of a cloth step.
///
/// Called in phase order: forces reset, springs applied, particles integrated,
/// step complete. All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after every particle's force has been reset to gravity and wind.
    fn on_forces_reset(&mut self) {}

    /// Called after every spring has added its force pair.
    fn on_springs_applied(&mut self) {}

    /// Called after all unpinned particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
