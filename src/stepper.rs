//! Fixed-timestep accumulator for driving a cloth from a render loop.

use tracing::warn;

use crate::cloth::ClothSystem;
use crate::error::{ClothError, Result};
use crate::float::Float;
use crate::observer::StepObserver;

/// Converts variable frame deltas into a whole number of fixed cloth steps.
///
/// The leftover that does not fill a step carries into the next frame.
pub struct FixedStepper<F: Float> {
    time_step: F,
    max_frame_time: F,
    accumulator: F,
    total_steps: u64,
}

impl<F: Float> FixedStepper<F> {
    /// Stepper with the given fixed step and a 250 ms frame clamp.
    pub fn new(time_step: F) -> Result<Self> {
        if !time_step.is_positive_finite() {
            return Err(ClothError::InvalidTimeStep);
        }
        Ok(FixedStepper {
            time_step,
            max_frame_time: F::from_f32(0.25),
            accumulator: F::zero(),
            total_steps: 0,
        })
    }

    /// Clamp applied to each frame delta to avoid the spiral of death.
    pub fn with_max_frame_time(mut self, max_frame_time: F) -> Result<Self> {
        if !max_frame_time.is_positive_finite() {
            return Err(ClothError::InvalidTimeStep);
        }
        self.max_frame_time = max_frame_time;
        Ok(self)
    }

    /// Accumulate `frame_dt` seconds and run every fixed step that fits.
    ///
    /// Returns the number of steps taken.
    pub fn advance<O: StepObserver>(
        &mut self,
        cloth: &mut ClothSystem<F>,
        frame_dt: F,
        observer: &mut O,
    ) -> Result<usize> {
        if !frame_dt.is_finite() || frame_dt < F::zero() {
            return Err(ClothError::InvalidTimeStep);
        }
        let frame_dt = if frame_dt > self.max_frame_time {
            warn!(?frame_dt, max = ?self.max_frame_time, "frame delta clamped");
            self.max_frame_time
        } else {
            frame_dt
        };

        self.accumulator = self.accumulator + frame_dt;
        let mut steps = 0;
        while self.accumulator >= self.time_step {
            cloth.step(self.time_step, observer)?;
            self.accumulator = self.accumulator - self.time_step;
            steps += 1;
        }
        self.total_steps += steps as u64;
        Ok(steps)
    }

    /// Fraction of a step left in the accumulator, for render interpolation.
    pub fn interpolation_alpha(&self) -> F {
        self.accumulator / self.time_step
    }

    /// Drop any carried-over time, e.g. after a reset.
    pub fn clear(&mut self) {
        self.accumulator = F::zero();
    }

    pub fn time_step(&self) -> F { self.time_step }
    pub fn total_steps(&self) -> u64 { self.total_steps }
}
