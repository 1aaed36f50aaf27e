//! Mass-spring cloth simulation for flags and banners.
//!
//! `pennant` models a cloth as a grid of point masses joined by damped
//! springs, pinned along one edge and pushed by gravity and a gusting wind.
//! Each step resets every force, accumulates spring pairs, then integrates
//! every free particle with one of three schemes.
//!
//! # Features
//!
//! - **Selectable integrators**: explicit Euler, symplectic Euler, Störmer–Verlet
//! - **Damped springs**: elastic plus axial damping, Newton's-third-law pairs
//! - **Fixed stepping**: `FixedStepper` turns frame deltas into fixed sub-steps
//! - **Observable**: Monitor step phases via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use pennant::{ClothConfig, ClothSystem, FixedStepper, Integrator, NoOpStepObserver, WindConfig};
//!
//! let config: ClothConfig<f32> = ClothConfig::new()
//!     .with_segments(4, 3)
//!     .with_integrator(Integrator::SymplecticEuler)
//!     .with_wind(WindConfig::disabled());
//! let mut flag = ClothSystem::new(config).unwrap();
//! let mut stepper = FixedStepper::new(0.001).unwrap();
//! let steps = stepper.advance(&mut flag, 1.0 / 60.0, &mut NoOpStepObserver).unwrap();
//! assert!(steps >= 16);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod integrator;
pub mod wind;
pub mod cloth;
pub mod stepper;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use spring::Spring;
pub use integrator::Integrator;
pub use wind::WindConfig;
pub use cloth::{ClothSystem, SpringSegment};
pub use stepper::FixedStepper;
pub use config::{ClothConfig, PinnedEdge};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{ClothError, Result};

/// The simulated flag is a cloth system.
pub type Flag<F> = ClothSystem<F>;
