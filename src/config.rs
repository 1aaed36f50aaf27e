//! Configuration types for the cloth system.

use crate::error::{ClothError, Result};
use crate::float::Float;
use crate::integrator::Integrator;
use crate::vec::{Vec, Vec3};
use crate::wind::WindConfig;

/// Which grid column is held fixed as the mounting line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinnedEdge {
    /// Column `u == 0`.
    #[default]
    Start,
    /// Column `u == width`.
    End,
}

impl PinnedEdge {
    /// Column index pinned for a grid `width` segments wide.
    pub fn column(self, width: usize) -> usize {
        match self {
            PinnedEdge::Start => 0,
            PinnedEdge::End => width,
        }
    }
}

/// Configuration for building and stepping a cloth.
///
/// # Builder Pattern
/// ```
/// use pennant::config::ClothConfig;
/// use pennant::{Integrator, Vec3};
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_segments(2, 2)
///     .with_spacing(1.0)
///     .with_spring(1000.0, 10.0)
///     .with_particle_mass(0.03)
///     .with_gravity(Vec3::new(0.0, -9.8, 0.0))
///     .with_integrator(Integrator::SymplecticEuler);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Segments along `u`; the grid has `width + 1` columns of particles.
    pub width: usize,
    /// Segments along `v`; the grid has `height + 1` rows of particles.
    pub height: usize,
    /// Initial particle spacing, also every spring's rest length.
    pub spacing: F,
    pub stiffness: F,
    pub damping: F,
    pub particle_mass: F,
    /// Gravitational acceleration; scaled by mass per particle.
    pub gravity: Vec3<F>,
    pub integrator: Integrator,
    pub wind: WindConfig<F>,
    pub pinned_edge: PinnedEdge,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            width: 12,
            height: 8,
            spacing: F::from_f32(0.25),
            stiffness: F::from_f32(1000.0),
            damping: F::from_f32(10.0),
            particle_mass: F::from_f32(0.03),
            gravity: Vec3::new(F::zero(), F::from_f32(-9.8), F::zero()),
            integrator: Integrator::Verlet,
            wind: WindConfig::new(),
            pinned_edge: PinnedEdge::Start,
        }
    }

    pub fn with_segments(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_spacing(mut self, spacing: F) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set stiffness and damping shared by every spring.
    pub fn with_spring(mut self, stiffness: F, damping: F) -> Self {
        self.stiffness = stiffness;
        self.damping = damping;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Select the integrator by identifier (`euler`, `symplectic`, `verlet`).
    pub fn with_method(self, id: &str) -> Result<Self> {
        let integrator = id.parse()?;
        Ok(self.with_integrator(integrator))
    }

    pub fn with_wind(mut self, wind: WindConfig<F>) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_pinned_edge(mut self, edge: PinnedEdge) -> Self {
        self.pinned_edge = edge;
        self
    }

    /// Particle count of the grid this config builds.
    pub fn particle_count(&self) -> usize {
        (self.width + 1) * (self.height + 1)
    }

    /// Spring count of the grid this config builds.
    pub fn spring_count(&self) -> usize {
        2 * self.width * self.height + self.width + self.height
    }

    /// Reject any configuration that would corrupt a step.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ClothError::InvalidGridDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.spacing.is_positive_finite() {
            return Err(ClothError::InvalidRestLength);
        }
        if !self.stiffness.is_positive_finite() {
            return Err(ClothError::InvalidStiffness);
        }
        if !self.damping.is_finite() || self.damping < F::zero() {
            return Err(ClothError::InvalidDamping);
        }
        if !self.particle_mass.is_positive_finite() {
            return Err(ClothError::InvalidMass);
        }
        if !self.gravity.is_finite() {
            return Err(ClothError::InvalidEnvironment);
        }
        self.wind.validate()
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
