//! Error types for cloth configuration and stepping.

use alloc::string::String;
use thiserror::Error;

/// Result type alias for cloth operations.
pub type Result<T> = core::result::Result<T, ClothError>;

/// Errors that can occur when configuring or driving a cloth system.
///
/// Every variant is a precondition violation reported synchronously to the
/// caller. Degenerate geometry during a step is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    /// Mass must be positive and finite.
    #[error("particle mass must be positive and finite")]
    InvalidMass,

    /// Spring stiffness must be positive and finite.
    #[error("spring stiffness must be positive and finite")]
    InvalidStiffness,

    /// Spring damping must be non-negative and finite.
    #[error("spring damping must be non-negative and finite")]
    InvalidDamping,

    /// Rest length (grid spacing) must be positive and finite.
    #[error("rest length must be positive and finite")]
    InvalidRestLength,

    /// Grid needs at least one segment along each axis.
    #[error("grid must have at least 1x1 segments, got {width}x{height}")]
    InvalidGridDimensions { width: usize, height: usize },

    /// Integration method identifier is not one of the known schemes.
    #[error("unknown integration method `{0}` (expected euler, symplectic, or verlet)")]
    UnknownIntegrator(String),

    /// Time step must be positive and finite.
    #[error("time step must be positive and finite")]
    InvalidTimeStep,

    /// Gravity and wind parameters must be finite.
    #[error("environment parameters must be finite")]
    InvalidEnvironment,

    /// Particle index past the end of the arena.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },

    /// A spring must join two distinct particles.
    #[error("spring endpoints must differ, got {index} twice")]
    SelfSpring { index: usize },

    /// Grid coordinate outside the particle lattice.
    #[error("grid coordinate ({u}, {v}) out of bounds")]
    GridOutOfBounds { u: usize, v: usize },
}

impl ClothError {
    /// Create an unknown integrator error.
    #[must_use]
    pub fn unknown_integrator(id: impl Into<String>) -> Self {
        Self::UnknownIntegrator(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn unknown_integrator_names_the_identifier() {
        let err = ClothError::unknown_integrator("rk4");
        assert!(err.to_string().contains("`rk4`"));
    }

    #[test]
    fn particle_out_of_bounds_display() {
        let err = ClothError::ParticleOutOfBounds { index: 9, count: 4 };
        assert_eq!(err.to_string(), "particle index 9 out of bounds (count: 4)");
    }

    #[test]
    fn grid_dimensions_display() {
        let err = ClothError::InvalidGridDimensions { width: 0, height: 3 };
        assert_eq!(err.to_string(), "grid must have at least 1x1 segments, got 0x3");
    }
}
