//! Point masses driven by an accumulated external force.

use crate::error::{ClothError, Result};
use crate::float::Float;
use crate::integrator::Integrator;
use crate::vec::Vec;

/// A point mass with explicit velocity and a one-step position history.
///
/// `force` is transient: the owning system overwrites it with
/// [`reset_force`](Self::reset_force) at the start of every step, springs add
/// to it, and the integrator consumes it.
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    pub velocity: V,
    pub acceleration: V,
    pub force: V,
    pub mass: V::Scalar,
    pub inv_mass: V::Scalar,
    pub pinned: bool,
    /// False until the first integration step, and again after [`settle`](Self::settle).
    /// Verlet needs a distinct `prev_pos` before it can use the two-point formula.
    pub has_history: bool,
}

impl<V: Vec> Particle<V> {
    /// Create a free particle at rest.
    pub fn new(pos: V, mass: V::Scalar) -> Result<Self> {
        if !mass.is_positive_finite() {
            return Err(ClothError::InvalidMass);
        }
        Ok(Particle {
            pos,
            prev_pos: pos,
            velocity: V::zero(),
            acceleration: V::zero(),
            force: V::zero(),
            mass,
            inv_mass: V::Scalar::one() / mass,
            pinned: false,
            has_history: false,
        })
    }

    /// Create a particle that never integrates.
    pub fn pinned(pos: V, mass: V::Scalar) -> Result<Self> {
        let mut p = Self::new(pos, mass)?;
        p.pinned = true;
        Ok(p)
    }

    /// Overwrite the accumulated force.
    pub fn reset_force(&mut self, force: V) {
        self.force = force;
    }

    /// Accumulate a force contribution.
    pub fn add_force(&mut self, force: V) {
        self.force = self.force + force;
    }

    /// Advance by `dt` with the given scheme. No-op when pinned.
    pub fn integrate(&mut self, dt: V::Scalar, integrator: Integrator) {
        if self.pinned {
            return;
        }
        integrator.step(self, dt);
        self.has_history = true;
    }

    /// Bring the particle to rest where it stands.
    ///
    /// Clears the history too, so a following Verlet step restarts from zero
    /// velocity instead of replaying the last displacement.
    pub fn settle(&mut self) {
        self.velocity = V::zero();
        self.acceleration = V::zero();
        self.prev_pos = self.pos;
        self.has_history = false;
    }

    pub fn pin(&mut self) {
        self.settle();
        self.pinned = true;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }

    pub fn kinetic_energy(&self) -> V::Scalar {
        V::Scalar::half() * self.mass * self.velocity.length_sq()
    }

    /// Momentum `m v`.
    pub fn momentum(&self) -> V {
        self.velocity.scale(self.mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn rejects_non_positive_mass() {
        let origin = Vec3::<f32>::zero();
        assert_eq!(Particle::new(origin, 0.0).unwrap_err(), ClothError::InvalidMass);
        assert_eq!(Particle::new(origin, -1.0).unwrap_err(), ClothError::InvalidMass);
        assert_eq!(Particle::new(origin, f32::NAN).unwrap_err(), ClothError::InvalidMass);
    }

    #[test]
    fn fresh_particle_has_no_history() {
        let p = Particle::new(Vec3::new(1.0f32, 2.0, 3.0), 0.5).unwrap();
        assert_eq!(p.pos, p.prev_pos);
        assert!(!p.has_history);
        assert_eq!(p.inv_mass, 2.0);
    }

    #[test]
    fn reset_overwrites_and_add_accumulates() {
        let mut p = Particle::new(Vec3::<f32>::zero(), 1.0).unwrap();
        p.add_force(Vec3::new(5.0, 0.0, 0.0));
        p.reset_force(Vec3::new(0.0, -1.0, 0.0));
        p.add_force(Vec3::new(1.0, 0.0, 0.0));
        p.add_force(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(p.force, Vec3::new(2.0, -0.5, 0.0));
    }

    #[test]
    fn pinned_particle_ignores_integration() {
        let mut p = Particle::pinned(Vec3::new(5.0f32, 5.0, 0.0), 1.0).unwrap();
        p.reset_force(Vec3::new(1000.0, 1000.0, 0.0));
        for integrator in Integrator::ALL {
            p.integrate(1.0 / 60.0, integrator);
        }
        assert_eq!(p.pos, Vec3::new(5.0, 5.0, 0.0));
        assert_eq!(p.velocity, Vec3::zero());
        assert!(!p.has_history);
    }

    #[test]
    fn settle_clears_motion_and_history() {
        let mut p = Particle::new(Vec3::<f64>::zero(), 1.0).unwrap();
        p.reset_force(Vec3::new(0.0, -9.8, 0.0));
        p.integrate(0.01, Integrator::Verlet);
        assert!(p.has_history);
        p.settle();
        assert_eq!(p.velocity, Vec3::zero());
        assert_eq!(p.acceleration, Vec3::zero());
        assert_eq!(p.prev_pos, p.pos);
        assert!(!p.has_history);
    }

    #[test]
    fn kinetic_energy_half_m_v_squared() {
        let mut p = Particle::new(Vec3::<f64>::zero(), 2.0).unwrap();
        p.velocity = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(p.kinetic_energy(), 25.0);
        assert_eq!(p.momentum(), Vec3::new(6.0, 8.0, 0.0));
    }
}
