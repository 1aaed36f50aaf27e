//! Damped linear springs between particles of an arena.

use crate::error::{ClothError, Result};
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec;

/// A damped spring connecting particles `a` and `b` by index.
///
/// The rest length is fixed at construction; stretch is always measured
/// against it.
#[derive(Clone, Debug)]
pub struct Spring<V: Vec> {
    pub a: usize,
    pub b: usize,
    pub stiffness: V::Scalar,
    pub damping: V::Scalar,
    pub rest_length: V::Scalar,
}

impl<V: Vec> Spring<V> {
    /// Spring between distinct particles `a` and `b`.
    ///
    /// Indices are checked against an arena only by
    /// [`from_particles`](Self::from_particles); `force` and `apply` panic if
    /// either index is past the end of the slice they are given.
    pub fn new(
        a: usize,
        b: usize,
        stiffness: V::Scalar,
        damping: V::Scalar,
        rest_length: V::Scalar,
    ) -> Result<Self> {
        if a == b {
            return Err(ClothError::SelfSpring { index: a });
        }
        if !stiffness.is_positive_finite() {
            return Err(ClothError::InvalidStiffness);
        }
        if !damping.is_finite() || damping < V::Scalar::zero() {
            return Err(ClothError::InvalidDamping);
        }
        if !rest_length.is_positive_finite() {
            return Err(ClothError::InvalidRestLength);
        }
        Ok(Spring { a, b, stiffness, damping, rest_length })
    }

    /// Spring whose rest length is the current distance between its endpoints.
    pub fn from_particles(
        a: usize,
        b: usize,
        particles: &[Particle<V>],
        stiffness: V::Scalar,
        damping: V::Scalar,
    ) -> Result<Self> {
        let count = particles.len();
        let (pa, pb) = match (particles.get(a), particles.get(b)) {
            (Some(pa), Some(pb)) => (pa, pb),
            (None, _) => return Err(ClothError::ParticleOutOfBounds { index: a, count }),
            (_, None) => return Err(ClothError::ParticleOutOfBounds { index: b, count }),
        };
        let rest_length = pa.pos.distance(pb.pos);
        Self::new(a, b, stiffness, damping, rest_length)
    }

    /// Force on endpoint `a`; endpoint `b` receives the negation.
    ///
    /// Coincident endpoints give a zero direction and therefore zero force.
    pub fn force(&self, particles: &[Particle<V>]) -> V {
        let pa = &particles[self.a];
        let pb = &particles[self.b];
        let d = pb.pos - pa.pos;
        let dir = d.normalize();
        let elastic = dir.scale(self.stiffness * (d.length() - self.rest_length));
        let damping = dir.scale(self.damping * (pb.velocity - pa.velocity).dot(dir));
        elastic + damping
    }

    /// Add this spring's force pair to both endpoints.
    pub fn apply(&self, particles: &mut [Particle<V>]) {
        let f = self.force(particles);
        particles[self.a].add_force(f);
        particles[self.b].add_force(-f);
    }

    /// Current stretch beyond rest length (negative when compressed).
    pub fn extension(&self, particles: &[Particle<V>]) -> V::Scalar {
        particles[self.a].pos.distance(particles[self.b].pos) - self.rest_length
    }

    /// Elastic energy `½ ks x²`.
    pub fn potential_energy(&self, particles: &[Particle<V>]) -> V::Scalar {
        let x = self.extension(particles);
        V::Scalar::half() * self.stiffness * x * x
    }

    /// True if this spring joins `i` and `j` in either order.
    pub fn connects(&self, i: usize, j: usize) -> bool {
        (self.a == i && self.b == j) || (self.a == j && self.b == i)
    }
}
