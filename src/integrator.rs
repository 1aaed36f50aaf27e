//! Time-stepping rules for a single particle.
//!
//! Three schemes with different stability trade-offs:
//!
//! - [`Integrator::Euler`]: explicit Euler. Position advances with the
//!   pre-step velocity. Gains energy on any undamped oscillator; only usable
//!   with very small steps.
//! - [`Integrator::SymplecticEuler`]: velocity first, then position with the
//!   new velocity. Energy error stays bounded for spring networks.
//! - [`Integrator::Verlet`]: Störmer–Verlet on `(pos, prev_pos)`. Falls back
//!   to symplectic Euler on a particle's first step, when no history exists.

use core::fmt;
use core::str::FromStr;

use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec;

/// Selectable integration scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Integrator {
    #[cfg_attr(feature = "serde", serde(rename = "euler"))]
    Euler,
    #[cfg_attr(feature = "serde", serde(rename = "symplectic"))]
    SymplecticEuler,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "verlet"))]
    Verlet,
}

impl Integrator {
    /// All schemes, in declaration order.
    pub const ALL: [Integrator; 3] = [
        Integrator::Euler,
        Integrator::SymplecticEuler,
        Integrator::Verlet,
    ];

    /// Stable identifier accepted by [`FromStr`].
    pub fn id(self) -> &'static str {
        match self {
            Integrator::Euler => "euler",
            Integrator::SymplecticEuler => "symplectic",
            Integrator::Verlet => "verlet",
        }
    }

    /// Advance `particle` by `dt` using its accumulated force.
    ///
    /// Does not check `pinned`; [`Particle::integrate`] does.
    pub fn step<V: Vec>(self, particle: &mut Particle<V>, dt: V::Scalar) {
        match self {
            Integrator::Euler => euler(particle, dt),
            Integrator::SymplecticEuler => symplectic_euler(particle, dt),
            Integrator::Verlet => verlet(particle, dt),
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Integrator {
    type Err = ClothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euler" => Ok(Integrator::Euler),
            "symplectic" => Ok(Integrator::SymplecticEuler),
            "verlet" => Ok(Integrator::Verlet),
            other => Err(ClothError::unknown_integrator(other)),
        }
    }
}

fn euler<V: Vec>(p: &mut Particle<V>, dt: V::Scalar) {
    let accel = p.force.scale(p.inv_mass);
    p.acceleration = accel;
    p.prev_pos = p.pos;
    p.pos = p.pos + p.velocity.scale(dt);
    p.velocity = p.velocity + accel.scale(dt);
}

fn symplectic_euler<V: Vec>(p: &mut Particle<V>, dt: V::Scalar) {
    let accel = p.force.scale(p.inv_mass);
    p.acceleration = accel;
    p.prev_pos = p.pos;
    p.velocity = p.velocity + accel.scale(dt);
    p.pos = p.pos + p.velocity.scale(dt);
}

fn verlet<V: Vec>(p: &mut Particle<V>, dt: V::Scalar) {
    if !p.has_history {
        symplectic_euler(p, dt);
        return;
    }
    let accel = p.force.scale(p.inv_mass);
    let new_pos = p.pos.scale(V::Scalar::two()) - p.prev_pos + accel.scale(dt * dt);
    p.acceleration = accel;
    // Backward difference keeps spring damping and renderers fed.
    p.velocity = (new_pos - p.pos).scale(V::Scalar::one() / dt);
    p.prev_pos = p.pos;
    p.pos = new_pos;
}
