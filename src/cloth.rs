//! Mass-spring cloth (a flag) on a rectangular particle grid.

use alloc::vec::Vec as AllocVec;

use tracing::{debug, info};

use crate::config::ClothConfig;
use crate::error::{ClothError, Result};
use crate::float::Float;
use crate::integrator::Integrator;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::Spring;
use crate::vec::{Vec, Vec3};
use crate::wind::WindConfig;

/// A cloth of `(width + 1) × (height + 1)` particles joined by structural springs.
///
/// Particle `(u, v)` has index `u + v * (width + 1)` and starts at
/// `(u * spacing, v * spacing, 0)`. Every grid-orthogonal neighbour pair is
/// joined by exactly one spring; there are no shear or bend springs.
/// One edge column is pinned as the mounting line.
pub struct ClothSystem<F: Float> {
    config: ClothConfig<F>,
    particles: AllocVec<Particle<Vec3<F>>>,
    springs: AllocVec<Spring<Vec3<F>>>,
    elapsed: F,
}

/// Endpoint positions of one spring, for drawing a connector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringSegment<F: Float> {
    pub start: Vec3<F>,
    pub end: Vec3<F>,
}

impl<F: Float> SpringSegment<F> {
    pub fn midpoint(&self) -> Vec3<F> {
        self.start.lerp(self.end, F::half())
    }

    pub fn length(&self) -> F {
        self.start.distance(self.end)
    }

    /// Unit vector from `start` to `end`, zero when degenerate.
    pub fn direction(&self) -> Vec3<F> {
        (self.end - self.start).normalize()
    }
}

impl<F: Float> ClothSystem<F> {
    /// Validate `config` and build the grid.
    pub fn new(config: ClothConfig<F>) -> Result<Self> {
        config.validate()?;
        let (particles, springs) = build_grid(&config)?;
        debug!(
            particles = particles.len(),
            springs = springs.len(),
            integrator = config.integrator.id(),
            "built cloth"
        );
        Ok(ClothSystem { config, particles, springs, elapsed: F::zero() })
    }

    /// Replace the grid with one of new dimensions and spacing.
    ///
    /// All other settings are kept. On error the current state is untouched.
    pub fn build(&mut self, width: usize, height: usize, spacing: F) -> Result<()> {
        let config = self.config.clone().with_segments(width, height).with_spacing(spacing);
        config.validate()?;
        self.config = config;
        self.rebuild()
    }

    /// Discard all particles and springs and rebuild from the current settings.
    pub fn rebuild(&mut self) -> Result<()> {
        let (particles, springs) = build_grid(&self.config)?;
        self.particles = particles;
        self.springs = springs;
        self.elapsed = F::zero();
        debug!(
            width = self.config.width,
            height = self.config.height,
            springs = self.springs.len(),
            "rebuilt cloth"
        );
        Ok(())
    }

    /// Return the flag to its initial flat state.
    pub fn reset(&mut self) -> Result<()> {
        self.rebuild()
    }

    /// Advance the simulation by one fixed step `dt`.
    ///
    /// Phases run in a fixed order: every force is reset to gravity (scaled by
    /// mass) plus wind (not scaled), then every spring adds its pair, then
    /// every unpinned particle integrates. Callers should subdivide frame
    /// time into small fixed steps, see [`FixedStepper`](crate::FixedStepper).
    pub fn step<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> Result<()> {
        if !dt.is_positive_finite() {
            return Err(ClothError::InvalidTimeStep);
        }

        let gravity = self.config.gravity;
        let wind = self.config.wind.force_at(self.elapsed);
        for p in self.particles.iter_mut() {
            p.reset_force(gravity.scale(p.mass) + wind);
        }
        observer.on_forces_reset();

        for s in self.springs.iter() {
            s.apply(&mut self.particles);
        }
        observer.on_springs_applied();

        let integrator = self.config.integrator;
        for p in self.particles.iter_mut() {
            p.integrate(dt, integrator);
        }
        observer.on_integrate();

        self.elapsed = self.elapsed + dt;
        observer.on_step_complete();
        Ok(())
    }

    /// Set the wind heading as a rotation about +Y, in radians.
    pub fn set_wind_direction(&mut self, yaw: F) -> Result<()> {
        if !yaw.is_finite() {
            return Err(ClothError::InvalidEnvironment);
        }
        self.config.wind.yaw = yaw;
        Ok(())
    }

    /// Replace all wind parameters.
    pub fn set_wind(&mut self, wind: WindConfig<F>) -> Result<()> {
        wind.validate()?;
        self.config.wind = wind;
        Ok(())
    }

    /// Flip the wind on or off and return the new state.
    ///
    /// Turning the wind off brings every particle to rest so the flag
    /// settles under gravity alone.
    pub fn toggle_wind(&mut self) -> bool {
        self.config.wind.enabled = !self.config.wind.enabled;
        if !self.config.wind.enabled {
            for p in self.particles.iter_mut() {
                p.settle();
            }
        }
        info!(enabled = self.config.wind.enabled, "wind toggled");
        self.config.wind.enabled
    }

    /// Select the integrator by identifier (`euler`, `symplectic`, `verlet`).
    pub fn set_method(&mut self, id: &str) -> Result<()> {
        let integrator = id.parse()?;
        self.set_integrator(integrator);
        Ok(())
    }

    pub fn set_integrator(&mut self, integrator: Integrator) {
        if integrator != self.config.integrator {
            info!(from = self.config.integrator.id(), to = integrator.id(), "integrator changed");
        }
        self.config.integrator = integrator;
    }

    pub fn set_gravity(&mut self, gravity: Vec3<F>) -> Result<()> {
        if !gravity.is_finite() {
            return Err(ClothError::InvalidEnvironment);
        }
        self.config.gravity = gravity;
        Ok(())
    }

    pub fn pin(&mut self, u: usize, v: usize) -> Result<()> {
        let idx = self.checked_index(u, v)?;
        self.particles[idx].pin();
        Ok(())
    }

    pub fn unpin(&mut self, u: usize, v: usize) -> Result<()> {
        let idx = self.checked_index(u, v)?;
        self.particles[idx].unpin();
        Ok(())
    }

    /// Flat index of grid coordinate `(u, v)`. Not bounds-checked.
    pub fn index(&self, u: usize, v: usize) -> usize {
        u + v * (self.config.width + 1)
    }

    fn checked_index(&self, u: usize, v: usize) -> Result<usize> {
        if u > self.config.width || v > self.config.height {
            return Err(ClothError::GridOutOfBounds { u, v });
        }
        Ok(self.index(u, v))
    }

    pub fn particle_at(&self, u: usize, v: usize) -> Result<&Particle<Vec3<F>>> {
        let idx = self.checked_index(u, v)?;
        Ok(&self.particles[idx])
    }

    pub fn position_at(&self, u: usize, v: usize) -> Result<Vec3<F>> {
        self.particle_at(u, v).map(|p| p.pos)
    }

    pub fn particles(&self) -> &[Particle<Vec3<F>>] {
        &self.particles
    }

    pub fn springs(&self) -> &[Spring<Vec3<F>>] {
        &self.springs
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// `(a, b)` particle indices of every spring, in construction order.
    pub fn spring_endpoints(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.springs.iter().map(|s| (s.a, s.b))
    }

    pub fn spring_segments(&self) -> impl Iterator<Item = SpringSegment<F>> + '_ {
        self.springs.iter().map(move |s| SpringSegment {
            start: self.particles[s.a].pos,
            end: self.particles[s.b].pos,
        })
    }

    pub fn kinetic_energy(&self) -> F {
        self.particles
            .iter()
            .fold(F::zero(), |acc, p| acc + p.kinetic_energy())
    }

    pub fn spring_potential_energy(&self) -> F {
        self.springs
            .iter()
            .fold(F::zero(), |acc, s| acc + s.potential_energy(&self.particles))
    }

    /// Gravitational potential `-m g·p`, zero at the origin.
    pub fn gravitational_potential_energy(&self) -> F {
        let g = self.config.gravity;
        self.particles
            .iter()
            .fold(F::zero(), |acc, p| acc - p.mass * g.dot(p.pos))
    }

    /// Kinetic plus spring plus gravitational energy. Wind work is not tracked.
    pub fn total_energy(&self) -> F {
        self.kinetic_energy() + self.spring_potential_energy() + self.gravitational_potential_energy()
    }

    /// Fastest particle speed.
    pub fn max_speed(&self) -> F {
        self.particles
            .iter()
            .fold(F::zero(), |acc, p| acc.max(p.velocity.length()))
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn integrator(&self) -> Integrator { self.config.integrator }
    pub fn wind(&self) -> &WindConfig<F> { &self.config.wind }
    pub fn gravity(&self) -> Vec3<F> { self.config.gravity }
    pub fn elapsed(&self) -> F { self.elapsed }
    pub fn width(&self) -> usize { self.config.width }
    pub fn height(&self) -> usize { self.config.height }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
}

type Grid<F> = (AllocVec<Particle<Vec3<F>>>, AllocVec<Spring<Vec3<F>>>);

fn build_grid<F: Float>(config: &ClothConfig<F>) -> Result<Grid<F>> {
    let (w, h) = (config.width, config.height);
    let index = |u: usize, v: usize| u + v * (w + 1);
    let pinned_column = config.pinned_edge.column(w);

    let mut particles = AllocVec::with_capacity(config.particle_count());
    for v in 0..=h {
        for u in 0..=w {
            let pos = Vec3::new(
                F::from_usize(u) * config.spacing,
                F::from_usize(v) * config.spacing,
                F::zero(),
            );
            let mut p = Particle::new(pos, config.particle_mass)?;
            p.pinned = u == pinned_column;
            particles.push(p);
        }
    }

    let mut springs = AllocVec::with_capacity(config.spring_count());
    let mut connect = |a: usize, b: usize| -> Result<()> {
        springs.push(Spring::new(a, b, config.stiffness, config.damping, config.spacing)?);
        Ok(())
    };

    // Each cell contributes its lower-left vertical and horizontal edge
    for v in 0..h {
        for u in 0..w {
            connect(index(u, v), index(u, v + 1))?;
            connect(index(u, v), index(u + 1, v))?;
        }
    }
    // Closing column u == w
    for v in 0..h {
        connect(index(w, v), index(w, v + 1))?;
    }
    // Closing row v == h
    for u in 0..w {
        connect(index(u, h), index(u + 1, h))?;
    }

    Ok((particles, springs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PinnedEdge;
    use crate::observer::NoOpStepObserver;
    use alloc::vec;

    fn test_config() -> ClothConfig<f64> {
        ClothConfig::new()
            .with_segments(3, 2)
            .with_spacing(1.0)
            .with_wind(WindConfig::disabled())
    }

    #[test]
    fn correct_particle_count() {
        let cloth = ClothSystem::new(test_config()).unwrap();
        assert_eq!(cloth.particle_count(), 12);
    }

    #[test]
    fn spring_count_matches_grid_formula() {
        let cloth = ClothSystem::new(test_config()).unwrap();
        // 2*3*2 + 3 + 2
        assert_eq!(cloth.spring_count(), 17);
    }

    #[test]
    fn particles_laid_out_by_index() {
        let cloth = ClothSystem::new(test_config()).unwrap();
        assert_eq!(cloth.index(2, 1), 6);
        assert_eq!(cloth.position_at(2, 1).unwrap(), Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(cloth.particles()[6].pos, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn first_springs_follow_cell_order() {
        let cloth = ClothSystem::new(test_config()).unwrap();
        let pairs: AllocVec<_> = cloth.spring_endpoints().take(4).collect();
        assert_eq!(pairs, vec![(0, 4), (0, 1), (1, 5), (1, 2)]);
    }

    #[test]
    fn start_edge_pinned_by_default() {
        let cloth = ClothSystem::new(test_config()).unwrap();
        for v in 0..=2 {
            for u in 0..=3 {
                assert_eq!(cloth.particle_at(u, v).unwrap().pinned, u == 0);
            }
        }
    }

    #[test]
    fn end_edge_pinned_when_configured() {
        let cloth = ClothSystem::new(test_config().with_pinned_edge(PinnedEdge::End)).unwrap();
        assert!(cloth.particle_at(3, 1).unwrap().pinned);
        assert!(!cloth.particle_at(0, 1).unwrap().pinned);
    }

    #[test]
    fn out_of_bounds_coordinate_rejected() {
        let cloth = ClothSystem::new(test_config()).unwrap();
        assert_eq!(cloth.position_at(4, 0).unwrap_err(), ClothError::GridOutOfBounds { u: 4, v: 0 });
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let err = ClothSystem::new(test_config().with_particle_mass(0.0)).err();
        assert_eq!(err, Some(ClothError::InvalidMass));
    }

    #[test]
    fn step_rejects_bad_dt_without_mutation() {
        let mut cloth = ClothSystem::new(test_config()).unwrap();
        let before = cloth.positions();
        assert_eq!(cloth.step(0.0, &mut NoOpStepObserver), Err(ClothError::InvalidTimeStep));
        assert_eq!(cloth.step(f64::NAN, &mut NoOpStepObserver), Err(ClothError::InvalidTimeStep));
        assert_eq!(cloth.positions(), before);
        assert_eq!(cloth.elapsed(), 0.0);
    }

    #[test]
    fn step_advances_elapsed_time() {
        let mut cloth = ClothSystem::new(test_config()).unwrap();
        for _ in 0..4 {
            cloth.step(0.25, &mut NoOpStepObserver).unwrap();
        }
        assert!((cloth.elapsed() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn build_replaces_dimensions() {
        let mut cloth = ClothSystem::new(test_config()).unwrap();
        cloth.build(1, 1, 0.5).unwrap();
        assert_eq!(cloth.particle_count(), 4);
        assert_eq!(cloth.spring_count(), 4);
        assert_eq!(cloth.position_at(1, 1).unwrap(), Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn failed_build_keeps_previous_grid() {
        let mut cloth = ClothSystem::new(test_config()).unwrap();
        assert!(cloth.build(0, 3, 1.0).is_err());
        assert_eq!(cloth.particle_count(), 12);
        assert_eq!(cloth.width(), 3);
    }

    #[test]
    fn set_method_rejects_unknown_and_keeps_current() {
        let mut cloth = ClothSystem::new(test_config()).unwrap();
        cloth.set_method("euler").unwrap();
        assert_eq!(cloth.integrator(), Integrator::Euler);
        assert!(cloth.set_method("leapfrog").is_err());
        assert_eq!(cloth.integrator(), Integrator::Euler);
    }

    #[test]
    fn non_finite_wind_direction_rejected() {
        let mut cloth = ClothSystem::new(test_config().with_wind(WindConfig::new())).unwrap();
        let before = cloth.wind().yaw;
        assert_eq!(cloth.set_wind_direction(f64::NAN), Err(ClothError::InvalidEnvironment));
        assert_eq!(cloth.set_wind_direction(f64::INFINITY), Err(ClothError::InvalidEnvironment));
        assert_eq!(cloth.wind().yaw, before);

        for _ in 0..10 {
            cloth.step(0.001, &mut NoOpStepObserver).unwrap();
        }
        assert!(cloth.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn segment_geometry() {
        let seg = SpringSegment {
            start: Vec3::new(0.0f64, 0.0, 0.0),
            end: Vec3::new(0.0, 2.0, 0.0),
        };
        assert_eq!(seg.midpoint(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(seg.length(), 2.0);
        assert_eq!(seg.direction(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn flat_grid_starts_with_zero_spring_energy() {
        let cloth = ClothSystem::new(test_config()).unwrap();
        assert_eq!(cloth.spring_potential_energy(), 0.0);
        assert_eq!(cloth.kinetic_energy(), 0.0);
    }
}
