use pennant::{
    ClothConfig, ClothSystem, FixedStepper, NoOpStepObserver, WindConfig,
};
use wasm_bindgen::prelude::*;

// ---- Flag Demo ----

#[wasm_bindgen]
pub struct FlagDemo {
    flag: ClothSystem<f32>,
    stepper: FixedStepper<f32>,
}

#[wasm_bindgen]
impl FlagDemo {
    /// `method` is one of `euler`, `symplectic`, `verlet`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, spacing: f32, method: &str) -> Result<FlagDemo, JsError> {
        let config = ClothConfig::new()
            .with_segments(width, height)
            .with_spacing(spacing)
            .with_method(method)?
            .with_wind(WindConfig::new());
        Ok(FlagDemo {
            flag: ClothSystem::new(config)?,
            stepper: FixedStepper::new(0.001)?,
        })
    }

    /// Advance by a wall-clock frame delta in seconds; returns sub-steps run.
    pub fn update(&mut self, frame_dt: f32) -> Result<usize, JsError> {
        Ok(self.stepper.advance(&mut self.flag, frame_dt, &mut NoOpStepObserver)?)
    }

    pub fn toggle_wind(&mut self) -> bool {
        self.flag.toggle_wind()
    }

    pub fn set_wind_direction(&mut self, yaw: f32) -> Result<(), JsError> {
        Ok(self.flag.set_wind_direction(yaw)?)
    }

    pub fn set_method(&mut self, method: &str) -> Result<(), JsError> {
        Ok(self.flag.set_method(method)?)
    }

    pub fn method(&self) -> String {
        self.flag.integrator().to_string()
    }

    pub fn reset(&mut self) -> Result<(), JsError> {
        self.stepper.clear();
        Ok(self.flag.reset()?)
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] in grid index order
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.flag.particle_count() * 3);
        for p in self.flag.particles() {
            out.extend_from_slice(&[p.pos.x, p.pos.y, p.pos.z]);
        }
        out
    }

    /// Returns flat [ax, ay, az, bx, by, bz, ...], one pair per spring
    pub fn segments(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.flag.spring_count() * 6);
        for s in self.flag.spring_segments() {
            out.extend_from_slice(&[s.start.x, s.start.y, s.start.z, s.end.x, s.end.y, s.end.z]);
        }
        out
    }

    pub fn particle_count(&self) -> usize {
        self.flag.particle_count()
    }

    pub fn spring_count(&self) -> usize {
        self.flag.spring_count()
    }
}

