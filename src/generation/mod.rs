/// Photo generation jobs
///
/// The booth treats generation as an asynchronous job it polls on a fixed
/// interval. `SimulatedGenerator` is the stand-in used today: it only
/// animates progress and hands the captured still back unchanged. A real
/// backend implements `Generator` and is swapped in at startup.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::data::{CapturedImage, StyleId};
use crate::state::session::PROGRESS_CAP;

/// Everything a job needs to start
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub style: StyleId,
    pub image: CapturedImage,
}

/// Result of polling a job
#[derive(Debug, Clone)]
pub enum GenerationStatus {
    /// No job running
    Idle,
    /// Still working; percent complete (0..=99)
    Running(u8),
    /// Done. `None` keeps the captured still as the result
    Finished(Option<CapturedImage>),
}

pub trait Generator {
    /// Begin a job, replacing any job in flight
    fn start(&mut self, request: GenerationRequest);

    /// Report progress; called once per progress interval
    fn poll(&mut self) -> GenerationStatus;

    /// Abandon the current job
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

/// Timer-driven placeholder: random steps up to 99%, then finished
pub struct SimulatedGenerator {
    rng: StdRng,
    step_min: u8,
    step_max: u8,
    progress: u8,
    active: bool,
}

impl SimulatedGenerator {
    pub fn new(step_min: u8, step_max: u8) -> Self {
        Self::with_rng(StdRng::from_os_rng(), step_min, step_max)
    }

    /// Deterministic generator for tests
    pub fn seeded(seed: u64, step_min: u8, step_max: u8) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), step_min, step_max)
    }

    fn with_rng(rng: StdRng, step_min: u8, step_max: u8) -> Self {
        let step_min = step_min.max(1);
        Self {
            rng,
            step_min,
            step_max: step_max.max(step_min),
            progress: 0,
            active: false,
        }
    }
}

impl Generator for SimulatedGenerator {
    fn start(&mut self, request: GenerationRequest) {
        log::info!(
            "🎨 Simulating '{}' generation for {}x{} still",
            request.style.0,
            request.image.width,
            request.image.height
        );
        self.progress = 0;
        self.active = true;
    }

    fn poll(&mut self) -> GenerationStatus {
        if !self.active {
            return GenerationStatus::Idle;
        }

        let step = self.rng.random_range(self.step_min..=self.step_max);
        self.progress = self.progress.saturating_add(step).min(PROGRESS_CAP);

        if self.progress >= PROGRESS_CAP {
            self.active = false;
            GenerationStatus::Finished(None)
        } else {
            GenerationStatus::Running(self.progress)
        }
    }

    fn cancel(&mut self) {
        if self.active {
            log::info!("🛑 Generation cancelled at {}%", self.progress);
        }
        self.active = false;
        self.progress = 0;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
