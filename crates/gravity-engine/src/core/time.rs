/// Fixed-step tick accumulator.
/// Converts variable frame times into a whole number of simulation ticks.
pub struct FixedTimestep {
    /// Seconds per tick.
    dt: f32,
    /// Most ticks a single frame may run.
    max_steps: u32,
    /// Leftover frame time not yet turned into ticks.
    accumulator: f32,
}

impl FixedTimestep {
    /// Nominal tick length: the host asks for a tick roughly every millisecond.
    pub const DEFAULT_DT: f32 = 0.001;
    pub const DEFAULT_MAX_STEPS: u32 = 32;

    pub fn new(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns the number of ticks to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if self.dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);
        let steps = ((self.accumulator / self.dt) as u32).min(self.max_steps);
        if steps == self.max_steps {
            // Capped: drop the backlog so a slow frame cannot snowball.
            self.accumulator = 0.0;
        } else {
            self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        }
        steps
    }

    /// Drop any partial tick.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DT, Self::DEFAULT_MAX_STEPS)
    }
}
