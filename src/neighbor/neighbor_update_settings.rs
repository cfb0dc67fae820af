/// Settings for computing and updating a neighbor list
#[derive(Clone, Debug)]
pub struct UpdateSettings {
    /// Only consider rebuilding on steps that are a multiple of `every`
    pub every: u64,
    /// Minimum number of steps between rebuilds
    pub delay: u64,
    /// Rebuild only when a particle moved more than half the skin distance
    pub check: bool,
    last_update_step: u64,
}

impl UpdateSettings {
    pub fn new(every: u64, delay: u64, check: bool) -> Self {
        assert!(every > 0, "Neighbor list update period should be positive");
        Self {
            every,
            delay,
            check,
            last_update_step: 0,
        }
    }
    pub fn should_update_neighbors(&self, step: u64, moved_too_far: impl FnOnce() -> bool) -> bool {
        (step % self.every == 0)
            && (step.saturating_sub(self.last_update_step) >= self.delay)
            && (!self.check || moved_too_far())
    }
    pub fn last_update_step(&self) -> u64 {
        self.last_update_step
    }
    pub(crate) fn set_last_update_step(&mut self, step: u64) {
        self.last_update_step = step;
    }
}
impl Default for UpdateSettings {
    fn default() -> Self {
        Self::new(1, 0, true)
    }
}
