//! Decides when scrolling has come close enough to the end of the list to
//! fetch the next page.

/// Fraction of loaded items that must be scrolled past before prefetching.
pub const DEFAULT_TRIGGER_FRACTION: f64 = 0.9;

/// Stateless prefetch policy. Cheap enough to consult on every visibility event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    fraction: f64,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_FRACTION)
    }
}

impl ScrollTrigger {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Index past which a visible item triggers a fetch.
    pub fn trigger_index(&self, current_count: usize) -> usize {
        (current_count as f64 * self.fraction).floor() as usize
    }

    pub fn should_load(&self, visible_index: usize, current_count: usize, loading: bool) -> bool {
        should_load_more(visible_index, current_count, loading, self.fraction)
    }
}

/// True iff `visible_index > floor(current_count * fraction)` and no load is in flight.
pub fn should_load_more(
    visible_index: usize,
    current_count: usize,
    loading: bool,
    fraction: f64,
) -> bool {
    let trigger = (current_count as f64 * fraction).floor() as usize;
    visible_index > trigger && !loading
}
