use crate::config::AnimationConfig;

/// Progress of a full animation cycle in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressTracker {
    unit: f32,
}

impl ProgressTracker {
    pub fn new(total_frames: usize) -> Self {
        Self {
            unit: 100.0 / total_frames as f32,
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.total_frames())
    }

    /// Percent covered by one tick
    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn advance(&self, current: f32) -> f32 {
        current + self.unit
    }

    pub fn reset(&self) -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_covers_full_cycle() {
        let tracker = ProgressTracker::from_config(&AnimationConfig::default());
        assert!((tracker.unit() * 175.0 - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_advance_accumulates() {
        let tracker = ProgressTracker::new(175);
        let total = (0..175).fold(tracker.reset(), |acc, _| tracker.advance(acc));
        assert!((total - 100.0).abs() < 1e-2);
    }
}
