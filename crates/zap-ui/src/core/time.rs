use crate::error::{Result, UiError};

/// Frame counter supplied to elements once per rendered frame.
/// Tween timing is driven by explicit frame counts; the clock only exposes
/// the frame index within the current second for periodic behaviour.
#[derive(Debug, Clone)]
pub struct FrameClock {
    target_frame_rate: u32,
    frame_count: u64,
    /// Seconds since the clock was created.
    elapsed: f32,
    /// Duration of the last frame in seconds.
    delta: f32,
}

impl FrameClock {
    pub fn new(target_frame_rate: u32) -> Result<Self> {
        if target_frame_rate == 0 {
            return Err(UiError::InvalidFrameRate(target_frame_rate));
        }
        Ok(Self {
            target_frame_rate,
            frame_count: 0,
            elapsed: 0.0,
            delta: 0.0,
        })
    }

    /// Record one rendered frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame_count += 1;
        self.delta = dt;
        self.elapsed += dt;
    }

    /// Frame index within the current target-rate window: `frame_count % target_frame_rate`.
    pub fn frames(&self) -> u32 {
        (self.frame_count % self.target_frame_rate as u64) as u32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn target_frame_rate(&self) -> u32 {
        self.target_frame_rate
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_wrap_at_target_rate() {
        let mut clock = FrameClock::new(60).unwrap();
        for _ in 0..59 {
            clock.advance(1.0 / 60.0);
        }
        assert_eq!(clock.frames(), 59);
        clock.advance(1.0 / 60.0);
        assert_eq!(clock.frames(), 0);
        assert_eq!(clock.frame_count(), 60);
    }

    #[test]
    fn accumulates_elapsed_time() {
        let mut clock = FrameClock::new(30).unwrap();
        clock.advance(0.25);
        clock.advance(0.5);
        assert!((clock.elapsed() - 0.75).abs() < 1e-6);
        assert!((clock.delta() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_is_rejected() {
        assert!(matches!(FrameClock::new(0), Err(UiError::InvalidFrameRate(0))));
    }
}
