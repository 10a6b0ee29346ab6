use std::time::Duration;

/// Easing curve applied to each keyframe segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

/// An explicit keyframe sequence played over a fixed duration, repeated for a
/// fixed number of loops. Sampling is pure: the caller owns the clock and
/// asks for the value at an elapsed time.
#[derive(Debug, Clone)]
pub struct Keyframes {
    values: Vec<f64>,
    duration: Duration,
    ease: Ease,
    loops: u32,
}

impl Keyframes {
    pub fn new(values: Vec<f64>, duration: Duration, ease: Ease, loops: u32) -> Self {
        Self {
            values,
            duration,
            ease,
            loops,
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.duration * self.loops
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total_duration()
    }

    /// Value at `elapsed`. Once the track has played out, the final keyframe
    /// is returned forever.
    pub fn sample(&self, elapsed: Duration) -> f64 {
        let Some(last) = self.values.last() else {
            return 0.0;
        };

        if self.values.len() == 1 || self.duration.is_zero() || self.is_finished(elapsed) {
            return *last;
        }

        let cycle = elapsed.as_secs_f64() % self.duration.as_secs_f64();
        let t = cycle / self.duration.as_secs_f64();

        let segments = self.values.len() - 1;
        let scaled = t * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f64;

        let from = self.values[index];
        let to = self.values[index + 1];
        (to - from).mul_add(self.ease.apply(local), from)
    }
}

#[cfg(test)]
mod tests {
    use super::{Ease, Keyframes};
    use std::time::Duration;

    fn pulse() -> Keyframes {
        Keyframes::new(
            vec![1.0, 1.03, 1.0],
            Duration::from_millis(600),
            Ease::InOutQuad,
            2,
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn sample_starts_at_the_first_keyframe() {
        assert_close(pulse().sample(Duration::ZERO), 1.0);
    }

    #[test]
    fn sample_peaks_mid_cycle() {
        // Half way through the cycle sits exactly on the middle keyframe.
        assert_close(pulse().sample(Duration::from_millis(300)), 1.03);
    }

    #[test]
    fn segment_midpoint_respects_easing() {
        // A quarter of the cycle is the midpoint of the first segment;
        // InOutQuad(0.5) == 0.5 regardless of curve shape.
        assert_close(pulse().sample(Duration::from_millis(150)), 1.015);
    }

    #[test]
    fn loops_repeat_the_cycle() {
        let track = pulse();
        assert_close(
            track.sample(Duration::from_millis(150)),
            track.sample(Duration::from_millis(750)),
        );
    }

    #[test]
    fn track_finishes_after_all_loops() {
        let track = pulse();
        assert!(!track.is_finished(Duration::from_millis(1199)));
        assert!(track.is_finished(Duration::from_millis(1200)));
        assert_close(track.sample(Duration::from_millis(1200)), 1.0);
        assert_close(track.sample(Duration::from_secs(60)), 1.0);
    }

    #[test]
    fn linear_ease_is_identity() {
        let track = Keyframes::new(
            vec![0.0, 10.0],
            Duration::from_millis(1000),
            Ease::Linear,
            1,
        );
        assert_close(track.sample(Duration::from_millis(250)), 2.5);
        assert_close(track.sample(Duration::from_millis(900)), 9.0);
    }

    #[test]
    fn ease_curves_hit_both_endpoints() {
        for ease in [Ease::Linear, Ease::InQuad, Ease::OutQuad, Ease::InOutQuad] {
            assert_close(ease.apply(0.0), 0.0);
            assert_close(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn empty_track_is_inert() {
        let track = Keyframes::new(Vec::new(), Duration::from_millis(100), Ease::Linear, 1);
        assert_close(track.sample(Duration::from_millis(50)), 0.0);
    }
}
