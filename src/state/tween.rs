//! Fixed-duration tweens used for the settle animations of the zoom engine.

/// Duration of every settle animation, in milliseconds.
pub const SETTLE_DURATION_MS: f64 = 250.0;

/// Host capability for driving animations: a monotonic clock plus a way to
/// ask for another frame while a tween is still running.
pub trait Animator {
    fn now_ms(&self) -> f64;
    fn request_frame(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Symmetric ease, close to the platform's default timing curve.
    #[default]
    EaseInOutQuad,
}

impl Easing {
    /// Maps normalized time `t ∈ [0, 1]` to progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: SETTLE_DURATION_MS,
            easing: Easing::default(),
        }
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.easing.apply((now_ms - self.start_ms) / self.duration_ms)
    }

    pub fn value_at(&self, now_ms: f64) -> f64 {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * p
        }
    }

    pub fn finished(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for e in [Easing::Linear, Easing::EaseInOutQuad] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
            assert_eq!(e.apply(-2.0), 0.0);
            assert_eq!(e.apply(9.0), 1.0);
        }
        assert_eq!(Easing::EaseInOutQuad.apply(0.5), 0.5);
    }

    #[test]
    fn tween_lands_exactly_on_target() {
        let t = Tween::new(2.5, 1.0, 100.0);
        assert_eq!(t.value_at(100.0), 2.5);
        assert!(!t.finished(349.0));
        assert!(t.finished(350.0));
        assert_eq!(t.value_at(350.0), 1.0);
        assert_eq!(t.value_at(10_000.0), 1.0);
        let mid = t.value_at(225.0);
        assert!(mid < 2.5 && mid > 1.0);
    }

    #[test]
    fn zero_duration_is_immediate() {
        let mut t = Tween::new(0.0, 5.0, 0.0);
        t.duration_ms = 0.0;
        assert_eq!(t.value_at(0.0), 5.0);
    }
}
