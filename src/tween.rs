//! Linear interpolation over simulated time.
//!
//! A [`Tween`] is polled with the current clock instead of driving a
//! callback, so the owner decides when to read it and nothing runs after the
//! owner is despawned.

/// Linear interpolation from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f64,
    pub started_at: f64,
}

impl Tween {
    #[must_use]
    pub const fn new(from: f32, to: f32, duration: f64, started_at: f64) -> Self {
        Self {
            from,
            to,
            duration,
            started_at,
        }
    }

    /// Interpolated value at `now`, clamped to the end points.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Progress is clamped to 0..=1 before narrowing."
    )]
    pub fn value_at(&self, now: f64) -> f32 {
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
        };
        self.from + (self.to - self.from) * progress as f32
    }

    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.started_at + self.duration
    }

    #[must_use]
    pub fn ends_at(&self) -> f64 {
        self.started_at + self.duration
    }
}

/// Damage flash: opacity fades 1 → 0, then 0 → 1, each half linear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    fade_out: Tween,
    fade_in: Tween,
}

impl Blink {
    /// Starts a blink at `now` whose halves each last `half` seconds.
    #[must_use]
    pub fn start(now: f64, half: f64) -> Self {
        let fade_out = Tween::new(1.0, 0.0, half, now);
        let fade_in = Tween::new(0.0, 1.0, half, fade_out.ends_at());
        Self { fade_out, fade_in }
    }

    /// Opacity at `now`.
    #[must_use]
    pub fn opacity_at(&self, now: f64) -> f32 {
        if self.fade_out.is_finished(now) {
            self.fade_in.value_at(now)
        } else {
            self.fade_out.value_at(now)
        }
    }

    /// Whether both halves have completed.
    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        self.fade_in.is_finished(now)
    }
}
