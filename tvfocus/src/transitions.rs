use std::time::Duration;

use crate::types::Axis;

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Ease-out over `millis`, the curve scroll transforms use.
    pub fn ease_out(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis), Easing::EaseOut)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Fire-and-forget request to visually move scroll content.
///
/// The logical scroll position is already committed when one of these is
/// issued; the surface animates `translate` toward the new value and nothing
/// waits for it. A newer request supersedes an older one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub axis: Axis,
    /// Offset the content was at when the request was issued.
    pub from: f32,
    /// Target translation of the content (negated scroll offset).
    pub translate: f32,
    pub config: TransitionConfig,
}

impl Transition {
    /// Translation at `elapsed` into the transition.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let start = -self.from;
        if self.config.duration.is_zero() {
            return self.translate;
        }
        let progress = elapsed.as_secs_f32() / self.config.duration.as_secs_f32();
        start + (self.translate - start) * self.config.easing.apply(progress)
    }

    /// CSS-style transform value, e.g. `translateY(-120px)`.
    pub fn css(&self) -> String {
        let function = match self.axis {
            Axis::X => "translateX",
            Axis::Y => "translateY",
        };
        format!("{function}({}px)", self.translate)
    }
}
