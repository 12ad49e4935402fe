//! Inline style of a document node: opacity and scale that animate over the
//! node's transition duration.
//!
//! Values are sampled against the orchestrator's virtual clock, so a
//! transition is just "from, to, start, duration" and never needs a frame
//! callback.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
}

impl Tween {
    fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// A numeric style property that can transition between values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    target: f32,
    tween: Option<Tween>,
}

impl AnimatedValue {
    /// A value that is not animating.
    pub const fn fixed(value: f32) -> Self {
        Self {
            target: value,
            tween: None,
        }
    }

    /// The value the property is heading towards.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Computed value at clock time `now`.
    pub fn value_at(&self, now: Duration) -> f32 {
        let Some(tween) = self.tween else {
            return self.target;
        };
        if now >= tween.end() {
            return tween.to;
        }
        if now <= tween.start {
            return tween.from;
        }
        let progress = (now - tween.start).as_secs_f32() / tween.duration.as_secs_f32();
        tween.from + (tween.to - tween.from) * ease_in_out(progress)
    }

    /// Whether a transition is still running at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.tween.is_some_and(|t| now < t.end())
    }

    fn set(&mut self, to: f32, now: Duration, transition: Option<Duration>) {
        let from = self.value_at(now);
        self.tween = match transition {
            Some(duration) if !duration.is_zero() && from != to => Some(Tween {
                from,
                to,
                start: now,
                duration,
            }),
            _ => None,
        };
        self.target = to;
    }

    fn commit(&mut self, now: Duration) {
        if self.tween.is_some_and(|t| now >= t.end()) {
            self.tween = None;
        }
    }
}

/// Smoothstep easing, the terminal stand-in for CSS `ease-in-out`.
fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Animated presentation state of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    opacity: AnimatedValue,
    scale: AnimatedValue,
    transition: Option<Duration>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            opacity: AnimatedValue::fixed(1.0),
            scale: AnimatedValue::fixed(1.0),
            transition: None,
        }
    }
}

impl ElementStyle {
    /// Duration applied to subsequent property changes (`None` = instant).
    pub fn set_transition(&mut self, transition: Option<Duration>) {
        self.transition = transition;
    }

    /// Current transition duration.
    pub fn transition(&self) -> Option<Duration> {
        self.transition
    }

    /// Move opacity towards `value` using the current transition.
    pub fn set_opacity(&mut self, value: f32, now: Duration) {
        self.opacity.set(value.clamp(0.0, 1.0), now, self.transition);
    }

    /// Move scale towards `value` using the current transition.
    pub fn set_scale(&mut self, value: f32, now: Duration) {
        self.scale.set(value.max(0.0), now, self.transition);
    }

    /// Opacity at clock time `now`.
    pub fn opacity_at(&self, now: Duration) -> f32 {
        self.opacity.value_at(now)
    }

    /// Scale at clock time `now`.
    pub fn scale_at(&self, now: Duration) -> f32 {
        self.scale.value_at(now)
    }

    /// Opacity the node is heading towards.
    pub fn target_opacity(&self) -> f32 {
        self.opacity.target()
    }

    /// Whether any property is mid-transition at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.opacity.is_animating(now) || self.scale.is_animating(now)
    }

    /// Settle finished transitions so later changes start from a committed
    /// value. This is the layout flush a fade-in forces before attaching its
    /// transition.
    pub fn flush(&mut self, now: Duration) {
        self.opacity.commit(now);
        self.scale.commit(now);
    }
}
