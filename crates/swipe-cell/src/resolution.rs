//! Release animations: what a row does once the finger lifts.

use std::fmt;
use std::time::Duration;

use swipe_core::{AnimatedValue, AnimationSpec, Color, Easing, Rect, Size};
use web_time::Instant;

use crate::config::{BOUNCE_DAMPING, BOUNCE_INITIAL_VELOCITY, SwipeConfig};
use crate::gesture::{SwipeDirection, is_before_trigger, percentage};
use crate::presenter::{Overlay, icon_target_frame};
use crate::slots::{SwipeCompletion, SwipeMode, SwipeSlot};

/// Coarse lifecycle of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    /// Release animation running, or finished and waiting for cleanup.
    Resolving,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Spring back to rest.
    Bounce,
    /// Continue off the row's edge.
    Slide,
}

/// Picks the release animation, and whether the slot's callback fires.
///
/// No active slot bounces without a callback. A release short of the first
/// trigger also bounces without one. Past it, bounce-mode slots bounce and
/// fire, slide-mode slots slide and fire.
pub fn choose(percentage: f32, mode: Option<SwipeMode>, first: f32) -> (ResolutionKind, bool) {
    match mode {
        None => (ResolutionKind::Bounce, false),
        Some(_) if is_before_trigger(percentage, first) => (ResolutionKind::Bounce, false),
        Some(SwipeMode::Bounce) => (ResolutionKind::Bounce, true),
        Some(SwipeMode::Slide) => (ResolutionKind::Slide, true),
    }
}

/// A running release animation over the overlay's animatable properties.
pub struct Resolution {
    kind: ResolutionKind,
    content_x: AnimatedValue<f32>,
    icon_alpha: AnimatedValue<f32>,
    icon_frame: AnimatedValue<Rect>,
    indicator: AnimatedValue<Color>,
    completion: Option<(SwipeSlot, SwipeCompletion)>,
}

impl Resolution {
    /// Starts animating `overlay` from where the drag left it.
    ///
    /// `completion` is the callback to run once the animation settles; pass
    /// `None` when the release should not fire anything.
    pub fn start(
        kind: ResolutionKind,
        overlay: &Overlay,
        direction: SwipeDirection,
        config: &SwipeConfig,
        duration: Duration,
        completion: Option<(SwipeSlot, SwipeCompletion)>,
        now: Instant,
    ) -> Self {
        let spec = match kind {
            ResolutionKind::Bounce => {
                AnimationSpec::spring(BOUNCE_DAMPING, BOUNCE_INITIAL_VELOCITY, duration)
            }
            ResolutionKind::Slide => AnimationSpec::tween(duration, Easing::EaseOut),
        };

        let bounds = overlay.indicator.frame.size();
        let content_target = match kind {
            ResolutionKind::Bounce => 0.0,
            ResolutionKind::Slide => direction.sign() * bounds.width,
        };
        let icon_size = overlay.icon.icon.map(|i| i.size).unwrap_or(Size::ZERO);
        let icon_target = icon_target_frame(
            percentage(content_target, bounds.width),
            direction,
            config.should_animate_icons,
            config.triggers.first(),
            bounds,
            icon_size,
        )
        .unwrap_or(overlay.icon.frame);
        let indicator_target = match kind {
            ResolutionKind::Bounce => config.default_color,
            ResolutionKind::Slide => overlay.indicator.color,
        };

        let mut content_x = AnimatedValue::new(overlay.content_offset(), spec);
        let mut icon_alpha = AnimatedValue::new(overlay.icon.alpha, spec);
        let mut icon_frame = AnimatedValue::new(overlay.icon.frame, spec);
        let mut indicator = AnimatedValue::new(overlay.indicator.color, spec);
        content_x.animate_to(content_target, now);
        icon_alpha.animate_to(0.0, now);
        icon_frame.animate_to(icon_target, now);
        indicator.animate_to(indicator_target, now);

        Self {
            kind,
            content_x,
            icon_alpha,
            icon_frame,
            indicator,
            completion,
        }
    }

    pub fn kind(&self) -> ResolutionKind {
        self.kind
    }

    pub fn will_fire(&self) -> bool {
        self.completion.is_some()
    }

    pub fn content_target(&self) -> f32 {
        *self.content_x.target()
    }

    /// Advances to `now` and writes the values into `overlay`.
    /// Returns true while the animation is still running.
    pub fn step(&mut self, now: Instant, overlay: &mut Overlay) -> bool {
        // every value shares one spec, so they settle together
        let mut running = self.content_x.update(now);
        running |= self.icon_alpha.update(now);
        running |= self.icon_frame.update(now);
        running |= self.indicator.update(now);

        overlay.set_content_offset(*self.content_x.get());
        overlay.icon.alpha = self.icon_alpha.get().clamp(0.0, 1.0);
        overlay.icon.frame = *self.icon_frame.get();
        overlay.indicator.color = *self.indicator.get();
        running
    }

    /// Hands out the callback. Later calls return `None`.
    pub fn take_completion(&mut self) -> Option<(SwipeSlot, SwipeCompletion)> {
        self.completion.take()
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("kind", &self.kind)
            .field("content_x", self.content_x.get())
            .field("fires", &self.completion.as_ref().map(|(slot, _)| *slot))
            .finish()
    }
}
