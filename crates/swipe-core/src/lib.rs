//! # Core primitives
//!
//! The small toolkit layer the swipeable row is built on. Nothing here knows
//! about swiping:
//!
//! - `geometry`: `Vec2`, `Size`, `Rect` (including pixel-integral rounding).
//! - `color`: 8-bit RGBA `Color`.
//! - `animation`: `Easing`, `AnimationSpec`, `AnimatedValue` and the
//!   `Clock` trait that drives them.
//! - `input`: pointer events as delivered by the platform.
//! - `scene`: a flat list of draw nodes a renderer consumes.
//! - `timer`: `OneShot`, a cancellable deferred task.
//!
//! ## Time
//!
//! Animations never read the wall clock themselves. Callers pass `now` in,
//! usually from a `Clock` owned by the widget:
//!
//! ```rust
//! use swipe_core::*;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut x = AnimatedValue::new(
//!     0.0f32,
//!     AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
//! );
//! x.animate_to(10.0, clock.now());
//! clock.advance(Duration::from_millis(50));
//! assert!(x.update(clock.now()));
//! assert!((*x.get() - 5.0).abs() < 0.01);
//! ```

pub mod animation;
pub mod color;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod timer;

pub use animation::*;
pub use color::*;
pub use geometry::*;
pub use input::*;
pub use scene::*;
pub use timer::*;
