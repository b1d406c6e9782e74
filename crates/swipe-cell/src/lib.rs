//! # Swipeable list rows
//!
//! A `SwipeCell` is a list row that reveals up to four actions on each side
//! as it is dragged horizontally. Letting go past the first trigger commits
//! the action under the finger: the row either springs back (`Bounce`) or
//! slides off its edge (`Slide`) and then calls the action's callback.
//!
//! - `slots`: the eight action slots and how a drag percentage picks one.
//! - `gesture`: percentage, direction and release-duration math.
//! - `presenter`: the overlay (color, icon, content snapshot) and its layout.
//! - `resolution`: release animations.
//! - `recognizer`: raw pointer events to pan phases.
//! - `cell`: the row itself.
//!
//! ## Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use swipe_cell::*;
//!
//! let clock = ManualClock::new();
//! let mut row = SwipeCell::with_clock(7, Size::new(320.0, 44.0), Rc::new(clock.clone()));
//! row.register_action(
//!     SwipeSlot::Left1,
//!     SwipeMode::Slide,
//!     Icon::new(ImageHandle(1), Size::new(24.0, 24.0)),
//!     Color::GREEN,
//!     |cell| println!("row {} done", cell.tag),
//! );
//!
//! // a rightward pan needs an action on the right to begin
//! assert!(!row.should_begin(Vec2::new(500.0, 0.0)));
//! row.register_action(
//!     SwipeSlot::Right1,
//!     SwipeMode::Bounce,
//!     Icon::new(ImageHandle(2), Size::new(24.0, 24.0)),
//!     Color::RED,
//!     |_| {},
//! );
//! assert!(row.should_begin(Vec2::new(500.0, 0.0)));
//! row.handle_gesture(PanGesture::began(Vec2::new(160.0, 0.0), Vec2::ZERO));
//! row.handle_gesture(PanGesture::ended(Vec2::ZERO));
//! assert_eq!(row.phase(), SwipePhase::Resolving);
//!
//! while row.tick() {
//!     clock.advance(Duration::from_millis(16));
//! }
//! assert_eq!(row.phase(), SwipePhase::Idle);
//! ```
//!
//! Rows are single-threaded (`Rc` callbacks, weak delegate) and never read
//! the wall clock on their own; drive them from the UI loop.

pub mod cell;
pub mod config;
pub mod delegate;
pub mod error;
pub mod gesture;
pub mod presenter;
pub mod recognizer;
pub mod resolution;
pub mod slots;
pub mod tests;

pub use cell::*;
pub use config::*;
pub use delegate::*;
pub use error::ConfigError;
pub use gesture::*;
pub use presenter::*;
pub use recognizer::*;
pub use resolution::*;
pub use slots::*;

pub use swipe_core::{
    Clock, Color, ImageHandle, ManualClock, PointerButton, PointerEvent, PointerEventKind,
    PointerId, Rect, Scene, SceneNode, Size, SystemClock, Vec2,
};
