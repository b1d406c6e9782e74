//! Overlay layers shown while a row is being swiped, and the pure functions
//! that place them for a given percentage.
//!
//! The overlay is three layers stacked over the row's real content:
//! a full-size color indicator, the active slot's icon on top of it, and a
//! snapshot of the content that slides with the finger.

use swipe_core::{Color, ImageHandle, Rect, Scene, SceneNode, Size, Vec2};

use crate::config::SwipeConfig;
use crate::gesture::{SwipeDirection, is_before_trigger, offset_for};
use crate::slots::{ActionSlot, SwipeSlot};

/// Icon image plus the size it is laid out at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Icon {
    pub image: ImageHandle,
    pub size: Size,
}

impl Icon {
    pub fn new(image: ImageHandle, size: Size) -> Self {
        Self { image, size }
    }
}

/// Rendered image of the row content, captured when the drag begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub image: ImageHandle,
    pub size: Size,
}

impl Snapshot {
    pub fn blank(size: Size) -> Self {
        Self {
            image: ImageHandle::BLANK,
            size,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorLayer {
    pub frame: Rect,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconLayer {
    pub frame: Rect,
    pub alpha: f32,
    pub icon: Option<Icon>,
    /// Slot the current icon came from; `None` while empty.
    pub slot: Option<SwipeSlot>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentLayer {
    pub frame: Rect,
    pub snapshot: Snapshot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub indicator: IndicatorLayer,
    pub icon: IconLayer,
    pub content: ContentLayer,
}

impl Overlay {
    /// Fresh overlay for a row of `bounds`, content at rest.
    pub fn install(bounds: Size, snapshot: Snapshot, default_color: Color) -> Self {
        Self {
            indicator: IndicatorLayer {
                frame: Rect::from_size(bounds),
                color: default_color,
            },
            icon: IconLayer {
                frame: Rect::default(),
                alpha: 0.0,
                icon: None,
                slot: None,
            },
            content: ContentLayer {
                frame: Rect::from_size(snapshot.size),
                snapshot,
            },
        }
    }

    pub fn content_offset(&self) -> f32 {
        self.content.frame.min_x()
    }

    pub fn set_content_offset(&mut self, x: f32) {
        self.content.frame = self.content.frame.with_x(x);
    }

    /// Replaces the icon when the active slot changed. Returns true on a swap.
    pub fn swap_icon(&mut self, slot: Option<SwipeSlot>, icon: Option<Icon>) -> bool {
        if self.icon.slot == slot && self.icon.icon == icon {
            return false;
        }
        log::trace!("swipe icon {:?} -> {:?}", self.icon.slot, slot);
        self.icon.slot = slot;
        self.icon.icon = icon;
        true
    }

    /// Lays the layers out for an in-progress drag at `percentage`.
    pub fn hold(
        &mut self,
        percentage: f32,
        direction: SwipeDirection,
        active: Option<(SwipeSlot, &ActionSlot)>,
        config: &SwipeConfig,
        bounds: Size,
    ) {
        let first = config.triggers.first();
        self.indicator.color = indicator_color(
            percentage,
            active.map(|(_, a)| a.color),
            config.default_color,
            first,
        );
        match active {
            Some((slot, action)) => {
                self.swap_icon(Some(slot), Some(action.icon));
                let tracking = config.should_animate_icons;
                self.place_icon(percentage, direction, tracking, first, bounds);
            }
            None => {
                self.swap_icon(None, None);
            }
        }
    }

    /// Moves the icon for `percentage`; leaves it untouched when a floating
    /// icon has no side to float to.
    pub fn place_icon(
        &mut self,
        percentage: f32,
        direction: SwipeDirection,
        tracking: bool,
        first: f32,
        bounds: Size,
    ) {
        if let Some(frame) = icon_target_frame(
            percentage,
            direction,
            tracking,
            first,
            bounds,
            self.icon_size(),
        ) {
            self.icon.frame = frame;
            self.icon.alpha = icon_alpha(percentage, first);
        }
    }

    fn icon_size(&self) -> Size {
        self.icon.icon.map(|i| i.size).unwrap_or(Size::ZERO)
    }

    /// Emits the overlay into `scene`, offset by `origin` (the row's position
    /// in scene coordinates), clipped to the row.
    pub fn paint(&self, scene: &mut Scene, origin: Vec2) {
        scene.push(SceneNode::PushClip {
            rect: self.indicator.frame.translate(origin),
        });
        scene.push(SceneNode::Rect {
            rect: self.indicator.frame.translate(origin),
            color: self.indicator.color,
        });
        if let Some(icon) = self.icon.icon {
            if self.icon.alpha > 0.0 {
                scene.push(SceneNode::Image {
                    rect: self.icon.frame.translate(origin),
                    image: icon.image,
                    alpha: self.icon.alpha.clamp(0.0, 1.0),
                });
            }
        }
        scene.push(SceneNode::Image {
            rect: self.content.frame.translate(origin),
            image: self.content.snapshot.image,
            alpha: 1.0,
        });
        scene.push(SceneNode::PopClip);
    }
}

/// Indicator fill: the slot color only once the first trigger is passed.
pub fn indicator_color(
    percentage: f32,
    slot_color: Option<Color>,
    default_color: Color,
    first: f32,
) -> Color {
    match slot_color {
        Some(c) if !is_before_trigger(percentage, first) => c,
        _ => default_color,
    }
}

/// Icon opacity: linear 0 → 1 over `[0, first]` in either direction.
pub fn icon_alpha(percentage: f32, first: f32) -> f32 {
    if first <= 0.0 {
        return 1.0;
    }
    (percentage.abs() / first).min(1.0)
}

/// Horizontal center of the icon, or `None` when a floating icon has no
/// side to rest on (`Center`).
///
/// Tracking icons wait half a trigger in from the revealed edge until the
/// first trigger, then follow the content edge at that same distance.
pub fn icon_center_x(
    percentage: f32,
    direction: SwipeDirection,
    tracking: bool,
    first: f32,
    width: f32,
) -> Option<f32> {
    let inset = offset_for(first / 2.0, width);
    if tracking {
        let x = if percentage >= first {
            offset_for(percentage - first / 2.0, width)
        } else if percentage >= 0.0 {
            inset
        } else if percentage >= -first {
            width - inset
        } else {
            width + offset_for(percentage + first / 2.0, width)
        };
        return Some(x);
    }
    match direction {
        SwipeDirection::Right => Some(inset),
        SwipeDirection::Left => Some(width - inset),
        SwipeDirection::Center => None,
    }
}

/// Pixel-aligned icon frame centered vertically in the row.
pub fn icon_frame(center_x: f32, bounds: Size, icon: Size) -> Rect {
    Rect::centered_at(Vec2::new(center_x, bounds.height / 2.0), icon).integral()
}

pub fn icon_target_frame(
    percentage: f32,
    direction: SwipeDirection,
    tracking: bool,
    first: f32,
    bounds: Size,
    icon: Size,
) -> Option<Rect> {
    icon_center_x(percentage, direction, tracking, first, bounds.width)
        .map(|x| icon_frame(x, bounds, icon))
}
