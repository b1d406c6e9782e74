//! Action slots and the registry that picks one for a drag percentage.
//!
//! A row has eight fixed slots, four per side. `Left*` slots are revealed on
//! the row's left edge, i.e. while the content is dragged to the right
//! (positive percentage); `Right*` slots while it is dragged to the left.
//! Higher ranks sit behind higher triggers, so dragging further walks
//! rank 1 → 2 → 3 → 4.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use swipe_core::Color;

use crate::cell::SwipeCell;
use crate::config::TriggerThresholds;
use crate::presenter::Icon;

/// Invoked with the owning row once the action commits.
pub type SwipeCompletion = Rc<dyn Fn(&mut SwipeCell)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotSide {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SwipeSlot {
    Left1,
    Left2,
    Left3,
    Left4,
    Right1,
    Right2,
    Right3,
    Right4,
}

impl SwipeSlot {
    pub const ALL: [SwipeSlot; 8] = [
        SwipeSlot::Left1,
        SwipeSlot::Left2,
        SwipeSlot::Left3,
        SwipeSlot::Left4,
        SwipeSlot::Right1,
        SwipeSlot::Right2,
        SwipeSlot::Right3,
        SwipeSlot::Right4,
    ];

    /// `rank` is 1..=4.
    pub fn new(side: SlotSide, rank: u8) -> Option<SwipeSlot> {
        if !(1..=4).contains(&rank) {
            return None;
        }
        let base = match side {
            SlotSide::Left => 0,
            SlotSide::Right => 4,
        };
        Some(Self::ALL[base + rank as usize - 1])
    }

    pub fn side(self) -> SlotSide {
        if self.index() < 4 {
            SlotSide::Left
        } else {
            SlotSide::Right
        }
    }

    pub fn rank(self) -> u8 {
        (self.index() % 4) as u8 + 1
    }

    pub fn index(self) -> usize {
        self as usize
    }

    fn flag(self) -> SlotMask {
        SlotMask::from_bits_truncate(1 << self.index())
    }
}

bitflags! {
    /// Occupancy of the eight slots, bit N for `SwipeSlot::ALL[N]`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SlotMask: u8 {
        const LEFT_1 = 1 << 0;
        const LEFT_2 = 1 << 1;
        const LEFT_3 = 1 << 2;
        const LEFT_4 = 1 << 3;
        const RIGHT_1 = 1 << 4;
        const RIGHT_2 = 1 << 5;
        const RIGHT_3 = 1 << 6;
        const RIGHT_4 = 1 << 7;

        const LEFT = Self::LEFT_1.bits() | Self::LEFT_2.bits() | Self::LEFT_3.bits() | Self::LEFT_4.bits();
        const RIGHT = Self::RIGHT_1.bits() | Self::RIGHT_2.bits() | Self::RIGHT_3.bits() | Self::RIGHT_4.bits();
    }
}

/// What happens to the row once the drag is released past the trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeMode {
    /// Spring back to rest, then fire the action.
    Bounce,
    /// Continue off-screen, then fire the action.
    Slide,
}

/// One configured swipe action.
#[derive(Clone)]
pub struct ActionSlot {
    pub color: Color,
    pub icon: Icon,
    pub mode: SwipeMode,
    pub on_complete: SwipeCompletion,
}

impl fmt::Debug for ActionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSlot")
            .field("color", &self.color)
            .field("icon", &self.icon)
            .field("mode", &self.mode)
            .field("on_complete", &"<callback>")
            .finish()
    }
}

/// Up to one [`ActionSlot`] per [`SwipeSlot`].
#[derive(Clone, Default)]
pub struct SlotRegistry {
    slots: [Option<ActionSlot>; 8],
    mask: SlotMask,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `action` at `slot`, replacing whatever was there.
    pub fn register(&mut self, slot: SwipeSlot, action: ActionSlot) {
        self.slots[slot.index()] = Some(action);
        self.mask.insert(slot.flag());
    }

    pub fn remove(&mut self, slot: SwipeSlot) -> Option<ActionSlot> {
        self.mask.remove(slot.flag());
        self.slots[slot.index()].take()
    }

    pub fn get(&self, slot: SwipeSlot) -> Option<&ActionSlot> {
        self.slots[slot.index()].as_ref()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
        self.mask = SlotMask::empty();
    }

    pub fn mask(&self) -> SlotMask {
        self.mask
    }

    pub fn len(&self) -> usize {
        self.mask.bits().count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn has_slot(&self, side: SlotSide) -> bool {
        let side_mask = match side {
            SlotSide::Left => SlotMask::LEFT,
            SlotSide::Right => SlotMask::RIGHT,
        };
        self.mask.intersects(side_mask)
    }

    /// Slot active at `percentage`.
    ///
    /// Checks run left ranks 1..4 then right ranks 1..4, each later match
    /// overriding the earlier one. Both rank-1 checks accept 0, so at exactly
    /// 0 a registered `Right1` wins over `Left1`.
    pub fn resolve(
        &self,
        percentage: f32,
        triggers: &TriggerThresholds,
    ) -> Option<(SwipeSlot, &ActionSlot)> {
        let mut found = None;
        for slot in SwipeSlot::ALL {
            let Some(action) = self.get(slot) else {
                continue;
            };
            let threshold = triggers.activation(slot.rank());
            let reached = match slot.side() {
                SlotSide::Left => percentage >= threshold,
                SlotSide::Right => percentage <= -threshold,
            };
            if reached {
                found = Some((slot, action));
            }
        }
        found
    }
}

impl fmt::Debug for SlotRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotRegistry")
            .field("mask", &self.mask)
            .finish()
    }
}
