//! The swipeable row and its gesture/resolution state machine.
//!
//! ```text
//! Idle --Began--> Dragging --Ended/Cancelled--> Resolving --cleanup--> Idle
//! ```
//!
//! A row never reads the wall clock or spawns timers. The host feeds it
//! gestures (or raw pointer events) and calls [`SwipeCell::tick`] once per
//! frame until it returns false.

use std::fmt;
use std::rc::{Rc, Weak};

use swipe_core::{
    Clock, Color, ImageHandle, OneShot, PointerEvent, Scene, Size, SystemClock, Vec2,
};
use web_time::Instant;

use crate::config::{CLEANUP_DELAY, SwipeConfig, TriggerThresholds};
use crate::delegate::{SnapshotSource, SwipeDelegate};
use crate::gesture::{
    DragState, PanGesture, PanPhase, SwipeDirection, animation_duration, direction_of,
};
use crate::presenter::{Icon, Overlay, Snapshot};
use crate::recognizer::PanRecognizer;
use crate::resolution::{Resolution, ResolutionKind, SwipePhase, choose};
use crate::slots::{ActionSlot, SlotRegistry, SwipeMode, SwipeSlot};

pub struct SwipeCell {
    /// Host-assigned id, handy for mapping the row back to its data in callbacks.
    pub tag: u64,
    bounds: Size,
    config: SwipeConfig,
    registry: SlotRegistry,
    drag: DragState,
    overlay: Option<Overlay>,
    resolution: Option<Resolution>,
    cleanup: Option<OneShot<()>>,
    delegate: Option<Weak<dyn SwipeDelegate>>,
    snapshots: Option<Rc<dyn SnapshotSource>>,
    clock: Rc<dyn Clock>,
    recognizer: PanRecognizer,
    /// Bumped by `prepare_for_reuse` so a stale resolution can tell it lost the row.
    generation: u64,
}

impl SwipeCell {
    pub fn new(tag: u64, bounds: Size) -> Self {
        Self::with_clock(tag, bounds, Rc::new(SystemClock))
    }

    pub fn with_clock(tag: u64, bounds: Size, clock: Rc<dyn Clock>) -> Self {
        Self {
            tag,
            bounds,
            config: SwipeConfig::default(),
            registry: SlotRegistry::new(),
            drag: DragState::default(),
            overlay: None,
            resolution: None,
            cleanup: None,
            delegate: None,
            snapshots: None,
            clock,
            recognizer: PanRecognizer::new(),
            generation: 0,
        }
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Takes effect at the next drag; an overlay already on screen keeps its size.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SwipeConfig) {
        self.config = config;
    }

    pub fn set_triggers(&mut self, triggers: TriggerThresholds) {
        self.config.triggers = triggers;
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.config.default_color = color;
    }

    pub fn set_should_drag(&mut self, enabled: bool) {
        self.config.should_drag = enabled;
    }

    pub fn set_should_animate_icons(&mut self, enabled: bool) {
        self.config.should_animate_icons = enabled;
    }

    /// The row only keeps a weak reference; the host owns the delegate.
    pub fn set_delegate(&mut self, delegate: &Rc<dyn SwipeDelegate>) {
        self.delegate = Some(Rc::downgrade(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn set_snapshot_source(&mut self, source: Rc<dyn SnapshotSource>) {
        self.snapshots = Some(source);
    }

    /// Binds an action to `slot`, replacing any previous one.
    pub fn register_action<F>(
        &mut self,
        slot: SwipeSlot,
        mode: SwipeMode,
        icon: Icon,
        color: Color,
        on_complete: F,
    ) where
        F: Fn(&mut SwipeCell) + 'static,
    {
        self.registry.register(
            slot,
            ActionSlot {
                color,
                icon,
                mode,
                on_complete: Rc::new(on_complete),
            },
        );
    }

    pub fn remove_action(&mut self, slot: SwipeSlot) -> Option<ActionSlot> {
        self.registry.remove(slot)
    }

    pub fn slots(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn phase(&self) -> SwipePhase {
        if self.drag.dragging {
            SwipePhase::Dragging
        } else if self.drag.exiting {
            SwipePhase::Resolving
        } else {
            SwipePhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.dragging
    }

    pub fn is_exiting(&self) -> bool {
        self.drag.exiting
    }

    /// Signed drag progress in `[-1, 1]`.
    pub fn percentage(&self) -> f32 {
        match &self.overlay {
            Some(overlay) => crate::gesture::percentage(overlay.content_offset(), self.bounds.width),
            None => 0.0,
        }
    }

    pub fn direction(&self) -> SwipeDirection {
        direction_of(self.percentage())
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn has_pending_cleanup(&self) -> bool {
        self.cleanup.as_ref().is_some_and(|c| c.is_pending())
    }

    /// Whether a pan moving at `velocity` should become a row swipe.
    ///
    /// Mostly-vertical motion is declined so the list can scroll. Horizontal
    /// motion is accepted only if the side it points toward has an action:
    /// rightward needs a `Right*` slot, leftward a `Left*` slot.
    pub fn should_begin(&self, velocity: Vec2) -> bool {
        if !self.config.should_drag || self.drag.exiting || self.drag.dragging {
            return false;
        }
        if !velocity.is_horizontal() {
            return false;
        }
        direction_of(velocity.x)
            .toward_side()
            .is_some_and(|side| self.registry.has_slot(side))
    }

    /// Feeds a raw pointer event through the row's pan recognizer.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let now = self.clock.now();
        let mut recognizer = std::mem::take(&mut self.recognizer);
        let gesture = recognizer.handle_pointer(event, now, |v| self.should_begin(v));
        self.recognizer = recognizer;
        if let Some(gesture) = gesture {
            self.handle_gesture(gesture);
        }
    }

    /// Advances the state machine by one pan sample.
    pub fn handle_gesture(&mut self, gesture: PanGesture) {
        if !self.config.should_drag || self.drag.exiting {
            return;
        }
        match gesture.phase {
            PanPhase::Began => {
                if self.drag.dragging {
                    log::warn!("row {}: pan began twice, ignoring", self.tag);
                    return;
                }
                self.begin_drag();
                self.drag_by(gesture.translation);
            }
            PanPhase::Changed => {
                if !self.drag.dragging {
                    log::warn!("row {}: pan changed before it began, ignoring", self.tag);
                    return;
                }
                self.drag_by(gesture.translation);
            }
            PanPhase::Ended | PanPhase::Cancelled => {
                if !self.drag.dragging {
                    log::warn!("row {}: pan {:?} before it began, ignoring", self.tag, gesture.phase);
                    return;
                }
                self.release(gesture.velocity);
            }
        }
    }

    fn delegate(&self) -> Option<Rc<dyn SwipeDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    fn begin_drag(&mut self) {
        self.drag.reset();
        self.drag.dragging = true;

        let image = self
            .snapshots
            .as_ref()
            .map(|s| s.capture(self.bounds))
            .unwrap_or(ImageHandle::BLANK);
        let snapshot = Snapshot {
            image,
            size: self.bounds,
        };
        self.overlay = Some(Overlay::install(
            self.bounds,
            snapshot,
            self.config.default_color,
        ));

        log::debug!("row {}: swipe started", self.tag);
        if let Some(d) = self.delegate() {
            d.did_start_swiping(self);
        }
    }

    fn drag_by(&mut self, translation: Vec2) {
        self.drag.apply(translation);
        let pct = self.drag.percentage(self.bounds.width);
        let direction = direction_of(pct);
        let active = self.registry.resolve(pct, &self.config.triggers);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_content_offset(self.drag.offset);
            overlay.hold(pct, direction, active, &self.config, self.bounds);
        }
        if let Some(d) = self.delegate() {
            d.did_swipe(self, pct);
        }
    }

    fn release(&mut self, velocity: Vec2) {
        self.drag.dragging = false;
        self.drag.exiting = true;
        if let Some(d) = self.delegate() {
            d.did_end_swiping(self);
        }

        let pct = self.drag.percentage(self.bounds.width);
        let direction = direction_of(pct);
        let duration = animation_duration(velocity.x, self.bounds.width);
        let active = self
            .registry
            .resolve(pct, &self.config.triggers)
            .map(|(slot, action)| (slot, action.mode, action.on_complete.clone()));
        let (kind, fires) = choose(pct, active.as_ref().map(|a| a.1), self.config.triggers.first());
        log::debug!(
            "row {}: swipe ended at {pct:.2} ({direction:?}), {kind:?} over {duration:?}, slot {:?}{}",
            self.tag,
            active.as_ref().map(|a| a.0),
            if fires { ", will fire" } else { "" }
        );

        let Some(overlay) = self.overlay.as_mut() else {
            self.detach();
            return;
        };
        if active.is_none() {
            overlay.swap_icon(None, None);
        }
        let completion = if fires {
            active.map(|(slot, _, callback)| (slot, callback))
        } else {
            None
        };
        let now = self.clock.now();
        self.resolution = Some(Resolution::start(
            kind,
            overlay,
            direction,
            &self.config,
            duration,
            completion,
            now,
        ));
    }

    /// Advances animations and the cleanup timer to the clock's current time.
    ///
    /// Returns true while there is still something to wait for.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();

        if let Some(resolution) = self.resolution.as_mut() {
            let running = match self.overlay.as_mut() {
                Some(overlay) => resolution.step(now, overlay),
                None => false,
            };
            if running {
                return true;
            }
            if let Some(finished) = self.resolution.take() {
                self.finish(finished, now);
            }
        }

        if let Some(cleanup) = self.cleanup.as_mut() {
            if cleanup.poll(now).is_none() {
                return true;
            }
            self.cleanup = None;
            log::debug!("row {}: cleanup", self.tag);
            self.detach();
        }
        false
    }

    fn finish(&mut self, mut resolution: Resolution, now: Instant) {
        let Some((slot, callback)) = resolution.take_completion() else {
            // nothing fired: the drag is simply undone
            self.detach();
            return;
        };

        let generation = self.generation;
        log::debug!("row {}: firing {slot:?}", self.tag);
        callback(self);
        if self.generation != generation {
            log::debug!("row {}: recycled by its callback, skipping cleanup", self.tag);
            return;
        }

        self.delegate = None;
        self.cleanup = Some(OneShot::after(now, CLEANUP_DELAY, ()));
        if resolution.kind() == ResolutionKind::Slide {
            log::trace!("row {}: slid off, overlay held for cleanup", self.tag);
        }
    }

    fn detach(&mut self) {
        self.overlay = None;
        self.drag.reset();
    }

    /// Paints the overlay, if one is showing. `origin` is the row's position
    /// in scene coordinates.
    pub fn paint(&self, scene: &mut Scene, origin: Vec2) {
        if let Some(overlay) = &self.overlay {
            overlay.paint(scene, origin);
        }
    }

    /// Resets the row for a different data item, as if newly constructed.
    /// Configuration, clock and snapshot source are kept.
    pub fn prepare_for_reuse(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(mut cleanup) = self.cleanup.take() {
            cleanup.cancel();
        }
        self.resolution = None;
        self.registry.clear();
        self.drag.reset();
        self.overlay = None;
        self.delegate = None;
        self.recognizer.reset();
        log::debug!("row {}: prepared for reuse", self.tag);
    }
}

impl fmt::Debug for SwipeCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeCell")
            .field("tag", &self.tag)
            .field("bounds", &self.bounds)
            .field("phase", &self.phase())
            .field("slots", &self.registry)
            .field("offset", &self.drag.offset)
            .field("resolution", &self.resolution)
            .finish()
    }
}
