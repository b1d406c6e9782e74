#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use crate::*;

    const W: f32 = 400.0;
    const FRAME: Duration = Duration::from_millis(16);

    fn row(clock: &ManualClock) -> SwipeCell {
        SwipeCell::with_clock(1, Size::new(W, 44.0), Rc::new(clock.clone()))
    }

    fn icon(id: u64) -> Icon {
        Icon::new(ImageHandle(id), Size::new(24.0, 24.0))
    }

    fn register_counting(cell: &mut SwipeCell, slot: SwipeSlot, mode: SwipeMode) -> Rc<Cell<u32>> {
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        cell.register_action(slot, mode, icon(slot.index() as u64 + 1), Color::BLUE, move |_| {
            f.set(f.get() + 1)
        });
        fired
    }

    fn drag_to(cell: &mut SwipeCell, offset: f32) {
        cell.handle_gesture(PanGesture::began(Vec2::new(offset, 0.0), Vec2::ZERO));
    }

    fn release(cell: &mut SwipeCell) {
        cell.handle_gesture(PanGesture::ended(Vec2::ZERO));
    }

    /// Ticks until the row goes quiet. Returns the number of frames.
    fn settle(cell: &mut SwipeCell, clock: &ManualClock) -> usize {
        let mut frames = 0;
        while cell.tick() {
            clock.advance(FRAME);
            frames += 1;
            assert!(frames < 1000, "row never settled");
        }
        frames
    }

    /// Ticks until the release animation is done, leaving any cleanup pending.
    fn finish_animation(cell: &mut SwipeCell, clock: &ManualClock) {
        let mut frames = 0;
        while cell.resolution().is_some() {
            clock.advance(FRAME);
            cell.tick();
            frames += 1;
            assert!(frames < 1000, "animation never finished");
        }
    }

    #[test]
    fn test_release_before_trigger_bounces_without_callback() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Right1, SwipeMode::Slide);

        // 0.05 to the right: nothing on that side
        drag_to(&mut cell, 0.05 * W);
        release(&mut cell);
        let res = cell.resolution().unwrap();
        assert_eq!(res.kind(), ResolutionKind::Bounce);
        assert!(!res.will_fire());
        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 0);
        assert_eq!(cell.phase(), SwipePhase::Idle);
        assert!(cell.overlay().is_none());

        // 0.05 to the left: Right1 is active but its trigger was not reached
        drag_to(&mut cell, -0.05 * W);
        assert_eq!(cell.overlay().unwrap().icon.slot, Some(SwipeSlot::Right1));
        release(&mut cell);
        assert_eq!(cell.resolution().unwrap().kind(), ResolutionKind::Bounce);
        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 0);
        assert_eq!(cell.percentage(), 0.0);
    }

    #[test]
    fn test_slide_fires_once_then_cleans_up_after_delay() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        drag_to(&mut cell, 0.40 * W);
        assert_eq!(cell.phase(), SwipePhase::Dragging);
        release(&mut cell);
        assert_eq!(cell.phase(), SwipePhase::Resolving);
        let res = cell.resolution().unwrap();
        assert_eq!(res.kind(), ResolutionKind::Slide);
        assert_eq!(res.content_target(), W);

        finish_animation(&mut cell, &clock);
        assert_eq!(fired.get(), 1);
        let overlay = cell.overlay().unwrap();
        assert_eq!(overlay.content_offset(), W);
        assert_eq!(overlay.icon.alpha, 0.0);
        assert_eq!(cell.phase(), SwipePhase::Resolving);
        assert!(cell.has_pending_cleanup());

        clock.advance(CLEANUP_DELAY - Duration::from_millis(1));
        assert!(cell.tick());
        assert!(cell.overlay().is_some());

        clock.advance(Duration::from_millis(1));
        assert!(!cell.tick());
        assert!(cell.overlay().is_none());
        assert_eq!(cell.phase(), SwipePhase::Idle);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_slide_left_leaves_through_left_edge() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Right1, SwipeMode::Slide);

        drag_to(&mut cell, -0.5 * W);
        release(&mut cell);
        assert_eq!(cell.resolution().unwrap().content_target(), -W);
        finish_animation(&mut cell, &clock);
        assert_eq!(cell.overlay().unwrap().content_offset(), -W);
        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_bounce_mode_returns_to_rest_and_fires_once() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let right1 = register_counting(&mut cell, SwipeSlot::Right1, SwipeMode::Slide);
        let right2 = register_counting(&mut cell, SwipeSlot::Right2, SwipeMode::Bounce);

        drag_to(&mut cell, -0.40 * W);
        assert_eq!(cell.overlay().unwrap().icon.slot, Some(SwipeSlot::Right2));
        release(&mut cell);
        let res = cell.resolution().unwrap();
        assert_eq!(res.kind(), ResolutionKind::Bounce);
        assert!(res.will_fire());

        finish_animation(&mut cell, &clock);
        assert_eq!(cell.overlay().unwrap().content_offset(), 0.0);
        assert_eq!(
            cell.overlay().unwrap().indicator.color,
            cell.config().default_color
        );
        assert_eq!(right2.get(), 1);
        assert_eq!(right1.get(), 0);

        settle(&mut cell, &clock);
        assert_eq!(right2.get(), 1);
        assert_eq!(cell.phase(), SwipePhase::Idle);
    }

    #[test]
    fn test_release_with_no_active_slot_bounces_empty() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        drag_to(&mut cell, -0.5 * W);
        let overlay = cell.overlay().unwrap();
        assert_eq!(overlay.icon.icon, None);
        assert_eq!(overlay.indicator.color, Color::LIGHT_GRAY);
        release(&mut cell);
        assert!(!cell.resolution().unwrap().will_fire());
        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 0);
        assert_eq!(cell.phase(), SwipePhase::Idle);
    }

    #[test]
    fn test_faster_release_settles_sooner() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        drag_to(&mut cell, 0.05 * W);
        cell.handle_gesture(PanGesture::ended(Vec2::ZERO));
        let slow = settle(&mut cell, &clock);

        drag_to(&mut cell, 0.05 * W);
        cell.handle_gesture(PanGesture::ended(Vec2::new(2.0 * W, 0.0)));
        let fast = settle(&mut cell, &clock);

        assert!(fast < slow, "fast {fast} vs slow {slow}");
    }

    #[test]
    fn test_input_is_ignored_while_exiting() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        drag_to(&mut cell, 0.4 * W);
        release(&mut cell);
        assert!(!cell.should_begin(Vec2::new(-500.0, 0.0)));

        cell.handle_gesture(PanGesture::began(Vec2::new(-300.0, 0.0), Vec2::ZERO));
        cell.handle_gesture(PanGesture::changed(Vec2::new(-50.0, 0.0), Vec2::ZERO));
        cell.handle_gesture(PanGesture::ended(Vec2::ZERO));
        assert_eq!(cell.resolution().unwrap().content_target(), W);

        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 1);

        // usable again once cleanup ran
        assert!(cell.should_begin(Vec2::new(-500.0, 0.0)));
    }

    #[test]
    fn test_out_of_order_phases_are_dropped() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        cell.handle_gesture(PanGesture::changed(Vec2::new(100.0, 0.0), Vec2::ZERO));
        cell.handle_gesture(PanGesture::ended(Vec2::ZERO));
        assert_eq!(cell.phase(), SwipePhase::Idle);
        assert!(cell.overlay().is_none());

        drag_to(&mut cell, 40.0);
        // a second Began does not restart the drag
        cell.handle_gesture(PanGesture::began(Vec2::new(40.0, 0.0), Vec2::ZERO));
        assert_eq!(cell.overlay().unwrap().content_offset(), 40.0);
        cell.handle_gesture(PanGesture::changed(Vec2::new(20.0, 7.0), Vec2::ZERO));
        assert_eq!(cell.overlay().unwrap().content_offset(), 60.0);
    }

    #[test]
    fn test_should_drag_false_ignores_everything() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);
        cell.set_should_drag(false);

        assert!(!cell.should_begin(Vec2::new(500.0, 0.0)));
        drag_to(&mut cell, 0.5 * W);
        release(&mut cell);
        assert_eq!(cell.phase(), SwipePhase::Idle);
        assert!(cell.overlay().is_none());
        assert!(!cell.tick());
    }

    #[test]
    fn test_gating_checks_side_motion_points_toward() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        assert!(!cell.should_begin(Vec2::new(500.0, 0.0)));
        assert!(!cell.should_begin(Vec2::new(-500.0, 0.0)));

        register_counting(&mut cell, SwipeSlot::Right1, SwipeMode::Bounce);
        assert!(cell.should_begin(Vec2::new(500.0, 10.0)));
        assert!(!cell.should_begin(Vec2::new(-500.0, 10.0)));
        // vertical-ish motion belongs to the list
        assert!(!cell.should_begin(Vec2::new(100.0, 400.0)));
        assert!(!cell.should_begin(Vec2::new(100.0, -100.0)));

        cell.prepare_for_reuse();
        register_counting(&mut cell, SwipeSlot::Left3, SwipeMode::Slide);
        assert!(cell.should_begin(Vec2::new(-500.0, 0.0)));
        assert!(!cell.should_begin(Vec2::new(500.0, 0.0)));

        register_counting(&mut cell, SwipeSlot::Right4, SwipeMode::Slide);
        assert!(cell.should_begin(Vec2::new(500.0, 0.0)));
        assert!(cell.should_begin(Vec2::new(-500.0, 0.0)));
    }

    #[test]
    fn test_prepare_for_reuse_clears_slots() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        for slot in SwipeSlot::ALL {
            register_counting(&mut cell, slot, SwipeMode::Slide);
        }
        cell.set_default_color(Color::BLACK);
        drag_to(&mut cell, 0.3 * W);

        cell.prepare_for_reuse();
        assert!(cell.slots().is_empty());
        assert_eq!(cell.phase(), SwipePhase::Idle);
        assert!(cell.overlay().is_none());
        for i in -10..=10 {
            let p = i as f32 / 10.0;
            assert!(cell.slots().resolve(p, &cell.config().triggers).is_none());
        }
        // configuration survives
        assert_eq!(cell.config().default_color, Color::BLACK);
    }

    #[test]
    fn test_reuse_cancels_pending_cleanup() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        drag_to(&mut cell, 0.5 * W);
        release(&mut cell);
        finish_animation(&mut cell, &clock);
        assert!(cell.has_pending_cleanup());

        cell.prepare_for_reuse();
        assert!(!cell.has_pending_cleanup());
        assert!(!cell.tick());
        assert_eq!(fired.get(), 1);

        // a fresh registration works straight away
        let again = register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);
        drag_to(&mut cell, 0.5 * W);
        release(&mut cell);
        settle(&mut cell, &clock);
        assert_eq!(again.get(), 1);
    }

    #[test]
    fn test_callback_that_recycles_row_skips_cleanup() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        cell.register_action(
            SwipeSlot::Left1,
            SwipeMode::Slide,
            icon(1),
            Color::PURPLE,
            |cell: &mut SwipeCell| cell.prepare_for_reuse(),
        );

        drag_to(&mut cell, 0.5 * W);
        release(&mut cell);
        settle(&mut cell, &clock);
        assert!(!cell.has_pending_cleanup());
        assert!(cell.slots().is_empty());
        assert_eq!(cell.phase(), SwipePhase::Idle);
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl SwipeDelegate for Recorder {
        fn did_start_swiping(&self, cell: &SwipeCell) {
            self.events.borrow_mut().push(format!("start {}", cell.tag));
        }

        fn did_end_swiping(&self, cell: &SwipeCell) {
            self.events.borrow_mut().push(format!("end {}", cell.tag));
        }

        fn did_swipe(&self, _cell: &SwipeCell, percentage: f32) {
            self.events.borrow_mut().push(format!("swipe {percentage:.2}"));
        }
    }

    #[test]
    fn test_delegate_sees_start_progress_end() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);
        let recorder = Rc::new(Recorder::default());
        let delegate: Rc<dyn SwipeDelegate> = recorder.clone();
        cell.set_delegate(&delegate);

        drag_to(&mut cell, 0.1 * W);
        cell.handle_gesture(PanGesture::changed(Vec2::new(0.2 * W, 0.0), Vec2::ZERO));
        release(&mut cell);
        settle(&mut cell, &clock);

        assert_eq!(
            *recorder.events.borrow(),
            vec!["start 1", "swipe 0.10", "swipe 0.30", "end 1"]
        );

        // the firing cleared the delegate
        drag_to(&mut cell, 0.1 * W);
        assert_eq!(recorder.events.borrow().len(), 4);
    }

    #[test]
    fn test_dropped_delegate_is_not_called() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);
        {
            let delegate: Rc<dyn SwipeDelegate> = Rc::new(Recorder::default());
            cell.set_delegate(&delegate);
        }
        drag_to(&mut cell, 0.2 * W);
        release(&mut cell);
        settle(&mut cell, &clock);
        assert_eq!(cell.phase(), SwipePhase::Idle);
    }

    #[test]
    fn test_pointer_drag_end_to_end() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);
        // rightward motion only begins with something on the right
        let right = register_counting(&mut cell, SwipeSlot::Right1, SwipeMode::Bounce);

        let send = |cell: &mut SwipeCell, kind: PointerEventKind, x: f32| {
            clock.advance(FRAME);
            cell.handle_pointer(&PointerEvent::touch(3, kind, Vec2::new(x, 22.0)));
        };
        send(&mut cell, PointerEventKind::Down(PointerButton::Primary), 10.0);
        assert_eq!(cell.phase(), SwipePhase::Idle);
        send(&mut cell, PointerEventKind::Move, 25.0);
        assert_eq!(cell.phase(), SwipePhase::Dragging);
        send(&mut cell, PointerEventKind::Move, 100.0);
        send(&mut cell, PointerEventKind::Move, 180.0);
        assert_eq!(cell.overlay().unwrap().content_offset(), 170.0);
        send(&mut cell, PointerEventKind::Up(PointerButton::Primary), 180.0);
        assert_eq!(cell.resolution().unwrap().kind(), ResolutionKind::Slide);

        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 1);
        assert_eq!(right.get(), 0);
    }

    #[test]
    fn test_pointer_nudge_toward_right_slot_bounces_without_callback() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        let fired = register_counting(&mut cell, SwipeSlot::Right1, SwipeMode::Slide);

        let send = |cell: &mut SwipeCell, kind: PointerEventKind, x: f32| {
            clock.advance(FRAME);
            cell.handle_pointer(&PointerEvent::touch(5, kind, Vec2::new(x, 22.0)));
        };
        send(&mut cell, PointerEventKind::Down(PointerButton::Primary), 10.0);
        send(&mut cell, PointerEventKind::Move, 25.0);
        assert_eq!(cell.phase(), SwipePhase::Dragging);
        send(&mut cell, PointerEventKind::Move, 30.0);
        assert!((cell.percentage() - 0.05).abs() < 1e-4);
        send(&mut cell, PointerEventKind::Up(PointerButton::Primary), 30.0);

        let res = cell.resolution().unwrap();
        assert_eq!(res.kind(), ResolutionKind::Bounce);
        assert!(!res.will_fire());
        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 0);
        assert_eq!(cell.phase(), SwipePhase::Idle);
        assert!(cell.overlay().is_none());
    }

    #[test]
    fn test_pointer_swipe_toward_empty_side_is_declined() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        for (kind, x) in [
            (PointerEventKind::Down(PointerButton::Primary), 100.0),
            (PointerEventKind::Move, 120.0),
            (PointerEventKind::Move, 200.0),
            (PointerEventKind::Up(PointerButton::Primary), 200.0),
        ] {
            clock.advance(FRAME);
            cell.handle_pointer(&PointerEvent::touch(1, kind, Vec2::new(x, 22.0)));
            assert_eq!(cell.phase(), SwipePhase::Idle);
        }
    }

    #[test]
    fn test_percentage_clamps_but_content_tracks() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left4, SwipeMode::Slide);

        drag_to(&mut cell, 3.0 * W);
        assert_eq!(cell.percentage(), 1.0);
        assert_eq!(cell.direction(), SwipeDirection::Right);
        assert_eq!(cell.overlay().unwrap().content_offset(), 3.0 * W);
        assert_eq!(cell.overlay().unwrap().icon.slot, Some(SwipeSlot::Left4));
    }

    #[test]
    fn test_paint_only_while_overlay_is_up() {
        let clock = ManualClock::new();
        let mut cell = row(&clock);
        register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);
        cell.set_snapshot_source(Rc::new(|_: Size| ImageHandle(99)));

        let mut scene = Scene::new();
        cell.paint(&mut scene, Vec2::ZERO);
        assert!(scene.is_empty());

        drag_to(&mut cell, 0.3 * W);
        cell.paint(&mut scene, Vec2::new(0.0, 44.0));
        let images: Vec<_> = scene.images().collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].0, ImageHandle(SwipeSlot::Left1.index() as u64 + 1));
        assert_eq!(images[1].0, ImageHandle(99));
        assert_eq!(images[1].1, Rect::new(0.3 * W, 44.0, W, 44.0));
    }

    #[test]
    fn test_zero_width_row_never_commits() {
        let clock = ManualClock::new();
        let mut cell = SwipeCell::with_clock(9, Size::ZERO, Rc::new(clock.clone()));
        let fired = register_counting(&mut cell, SwipeSlot::Left1, SwipeMode::Slide);

        drag_to(&mut cell, 50.0);
        assert_eq!(cell.percentage(), 0.0);
        release(&mut cell);
        settle(&mut cell, &clock);
        assert_eq!(fired.get(), 0);
    }
}
