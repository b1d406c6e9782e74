use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{Key, KeyData, SlotMap, new_key_type};
use swipe_cell::*;

const ROW_WIDTH: f32 = 320.0;
const ROW_HEIGHT: f32 = 44.0;
const FRAME: Duration = Duration::from_millis(16);

const LABELS: [&str; 20] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

// Icon atlas ids; the renderer owns the pixels.
const ICON_CROSS: ImageHandle = ImageHandle(1);
const ICON_LIST: ImageHandle = ImageHandle(2);
const ICON_CLOCK: ImageHandle = ImageHandle(3);
const ICON_CHECK: ImageHandle = ImageHandle(4);

new_key_type! { struct RowKey; }

struct Row {
    label: String,
    cell: SwipeCell,
    busy: bool,
}

struct LoggingDelegate;

impl SwipeDelegate for LoggingDelegate {
    fn did_start_swiping(&self, cell: &SwipeCell) {
        log::info!("row {:#x} started swiping", cell.tag);
    }

    fn did_end_swiping(&self, cell: &SwipeCell) {
        log::info!("row {:#x} ended swiping", cell.tag);
    }

    fn did_swipe(&self, cell: &SwipeCell, percentage: f32) {
        log::trace!("row {:#x} at {percentage:.2}", cell.tag);
    }
}

/// A list of swipeable rows stacked vertically, with a manual clock.
struct ListHost {
    rows: SlotMap<RowKey, Row>,
    order: Vec<RowKey>,
    /// Tags queued for deletion by action callbacks.
    doomed: Rc<RefCell<Vec<u64>>>,
    delegate: Rc<dyn SwipeDelegate>,
    clock: ManualClock,
    config: SwipeConfig,
    next_pointer: u64,
}

impl ListHost {
    fn new(labels: &[&str], config: SwipeConfig) -> Self {
        let mut host = Self {
            rows: SlotMap::with_key(),
            order: Vec::new(),
            doomed: Rc::new(RefCell::new(Vec::new())),
            delegate: Rc::new(LoggingDelegate),
            clock: ManualClock::new(),
            config,
            next_pointer: 1,
        };
        for label in labels {
            host.push(label);
        }
        host
    }

    fn push(&mut self, label: &str) {
        let clock: Rc<dyn Clock> = Rc::new(self.clock.clone());
        let key = self.rows.insert_with_key(|key| Row {
            label: label.to_string(),
            cell: SwipeCell::with_clock(
                key.data().as_ffi(),
                Size::new(ROW_WIDTH, ROW_HEIGHT),
                clock,
            ),
            busy: false,
        });
        self.order.push(key);
        self.configure(key);
    }

    /// Binds the row's actions, the way a table data source configures a
    /// dequeued cell.
    fn configure(&mut self, key: RowKey) {
        let Some(row) = self.rows.get_mut(key) else {
            return;
        };
        let cell = &mut row.cell;
        cell.prepare_for_reuse();
        cell.set_config(self.config);
        cell.set_delegate(&self.delegate);
        cell.set_snapshot_source(Rc::new(move |_: Size| ImageHandle(0x1000 + key.data().as_ffi())));

        let icon = |image| Icon::new(image, Size::new(24.0, 24.0));
        let actions = [
            (SwipeSlot::Right1, SwipeMode::Slide, ICON_CROSS, Color::BLUE),
            (SwipeSlot::Right2, SwipeMode::Bounce, ICON_LIST, Color::RED),
            (SwipeSlot::Right3, SwipeMode::Slide, ICON_CLOCK, Color::ORANGE),
            (SwipeSlot::Right4, SwipeMode::Slide, ICON_CHECK, Color::GREEN),
            (SwipeSlot::Left1, SwipeMode::Slide, ICON_CHECK, Color::PURPLE),
        ];
        for (slot, mode, image, color) in actions {
            let doomed = self.doomed.clone();
            cell.register_action(slot, mode, icon(image), color, move |cell| {
                log::info!("{slot:?} fired on row {:#x}", cell.tag);
                doomed.borrow_mut().push(cell.tag);
            });
        }
    }

    fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.order
            .iter()
            .filter_map(|k| self.rows.get(*k))
            .map(|r| r.label.as_str())
    }

    fn key_at(&self, index: usize) -> anyhow::Result<RowKey> {
        self.order
            .get(index)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no row at index {index} ({} rows)", self.order.len()))
    }

    fn pointer(&mut self, key: RowKey, event: PointerEventKind, at: Vec2) {
        if let Some(row) = self.rows.get_mut(key) {
            let id = self.next_pointer;
            row.cell.handle_pointer(&PointerEvent::touch(id, event, at));
        }
        self.frame();
    }

    /// Drags the row at `index` from `from` to `to` (row-local points) over
    /// `steps` frames, then lifts.
    fn drag(&mut self, index: usize, from: Vec2, to: Vec2, steps: u32) -> anyhow::Result<()> {
        let key = self.key_at(index)?;
        let label = self
            .rows
            .get(key)
            .map(|r| r.label.clone())
            .unwrap_or_default();
        log::info!("dragging '{label}' from {from:?} to {to:?}");

        self.pointer(key, PointerEventKind::Down(PointerButton::Primary), from);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let at = Vec2::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.pointer(key, PointerEventKind::Move, at);
        }
        self.pointer(key, PointerEventKind::Up(PointerButton::Primary), to);
        self.next_pointer += 1;
        self.settle();
        Ok(())
    }

    /// Advances one frame: ticks every row, paints, and drops rows whose
    /// action asked for deletion once they have gone quiet.
    fn frame(&mut self) {
        self.clock.advance(FRAME);
        for row in self.rows.values_mut() {
            row.busy = row.cell.tick();
        }

        let mut scene = Scene::new();
        for (i, key) in self.order.iter().enumerate() {
            if let Some(row) = self.rows.get(*key) {
                row.cell.paint(&mut scene, Vec2::new(0.0, i as f32 * ROW_HEIGHT));
            }
        }
        if !scene.is_empty() {
            log::trace!("painted {} overlay nodes", scene.nodes.len());
        }

        let mut doomed = self.doomed.borrow_mut();
        doomed.retain(|tag| {
            let key = RowKey::from(KeyData::from_ffi(*tag));
            match self.rows.get(key).map(|r| r.busy) {
                Some(true) => true,
                Some(false) => {
                    if let Some(row) = self.rows.remove(key) {
                        log::info!("deleted '{}'", row.label);
                    }
                    self.order.retain(|k| *k != key);
                    false
                }
                None => false,
            }
        });
    }

    fn settle(&mut self) {
        let mut frames = 0;
        while self.rows.values().any(|r| r.busy) || !self.doomed.borrow().is_empty() {
            self.frame();
            frames += 1;
            if frames > 10_000 {
                log::warn!("list did not settle");
                break;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting swipe list demo");

    let triggers = TriggerThresholds::new(0.15, 0.35, 0.55, 0.75)?;
    let config = SwipeConfig::default().with_triggers(triggers);
    let mut list = ListHost::new(&LABELS, config);
    let mid = ROW_HEIGHT / 2.0;

    // "one": past the first trigger to the right, Left1 slides it away
    list.drag(0, Vec2::new(20.0, mid), Vec2::new(170.0, mid), 8)?;
    // "two": a nudge to the left springs back untouched
    list.drag(0, Vec2::new(250.0, mid), Vec2::new(220.0, mid), 4)?;
    // "four": Right2 bounces back, then deletes
    list.drag(2, Vec2::new(300.0, mid), Vec2::new(160.0, mid), 8)?;
    // "five": mostly vertical, left to the list's scroll
    list.drag(2, Vec2::new(160.0, 10.0), Vec2::new(170.0, 120.0), 6)?;
    // "six": nearly the full width to the left, Right4 slides it away
    list.drag(3, Vec2::new(310.0, mid), Vec2::new(10.0, mid), 10)?;

    for label in list.labels() {
        println!("{label}");
    }
    Ok(())
}
