// Copyright 2025 the Limelight authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The stage: root of the display list and the render/dispatch driver.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::display::{HitContext, NodeHandle, Parent};
use crate::error::DisplayListError;
use crate::events::{KeyboardEvent, KeyboardEventKind, MouseEvent, MouseEventKind};
use crate::math::{resolve_paint, Paint, Transform2D};
use crate::surface::RenderSurface;

/// A keyboard listener registered on the stage.
///
/// Listeners are shared function objects: registering the same `Rc` twice
/// creates two registry entries (both fire), and unregistration matches by
/// `Rc` identity.
pub type KeyboardListener = Rc<dyn Fn(&KeyboardEvent)>;

/// The live frame-timer handle shared between the stage and the application
/// loop.
///
/// The loop reads the interval when re-arming its tick deadline, so interval
/// changes take effect on the next tick and never rewind a tick in progress.
#[derive(Debug)]
pub struct FrameTimer {
    interval: Cell<Duration>,
}

impl FrameTimer {
    /// Creates a timer handle with an initial interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: Cell::new(interval),
        }
    }

    /// The current tick interval.
    pub fn interval(&self) -> Duration {
        self.interval.get()
    }

    /// Replaces the tick interval; effective from the next re-arm.
    pub fn set_interval(&self, interval: Duration) {
        self.interval.set(interval);
    }
}

/// The single root container and render/dispatch driver.
///
/// One stage exists per application, constructed explicitly and handed to
/// the platform callbacks by the bootstrap layer; it is not a global. The
/// stage is the tree root — it has no parent of its own.
///
/// Everything here runs on the one UI thread: render ticks and input
/// dispatch are ordinary callbacks on that thread and never overlap, so
/// nodes' draw/hit-test implementations need no synchronization.
pub struct Stage {
    children: Vec<NodeHandle>,
    width: u32,
    height: u32,
    speed: u64,
    timer: Option<Rc<FrameTimer>>,
    /// Background fill; when `None` the surface is erased instead.
    pub background_color: Option<Paint>,
    /// Antialiasing hint forwarded to the surface every tick.
    pub use_antialiasing: bool,
    /// Cursor affordance, recomputed on every pointer-move dispatch.
    pub use_hand_cursor: bool,
    keyboard_listeners: Vec<(KeyboardEventKind, KeyboardListener)>,
}

impl Stage {
    /// Creates an empty stage. Surface dimensions and the frame timer are
    /// supplied later by the bootstrap layer, before the first tick.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            width: 0,
            height: 0,
            speed: 0,
            timer: None,
            background_color: None,
            use_antialiasing: true,
            use_hand_cursor: false,
            keyboard_listeners: Vec::new(),
        }
    }

    /// Records the surface dimensions and initial timer speed.
    ///
    /// Called once by the bootstrap layer when the surface is created; the
    /// dimensions never change afterwards (the window is fixed-size).
    pub fn configure_surface(&mut self, speed_ms: u64, width: u32, height: u32) {
        self.speed = speed_ms;
        self.width = width;
        self.height = height;
        log::info!("Stage configured: {width}x{height} at {speed_ms}ms per tick");
    }

    /// Installs the live timer handle once the application loop has created
    /// it.
    pub fn install_timer(&mut self, timer: Rc<FrameTimer>) {
        self.timer = Some(timer);
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The stored timer speed in milliseconds per tick.
    pub fn speed(&self) -> u64 {
        self.speed
    }

    /// Changes the tick interval.
    ///
    /// A no-op until the timer exists; afterwards it updates both the stored
    /// speed and the live timer, taking effect on the next tick.
    pub fn set_frame_rate(&mut self, speed_ms: u64) {
        let Some(timer) = &self.timer else {
            return;
        };
        self.speed = speed_ms;
        timer.set_interval(Duration::from_millis(speed_ms));
        log::debug!("Frame rate changed to {speed_ms}ms per tick");
    }

    // --- Child-list management ---

    /// Appends a child to the end of the child list, on top of its siblings,
    /// and marks it as owned by the stage.
    ///
    /// # Errors
    /// [`DisplayListError::AlreadyAttached`] if the child is already in the
    /// tree; each node may appear at most once.
    pub fn add_child(&mut self, child: NodeHandle) -> Result<(), DisplayListError> {
        let mut node = child.borrow_mut();
        if node.base().parent != Parent::Detached {
            return Err(DisplayListError::AlreadyAttached {
                index: node.base().object_index(),
            });
        }
        node.base_mut().parent = Parent::Stage;
        drop(node);
        self.children.push(child);
        Ok(())
    }

    /// Removes a child from the child list and clears its parent link.
    ///
    /// The object is not destroyed — it merely stops participating in
    /// rendering and dispatch; ownership of its remaining lifetime reverts
    /// to the caller.
    ///
    /// # Errors
    /// [`DisplayListError::ChildNotFound`] if the child is not a direct
    /// child of the stage. This propagates; it is never swallowed.
    pub fn remove_child(&mut self, child: &NodeHandle) -> Result<(), DisplayListError> {
        let index = child.borrow().base().object_index();
        let position = self
            .children
            .iter()
            .position(|c| c.borrow().base().object_index() == index)
            .ok_or(DisplayListError::ChildNotFound { index })?;
        let removed = self.children.remove(position);
        removed.borrow_mut().base_mut().parent = Parent::Detached;
        Ok(())
    }

    /// The number of direct children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    // --- Render loop ---

    /// Runs one render tick over the given surface.
    ///
    /// Opens the frame, applies the antialiasing hint, paints or erases the
    /// full background rectangle (exactly one of the two), draws the
    /// children in insertion order — later-inserted children paint over
    /// earlier ones — and closes the frame. Children without the drawable
    /// capability are skipped silently.
    pub fn run_frame(&mut self, surface: &mut dyn RenderSurface) {
        surface.begin_frame();
        surface.set_antialiasing(self.use_antialiasing);

        let (w, h) = (self.width as f64, self.height as f64);
        match &self.background_color {
            Some(paint) => surface.fill_rect(0.0, 0.0, w, h, resolve_paint(Some(paint))),
            None => surface.erase_rect(0.0, 0.0, w, h),
        }

        for child in &self.children {
            let node = child.borrow();
            if let Some(drawable) = node.as_drawable() {
                drawable.draw(surface);
            }
        }

        surface.end_frame();
    }

    // --- Mouse dispatch ---

    /// Dispatches a pointer event into the tree.
    ///
    /// Children are traversed in reverse insertion order — the topmost
    /// painted child is hit-tested first, so stacking order decides who wins
    /// when siblings overlap. Each hit-testable child receives its own copy
    /// of the accumulated transform; the traversal stops at the first child
    /// whose hit-test returns `true`. If nobody accepts, the event is
    /// dropped silently.
    ///
    /// Hand-cursor requests raised during the traversal are folded back into
    /// [`use_hand_cursor`](Stage::use_hand_cursor) afterwards.
    pub fn dispatch_mouse(&mut self, event: &mut MouseEvent, transform: Transform2D) {
        let mut ctx = HitContext {
            use_hand_cursor: self.use_hand_cursor,
        };

        for child in self.children.iter().rev() {
            let mut node = child.borrow_mut();
            if let Some(target) = node.as_hit_testable() {
                // `transform` is Copy: every child gets an independent value,
                // so a callee's mutation cannot leak to the next sibling.
                if target.hit_test(event, transform, &mut ctx) {
                    log::trace!("{} consumed by {:?}", event.kind.as_str(), event.target);
                    break;
                }
            }
        }

        self.use_hand_cursor = ctx.use_hand_cursor;
    }

    // --- Keyboard dispatch ---

    /// Registers a listener for a keyboard event kind.
    ///
    /// The registry is a flat ordered list, not a map: several listeners may
    /// register for the same kind and all of them fire, in registration
    /// order. Only keyboard kinds exist — pointer events are dispatched
    /// structurally through the tree, never through this registry.
    pub fn add_event_listener(&mut self, kind: KeyboardEventKind, listener: KeyboardListener) {
        self.keyboard_listeners.push((kind, listener));
    }

    /// Removes the first registry entry matching both the kind and the
    /// listener identity. Missing entries are ignored; duplicate
    /// registrations are removed one per call.
    pub fn remove_event_listener(&mut self, kind: KeyboardEventKind, listener: &KeyboardListener) {
        if let Some(position) = self
            .keyboard_listeners
            .iter()
            .position(|(k, l)| *k == kind && Rc::ptr_eq(l, listener))
        {
            self.keyboard_listeners.remove(position);
        }
    }

    /// Broadcasts a keyboard event to every matching listener.
    ///
    /// Unlike mouse dispatch there is no early termination: every entry
    /// whose kind matches fires, in registration order.
    pub fn dispatch_keyboard(&self, event: &KeyboardEvent) {
        for (kind, listener) in &self.keyboard_listeners {
            if *kind == event.kind {
                listener(event);
            }
        }
    }

    /// Convenience wrapper: builds the event and broadcasts it.
    pub fn dispatch_key(
        &self,
        kind: KeyboardEventKind,
        key_code: crate::keycode::KeyCode,
        key_text: String,
    ) {
        self.dispatch_keyboard(&KeyboardEvent {
            kind,
            key_code,
            key_text,
        });
    }

    /// Entry point used by the driver for pointer events: applies the
    /// cursor-affordance protocol around dispatch for pointer moves.
    ///
    /// Returns the new hand-cursor state so the driver can switch the
    /// platform cursor.
    pub fn enter_mouse_event(&mut self, event: &mut MouseEvent) -> bool {
        if event.kind == MouseEventKind::MouseMove {
            self.use_hand_cursor = false;
        }
        self.dispatch_mouse(event, Transform2D::IDENTITY);
        self.use_hand_cursor
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayObject, HitTestable, ObjectBase, RectShape, Sprite};
    use crate::keycode::KeyCode;
    use crate::math::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    // A surface that records every call it receives.
    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Begin,
        End,
        Antialias(bool),
        Fill(f64, f64, f64, f64, Rgba),
        Erase(f64, f64, f64, f64),
        Save,
        Restore,
        Translate(f64, f64),
        Scale(f64, f64),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl RenderSurface for RecordingSurface {
        fn begin_frame(&mut self) {
            self.ops.push(Op::Begin);
        }
        fn end_frame(&mut self) {
            self.ops.push(Op::End);
        }
        fn set_antialiasing(&mut self, enabled: bool) {
            self.ops.push(Op::Antialias(enabled));
        }
        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
            self.ops.push(Op::Fill(x, y, w, h, color));
        }
        fn erase_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::Erase(x, y, w, h));
        }
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn translate(&mut self, dx: f64, dy: f64) {
            self.ops.push(Op::Translate(dx, dy));
        }
        fn scale(&mut self, sx: f64, sy: f64) {
            self.ops.push(Op::Scale(sx, sy));
        }
    }

    // A probe node that records hit-test invocations and optionally accepts.
    struct Probe {
        base: ObjectBase,
        accepts: bool,
        log: Rc<RefCell<Vec<u64>>>,
        seen_transform: Rc<RefCell<Vec<Transform2D>>>,
        mutate_transform: bool,
    }

    impl Probe {
        fn new(accepts: bool, log: Rc<RefCell<Vec<u64>>>) -> Self {
            Self {
                base: ObjectBase::new(),
                accepts,
                log,
                seen_transform: Rc::new(RefCell::new(Vec::new())),
                mutate_transform: false,
            }
        }
    }

    impl DisplayObject for Probe {
        fn base(&self) -> &ObjectBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ObjectBase {
            &mut self.base
        }
        fn as_hit_testable(&mut self) -> Option<&mut dyn HitTestable> {
            Some(self)
        }
    }

    impl HitTestable for Probe {
        fn hit_test(
            &mut self,
            event: &mut MouseEvent,
            mut transform: Transform2D,
            _ctx: &mut HitContext,
        ) -> bool {
            self.log.borrow_mut().push(self.base.object_index());
            self.seen_transform.borrow_mut().push(transform);
            if self.mutate_transform {
                // A buggy callee trying to leak state across siblings.
                transform.x += 1000.0;
                transform.scale_x *= 50.0;
            }
            if self.accepts {
                event.target = Some(self.base.object_index());
            }
            self.accepts
        }
    }

    fn rect(w: f64, h: f64, color: Rgba) -> Rc<RefCell<RectShape>> {
        Rc::new(RefCell::new(RectShape::new(w, h, color.into())))
    }

    #[test]
    fn background_unset_erases_never_fills() {
        let mut stage = Stage::new();
        stage.configure_surface(16, 640, 480);
        let mut surface = RecordingSurface::default();
        stage.run_frame(&mut surface);

        assert_eq!(
            surface.ops,
            vec![
                Op::Begin,
                Op::Antialias(true),
                Op::Erase(0.0, 0.0, 640.0, 480.0),
                Op::End
            ]
        );
    }

    #[test]
    fn background_set_fills_never_erases() {
        let mut stage = Stage::new();
        stage.configure_surface(16, 640, 480);
        stage.background_color = Some(Paint::named("black"));
        let mut surface = RecordingSurface::default();
        stage.run_frame(&mut surface);

        assert_eq!(
            surface.ops,
            vec![
                Op::Begin,
                Op::Antialias(true),
                Op::Fill(0.0, 0.0, 640.0, 480.0, Rgba::BLACK),
                Op::End
            ]
        );
    }

    #[test]
    fn paint_order_is_insertion_order() {
        let mut stage = Stage::new();
        stage.configure_surface(16, 100, 100);
        stage.add_child(rect(10.0, 10.0, Rgba::RED)).unwrap();
        stage.add_child(rect(10.0, 10.0, Rgba::GREEN)).unwrap();
        stage.add_child(rect(10.0, 10.0, Rgba::BLUE)).unwrap();

        let mut surface = RecordingSurface::default();
        stage.run_frame(&mut surface);

        let fills: Vec<Rgba> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(_, _, _, _, c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE]);
    }

    #[test]
    fn non_drawable_children_are_skipped_silently() {
        let mut stage = Stage::new();
        stage.configure_surface(16, 100, 100);
        let log = Rc::new(RefCell::new(Vec::new()));
        stage
            .add_child(Rc::new(RefCell::new(Probe::new(false, log))))
            .unwrap();

        let mut surface = RecordingSurface::default();
        stage.run_frame(&mut surface);
        // Just the frame scaffolding; the probe paints nothing.
        assert_eq!(
            surface.ops,
            vec![
                Op::Begin,
                Op::Antialias(true),
                Op::Erase(0.0, 0.0, 100.0, 100.0),
                Op::End
            ]
        );
    }

    #[test]
    fn first_hit_wins_and_lower_siblings_are_never_probed() {
        let mut stage = Stage::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::new(RefCell::new(Probe::new(false, log.clone())));
        let second = Rc::new(RefCell::new(Probe::new(true, log.clone())));
        let third = Rc::new(RefCell::new(Probe::new(true, log.clone())));
        let third_index = third.borrow().base().object_index();

        stage.add_child(first).unwrap();
        stage.add_child(second).unwrap();
        stage.add_child(third.clone()).unwrap();

        let mut event = MouseEvent::new(MouseEventKind::MouseDown, 5.0, 5.0);
        stage.dispatch_mouse(&mut event, Transform2D::IDENTITY);

        // Topmost (last-inserted) accepts; the second — which would also
        // have accepted — is never consulted.
        assert_eq!(*log.borrow(), vec![third_index]);
        assert_eq!(event.target, Some(third_index));
    }

    #[test]
    fn hit_test_order_is_reverse_of_insertion() {
        let mut stage = Stage::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut indices = Vec::new();
        for _ in 0..3 {
            let probe = Rc::new(RefCell::new(Probe::new(false, log.clone())));
            indices.push(probe.borrow().base().object_index());
            stage.add_child(probe).unwrap();
        }

        let mut event = MouseEvent::new(MouseEventKind::MouseUp, 0.0, 0.0);
        stage.dispatch_mouse(&mut event, Transform2D::IDENTITY);

        let reversed: Vec<u64> = indices.into_iter().rev().collect();
        assert_eq!(*log.borrow(), reversed);
        assert_eq!(event.target, None);
    }

    #[test]
    fn transform_mutation_cannot_leak_across_siblings() {
        let mut stage = Stage::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut mutator = Probe::new(false, log.clone());
        mutator.mutate_transform = true;
        let sibling = Probe::new(false, log.clone());
        let seen = sibling.seen_transform.clone();

        // Mutator is on top, so it is probed first and mutates its copy.
        stage.add_child(Rc::new(RefCell::new(sibling))).unwrap();
        stage.add_child(Rc::new(RefCell::new(mutator))).unwrap();

        let mut event = MouseEvent::new(MouseEventKind::MouseMove, 0.0, 0.0);
        stage.dispatch_mouse(&mut event, Transform2D::IDENTITY);

        assert_eq!(*seen.borrow(), vec![Transform2D::IDENTITY]);
    }

    #[test]
    fn add_remove_round_trip_restores_the_list() {
        let mut stage = Stage::new();
        let keep = rect(5.0, 5.0, Rgba::RED);
        let child = rect(5.0, 5.0, Rgba::GREEN);
        stage.add_child(keep).unwrap();

        let handle: NodeHandle = child.clone();
        stage.add_child(handle.clone()).unwrap();
        assert_eq!(stage.num_children(), 2);
        assert_eq!(child.borrow().base().parent, Parent::Stage);

        stage.remove_child(&handle).unwrap();
        assert_eq!(stage.num_children(), 1);
        assert_eq!(child.borrow().base().parent, Parent::Detached);

        let err = stage.remove_child(&handle).unwrap_err();
        assert_eq!(
            err,
            DisplayListError::ChildNotFound {
                index: child.borrow().base().object_index()
            }
        );
    }

    #[test]
    fn double_add_is_a_typed_error() {
        let mut stage = Stage::new();
        let child = rect(5.0, 5.0, Rgba::RED);
        let handle: NodeHandle = child.clone();
        stage.add_child(handle.clone()).unwrap();
        let err = stage.add_child(handle).unwrap_err();
        assert!(matches!(err, DisplayListError::AlreadyAttached { .. }));
        assert_eq!(stage.num_children(), 1);
    }

    #[test]
    fn keyboard_broadcast_fires_all_matching_listeners_in_order() {
        let mut stage = Stage::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = order.clone();
        let o2 = order.clone();
        let o3 = order.clone();
        stage.add_event_listener(
            KeyboardEventKind::KeyDown,
            Rc::new(move |_e| o1.borrow_mut().push("first")),
        );
        stage.add_event_listener(
            KeyboardEventKind::KeyDown,
            Rc::new(move |_e| o2.borrow_mut().push("second")),
        );
        stage.add_event_listener(
            KeyboardEventKind::KeyUp,
            Rc::new(move |_e| o3.borrow_mut().push("up")),
        );

        stage.dispatch_key(KeyboardEventKind::KeyDown, KeyCode::Space, " ".into());

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn listeners_receive_key_code_and_text() {
        let mut stage = Stage::new();
        let received = Rc::new(RefCell::new(None));
        let r = received.clone();
        stage.add_event_listener(
            KeyboardEventKind::KeyDown,
            Rc::new(move |e: &KeyboardEvent| {
                *r.borrow_mut() = Some((e.key_code, e.key_text.clone()));
            }),
        );

        stage.dispatch_key(KeyboardEventKind::KeyDown, KeyCode::KeyA, "a".into());
        assert_eq!(*received.borrow(), Some((KeyCode::KeyA, "a".to_string())));
    }

    #[test]
    fn remove_event_listener_matches_kind_and_identity() {
        let mut stage = Stage::new();
        let count = Rc::new(Cell::new(0u32));

        let c = count.clone();
        let listener: KeyboardListener = Rc::new(move |_e| c.set(c.get() + 1));

        // Registered twice: duplicates are allowed, both fire.
        stage.add_event_listener(KeyboardEventKind::KeyDown, listener.clone());
        stage.add_event_listener(KeyboardEventKind::KeyDown, listener.clone());
        stage.dispatch_key(KeyboardEventKind::KeyDown, KeyCode::Enter, String::new());
        assert_eq!(count.get(), 2);

        // Wrong kind: nothing removed.
        stage.remove_event_listener(KeyboardEventKind::KeyUp, &listener);
        // Right kind: one of the two entries removed.
        stage.remove_event_listener(KeyboardEventKind::KeyDown, &listener);
        stage.dispatch_key(KeyboardEventKind::KeyDown, KeyCode::Enter, String::new());
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn set_frame_rate_is_noop_without_timer() {
        let mut stage = Stage::new();
        stage.configure_surface(16, 100, 100);
        stage.set_frame_rate(100);
        assert_eq!(stage.speed(), 16);
    }

    #[test]
    fn set_frame_rate_updates_stored_speed_and_live_timer() {
        let mut stage = Stage::new();
        stage.configure_surface(16, 100, 100);
        let timer = Rc::new(FrameTimer::new(Duration::from_millis(16)));
        stage.install_timer(timer.clone());

        stage.set_frame_rate(40);
        assert_eq!(stage.speed(), 40);
        assert_eq!(timer.interval(), Duration::from_millis(40));
    }

    #[test]
    fn pointer_move_recomputes_hand_cursor() {
        let mut stage = Stage::new();
        let mut hot = RectShape::new(50.0, 50.0, Rgba::RED.into());
        hot.use_hand_cursor = true;
        stage.add_child(Rc::new(RefCell::new(hot))).unwrap();

        let mut over = MouseEvent::new(MouseEventKind::MouseMove, 10.0, 10.0);
        assert!(stage.enter_mouse_event(&mut over));
        assert!(stage.use_hand_cursor);

        let mut away = MouseEvent::new(MouseEventKind::MouseMove, 500.0, 500.0);
        assert!(!stage.enter_mouse_event(&mut away));
        assert!(!stage.use_hand_cursor);
    }

    #[test]
    fn dispatch_recurses_through_containers() {
        let mut stage = Stage::new();
        let mut sprite = Sprite::at(100.0, 0.0);
        let inner = rect(10.0, 10.0, Rgba::BLUE);
        let inner_index = inner.borrow().base().object_index();
        sprite.add_child(inner).unwrap();
        stage.add_child(Rc::new(RefCell::new(sprite))).unwrap();

        let mut event = MouseEvent::new(MouseEventKind::MouseDown, 105.0, 5.0);
        stage.dispatch_mouse(&mut event, Transform2D::IDENTITY);
        assert_eq!(event.target, Some(inner_index));
    }
}
