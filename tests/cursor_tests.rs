// Host-side tests for the cursor tracker and spring follower.

#![allow(dead_code)]
mod model {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod cursor {
        include!("../src/core/cursor.rs");
    }
}

use glam::Vec2;
use model::constants::*;
use model::cursor::*;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME: f32 = 1.0 / 60.0;

fn tracker_with(nodes: &[(NodeId, CapabilitySet)]) -> CursorTracker {
    let mut t = CursorTracker::new();
    for &(id, caps) in nodes {
        t.register(id, caps);
    }
    t
}

#[test]
fn classify_requires_rendered_text_for_text_hover() {
    assert_eq!(classify(true, false, None), CapabilitySet::INTERACTIVE);
    assert_eq!(classify(false, true, Some("About me")), CapabilitySet::TEXT);
    assert_eq!(classify(false, true, Some("  \n ")), CapabilitySet::NONE);
    assert_eq!(classify(false, true, None), CapabilitySet::NONE);
    assert_eq!(classify(true, true, Some("Send")), CapabilitySet::ALL);
}

#[test]
fn capability_set_operations() {
    let caps = CapabilitySet::NONE.with(Capability::Text);
    assert!(caps.contains(Capability::Text));
    assert!(!caps.contains(Capability::Interactive));
    assert!(caps.intersect(CapabilitySet::INTERACTIVE).is_empty());
    assert_eq!(CapabilitySet::ALL.intersect(caps), CapabilitySet::TEXT);
}

#[test]
fn enter_and_leave_drive_the_flags() {
    let mut t = tracker_with(&[(1, CapabilitySet::INTERACTIVE), (2, CapabilitySet::TEXT)]);
    assert_eq!(t.state(), CursorState::default());

    assert!(t.pointer_entered(1));
    assert!(t.state().hovering_interactive);
    assert!(!t.state().hovering_text);

    assert!(t.pointer_entered(2));
    assert!(t.state().hovering_text);

    assert!(t.pointer_left(1));
    assert!(!t.state().hovering_interactive);
    assert!(t.pointer_left(2));
    assert_eq!(t.state(), CursorState::default());
}

#[test]
fn nested_targets_keep_the_flag_until_the_last_leave() {
    let mut t = tracker_with(&[(1, CapabilitySet::TEXT), (2, CapabilitySet::TEXT)]);
    assert!(t.pointer_entered(1));
    assert!(!t.pointer_entered(2));
    assert!(!t.pointer_left(2));
    assert!(t.state().hovering_text);
    assert!(t.pointer_left(1));
    assert!(!t.state().hovering_text);
}

#[test]
fn untracked_nodes_are_ignored() {
    let mut t = tracker_with(&[(1, CapabilitySet::INTERACTIVE)]);
    assert!(!t.pointer_entered(42));
    assert!(!t.pointer_left(42));
    assert_eq!(t.state(), CursorState::default());
}

#[test]
fn removing_a_hovered_node_clears_its_flag() {
    let mut t = tracker_with(&[(1, CapabilitySet::INTERACTIVE)]);
    t.pointer_entered(1);
    t.apply(&NodeChange::<()>::Removed { id: 1 });
    assert!(!t.state().hovering_interactive);
    assert_eq!(t.tracked(), 0);
    // a leave arriving after removal is harmless
    assert!(!t.pointer_left(1));
}

#[test]
fn registering_without_capabilities_forgets_the_node() {
    let mut t = tracker_with(&[(1, CapabilitySet::TEXT)]);
    t.pointer_entered(1);
    t.register(1, CapabilitySet::NONE);
    assert_eq!(t.tracked(), 0);
    assert!(!t.state().hovering_text);
}

#[test]
fn pointer_moves_ignore_non_finite_coordinates() {
    let mut t = CursorTracker::new();
    t.pointer_moved(120.0, 80.0);
    t.pointer_moved(f32::NAN, 10.0);
    assert_eq!(t.state().position, Vec2::new(120.0, 80.0));
}

// Stands in for the DOM mutation observer.
#[derive(Default)]
struct FakeWatch {
    present: Vec<(NodeId, &'static str, CapabilitySet)>,
    sink: Option<Box<dyn FnMut(NodeChange<&'static str>)>>,
    wanted: CapabilitySet,
}

impl FakeWatch {
    fn emit(&mut self, change: NodeChange<&'static str>) {
        let change = match change {
            NodeChange::Added { id, node, caps } => {
                let caps = caps.intersect(self.wanted);
                if caps.is_empty() {
                    return;
                }
                NodeChange::Added { id, node, caps }
            }
            removed => removed,
        };
        if let Some(sink) = self.sink.as_mut() {
            sink(change);
        }
    }
}

impl NodeWatch for FakeWatch {
    type Node = &'static str;

    fn watch(
        &mut self,
        wanted: CapabilitySet,
        sink: Box<dyn FnMut(NodeChange<Self::Node>)>,
    ) -> anyhow::Result<()> {
        self.wanted = wanted;
        self.sink = Some(sink);
        for (id, node, caps) in std::mem::take(&mut self.present) {
            self.emit(NodeChange::Added { id, node, caps });
        }
        Ok(())
    }
}

#[test]
fn tracker_follows_a_node_watch() {
    let tracker = Rc::new(RefCell::new(CursorTracker::new()));
    let mut watch = FakeWatch {
        present: vec![
            (1, "a.nav", CapabilitySet::INTERACTIVE),
            (2, "p.bio", CapabilitySet::TEXT),
        ],
        ..Default::default()
    };
    let sink_tracker = tracker.clone();
    watch
        .watch(
            CapabilitySet::ALL,
            Box::new(move |change| sink_tracker.borrow_mut().apply(&change)),
        )
        .unwrap();
    assert_eq!(tracker.borrow().tracked(), 2);

    // a card button rendered after mount
    watch.emit(NodeChange::Added {
        id: 3,
        node: "button.card",
        caps: CapabilitySet::INTERACTIVE,
    });
    assert!(tracker.borrow_mut().pointer_entered(3));
    assert!(tracker.borrow().state().hovering_interactive);

    watch.emit(NodeChange::Removed { id: 3 });
    assert!(!tracker.borrow().state().hovering_interactive);
    assert_eq!(tracker.borrow().tracked(), 2);
}

#[test]
fn node_watch_filters_to_wanted_capabilities() {
    let tracker = Rc::new(RefCell::new(CursorTracker::new()));
    let mut watch = FakeWatch {
        present: vec![(1, "a", CapabilitySet::INTERACTIVE), (2, "h2", CapabilitySet::TEXT)],
        ..Default::default()
    };
    let sink_tracker = tracker.clone();
    watch
        .watch(
            CapabilitySet::TEXT,
            Box::new(move |change| sink_tracker.borrow_mut().apply(&change)),
        )
        .unwrap();
    assert_eq!(tracker.borrow().tracked(), 1);
    assert!(!tracker.borrow_mut().pointer_entered(1));
}

#[test]
fn hover_targets_prefer_interactive() {
    let idle = CursorState::default();
    assert_eq!(hover_targets(&idle), (1.0, 1.0, CURSOR_TRAIL_OPACITY_IDLE));

    let text = CursorState {
        hovering_text: true,
        ..idle
    };
    assert_eq!(
        hover_targets(&text),
        (CURSOR_DOT_SCALE_TEXT, CURSOR_TRAIL_SCALE_TEXT, CURSOR_TRAIL_OPACITY_TEXT)
    );

    let both = CursorState {
        hovering_interactive: true,
        hovering_text: true,
        ..idle
    };
    let (dot, trail, opacity) = hover_targets(&both);
    assert_eq!(dot, CURSOR_DOT_SCALE_INTERACTIVE);
    assert_eq!(trail, CURSOR_TRAIL_SCALE_INTERACTIVE);
    assert_eq!(opacity, CURSOR_TRAIL_OPACITY_TEXT);
}

#[test]
fn spring_snaps_to_its_first_target() {
    let mut s = Spring::<f32>::default();
    assert_eq!(s.step(42.0, &DOT_SPRING, FRAME), 42.0);
    assert_eq!(s.value(), 42.0);
}

#[test]
fn springs_settle_on_the_target() {
    for params in [DOT_SPRING, TRAIL_SPRING] {
        let mut s = Spring::<f32>::default();
        s.step(0.0, &params, FRAME);
        for _ in 0..120 {
            let v = s.step(100.0, &params, FRAME);
            assert!(v.is_finite());
            assert!(v <= 100.5, "overshoot {v} with {params:?}");
        }
        assert!((s.value() - 100.0).abs() < 0.5, "{params:?} ended at {}", s.value());
    }
}

#[test]
fn long_frames_are_clamped() {
    let mut s = Spring::<f32>::default();
    s.step(0.0, &DOT_SPRING, FRAME);
    let v = s.step(100.0, &DOT_SPRING, 10.0);
    assert!(v > 10.0 && v < 90.0, "moved to {v}");
    assert_eq!(s.step(100.0, &DOT_SPRING, 0.0), v);
    assert_eq!(s.step(100.0, &DOT_SPRING, f32::NAN), v);
}

#[test]
fn follower_centres_sprites_on_the_pointer() {
    let mut f = CursorFollower::new();
    let state = CursorState {
        position: Vec2::new(100.0, 50.0),
        ..Default::default()
    };
    let v = f.step(&state, FRAME);
    assert_eq!((v.dot.x, v.dot.y), (100.0 - CURSOR_DOT_OFFSET, 50.0 - CURSOR_DOT_OFFSET));
    assert_eq!(
        (v.trail.x, v.trail.y),
        (100.0 - CURSOR_TRAIL_OFFSET, 50.0 - CURSOR_TRAIL_OFFSET)
    );
    assert_eq!(v.dot.scale, 1.0);
    assert_eq!(v.dot.opacity, 1.0);
    assert_eq!(v.trail.opacity, CURSOR_TRAIL_OPACITY_IDLE);
}

#[test]
fn follower_grows_over_interactive_targets() {
    let mut f = CursorFollower::new();
    let mut state = CursorState::default();
    f.step(&state, FRAME);
    state.hovering_interactive = true;

    let mut v = f.step(&state, FRAME);
    assert!(v.dot.scale > 1.0 && v.dot.scale < CURSOR_DOT_SCALE_INTERACTIVE);
    for _ in 0..120 {
        v = f.step(&state, FRAME);
    }
    assert!((v.dot.scale - CURSOR_DOT_SCALE_INTERACTIVE).abs() < 1e-2);
    assert!((v.trail.scale - CURSOR_TRAIL_SCALE_INTERACTIVE).abs() < 1e-2);
    assert!(v.trail.opacity >= 0.0 && v.trail.opacity <= 1.0);
}

// Identity-compared stand-in for a DOM element.
#[derive(Clone, Debug, PartialEq)]
struct Element(u32);

#[test]
fn registry_issues_and_keeps_ids() {
    let mut registry = NodeRegistry::new();
    let a = Element(1);
    let (id, restamp) = registry.claim(None, &a);
    assert!(restamp);
    assert_eq!(registry.claim(Some(id), &a), (id, false));
    assert_eq!(registry.len(), 1);
}

#[test]
fn cloned_stamp_gets_a_fresh_id() {
    let mut registry = NodeRegistry::new();
    let original = Element(1);
    let (id, _) = registry.claim(None, &original);

    // a copy of the markup carries the original's stamp
    let copy = Element(2);
    let (copy_id, restamp) = registry.claim(Some(id), &copy);
    assert_ne!(copy_id, id);
    assert!(restamp);

    // removing the copy leaves the original tracked
    assert_eq!(registry.release(Some(copy_id), &copy), Some(copy_id));
    assert_eq!(registry.release(Some(id), &copy), None);
    assert_eq!(registry.claim(Some(id), &original), (id, false));
    assert_eq!(registry.len(), 1);
}

#[test]
fn cloned_target_keeps_the_original_hoverable() {
    let mut registry = NodeRegistry::new();
    let mut tracker = CursorTracker::new();
    let original = Element(1);
    let (id, _) = registry.claim(None, &original);
    tracker.register(id, CapabilitySet::INTERACTIVE);

    let copy = Element(2);
    let (copy_id, _) = registry.claim(Some(id), &copy);
    tracker.register(copy_id, CapabilitySet::INTERACTIVE);
    if let Some(gone) = registry.release(Some(copy_id), &copy) {
        tracker.forget(gone);
    }

    assert_eq!(tracker.tracked(), 1);
    assert!(tracker.pointer_entered(id));
    assert!(tracker.state().hovering_interactive);
}

#[test]
fn moved_node_reclaims_its_stamp() {
    let mut registry = NodeRegistry::new();
    let a = Element(7);
    let (id, _) = registry.claim(None, &a);
    assert_eq!(registry.release(Some(id), &a), Some(id));
    assert!(registry.is_empty());
    assert_eq!(registry.claim(Some(id), &a), (id, false));
    // fresh ids never collide with a reclaimed one
    let (other, _) = registry.claim(None, &Element(8));
    assert_ne!(other, id);
}
