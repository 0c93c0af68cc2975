use super::constants::*;
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec2;
use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Interactive,
    Text,
}

impl Capability {
    #[inline]
    fn bit(self) -> u8 {
        match self {
            Capability::Interactive => 0b01,
            Capability::Text => 0b10,
        }
    }
}

/// Subset of {Interactive, Text} carried by a tracked node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const NONE: Self = Self(0);
    pub const INTERACTIVE: Self = Self(0b01);
    pub const TEXT: Self = Self(0b10);
    pub const ALL: Self = Self(0b11);

    #[inline]
    pub fn contains(self, cap: Capability) -> bool {
        self.0 & cap.bit() != 0
    }

    #[inline]
    pub fn with(self, cap: Capability) -> Self {
        Self(self.0 | cap.bit())
    }

    #[inline]
    pub fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Capabilities of a node given which selector lists it matched.
///
/// Text hover only applies to nodes that actually render text.
pub fn classify(
    matches_interactive: bool,
    matches_text: bool,
    text: Option<&str>,
) -> CapabilitySet {
    let mut caps = CapabilitySet::NONE;
    if matches_interactive {
        caps = caps.with(Capability::Interactive);
    }
    if matches_text && text.map(|t| !t.trim().is_empty()).unwrap_or(false) {
        caps = caps.with(Capability::Text);
    }
    caps
}

pub type NodeId = u32;

#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange<N> {
    Added {
        id: NodeId,
        node: N,
        caps: CapabilitySet,
    },
    Removed {
        id: NodeId,
    },
}

/// Ids for watched nodes.
///
/// Ids are stamped onto the nodes themselves, and stamps get copied along
/// with cloned markup. A stamped id is only reused by the node it was issued
/// to; any other node presenting it gets a fresh id.
#[derive(Debug)]
pub struct NodeRegistry<N> {
    next: NodeId,
    nodes: FnvHashMap<NodeId, N>,
}

impl<N> Default for NodeRegistry<N> {
    fn default() -> Self {
        Self {
            next: 1,
            nodes: FnvHashMap::default(),
        }
    }
}

impl<N: Clone + PartialEq> NodeRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `node` given the id stamped on it, if any. The flag is true
    /// when the caller must stamp the returned id onto the node.
    pub fn claim(&mut self, stamped: Option<NodeId>, node: &N) -> (NodeId, bool) {
        if let Some(id) = stamped {
            match self.nodes.get(&id) {
                Some(owner) if owner == node => return (id, false),
                None => {
                    self.nodes.insert(id, node.clone());
                    return (id, false);
                }
                Some(_) => {}
            }
        }
        let mut id = self.next;
        while id == 0 || self.nodes.contains_key(&id) {
            id = id.wrapping_add(1);
        }
        self.next = id.wrapping_add(1);
        self.nodes.insert(id, node.clone());
        (id, true)
    }

    /// Drop `node`'s id if it owns the stamped one.
    pub fn release(&mut self, stamped: Option<NodeId>, node: &N) -> Option<NodeId> {
        let id = stamped?;
        if self.nodes.get(&id) != Some(node) {
            return None;
        }
        self.nodes.remove(&id);
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Subscription to nodes carrying hover capabilities.
///
/// Implementations report every matching node present when `watch` is called
/// as `Added`, then keep reporting nodes added to or removed from the view
/// until they are dropped.
pub trait NodeWatch {
    type Node;

    fn watch(
        &mut self,
        wanted: CapabilitySet,
        sink: Box<dyn FnMut(NodeChange<Self::Node>)>,
    ) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub position: Vec2,
    pub hovering_interactive: bool,
    pub hovering_text: bool,
}

/// Pointer position plus hover flags derived from enter/leave events.
///
/// A flag is set while some node carrying that capability has been entered
/// without a matching leave. Nodes that disappear while hovered stop counting.
#[derive(Debug, Default)]
pub struct CursorTracker {
    position: Vec2,
    nodes: FnvHashMap<NodeId, CapabilitySet>,
    hovered: FnvHashSet<NodeId>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.position = Vec2::new(x, y);
        }
    }

    pub fn register(&mut self, id: NodeId, caps: CapabilitySet) {
        if caps.is_empty() {
            self.forget(id);
        } else {
            self.nodes.insert(id, caps);
        }
    }

    pub fn forget(&mut self, id: NodeId) {
        self.nodes.remove(&id);
        self.hovered.remove(&id);
    }

    pub fn apply<N>(&mut self, change: &NodeChange<N>) {
        match change {
            NodeChange::Added { id, caps, .. } => self.register(*id, *caps),
            NodeChange::Removed { id } => self.forget(*id),
        }
    }

    /// Returns true if the hover flags changed.
    pub fn pointer_entered(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        let before = self.state();
        self.hovered.insert(id);
        before != self.state()
    }

    /// Returns true if the hover flags changed.
    pub fn pointer_left(&mut self, id: NodeId) -> bool {
        let before = self.state();
        self.hovered.remove(&id);
        before != self.state()
    }

    pub fn tracked(&self) -> usize {
        self.nodes.len()
    }

    fn hovering(&self, cap: Capability) -> bool {
        self.hovered
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .any(|caps| caps.contains(cap))
    }

    pub fn state(&self) -> CursorState {
        CursorState {
            position: self.position,
            hovering_interactive: self.hovering(Capability::Interactive),
            hovering_text: self.hovering(Capability::Text),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

pub const DOT_SPRING: SpringParams = SpringParams {
    stiffness: CURSOR_DOT_STIFFNESS,
    damping: CURSOR_DOT_DAMPING,
    mass: CURSOR_DOT_MASS,
};

pub const TRAIL_SPRING: SpringParams = SpringParams {
    stiffness: CURSOR_TRAIL_STIFFNESS,
    damping: CURSOR_TRAIL_DAMPING,
    mass: CURSOR_TRAIL_MASS,
};

// Fixed integration step; stiff springs blow up with a whole 60 Hz frame.
const SPRING_SUBSTEP_SEC: f32 = 1.0 / 240.0;

/// Damped spring chasing a target value; snaps to the first target it sees.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spring<T> {
    value: T,
    velocity: T,
    initialized: bool,
}

impl<T> Spring<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    pub fn value(&self) -> T {
        self.value
    }

    pub fn step(&mut self, target: T, params: &SpringParams, dt_sec: f32) -> T {
        if !self.initialized {
            self.value = target;
            self.velocity = T::default();
            self.initialized = true;
            return target;
        }
        let dt = if dt_sec.is_finite() {
            dt_sec.clamp(0.0, CURSOR_MAX_STEP_SEC)
        } else {
            0.0
        };
        let substeps = (dt / SPRING_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        let mass = params.mass.max(1e-3);
        let k = params.stiffness / mass;
        let c = params.damping / mass;
        for _ in 0..substeps {
            let accel = (target - self.value) * k;
            // damping applied implicitly
            self.velocity = (self.velocity + accel * h) * (1.0 / (1.0 + c * h));
            self.value = self.value + self.velocity * h;
        }
        self.value
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorSprite {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorVisual {
    pub dot: CursorSprite,
    pub trail: CursorSprite,
}

/// Target (dot scale, trail scale, trail opacity) for the hover state.
///
/// Interactive hover wins over text hover when both apply.
pub fn hover_targets(state: &CursorState) -> (f32, f32, f32) {
    let (dot, trail) = if state.hovering_interactive {
        (CURSOR_DOT_SCALE_INTERACTIVE, CURSOR_TRAIL_SCALE_INTERACTIVE)
    } else if state.hovering_text {
        (CURSOR_DOT_SCALE_TEXT, CURSOR_TRAIL_SCALE_TEXT)
    } else {
        (1.0, 1.0)
    };
    let trail_opacity = if state.hovering_text {
        CURSOR_TRAIL_OPACITY_TEXT
    } else {
        CURSOR_TRAIL_OPACITY_IDLE
    };
    (dot, trail, trail_opacity)
}

/// Spring-smoothed dot and trailing ring following a [`CursorState`].
#[derive(Clone, Debug, Default)]
pub struct CursorFollower {
    dot_pos: Spring<Vec2>,
    dot_scale: Spring<f32>,
    trail_pos: Spring<Vec2>,
    trail_scale: Spring<f32>,
    trail_opacity: Spring<f32>,
}

impl CursorFollower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, state: &CursorState, dt_sec: f32) -> CursorVisual {
        let (dot_scale, trail_scale, trail_opacity) = hover_targets(state);
        let dot = self.dot_pos.step(
            state.position - Vec2::splat(CURSOR_DOT_OFFSET),
            &DOT_SPRING,
            dt_sec,
        );
        let trail = self.trail_pos.step(
            state.position - Vec2::splat(CURSOR_TRAIL_OFFSET),
            &TRAIL_SPRING,
            dt_sec,
        );
        CursorVisual {
            dot: CursorSprite {
                x: dot.x,
                y: dot.y,
                scale: self.dot_scale.step(dot_scale, &DOT_SPRING, dt_sec),
                opacity: 1.0,
            },
            trail: CursorSprite {
                x: trail.x,
                y: trail.y,
                scale: self.trail_scale.step(trail_scale, &TRAIL_SPRING, dt_sec),
                opacity: self
                    .trail_opacity
                    .step(trail_opacity, &TRAIL_SPRING, dt_sec)
                    .clamp(0.0, 1.0),
            },
        }
    }
}
