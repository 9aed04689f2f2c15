//! Network components: pipes and flow-control nodes.
//!
//! A [`Component`] is a tagged union. Variant-specific state lives on the
//! variant itself, so a pipe never carries a flow flag and a node never
//! carries a repairable status. The core holds no rendering handle; a
//! renderer maps [`ComponentId`] to its own visuals.

use serde::{Deserialize, Serialize};

use crate::id::ComponentId;

/// Repair state of a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeStatus {
    Healthy,
    Damaged,
}

/// Discriminant tag for component variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Pipe,
    Node,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Pipe => write!(f, "pipe"),
            ComponentKind::Node => write!(f, "node"),
        }
    }
}

/// A repairable pipe segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    pub id: ComponentId,
    pub status: PipeStatus,
}

/// A valve / junction whose flow the learner can toggle. Nodes are always
/// healthy in this model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub id: ComponentId,
    pub flow_active: bool,
}

/// A single entity in the simulated network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Pipe(Pipe),
    Node(Node),
}

impl Component {
    pub fn id(&self) -> ComponentId {
        match self {
            Component::Pipe(p) => p.id,
            Component::Node(n) => n.id,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Pipe(_) => ComponentKind::Pipe,
            Component::Node(_) => ComponentKind::Node,
        }
    }

    /// Shared status. Nodes report `Healthy`.
    pub fn status(&self) -> PipeStatus {
        match self {
            Component::Pipe(p) => p.status,
            Component::Node(_) => PipeStatus::Healthy,
        }
    }

    pub fn as_pipe(&self) -> Option<&Pipe> {
        match self {
            Component::Pipe(p) => Some(p),
            Component::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Component::Node(n) => Some(n),
            Component::Pipe(_) => None,
        }
    }

    pub(crate) fn as_pipe_mut(&mut self) -> Option<&mut Pipe> {
        match self {
            Component::Pipe(p) => Some(p),
            Component::Node(_) => None,
        }
    }

    pub(crate) fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Component::Node(n) => Some(n),
            Component::Pipe(_) => None,
        }
    }

    /// True for a pipe in the `Damaged` state.
    pub fn is_damaged_pipe(&self) -> bool {
        matches!(
            self,
            Component::Pipe(Pipe {
                status: PipeStatus::Damaged,
                ..
            })
        )
    }
}

/// Renderer-facing position carried through from configuration. The core
/// never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
}

/// Declarative description of one component in the topology.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub placement: Placement,
    /// Initial status for pipes. Ignored for nodes.
    pub status: PipeStatus,
    /// Initial flow flag for nodes. Ignored for pipes.
    pub flow_active: bool,
}

impl ComponentSpec {
    /// A pipe spec at the given position.
    pub fn pipe(id: u32, status: PipeStatus, x: f64, y: f64) -> Self {
        Self {
            id: ComponentId(id),
            kind: ComponentKind::Pipe,
            placement: Placement { x, y },
            status,
            flow_active: false,
        }
    }

    /// A node spec at the given position.
    pub fn node(id: u32, flow_active: bool, x: f64, y: f64) -> Self {
        Self {
            id: ComponentId(id),
            kind: ComponentKind::Node,
            placement: Placement { x, y },
            status: PipeStatus::Healthy,
            flow_active,
        }
    }

    /// Build the live component this spec describes.
    pub fn build(&self) -> Component {
        match self.kind {
            ComponentKind::Pipe => Component::Pipe(Pipe {
                id: self.id,
                status: self.status,
            }),
            ComponentKind::Node => Component::Node(Node {
                id: self.id,
                flow_active: self.flow_active,
            }),
        }
    }
}
