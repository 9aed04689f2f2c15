//! Read-only views for rendering and input collaborators.
//!
//! Snapshot types are owned copies; nothing here references internal
//! simulation storage. Geometry belongs to the renderer: the core answers
//! spatial queries only through a caller-supplied [`HitTest`].

use std::collections::HashMap;

use crate::component::{Component, Placement};
use crate::fixed::Fixed64;
use crate::health::HealthBand;
use crate::id::ComponentId;

/// One component together with its configured placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSnapshot {
    pub component: Component,
    pub placement: Placement,
}

/// Aggregate view of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub system_health: Fixed64,
    pub band: HealthBand,
    /// Declaration order.
    pub components: Vec<ComponentSnapshot>,
    pub all_pipes_repaired: bool,
}

impl GameState {
    /// Health rounded to a whole percentage, for display.
    pub fn health_percent(&self) -> u32 {
        self.system_health.round().to_num::<u32>()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components
            .iter()
            .map(|s| &s.component)
            .find(|c| c.id() == id)
    }
}

/// Renderer-owned geometry lookup.
pub trait HitTest {
    /// Whether the visual for `id` contains the point `(x, y)`.
    fn contains(&self, id: ComponentId, x: f64, y: f64) -> bool;
}

/// Axis-aligned rectangle in renderer space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// A `width` x `height` box centered on `placement`.
    pub fn centered(placement: Placement, width: f64, height: f64) -> Self {
        Self {
            x: placement.x - width / 2.0,
            y: placement.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

impl HitTest for HashMap<ComponentId, Bounds> {
    fn contains(&self, id: ComponentId, x: f64, y: f64) -> bool {
        self.get(&id).is_some_and(|b| b.contains(x, y))
    }
}
