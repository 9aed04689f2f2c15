use crate::component::{Component, ComponentKind, ComponentSpec, Placement};
use crate::id::ComponentId;
use std::collections::HashMap;

/// Builder for the component registry. Specs are collected in declaration
/// order and checked for id collisions on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    specs: Vec<ComponentSpec>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Register one component spec. Order of registration is iteration order.
    pub fn register(&mut self, spec: ComponentSpec) -> &mut Self {
        self.specs.push(spec);
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Finalize. Fails on the first id declared twice.
    pub fn build(self) -> Result<ComponentRegistry, RegistryError> {
        let mut index = HashMap::with_capacity(self.specs.len());
        let mut components = Vec::with_capacity(self.specs.len());
        let mut placements = Vec::with_capacity(self.specs.len());

        for spec in &self.specs {
            if index.insert(spec.id, components.len()).is_some() {
                return Err(RegistryError::DuplicateId(spec.id));
            }
            components.push(spec.build());
            placements.push(spec.placement);
        }

        Ok(ComponentRegistry {
            components,
            placements,
            index,
        })
    }
}

/// The fixed set of network components. Built once; no component is added
/// or removed afterwards, and a component's kind never changes.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    components: Vec<Component>,
    placements: Vec<Placement>,
    index: HashMap<ComponentId, usize>,
}

impl ComponentRegistry {
    /// Build a registry straight from a topology list.
    pub fn from_specs(specs: &[ComponentSpec]) -> Result<Self, RegistryError> {
        let mut builder = RegistryBuilder::new();
        for spec in specs {
            builder.register(spec.clone());
        }
        builder.build()
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.index.get(&id).map(|&i| &self.components[i])
    }

    /// Mutable access is reserved for the action processor.
    pub(crate) fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        let i = *self.index.get(&id)?;
        self.components.get_mut(i)
    }

    pub fn placement(&self, id: ComponentId) -> Option<Placement> {
        self.index.get(&id).map(|&i| self.placements[i])
    }

    /// All components in declaration order.
    pub fn all(&self) -> &[Component] {
        &self.components
    }

    /// Components paired with their placements, in declaration order.
    pub fn iter_placed(&self) -> impl Iterator<Item = (&Component, Placement)> {
        self.components.iter().zip(self.placements.iter().copied())
    }

    pub fn pipes(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| c.kind() == ComponentKind::Pipe)
    }

    pub fn damaged_pipe_count(&self) -> usize {
        self.components.iter().filter(|c| c.is_damaged_pipe()).count()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate component id: {0}")]
    DuplicateId(ComponentId),
}
