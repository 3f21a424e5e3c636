use crate::domain::controls::ViewSnapshot;
use crate::domain::selection::{Entity, EntityCode};
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Selection Set changes. Every variant carries the post-mutation selection.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    EntitySelected {
        entity: Entity,
        selection: Vec<Entity>,
    },
    EntityDeselected {
        entity: Entity,
        selection: Vec<Entity>,
    },
    SelectionCleared {
        removed: Vec<Entity>,
    },
}

impl SelectionEvent {
    /// Selection as it stands after the mutation
    pub fn selection(&self) -> &[Entity] {
        match self {
            SelectionEvent::EntitySelected { selection, .. }
            | SelectionEvent::EntityDeselected { selection, .. } => selection,
            SelectionEvent::SelectionCleared { .. } => &[],
        }
    }

    /// Codes whose selected state changed, paired with the new state
    pub fn marker_changes(&self) -> Vec<(EntityCode, bool)> {
        match self {
            SelectionEvent::EntitySelected { entity, .. } => vec![(entity.code.clone(), true)],
            SelectionEvent::EntityDeselected { entity, .. } => vec![(entity.code.clone(), false)],
            SelectionEvent::SelectionCleared { removed } => {
                removed.iter().map(|entity| (entity.code.clone(), false)).collect()
            }
        }
    }
}

impl DomainEvent for SelectionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SelectionEvent::EntitySelected { .. } => "EntitySelected",
            SelectionEvent::EntityDeselected { .. } => "EntityDeselected",
            SelectionEvent::SelectionCleared { .. } => "SelectionCleared",
        }
    }
}

/// Indicator or chart type replaced
#[derive(Debug, Clone, PartialEq)]
pub enum ControlsEvent {
    IndicatorChanged { snapshot: ViewSnapshot },
    ChartTypeChanged { snapshot: ViewSnapshot },
}

impl ControlsEvent {
    pub fn snapshot(&self) -> &ViewSnapshot {
        match self {
            ControlsEvent::IndicatorChanged { snapshot } | ControlsEvent::ChartTypeChanged { snapshot } => snapshot,
        }
    }
}

impl DomainEvent for ControlsEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ControlsEvent::IndicatorChanged { .. } => "IndicatorChanged",
            ControlsEvent::ChartTypeChanged { .. } => "ChartTypeChanged",
        }
    }
}

/// Simple in-memory event dispatcher
pub struct Subscribers<E> {
    handlers: Vec<Box<dyn Fn(&E)>>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&E) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn publish(&self, event: &E) {
        for handler in &self.handlers {
            handler(event);
        }
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}
