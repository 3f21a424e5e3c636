use crate::domain::events::{DomainEvent, SelectionEvent, Subscribers};
use crate::domain::logging::LogComponent;
use crate::domain::selection::{Entity, EntityCode};
use crate::log_debug;

/// Ordered set of selected entities, unique by code, in insertion order.
///
/// Mutations notify subscribers synchronously. Handlers receive the
/// post-mutation selection inside the event and must not call back into the
/// store.
pub struct SelectionStore {
    entities: Vec<Entity>,
    subscribers: Subscribers<SelectionEvent>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Adds the entity if absent, removes it if present.
    pub fn toggle(&mut self, entity: Entity) -> SelectionEvent {
        let event = match self.position(&entity.code) {
            Some(index) => {
                let removed = self.entities.remove(index);
                SelectionEvent::EntityDeselected {
                    entity: removed,
                    selection: self.entities.clone(),
                }
            }
            None => {
                self.entities.push(entity.clone());
                SelectionEvent::EntitySelected {
                    entity,
                    selection: self.entities.clone(),
                }
            }
        };

        log_debug!(
            LogComponent::Domain("SelectionStore"),
            "{} -> {} selected",
            event.event_type(),
            self.entities.len()
        );
        self.subscribers.publish(&event);
        event
    }

    /// Empties the selection. Returns `None` when there was nothing to remove.
    pub fn clear(&mut self) -> Option<SelectionEvent> {
        if self.entities.is_empty() {
            return None;
        }

        let removed = std::mem::take(&mut self.entities);
        let event = SelectionEvent::SelectionCleared { removed };
        log_debug!(LogComponent::Domain("SelectionStore"), "selection cleared");
        self.subscribers.publish(&event);
        Some(event)
    }

    pub fn contains(&self, code: &EntityCode) -> bool {
        self.position(code).is_some()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn codes(&self) -> Vec<EntityCode> {
        self.entities.iter().map(|entity| entity.code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&SelectionEvent) + 'static,
    {
        self.subscribers.subscribe(handler);
    }

    fn position(&self, code: &EntityCode) -> Option<usize> {
        self.entities.iter().position(|entity| &entity.code == code)
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entity(code: &str, name: &str) -> Entity {
        Entity::new(code, name).unwrap()
    }

    #[test]
    fn toggle_preserves_insertion_order() {
        let mut store = SelectionStore::new();
        store.toggle(entity("USA", "United States"));
        store.toggle(entity("CHN", "China"));
        store.toggle(entity("DEU", "Germany"));
        store.toggle(entity("CHN", "China"));

        let codes: Vec<_> = store.codes().iter().map(|c| c.value().to_string()).collect();
        assert_eq!(codes, vec!["USA", "DEU"]);
    }

    #[test]
    fn subscribers_see_post_mutation_selection() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = SelectionStore::new();
        let sink = seen.clone();
        store.subscribe(move |event| sink.borrow_mut().push(event.selection().len()));

        store.toggle(entity("USA", "United States"));
        store.toggle(entity("CHN", "China"));
        store.clear();

        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn clearing_empty_store_is_silent() {
        let calls = Rc::new(RefCell::new(0));
        let mut store = SelectionStore::new();
        let counter = calls.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(store.clear().is_none());
        assert_eq!(*calls.borrow(), 0);
    }
}
