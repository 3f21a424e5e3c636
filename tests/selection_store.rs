mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::entity;
use country_compare_wasm::domain::events::SelectionEvent;
use country_compare_wasm::domain::selection::{Entity, EntityCode, SelectionStore};
use quickcheck_macros::quickcheck;

const CODES: [(&str, &str); 5] = [
    ("USA", "United States"),
    ("CHN", "China"),
    ("DEU", "Germany"),
    ("BRA", "Brazil"),
    ("IND", "India"),
];

fn pick(index: u8) -> Entity {
    let (code, name) = CODES[index as usize % CODES.len()];
    entity(code, name)
}

#[test]
fn toggles_keep_insertion_order() {
    let mut store = SelectionStore::new();
    store.toggle(entity("USA", "United States"));
    store.toggle(entity("CHN", "China"));
    store.toggle(entity("DEU", "Germany"));
    store.toggle(entity("CHN", "China"));

    let codes: Vec<String> = store.codes().iter().map(|code| code.value().to_string()).collect();
    assert_eq!(codes, vec!["USA", "DEU"]);
}

#[test]
fn code_identity_ignores_case_and_name() {
    let mut store = SelectionStore::new();
    store.toggle(entity("usa", "United States"));
    let event = store.toggle(entity("USA", "USA"));

    assert!(matches!(event, SelectionEvent::EntityDeselected { .. }));
    assert!(store.is_empty());
}

#[test]
fn subscribers_see_every_mutation_in_order() {
    let mut store = SelectionStore::new();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |event: &SelectionEvent| sink.borrow_mut().push(event.selection().len()));

    store.toggle(entity("USA", "United States"));
    store.toggle(entity("CHN", "China"));
    store.clear();
    store.clear();

    assert_eq!(*seen.borrow(), vec![1, 2, 0]);
}

#[test]
fn clear_then_toggle_leaves_only_the_new_entity() {
    let mut store = SelectionStore::new();
    store.toggle(entity("USA", "United States"));
    store.toggle(entity("CHN", "China"));
    store.clear();
    store.toggle(entity("DEU", "Germany"));

    assert_eq!(store.entities(), &[entity("DEU", "Germany")]);
}

#[quickcheck]
fn double_toggle_restores_membership(history: Vec<u8>, probe: u8) -> bool {
    let mut store = SelectionStore::new();
    for index in history {
        store.toggle(pick(index));
    }
    let before = store.codes();

    let target = pick(probe);
    store.toggle(target.clone());
    store.toggle(target);

    let mut after = store.codes();
    let mut expected = before;
    after.sort();
    expected.sort();
    after == expected
}

#[quickcheck]
fn selection_never_holds_duplicates(history: Vec<u8>) -> bool {
    let mut store = SelectionStore::new();
    for index in history {
        store.toggle(pick(index));
    }
    let mut codes: Vec<EntityCode> = store.codes();
    let total = codes.len();
    codes.sort();
    codes.dedup();
    codes.len() == total
}
