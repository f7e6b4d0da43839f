//! Property-based tests for the selection/expansion state store
//!
//! Single-select mode may never leave two entities selected; multi-select
//! updates may never touch anyone but their target; mode switches on their
//! own change nothing.

use proptest::prelude::*;
use treeline_core::{EntityId, SelectionMode, SelectionStateStore, StateUpdate};
use uuid::Uuid;

fn id(n: usize) -> EntityId {
    EntityId(Uuid::from_u128(n as u128 + 1))
}

/// One randomized step against the store.
#[derive(Debug, Clone)]
enum StateOp {
    Select { target: usize, value: bool },
    Open { target: usize, value: bool },
    SetMode(SelectionMode),
}

fn state_op_strategy(pool: usize) -> impl Strategy<Value = StateOp> {
    prop_oneof![
        (0..pool, any::<bool>()).prop_map(|(target, value)| StateOp::Select { target, value }),
        (0..pool, any::<bool>()).prop_map(|(target, value)| StateOp::Open { target, value }),
        prop_oneof![Just(SelectionMode::Single), Just(SelectionMode::Multi)]
            .prop_map(StateOp::SetMode),
    ]
}

fn apply(store: &mut SelectionStateStore, op: &StateOp) {
    match *op {
        StateOp::Select { target, value } => {
            store.update(id(target), StateUpdate::selected(value));
        }
        StateOp::Open { target, value } => {
            store.update(id(target), StateUpdate::open(value));
        }
        StateOp::SetMode(mode) => store.set_mode(mode),
    }
}

const POOL: usize = 8;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// In pure single-select mode at most one entity is ever selected, and a
    /// selecting update wins over every previous selection.
    #[test]
    fn single_select_is_exclusive(
        ops in proptest::collection::vec(state_op_strategy(POOL), 0..30),
        winner in 0..POOL,
    ) {
        let mut store = SelectionStateStore::new();
        for op in &ops {
            // Mode stays single for this property.
            if !matches!(op, StateOp::SetMode(_)) {
                apply(&mut store, op);
            }
            prop_assert!(store.selected().len() <= 1);
        }

        store.update(id(winner), StateUpdate::selected(true));
        prop_assert_eq!(store.selected(), vec![id(winner)]);
    }

    /// In multi-select mode an update only ever changes its target.
    #[test]
    fn multi_select_updates_are_independent(
        setup in proptest::collection::vec(0..POOL, 0..10),
        target in 0..POOL,
        value in any::<bool>(),
    ) {
        let mut store = SelectionStateStore::with_mode(SelectionMode::Multi);
        for chosen in setup {
            store.update(id(chosen), StateUpdate::selected(true));
        }

        let before: Vec<_> = (0..POOL).map(|n| store.state(id(n))).collect();
        store.update(id(target), StateUpdate::selected(value));

        for n in 0..POOL {
            let state = store.state(id(n));
            if n == target {
                prop_assert_eq!(state.is_selected, value);
            } else {
                prop_assert_eq!(state, before[n]);
            }
        }
    }

    /// Open/collapse updates never affect selection, in either mode.
    #[test]
    fn open_updates_never_touch_selection(
        mode in prop_oneof![Just(SelectionMode::Single), Just(SelectionMode::Multi)],
        selected in 0..POOL,
        toggled in 0..POOL,
        value in any::<bool>(),
    ) {
        let mut store = SelectionStateStore::with_mode(mode);
        store.update(id(selected), StateUpdate::selected(true));

        store.update(id(toggled), StateUpdate::open(value));
        prop_assert!(store.state(id(selected)).is_selected);
        prop_assert_eq!(store.state(id(toggled)).is_open, value);
    }

    /// Switching modes is never destructive by itself: the recorded states
    /// are identical before and after.
    #[test]
    fn mode_switches_change_nothing(
        ops in proptest::collection::vec(state_op_strategy(POOL), 0..30),
        mode in prop_oneof![Just(SelectionMode::Single), Just(SelectionMode::Multi)],
    ) {
        let mut store = SelectionStateStore::with_mode(SelectionMode::Multi);
        for op in &ops {
            apply(&mut store, op);
        }

        let before: Vec<_> = (0..POOL).map(|n| store.state(id(n))).collect();
        store.set_mode(mode);
        let after: Vec<_> = (0..POOL).map(|n| store.state(id(n))).collect();
        prop_assert_eq!(after, before);
    }
}
