//! Property-based invariant tests for the herald-core listener registry.
//!
//! Random sequences of register / unregister / drop / set operations are
//! applied both to a real [`Subject`] and to a plain reference model. The
//! following must hold for every sequence:
//!
//! 1. The registry never holds two entries with the same id.
//! 2. Ids are kept in first-registration order.
//! 3. `set_value(v)` delivers exactly `v`, exactly once, to every live
//!    registered listener, in registration order.
//! 4. Unregistered listeners are never notified again.
//! 5. Dropped listeners are skipped without panicking and stay registered.
//! 6. `current_value` and `version` track every write.

use std::cell::RefCell;
use std::rc::Rc;

use herald_core::{DuplicatePolicy, Listener, Registration, RegistryConfig, Subject};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const SLOTS: usize = 6;

type Deliveries = Rc<RefCell<Vec<(usize, i32)>>>;

struct Probe {
    slot: usize,
    deliveries: Deliveries,
}

impl Listener<i32> for Probe {
    fn on_value_changed(&self, value: &i32) {
        self.deliveries.borrow_mut().push((self.slot, *value));
    }
}

#[derive(Debug, Clone)]
enum Op {
    /// Register the listener living in `slot` under id `id`.
    Register { slot: usize, id: u8 },
    Unregister { id: u8 },
    /// Drop the caller's strong reference for `slot`.
    Drop { slot: usize },
    Set(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..SLOTS, 0u8..8).prop_map(|(slot, id)| Op::Register { slot, id }),
        2 => (0u8..8).prop_map(|id| Op::Unregister { id }),
        1 => (0..SLOTS).prop_map(|slot| Op::Drop { slot }),
        3 => any::<i32>().prop_map(Op::Set),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 1..=60)
}

/// Reference model: ordered (id, slot) pairs plus per-slot liveness.
#[derive(Default)]
struct Model {
    entries: Vec<(u8, usize)>,
    value: i32,
    version: u64,
}

struct Harness {
    subject: Subject<i32, u8>,
    slots: Vec<Option<Rc<Probe>>>,
    deliveries: Deliveries,
    model: Model,
    policy: DuplicatePolicy,
}

impl Harness {
    fn new(policy: DuplicatePolicy) -> Self {
        let deliveries: Deliveries = Rc::default();
        let slots = (0..SLOTS)
            .map(|slot| {
                Some(Rc::new(Probe {
                    slot,
                    deliveries: Rc::clone(&deliveries),
                }))
            })
            .collect();
        Self {
            subject: Subject::with_config(0, RegistryConfig::new().with_duplicate_policy(policy)),
            slots,
            deliveries,
            model: Model::default(),
            policy,
        }
    }

    fn apply(&mut self, op: &Op) -> Result<(), TestCaseError> {
        match *op {
            Op::Register { slot, id } => {
                // A dropped slot cannot be registered; there is nothing to hand over.
                let Some(probe) = self.slots[slot].clone() else {
                    return Ok(());
                };
                let outcome = self.subject.register(&probe, id);
                let existing = self.model.entries.iter().position(|(eid, _)| *eid == id);
                match (existing, self.policy) {
                    (None, _) => {
                        prop_assert_eq!(outcome, Registration::Added);
                        self.model.entries.push((id, slot));
                    }
                    (Some(_), DuplicatePolicy::KeepFirst) => {
                        prop_assert_eq!(outcome, Registration::Skipped);
                    }
                    (Some(idx), DuplicatePolicy::Replace) => {
                        prop_assert_eq!(outcome, Registration::Replaced);
                        self.model.entries[idx].1 = slot;
                    }
                }
            }
            Op::Unregister { id } => {
                let existed = self.model.entries.iter().any(|(eid, _)| *eid == id);
                self.model.entries.retain(|(eid, _)| *eid != id);
                prop_assert_eq!(self.subject.unregister(&id), existed);
            }
            Op::Drop { slot } => {
                self.slots[slot] = None;
            }
            Op::Set(value) => {
                self.deliveries.borrow_mut().clear();
                self.subject.set_value(value);
                self.model.value = value;
                self.model.version += 1;

                let expected: Vec<(usize, i32)> = self
                    .model
                    .entries
                    .iter()
                    .filter(|(_, slot)| self.slots[*slot].is_some())
                    .map(|(_, slot)| (*slot, value))
                    .collect();
                prop_assert_eq!(&*self.deliveries.borrow(), &expected);
            }
        }
        self.check_structure()
    }

    fn check_structure(&self) -> Result<(), TestCaseError> {
        let ids = self.subject.ids();
        let mut dedup = ids.clone();
        dedup.sort_unstable();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), ids.len(), "duplicate ids in {:?}", ids);

        let model_ids: Vec<u8> = self.model.entries.iter().map(|(id, _)| *id).collect();
        prop_assert_eq!(ids, model_ids);

        let live = self
            .model
            .entries
            .iter()
            .filter(|(_, slot)| self.slots[*slot].is_some())
            .count();
        prop_assert_eq!(self.subject.live_count(), live);
        prop_assert_eq!(self.subject.current_value(), self.model.value);
        prop_assert_eq!(self.subject.version(), self.model.version);
        Ok(())
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Model equivalence under both duplicate policies
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn keep_first_matches_model(ops in ops_strategy()) {
        let mut harness = Harness::new(DuplicatePolicy::KeepFirst);
        for op in &ops {
            harness.apply(op)?;
        }
    }

    #[test]
    fn replace_matches_model(ops in ops_strategy()) {
        let mut harness = Harness::new(DuplicatePolicy::Replace);
        for op in &ops {
            harness.apply(op)?;
        }
    }

    #[test]
    fn repeated_registration_is_idempotent(id in any::<u8>(), times in 1usize..20) {
        let subject: Subject<i32, u8> = Subject::new(0);
        let deliveries: Deliveries = Rc::default();
        let probe = Rc::new(Probe { slot: 0, deliveries: Rc::clone(&deliveries) });
        for _ in 0..times {
            subject.register(&probe, id);
        }
        prop_assert_eq!(subject.len(), 1);
        subject.set_value(5);
        prop_assert_eq!(&*deliveries.borrow(), &vec![(0, 5)]);
    }

    #[test]
    fn unregistered_never_notified(values in proptest::collection::vec(any::<i32>(), 1..10)) {
        let subject: Subject<i32, u8> = Subject::new(0);
        let deliveries: Deliveries = Rc::default();
        let probe = Rc::new(Probe { slot: 0, deliveries: Rc::clone(&deliveries) });
        subject.register(&probe, 1);
        prop_assert!(subject.unregister(&1));
        for v in values {
            subject.set_value(v);
        }
        prop_assert!(deliveries.borrow().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Scenarios
// ═════════════════════════════════════════════════════════════════════════

fn probe(slot: usize, deliveries: &Deliveries) -> Rc<Probe> {
    Rc::new(Probe {
        slot,
        deliveries: Rc::clone(deliveries),
    })
}

#[test]
fn scenario_two_listeners_in_order() {
    let subject: Subject<i32> = Subject::new(0);
    let deliveries: Deliveries = Rc::default();
    let a = probe(0, &deliveries);
    let b = probe(1, &deliveries);
    subject.register(&a, "a");
    subject.register(&b, "b");

    subject.set_value(1);

    assert_eq!(*deliveries.borrow(), vec![(0, 1), (1, 1)]);
}

#[test]
fn scenario_double_registration() {
    let subject: Subject<i32> = Subject::new(0);
    let deliveries: Deliveries = Rc::default();
    let a = probe(0, &deliveries);
    subject.register(&a, "a");
    subject.register(&a, "a");
    assert_eq!(subject.ids(), vec!["a".to_string()]);

    subject.set_value(5);

    assert_eq!(*deliveries.borrow(), vec![(0, 5)]);
}

#[test]
fn scenario_register_then_unregister() {
    let subject: Subject<i32> = Subject::new(0);
    let deliveries: Deliveries = Rc::default();
    let a = probe(0, &deliveries);
    subject.register(&a, "a");
    subject.unregister("a");

    subject.set_value(3);

    assert!(deliveries.borrow().is_empty());
}

#[test]
fn scenario_listener_destroyed_externally() {
    let subject: Subject<i32> = Subject::new(0);
    let deliveries: Deliveries = Rc::default();
    let a = probe(0, &deliveries);
    let b = probe(1, &deliveries);
    subject.register(&a, "a");
    subject.register(&b, "b");
    drop(b);

    subject.set_value(9);

    assert_eq!(*deliveries.borrow(), vec![(0, 9)]);
    assert_eq!(subject.len(), 2);
}
