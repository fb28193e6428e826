//! Property tests over random command sequences.
//!
//! Whatever the sequence, nobody may appear twice across the line and the
//! seats, and every reachable state must survive a snapshot round trip.

use proptest::prelude::*;

use table_rotation::core::{Person, PersonId, RotationConfig};
use table_rotation::rotation::{RotationEngine, Slot};

#[derive(Clone, Debug)]
enum Op {
    Join(u8),
    Start,
    Win(Slot),
    ClearTable,
    ClearQueue,
    ClearAll,
    RemoveSeat(Slot),
    RemoveId(u8),
    RemoveName(u8),
    RemoveIndex(i64),
    RemovePerson(u8),
    SetCap(u32),
}

fn slot() -> impl Strategy<Value = Slot> {
    prop_oneof![Just(Slot::One), Just(Slot::Two)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u8>().prop_map(Op::Join),
        3 => Just(Op::Start),
        6 => slot().prop_map(Op::Win),
        1 => Just(Op::ClearTable),
        1 => Just(Op::ClearQueue),
        1 => Just(Op::ClearAll),
        1 => slot().prop_map(Op::RemoveSeat),
        1 => (0u8..16).prop_map(Op::RemoveId),
        1 => (0u8..4).prop_map(Op::RemoveName),
        1 => (-2i64..8).prop_map(Op::RemoveIndex),
        1 => (0u8..16).prop_map(Op::RemovePerson),
        1 => (1u32..5).prop_map(Op::SetCap),
    ]
}

/// Applies ops, assigning fresh ids on join so ids stay unique.
struct Driver {
    engine: RotationEngine,
    next_id: u32,
}

impl Driver {
    fn new(cap: u32) -> Self {
        Self {
            engine: RotationEngine::with_config(RotationConfig::new().with_cap(cap)).unwrap(),
            next_id: 0,
        }
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Join(name) => {
                let id = format!("p{}", self.next_id);
                self.next_id += 1;
                // A small name space so name removal finds namesakes.
                self.engine.join(Person::new(id, format!("name{}", name % 4)));
            }
            Op::Start => {
                let _ = self.engine.start_match();
            }
            Op::Win(slot) => {
                let _ = self.engine.record_result(slot);
            }
            Op::ClearTable => {
                self.engine.clear_table();
            }
            Op::ClearQueue => {
                self.engine.clear_queue();
            }
            Op::ClearAll => self.engine.clear_all(),
            Op::RemoveSeat(slot) => {
                self.engine.remove_from_table(slot);
            }
            Op::RemoveId(n) => {
                self.engine.remove_by_id(&PersonId::new(format!("p{}", n)));
            }
            Op::RemoveName(n) => {
                self.engine.remove_by_name(&format!(" NAME{} ", n));
            }
            Op::RemoveIndex(i) => {
                self.engine.remove_by_index(i);
            }
            Op::RemovePerson(n) => {
                self.engine
                    .remove_person(&Person::new(format!("p{}", n), String::new()));
            }
            Op::SetCap(cap) => self.engine.set_cap(cap).unwrap(),
        }
    }

    fn population(&self) -> usize {
        self.engine.queue_len() + self.engine.table().occupied_count()
    }
}

proptest! {
    #[test]
    fn prop_no_duplicates(cap in 1u32..5, ops in prop::collection::vec(op(), 0..80)) {
        let mut driver = Driver::new(cap);
        for op in &ops {
            driver.apply(op);
            prop_assert!(driver.engine.check_invariants().is_ok(), "after {:?}", op);
        }
    }

    #[test]
    fn prop_snapshot_round_trip(cap in 1u32..5, ops in prop::collection::vec(op(), 0..80)) {
        let mut driver = Driver::new(cap);
        for op in &ops {
            driver.apply(op);
        }

        let snapshot = driver.engine.export_snapshot();
        let mut restored = RotationEngine::new();
        restored.import_snapshot(snapshot.clone());

        prop_assert_eq!(restored.export_snapshot(), snapshot);
        prop_assert_eq!(restored.streaks(), driver.engine.streaks());
        prop_assert_eq!(restored.cap(), driver.engine.cap());
    }

    #[test]
    fn prop_results_conserve_people(ops in prop::collection::vec(op(), 0..60), wins in prop::collection::vec(slot(), 0..20)) {
        let mut driver = Driver::new(3);
        for op in &ops {
            driver.apply(op);
        }

        let before = driver.population();
        for winner in wins {
            let _ = driver.engine.start_match();
            let _ = driver.engine.record_result(winner);
            prop_assert_eq!(driver.population(), before);
        }
    }
}
