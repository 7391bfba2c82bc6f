//! Chain invariants of the station: registration order, duplicate and
//! absent-observer handling, unlinking on removal, and dispatch order.
//!
//! The "for all" properties run under proptest over random sizes and
//! removal orders.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use weather_station::observer::same_node;
use weather_station::{Linked, Observer, Outlet, Reading, RecordingOutlet, Station, StationError};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

type DeliveryLog = Rc<RefCell<Vec<usize>>>;

/// Records its tag in a shared log each time it is updated.
struct Tag {
    id: usize,
    log: DeliveryLog,
}

impl Observer for Tag {
    fn name(&self) -> &'static str {
        "Tag"
    }

    fn update(&mut self, _reading: &Reading, _outlet: &mut dyn Outlet) -> Result<(), StationError> {
        self.log.borrow_mut().push(self.id);
        Ok(())
    }
}

fn tags(n: usize, log: &DeliveryLog) -> Vec<Rc<Linked<Tag>>> {
    (0..n)
        .map(|id| Linked::new(Tag { id, log: Rc::clone(log) }))
        .collect()
}

fn quiet_station() -> Station {
    Station::with_outlet(Box::new(RecordingOutlet::new()))
}

/// Tags of the chain, head first.
fn chain_ids(station: &Station, all: &[Rc<Linked<Tag>>]) -> Vec<usize> {
    station
        .observers()
        .iter()
        .map(|node| {
            all.iter()
                .position(|t| same_node(t, node))
                .expect("every chain node is one of ours")
        })
        .collect()
}

fn register_all(station: &mut Station, all: &[Rc<Linked<Tag>>]) {
    for t in all {
        station.register(t.clone()).expect("register");
    }
}

fn removal_plan() -> impl Strategy<Value = Vec<usize>> {
    (1usize..16).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn chain_order_is_registration_order(n in 0usize..24) {
        let log = DeliveryLog::default();
        let all = tags(n, &log);
        let mut station = quiet_station();
        register_all(&mut station, &all);

        prop_assert_eq!(chain_ids(&station, &all), (0..n).collect::<Vec<_>>());
        prop_assert_eq!(station.len(), n);
    }

    #[test]
    fn duplicate_registration_leaves_chain_unchanged(
        n in 1usize..16,
        repeats in proptest::collection::vec(0usize..16, 0..10),
    ) {
        let log = DeliveryLog::default();
        let all = tags(n, &log);
        let mut station = quiet_station();
        register_all(&mut station, &all);

        for r in repeats {
            station.register(all[r % n].clone()).expect("duplicate is silent");
        }

        prop_assert_eq!(chain_ids(&station, &all), (0..n).collect::<Vec<_>>());
        prop_assert_eq!(station.len(), n);
    }

    #[test]
    fn removing_one_preserves_relative_order(n in 1usize..16, pick in 0usize..16) {
        let k = pick % n;
        let log = DeliveryLog::default();
        let all = tags(n, &log);
        let mut station = quiet_station();
        register_all(&mut station, &all);

        station.remove(&all[k]);

        let expected: Vec<usize> = (0..n).filter(|&i| i != k).collect();
        prop_assert_eq!(chain_ids(&station, &all), expected);
        prop_assert!(all[k].next().is_none());
        prop_assert!(!all[k].is_linked());
    }

    #[test]
    fn removing_everything_in_any_order_empties_chain(order in removal_plan()) {
        let log = DeliveryLog::default();
        let all = tags(order.len(), &log);
        let mut station = quiet_station();
        register_all(&mut station, &all);

        for &i in &order {
            station.remove(&all[i]);
        }

        prop_assert!(station.head().is_none());
        prop_assert!(station.is_empty());
        prop_assert_eq!(station.len(), 0);
        for t in &all {
            prop_assert!(t.next().is_none());
        }
    }

    #[test]
    fn dispatch_reaches_every_member_once_in_chain_order(order in removal_plan()) {
        // Remove the first half of a shuffled plan, then dispatch.
        let log = DeliveryLog::default();
        let all = tags(order.len(), &log);
        let mut station = quiet_station();
        register_all(&mut station, &all);
        for &i in &order[..order.len() / 2] {
            station.remove(&all[i]);
        }

        station.set_measurements(20.0, 50.0, 10.0).expect("dispatch");

        prop_assert_eq!(log.borrow().clone(), chain_ids(&station, &all));
    }
}

// ---------------------------------------------------------------------------
// Fixed cases
// ---------------------------------------------------------------------------

#[test]
fn test_removing_absent_observer_leaves_chain_reference_for_reference() {
    let log = DeliveryLog::default();
    let all = tags(3, &log);
    let stranger = Linked::new(Tag { id: 99, log: Rc::clone(&log) });
    let mut station = quiet_station();
    register_all(&mut station, &all);

    let before = station.observers();
    station.remove(&stranger);
    let after = station.observers();

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert!(same_node(b, a));
    }
    assert!(stranger.next().is_none());
}

#[test]
fn test_removing_observer_owned_by_other_station_is_noop() {
    let log = DeliveryLog::default();
    let all = tags(2, &log);
    let mut first = quiet_station();
    let mut second = quiet_station();
    first.register(all[0].clone()).expect("register");
    second.register(all[1].clone()).expect("register");

    first.remove(&all[1]);

    assert!(second.contains(&all[1]));
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

#[test]
fn test_late_joiner_receives_existing_reading_synchronously() {
    let log = DeliveryLog::default();
    let all = tags(3, &log);
    let mut station = quiet_station();
    station.register(all[0].clone()).expect("register");
    station.register(all[1].clone()).expect("register");
    station.set_measurements(20.0, 50.0, 10.0).expect("dispatch");
    log.borrow_mut().clear();

    station.register(all[2].clone()).expect("late join");

    assert_eq!(*log.borrow(), vec![2], "only the newcomer is caught up");
    assert_eq!(station.last_reading(), Some(Reading::new(20.0, 50.0, 10.0)));
}

#[test]
fn test_erased_handles_from_observers_can_be_removed() {
    let log = DeliveryLog::default();
    let all = tags(3, &log);
    let mut station = quiet_station();
    register_all(&mut station, &all);

    let middle = station.observers()[1].clone();
    station.remove(&middle);

    assert_eq!(chain_ids(&station, &all), vec![0, 2]);
    assert!(all[1].next().is_none());
}
