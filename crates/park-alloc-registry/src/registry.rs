// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::free::{BTreeSetFreeSlots, FreeSlots};
use num_traits::CheckedAdd;
use park_alloc_model::prelude::*;
use tracing::{debug, error, instrument, trace, warn};

/// The allocation contract of a parking facility.
///
/// Implementors own the slot table. Only the required methods touch storage;
/// the lookups are provided on top of [`ParkingRegistry::iter_slots`].
pub trait ParkingRegistry {
    type Vehicle: Vehicle;

    /// Total number of slots created so far.
    fn capacity(&self) -> SlotCount;

    /// Appends `count` available slots numbered after the current last slot
    /// and returns the new capacity. Fails without effect if `count <= 0`.
    fn create_slots(&mut self, count: i64) -> Result<SlotCount, ParkingError>;

    /// Parks `vehicle` in the lowest-numbered free slot.
    fn park(&mut self, vehicle: Self::Vehicle) -> Result<SlotNumber, ParkingError>;

    /// Frees `slot` and hands its occupant back to the caller.
    fn leave(&mut self, slot: SlotNumber) -> Result<Self::Vehicle, ParkingError>;

    fn slot(&self, number: SlotNumber) -> Option<&Slot<Self::Vehicle>>;

    /// All slots in ascending number order.
    fn iter_slots(&self) -> impl Iterator<Item = &Slot<Self::Vehicle>>;

    /// Numbers of all free slots, in no particular order.
    fn available_slot_numbers(&self) -> Vec<SlotNumber>;

    #[inline]
    fn iter_occupied(&self) -> impl Iterator<Item = &Slot<Self::Vehicle>> {
        self.iter_slots().filter(|s| s.is_occupied())
    }

    fn slots_by_color(&self, color: &str) -> Vec<&Slot<Self::Vehicle>> {
        self.iter_occupied()
            .filter(|s| s.occupant().is_some_and(|v| v.has_color(color)))
            .collect()
    }

    fn slots_by_plate(&self, plate_number: &str) -> Vec<&Slot<Self::Vehicle>> {
        self.iter_occupied()
            .filter(|s| {
                s.occupant()
                    .is_some_and(|v| v.has_plate_number(plate_number))
            })
            .collect()
    }

    fn occupancy_report(&self) -> OccupancyReport {
        self.iter_occupied().collect()
    }
}

/// In-memory registry over a dense slot table.
///
/// Slot `n` lives at index `n - 1` of `slots`. The free set holds exactly the
/// numbers of the available slots.
#[derive(Debug, Clone)]
pub struct Registry<V = Car, F = BTreeSetFreeSlots> {
    slots: Vec<Slot<V>>,
    free: F,
}

impl<V, F> Default for Registry<V, F>
where
    V: Vehicle,
    F: FreeSlots,
{
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: F::default(),
        }
    }
}

impl<V, F> Registry<V, F>
where
    V: Vehicle,
    F: FreeSlots,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots(count: i64) -> Result<Self, ParkingError> {
        let mut registry = Self::new();
        registry.create_slots(count)?;
        Ok(registry)
    }

    #[inline]
    pub fn free_slots(&self) -> &F {
        &self.free
    }

    /// Returns `true` if no slot has been created yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn available_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    fn slot_mut(&mut self, number: SlotNumber) -> Option<&mut Slot<V>> {
        number.index().and_then(|ix| self.slots.get_mut(ix))
    }
}

impl<V, F> ParkingRegistry for Registry<V, F>
where
    V: Vehicle,
    F: FreeSlots,
{
    type Vehicle = V;

    #[inline]
    fn capacity(&self) -> SlotCount {
        SlotCount::new(self.slots.len())
    }

    #[instrument(level = "debug", skip_all, fields(count = count))]
    fn create_slots(&mut self, count: i64) -> Result<SlotCount, ParkingError> {
        let invalid = || InvalidCapacityError::new(count);
        if count <= 0 {
            trace!("rejected non-positive capacity");
            return Err(invalid().into());
        }
        let extra = usize::try_from(count)
            .map(SlotCount::new)
            .map_err(|_| invalid())?;
        let total = self.capacity().checked_add(&extra).ok_or_else(invalid)?;
        self.slots
            .try_reserve(extra.value())
            .map_err(|_| invalid())?;

        let existing = self.slots.len();
        for number in total.numbers().skip(existing) {
            self.slots.push(Slot::new(number));
            self.free.insert(number);
        }

        debug!(capacity = %total, available = self.free.len(), "created slots");
        Ok(total)
    }

    #[instrument(level = "debug", skip_all, fields(plate = vehicle.plate_number()))]
    fn park(&mut self, vehicle: V) -> Result<SlotNumber, ParkingError> {
        let Some(number) = self.free.take_nearest() else {
            trace!("lot full");
            return Err(ParkingError::LotFull);
        };

        let Some(slot) = number.index().and_then(|ix| self.slots.get_mut(ix)) else {
            self.free.insert(number);
            let internal = InternalError::new("free set names a slot outside the lot");
            error!(slot = %number, reason = internal.reason(), "internal error");
            return Err(internal.into());
        };

        let slot_size = slot.size();
        if let Err((err, _vehicle)) = slot.occupy(vehicle) {
            self.free.insert(number);
            let internal = InternalError::new("free set names an unavailable slot");
            error!(%err, reason = internal.reason(), "internal error");
            return Err(internal.into());
        }

        debug!(slot = %number, slot_size, available = self.free.len(), "parked");
        Ok(number)
    }

    #[instrument(level = "debug", skip_all, fields(slot = %number))]
    fn leave(&mut self, number: SlotNumber) -> Result<V, ParkingError> {
        let not_parked = NotParkedError::new(number);
        let Some(slot) = self.slot_mut(number) else {
            trace!("no such slot");
            return Err(not_parked.into());
        };
        let Some(vehicle) = slot.vacate() else {
            trace!("slot already free");
            return Err(not_parked.into());
        };

        if !self.free.insert(number) {
            warn!("vacated slot was already in the free set");
        }
        debug!(available = self.free.len(), "left");
        Ok(vehicle)
    }

    #[inline]
    fn slot(&self, number: SlotNumber) -> Option<&Slot<V>> {
        number.index().and_then(|ix| self.slots.get(ix))
    }

    #[inline]
    fn iter_slots(&self) -> impl Iterator<Item = &Slot<V>> {
        self.slots.iter()
    }

    #[inline]
    fn available_slot_numbers(&self) -> Vec<SlotNumber> {
        self.free.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::free::{BitmapFreeSlots, FreeSlotsRead, MinHeapFreeSlots};

    fn car(plate: &str, color: &str) -> Car {
        Car::new(plate, color, 1.0)
    }

    fn n(v: usize) -> SlotNumber {
        SlotNumber::new(v)
    }

    fn numbers<V: Vehicle>(slots: &[&Slot<V>]) -> Vec<usize> {
        slots.iter().map(|s| s.number().value()).collect()
    }

    fn sorted_available<R: ParkingRegistry>(registry: &R) -> Vec<usize> {
        let mut v: Vec<_> = registry
            .available_slot_numbers()
            .into_iter()
            .map(SlotNumber::value)
            .collect();
        v.sort_unstable();
        v
    }

    /// Naive reference: a vector of optional occupants, scanned linearly.
    #[derive(Default)]
    struct RefModel {
        slots: Vec<Option<Car>>,
    }

    impl RefModel {
        fn create(&mut self, count: usize) {
            self.slots.extend((0..count).map(|_| None));
        }

        fn park(&mut self, car: Car) -> Option<usize> {
            let ix = self.slots.iter().position(Option::is_none)?;
            self.slots[ix] = Some(car);
            Some(ix + 1)
        }

        fn leave(&mut self, number: usize) -> Option<Car> {
            self.slots.get_mut(number.checked_sub(1)?)?.take()
        }

        fn free_count(&self) -> usize {
            self.slots.iter().filter(|s| s.is_none()).count()
        }
    }

    /// A vehicle kind other than `Car`, to show the registry is not tied to it.
    #[derive(Debug, Clone, PartialEq)]
    struct Motorbike {
        plate: String,
    }

    impl Vehicle for Motorbike {
        fn plate_number(&self) -> &str {
            &self.plate
        }

        fn color(&self) -> &str {
            "black"
        }

        fn usage_size(&self) -> f32 {
            0.5
        }
    }

    macro_rules! test_registry_impl {
        ($modname:ident, $F:ty) => {
            mod $modname {
                use super::*;

                type R = Registry<Car, $F>;

                #[test]
                fn test_new_registry_is_empty() {
                    let registry = R::new();
                    assert!(registry.is_empty());
                    assert_eq!(registry.capacity(), SlotCount::new(0));
                    assert!(registry.available_slot_numbers().is_empty());
                    assert!(registry.occupancy_report().is_empty());
                }

                #[test]
                fn test_create_then_fill_until_full() {
                    for cap in [1usize, 2, 7, 64, 65, 130] {
                        let mut registry = R::new();
                        assert_eq!(
                            registry.create_slots(cap as i64),
                            Ok(SlotCount::new(cap))
                        );
                        assert_eq!(registry.available_slot_numbers().len(), cap);

                        for expected in 1..=cap {
                            let got = registry.park(car(&format!("P-{expected}"), "red"));
                            assert_eq!(got, Ok(n(expected)));
                        }
                        assert_eq!(
                            registry.park(car("late", "red")),
                            Err(ParkingError::LotFull)
                        );
                        assert_eq!(registry.available_count(), 0);
                    }
                }

                #[test]
                fn test_non_positive_capacity_is_rejected_without_effect() {
                    let mut registry = R::with_slots(5).unwrap();
                    for bad in [0i64, -1, -100, i64::MIN] {
                        assert_eq!(
                            registry.create_slots(bad),
                            Err(ParkingError::InvalidCapacity(InvalidCapacityError::new(bad)))
                        );
                        assert_eq!(registry.capacity(), SlotCount::new(5));
                        assert_eq!(registry.available_count(), 5);
                    }
                }

                #[test]
                fn test_create_on_empty_with_zero_keeps_empty() {
                    let mut registry = R::new();
                    assert!(matches!(
                        registry.create_slots(0),
                        Err(ParkingError::InvalidCapacity(_))
                    ));
                    assert!(registry.is_empty());
                    assert_eq!(registry.park(car("a", "b")), Err(ParkingError::LotFull));
                }

                #[test]
                fn test_capacity_is_cumulative() {
                    let mut registry = R::new();
                    assert_eq!(registry.create_slots(100), Ok(SlotCount::new(100)));
                    assert_eq!(registry.create_slots(10), Ok(SlotCount::new(110)));
                    assert_eq!(registry.capacity(), SlotCount::new(110));
                    assert_eq!(registry.available_slot_numbers().len(), 110);
                    assert_eq!(sorted_available(&registry), (1..=110).collect::<Vec<_>>());
                    assert_eq!(registry.iter_slots().count(), 110);
                }

                #[test]
                fn test_extension_numbers_continue_after_occupied_slots() {
                    let mut registry = R::with_slots(2).unwrap();
                    registry.park(car("a", "red")).unwrap();
                    registry.park(car("b", "red")).unwrap();
                    registry.create_slots(2).unwrap();
                    assert_eq!(registry.park(car("c", "red")), Ok(n(3)));
                    assert_eq!(sorted_available(&registry), vec![4]);
                }

                #[test]
                fn test_park_picks_minimum_free_slot() {
                    let mut registry = R::with_slots(6).unwrap();
                    for i in 1..=6 {
                        registry.park(car(&format!("P-{i}"), "red")).unwrap();
                    }
                    // free {3, 5, 1}, released in that order
                    registry.leave(n(3)).unwrap();
                    registry.leave(n(5)).unwrap();
                    registry.leave(n(1)).unwrap();
                    assert_eq!(sorted_available(&registry), vec![1, 3, 5]);

                    assert_eq!(registry.park(car("x", "blue")), Ok(n(1)));
                    assert_eq!(registry.park(car("y", "blue")), Ok(n(3)));
                    assert_eq!(registry.park(car("z", "blue")), Ok(n(5)));
                    assert_eq!(registry.park(car("w", "blue")), Err(ParkingError::LotFull));
                }

                #[test]
                fn test_park_then_leave_restores_slot() {
                    let mut registry = R::with_slots(100).unwrap();
                    let slot = registry.park(car("KA-01", "White")).unwrap();
                    assert_eq!(slot, n(1));
                    assert_eq!(registry.available_count(), 99);

                    let s = registry.slot(slot).unwrap();
                    assert_eq!(s.status(), SlotStatus::Occupied);
                    assert_eq!(s.occupant().map(|c| c.plate_number()), Some("KA-01"));

                    let left = registry.leave(slot).unwrap();
                    assert_eq!(left.plate_number(), "KA-01");
                    assert_eq!(registry.available_count(), 100);
                    assert_eq!(registry.capacity(), SlotCount::new(100));

                    let s = registry.slot(slot).unwrap();
                    assert_eq!(s.status(), SlotStatus::Available);
                    assert!(s.occupant().is_none());
                    assert!(registry.available_slot_numbers().contains(&slot));
                }

                #[test]
                fn test_leave_unknown_or_free_slot_is_not_parked() {
                    let mut registry = R::with_slots(3).unwrap();
                    registry.park(car("a", "red")).unwrap();
                    let before = sorted_available(&registry);

                    for bad in [0usize, 2, 3, 4, 1000] {
                        assert_eq!(
                            registry.leave(n(bad)),
                            Err(ParkingError::NotParked(NotParkedError::new(n(bad))))
                        );
                        assert_eq!(sorted_available(&registry), before);
                    }

                    registry.leave(n(1)).unwrap();
                    assert!(matches!(
                        registry.leave(n(1)),
                        Err(ParkingError::NotParked(_))
                    ));
                    assert_eq!(sorted_available(&registry), vec![1, 2, 3]);
                }

                #[test]
                fn test_leave_on_empty_registry() {
                    let mut registry = R::new();
                    assert!(matches!(
                        registry.leave(n(1)),
                        Err(ParkingError::NotParked(_))
                    ));
                }

                #[test]
                fn test_lookups_empty_cases() {
                    let empty = R::new();
                    assert!(empty.slots_by_color("red").is_empty());
                    assert!(empty.slots_by_plate("p").is_empty());

                    let mut registry = R::with_slots(4).unwrap();
                    assert!(registry.slots_by_color("red").is_empty());
                    assert!(registry.slots_by_plate("p").is_empty());

                    registry.park(car("p", "red")).unwrap();
                    assert!(registry.slots_by_color("blue").is_empty());
                    assert!(registry.slots_by_color("").is_empty());
                    assert!(registry.slots_by_plate("q").is_empty());
                    assert!(registry.slots_by_plate("").is_empty());
                }

                #[test]
                fn test_color_lookup_ignores_case_plate_lookup_is_exact() {
                    let mut registry = R::with_slots(5).unwrap();
                    registry.park(car("KA-1", "White")).unwrap();
                    registry.park(car("KA-2", "black")).unwrap();
                    registry.park(car("KA-3", "WHITE")).unwrap();
                    registry.park(car("ka-1", "white")).unwrap();

                    assert_eq!(numbers(&registry.slots_by_color("white")), vec![1, 3, 4]);
                    assert_eq!(numbers(&registry.slots_by_color("BLACK")), vec![2]);
                    assert_eq!(numbers(&registry.slots_by_plate("KA-1")), vec![1]);
                    assert_eq!(numbers(&registry.slots_by_plate("ka-1")), vec![4]);
                }

                #[test]
                fn test_lookups_are_in_ascending_slot_order() {
                    let mut registry = R::with_slots(5).unwrap();
                    for _ in 0..5 {
                        registry.park(car("dup", "red")).unwrap();
                    }
                    registry.leave(n(2)).unwrap();
                    registry.leave(n(4)).unwrap();
                    registry.park(car("dup", "red")).unwrap();
                    assert_eq!(numbers(&registry.slots_by_plate("dup")), vec![1, 2, 3, 5]);
                    assert_eq!(numbers(&registry.slots_by_color("Red")), vec![1, 2, 3, 5]);
                }

                #[test]
                fn test_scenario_thirty_red_cars() {
                    let mut registry = R::with_slots(100).unwrap();
                    for _ in 0..30 {
                        registry.park(car("plate-1", "red")).unwrap();
                    }
                    assert_eq!(registry.available_slot_numbers().len(), 70);
                    assert_eq!(registry.slots_by_color("RED").len(), 30);
                    assert_eq!(registry.slots_by_plate("plate-1").len(), 30);
                }

                #[test]
                fn test_scenario_park_leave_first_slot() {
                    let mut registry = R::with_slots(100).unwrap();
                    assert_eq!(registry.park(car("p", "c")), Ok(n(1)));
                    registry.leave(n(1)).unwrap();
                    assert_eq!(registry.available_slot_numbers().len(), 100);
                    let slot = registry.slot(n(1)).unwrap();
                    assert_eq!(slot.status(), SlotStatus::Available);
                    assert!(slot.occupant().is_none());
                }

                #[test]
                fn test_occupancy_report_lists_occupied_slots() {
                    let mut registry = R::with_slots(4).unwrap();
                    registry.park(car("A", "Red")).unwrap();
                    registry.park(car("B", "Blue")).unwrap();
                    registry.park(car("C", "Green")).unwrap();
                    registry.leave(n(2)).unwrap();

                    let report = registry.occupancy_report();
                    let rows: Vec<_> = report
                        .iter()
                        .map(|r| (r.slot().value(), r.plate_number(), r.color()))
                        .collect();
                    assert_eq!(rows, vec![(1, "A", "Red"), (3, "C", "Green")]);
                }

                #[test]
                fn test_status_and_occupant_stay_in_sync() {
                    let mut registry = R::with_slots(8).unwrap();
                    for i in 0..6 {
                        registry.park(car(&format!("P{i}"), "red")).unwrap();
                    }
                    registry.leave(n(2)).unwrap();
                    registry.leave(n(5)).unwrap();

                    let free = sorted_available(&registry);
                    for slot in registry.iter_slots() {
                        assert_eq!(slot.occupant().is_some(), slot.is_occupied());
                        assert_eq!(
                            free.contains(&slot.number().value()),
                            slot.is_available()
                        );
                        assert_ne!(slot.status(), SlotStatus::Reserved);
                    }
                }

                #[test]
                fn test_generated_workload_matches_reference_model() {
                    for seed in [1u64, 2, 3, 42] {
                        let cfg = WorkloadGenConfigBuilder::new()
                            .capacity(SlotCount::new(24))
                            .operations(2_000)
                            .leave_probability(0.45)
                            .palette(["Red", "red", "Blue"])
                            .plate_pool(6)
                            .seed(seed)
                            .build()
                            .expect("valid workload config");

                        let mut registry = R::with_slots(24).unwrap();
                        let mut model = RefModel::default();
                        model.create(24);

                        for op in WorkloadGenerator::new(cfg).generate() {
                            match op {
                                WorkloadOp::Park(c) => {
                                    let expected = model.park(c.clone());
                                    let got = registry.park(c);
                                    match expected {
                                        Some(slot) => assert_eq!(got, Ok(n(slot))),
                                        None => assert_eq!(got, Err(ParkingError::LotFull)),
                                    }
                                }
                                WorkloadOp::Leave(slot) => {
                                    let expected = model.leave(slot.value());
                                    let got = registry.leave(slot);
                                    match expected {
                                        Some(c) => assert_eq!(got, Ok(c)),
                                        None => assert!(matches!(
                                            got,
                                            Err(ParkingError::NotParked(_))
                                        )),
                                    }
                                }
                            }
                            assert_eq!(registry.available_count(), model.free_count());
                        }

                        let reds: Vec<_> = model
                            .slots
                            .iter()
                            .enumerate()
                            .filter(|(_, s)| s.as_ref().is_some_and(|c| c.has_color("RED")))
                            .map(|(ix, _)| ix + 1)
                            .collect();
                        assert_eq!(numbers(&registry.slots_by_color("RED")), reds);
                    }
                }
            }
        };
    }

    test_registry_impl!(btree_registry_tests, BTreeSetFreeSlots);
    test_registry_impl!(min_heap_registry_tests, MinHeapFreeSlots);
    test_registry_impl!(bitmap_registry_tests, BitmapFreeSlots);

    #[test]
    fn test_registry_accepts_other_vehicle_kinds() {
        let mut registry: Registry<Motorbike> = Registry::with_slots(2).unwrap();
        let slot = registry
            .park(Motorbike {
                plate: "M-1".into(),
            })
            .unwrap();
        assert_eq!(slot, n(1));
        assert_eq!(numbers(&registry.slots_by_color("BLACK")), vec![1]);
        assert_eq!(
            registry.slot(slot).and_then(|s| s.occupant()).map(|m| m.usage_size()),
            Some(0.5)
        );
    }

    #[test]
    fn test_registry_accepts_boxed_trait_objects() {
        let mut registry: Registry<Box<dyn Vehicle>> = Registry::with_slots(3).unwrap();
        registry.park(Box::new(car("C-1", "Red"))).unwrap();
        registry
            .park(Box::new(Motorbike {
                plate: "M-1".into(),
            }))
            .unwrap();
        assert_eq!(numbers(&registry.slots_by_plate("M-1")), vec![2]);
        assert_eq!(numbers(&registry.slots_by_color("red")), vec![1]);
        let report = registry.occupancy_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.rows()[1].color(), "black");
    }

    #[test]
    fn test_default_registry_uses_btree_free_set() {
        let mut registry: Registry = Registry::with_slots(3).unwrap();
        registry.park(car("a", "b")).unwrap();
        assert_eq!(registry.free_slots().nearest(), Some(n(2)));
    }
}
