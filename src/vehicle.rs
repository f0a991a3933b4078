use std::collections::BTreeSet;
use std::fmt::Debug;

use serde::Deserialize;

use crate::graph::NodeIdx;
use crate::primitives::{Distance, Weight};
use crate::shipment::ShipmentIdx;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleIdx(pub u32);

impl Debug for VehicleIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("v#{}", self.0))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtVehicle {
    pub name: String,
    pub capacity: Weight,
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleIdx,
    pub start: NodeIdx,
    pub location: NodeIdx,
    pub capacity: Weight,
    /// Total distance driven so far. Vehicles never wait, so this is also the time at
    /// which the vehicle becomes available again.
    pub travelled: Distance,
    pub to_pick_up: BTreeSet<ShipmentIdx>,
    pub carried: BTreeSet<ShipmentIdx>,
    pub delivered: BTreeSet<ShipmentIdx>,
}

impl Vehicle {
    pub fn new(id: VehicleIdx, capacity: Weight, start: NodeIdx) -> Self {
        Self {
            id,
            start,
            location: start,
            capacity,
            travelled: 0,
            to_pick_up: BTreeSet::new(),
            carried: BTreeSet::new(),
            delivered: BTreeSet::new(),
        }
    }

    pub fn has_moved(&self) -> bool {
        self.travelled > 0
    }

    /// Shipments the vehicle has committed to, but not yet delivered.
    pub fn assigned(&self) -> impl Iterator<Item = ShipmentIdx> + '_ {
        self.to_pick_up.iter().chain(self.carried.iter()).copied()
    }

    /// Capacity not yet reserved by assigned shipments.
    pub fn spare_capacity(&self, weight_of: impl Fn(ShipmentIdx) -> Weight) -> Weight {
        let reserved: Weight = self.assigned().map(weight_of).sum();
        self.capacity.saturating_sub(reserved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spare_capacity() {
        let mut vehicle = Vehicle::new(VehicleIdx(0), 15, NodeIdx(0));
        assert_eq!(vehicle.spare_capacity(|_| 5), 15);

        vehicle.to_pick_up.insert(ShipmentIdx(0));
        vehicle.carried.insert(ShipmentIdx(1));
        vehicle.delivered.insert(ShipmentIdx(2));
        assert_eq!(
            vehicle.assigned().collect::<Vec<_>>(),
            [ShipmentIdx(0), ShipmentIdx(1)]
        );
        assert_eq!(vehicle.spare_capacity(|it| it.0 + 4), 6);
        assert!(!vehicle.has_moved());
    }
}
