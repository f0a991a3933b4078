use std::fmt::Debug;

use serde::Deserialize;

use crate::graph::NodeIdx;
use crate::primitives::Weight;
use crate::vehicle::VehicleIdx;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipmentIdx(pub u32);

impl Debug for ShipmentIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("k#{}", self.0))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtShipment {
    pub name: String,
    pub weight: Weight,
    pub from: String,
    pub to: String,
}

/// Lifecycle of a shipment. Only ever moves forward, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Unassigned,
    ScheduledFor(VehicleIdx),
    Carried(VehicleIdx),
    Delivered(VehicleIdx),
}

impl Status {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Status::Delivered(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    pub id: ShipmentIdx,
    pub origin: NodeIdx,
    pub destination: NodeIdx,
    pub weight: Weight,
    pub status: Status,
}

impl Shipment {
    pub fn new(id: ShipmentIdx, weight: Weight, origin: NodeIdx, destination: NodeIdx) -> Self {
        Self {
            id,
            origin,
            destination,
            weight,
            status: Status::Unassigned,
        }
    }
}
