use itertools::Itertools;

use crate::col::{set_new, HashSet};
use crate::graph::NodeIdx;
use crate::primitives::Distance;
use crate::shipment::{Shipment, ShipmentIdx, Status};
use crate::vehicle::{Vehicle, VehicleIdx};

use super::movement::MovementEvent;

/// A snapshot of the fleet. Search branches own their snapshot, so siblings never observe
/// each other's moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    /// Indexed by `VehicleIdx`.
    pub vehicles: Vec<Vehicle>,
    /// Indexed by `ShipmentIdx`.
    pub shipments: Vec<Shipment>,
}

/// Order-independent encoding of everything the remaining search depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    vehicles: Vec<(VehicleIdx, NodeIdx, Distance)>,
    scheduled: Vec<(ShipmentIdx, VehicleIdx)>,
    carried: Vec<(ShipmentIdx, VehicleIdx)>,
    delivered: Vec<(ShipmentIdx, VehicleIdx)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Drive to the origin of an unassigned shipment and reserve it for the vehicle.
    InitiatePickup,
    /// Drive towards the destination of a shipment that is scheduled for or carried by the
    /// vehicle.
    Continue,
}

/// One branch of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub action: Action,
    pub vehicle: VehicleIdx,
    pub shipment: ShipmentIdx,
}

/// Quality of a complete schedule, smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    pub makespan: Distance,
    pub num_vehicles: usize,
}

impl World {
    pub fn vehicle(&self, vehicle: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle.0 as usize]
    }

    pub fn vehicle_mut(&mut self, vehicle: VehicleIdx) -> &mut Vehicle {
        &mut self.vehicles[vehicle.0 as usize]
    }

    pub fn shipment(&self, shipment: ShipmentIdx) -> &Shipment {
        &self.shipments[shipment.0 as usize]
    }

    pub fn shipment_mut(&mut self, shipment: ShipmentIdx) -> &mut Shipment {
        &mut self.shipments[shipment.0 as usize]
    }

    pub fn key(&self) -> StateKey {
        let with_status = |pick: fn(&Status) -> Option<VehicleIdx>| {
            self.shipments
                .iter()
                .filter_map(|shipment| pick(&shipment.status).map(|vehicle| (shipment.id, vehicle)))
                .collect_vec()
        };
        StateKey {
            vehicles: self
                .vehicles
                .iter()
                .map(|vehicle| (vehicle.id, vehicle.location, vehicle.travelled))
                .collect(),
            scheduled: with_status(|status| match status {
                Status::ScheduledFor(vehicle) => Some(*vehicle),
                _ => None,
            }),
            carried: with_status(|status| match status {
                Status::Carried(vehicle) => Some(*vehicle),
                _ => None,
            }),
            delivered: with_status(|status| match status {
                Status::Delivered(vehicle) => Some(*vehicle),
                _ => None,
            }),
        }
    }

    /// Candidates in exploration order: pickups of unassigned shipments by every vehicle
    /// with enough spare capacity, shipment by shipment, followed by the shipments each
    /// vehicle has committed to, vehicle by vehicle.
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        let weight_of = |shipment: ShipmentIdx| self.shipment(shipment).weight;
        for shipment in self
            .shipments
            .iter()
            .filter(|shipment| shipment.status == Status::Unassigned)
        {
            for vehicle in &self.vehicles {
                if vehicle.spare_capacity(weight_of) >= shipment.weight {
                    candidates.push(Candidate {
                        action: Action::InitiatePickup,
                        vehicle: vehicle.id,
                        shipment: shipment.id,
                    });
                }
            }
        }

        for vehicle in &self.vehicles {
            for shipment in vehicle.assigned() {
                candidates.push(Candidate {
                    action: Action::Continue,
                    vehicle: vehicle.id,
                    shipment,
                });
            }
        }

        candidates
    }

    pub fn is_complete(&self) -> bool {
        self.shipments.iter().all(|it| it.status.is_delivered())
    }

    pub fn undelivered(&self) -> impl Iterator<Item = ShipmentIdx> + '_ {
        self.shipments
            .iter()
            .filter(|it| !it.status.is_delivered())
            .map(|it| it.id)
    }

    /// Score of the schedule that led to this world, followed by `continuation`.
    pub fn score(&self, continuation: &[MovementEvent]) -> Score {
        let history_end = self.vehicles.iter().map(|it| it.travelled).max();
        let continuation_end = continuation.iter().map(|it| it.end).max();
        let mut used: HashSet<VehicleIdx> = set_new();
        used.extend(self.vehicles.iter().filter(|it| it.has_moved()).map(|it| it.id));
        used.extend(continuation.iter().map(|it| it.vehicle));
        Score {
            makespan: history_end.max(continuation_end).unwrap_or(0),
            num_vehicles: used.len(),
        }
    }
}
