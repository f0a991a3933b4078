use std::mem::take;

use itertools::Itertools;

use crate::graph::NodeIdx;
use crate::primitives::Distance;
use crate::shipment::{ShipmentIdx, Status};
use crate::shortest_path::PathResult;
use crate::vehicle::VehicleIdx;

use super::state::World;

/// A vehicle traversing a single edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementEvent {
    pub start: Distance,
    pub end: Distance,
    pub vehicle: VehicleIdx,
    pub from: NodeIdx,
    pub to: NodeIdx,
    /// Shipments loaded at `from` before departure.
    pub picked_up: Vec<ShipmentIdx>,
    /// Shipments unloaded at `to`.
    pub delivered: Vec<ShipmentIdx>,
}

/// Drives `vehicle_idx` along `path`, one edge at a time.
///
/// Everything the vehicle has queued for pickup is loaded when it departs on the first
/// edge. At the end of every edge, carried shipments destined for that node are unloaded,
/// so a single trip may serve shipments whose destinations merely lie on the way.
pub fn move_vehicle(
    world: &mut World,
    vehicle_idx: VehicleIdx,
    path: &PathResult,
) -> Vec<MovementEvent> {
    let World {
        vehicles,
        shipments,
    } = world;
    let vehicle = &mut vehicles[vehicle_idx.0 as usize];
    debug_assert_eq!(vehicle.location, path.from);

    let legs = path.legs();
    let mut events = Vec::with_capacity(legs.len());
    for (leg_number, leg) in legs.into_iter().enumerate() {
        let picked_up = if leg_number == 0 {
            let queued = take(&mut vehicle.to_pick_up);
            for &shipment_idx in &queued {
                shipments[shipment_idx.0 as usize].status = Status::Carried(vehicle_idx);
                vehicle.carried.insert(shipment_idx);
            }
            queued.into_iter().collect_vec()
        } else {
            Vec::new()
        };

        let delivered = vehicle
            .carried
            .iter()
            .copied()
            .filter(|it| shipments[it.0 as usize].destination == leg.to)
            .collect_vec();
        for &shipment_idx in &delivered {
            shipments[shipment_idx.0 as usize].status = Status::Delivered(vehicle_idx);
            vehicle.carried.remove(&shipment_idx);
            vehicle.delivered.insert(shipment_idx);
        }

        let start = vehicle.travelled;
        vehicle.travelled += leg.distance;
        vehicle.location = leg.to;
        events.push(MovementEvent {
            start,
            end: vehicle.travelled,
            vehicle: vehicle_idx,
            from: leg.from,
            to: leg.to,
            picked_up,
            delivered,
        });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::shipment::Shipment;
    use crate::shortest_path::ShortestPaths;
    use crate::vehicle::Vehicle;

    /// A - B - C - D, every edge of length 10.
    fn create_line() -> (ShortestPaths, [NodeIdx; 4]) {
        let mut graph = Graph::new();
        graph.add_edge("A", "B", 10);
        graph.add_edge("B", "C", 10);
        graph.add_edge("C", "D", 10);
        let nodes = ["A", "B", "C", "D"].map(|it| graph.node_idx(it).unwrap());
        (ShortestPaths::new(graph), nodes)
    }

    #[test]
    fn test_picks_up_on_departure_and_delivers_on_the_way() {
        let (mut paths, [a, b, c, d]) = create_line();
        let v = VehicleIdx(0);
        let (k0, k1, k2) = (ShipmentIdx(0), ShipmentIdx(1), ShipmentIdx(2));
        let mut world = World {
            vehicles: vec![Vehicle::new(v, 20, a)],
            shipments: vec![
                Shipment::new(k0, 5, a, b),
                Shipment::new(k1, 5, a, d),
                Shipment::new(k2, 5, c, d),
            ],
        };
        world.vehicle_mut(v).travelled = 7;
        for k in [k0, k1] {
            world.vehicle_mut(v).to_pick_up.insert(k);
            world.shipment_mut(k).status = Status::ScheduledFor(v);
        }

        let path = paths.destination(a, d).unwrap().clone();
        let events = move_vehicle(&mut world, v, &path);

        assert_eq!(
            events,
            [
                MovementEvent {
                    start: 7,
                    end: 17,
                    vehicle: v,
                    from: a,
                    to: b,
                    picked_up: vec![k0, k1],
                    delivered: vec![k0],
                },
                MovementEvent {
                    start: 17,
                    end: 27,
                    vehicle: v,
                    from: b,
                    to: c,
                    picked_up: vec![],
                    delivered: vec![],
                },
                MovementEvent {
                    start: 27,
                    end: 37,
                    vehicle: v,
                    from: c,
                    to: d,
                    picked_up: vec![],
                    delivered: vec![k1],
                },
            ]
        );
        // Shipments that merely lie on the way are not picked up.
        assert_eq!(world.shipment(k2).status, Status::Unassigned);
        assert_eq!(world.shipment(k0).status, Status::Delivered(v));
        assert_eq!(world.shipment(k1).status, Status::Delivered(v));

        let vehicle = world.vehicle(v);
        assert_eq!(vehicle.location, d);
        assert_eq!(vehicle.travelled, 37);
        assert!(vehicle.to_pick_up.is_empty());
        assert!(vehicle.carried.is_empty());
        assert_eq!(vehicle.delivered.iter().copied().collect_vec(), [k0, k1]);
    }

    #[test]
    fn test_trivial_path_changes_nothing() {
        let (mut paths, [a, b, _, _]) = create_line();
        let v = VehicleIdx(0);
        let k = ShipmentIdx(0);
        let mut world = World {
            vehicles: vec![Vehicle::new(v, 20, a)],
            shipments: vec![Shipment::new(k, 5, a, b)],
        };
        world.vehicle_mut(v).to_pick_up.insert(k);
        world.shipment_mut(k).status = Status::ScheduledFor(v);
        let before = world.clone();

        let path = paths.destination(a, a).unwrap().clone();
        assert!(move_vehicle(&mut world, v, &path).is_empty());
        assert_eq!(world, before);
    }
}
