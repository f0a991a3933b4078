use itertools::Itertools;
use log::{debug, info, warn};

use crate::col::{map_new, HashMap};
use crate::error::ScheduleError;
use crate::graph::{ExtEdge, Graph};
use crate::output::{self, ScheduleRecord};
use crate::shipment::{ExtShipment, Shipment, ShipmentIdx, Status};
use crate::shortest_path::ShortestPaths;
use crate::vehicle::{ExtVehicle, Vehicle, VehicleIdx};

use self::movement::{move_vehicle, MovementEvent};
use self::state::{Action, Candidate, Score, StateKey, World};

pub mod movement;
pub mod state;

#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Reuse the optimal continuation of states that were already solved.
    pub memoize: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { memoize: true }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded_states: usize,
    pub memo_hits: usize,
    /// Candidates that did not change the state at all.
    pub stalled_candidates: usize,
}

/// Exhaustive search for the schedule with the smallest makespan, using as few vehicles as
/// possible among those.
pub struct Scheduler {
    paths: ShortestPaths,
    vehicle_names: Vec<String>,
    shipment_names: Vec<String>,
    initial: World,
    memo: HashMap<StateKey, Vec<MovementEvent>>,
    config: SchedulerConfig,
    stats: SearchStats,
}

impl Scheduler {
    pub fn new(edges: &[ExtEdge], shipments: &[ExtShipment], vehicles: &[ExtVehicle]) -> Self {
        Self::with_config(edges, shipments, vehicles, SchedulerConfig::default())
    }

    /// Vehicles and shipments are numbered in order of their names, so that every order
    /// derived from the handles (exploration, output) follows the names.
    pub fn with_config(
        edges: &[ExtEdge],
        shipments: &[ExtShipment],
        vehicles: &[ExtVehicle],
        config: SchedulerConfig,
    ) -> Self {
        let mut graph = Graph::create(edges);

        let vehicles = vehicles
            .iter()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect_vec();
        let shipments = shipments
            .iter()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect_vec();

        let initial = World {
            vehicles: vehicles
                .iter()
                .enumerate()
                .map(|(idx, vehicle)| {
                    Vehicle::new(
                        VehicleIdx(idx as u32),
                        vehicle.capacity,
                        graph.add_node(&vehicle.start),
                    )
                })
                .collect(),
            shipments: shipments
                .iter()
                .enumerate()
                .map(|(idx, shipment)| {
                    Shipment::new(
                        ShipmentIdx(idx as u32),
                        shipment.weight,
                        graph.add_node(&shipment.from),
                        graph.add_node(&shipment.to),
                    )
                })
                .collect(),
        };

        Self {
            paths: ShortestPaths::new(graph),
            vehicle_names: vehicles.iter().map(|it| it.name.clone()).collect(),
            shipment_names: shipments.iter().map(|it| it.name.clone()).collect(),
            initial,
            memo: map_new(),
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn graph(&self) -> &Graph {
        self.paths.graph()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn vehicle_name(&self, vehicle: VehicleIdx) -> &str {
        &self.vehicle_names[vehicle.0 as usize]
    }

    pub fn shipment_name(&self, shipment: ShipmentIdx) -> &str {
        &self.shipment_names[shipment.0 as usize]
    }

    /// The optimal schedule, or an empty schedule if there is none.
    pub fn solve(&mut self) -> Vec<ScheduleRecord> {
        self.try_solve().unwrap_or_else(|err| {
            warn!("No schedule found: {}", err);
            Vec::new()
        })
    }

    pub fn try_solve(&mut self) -> Result<Vec<ScheduleRecord>, ScheduleError> {
        let events = self.plan()?;
        Ok(output::project(
            &events,
            self.paths.graph(),
            &self.vehicle_names,
            &self.shipment_names,
        ))
    }

    /// The movement log of the optimal schedule, in the order the search composed it.
    pub fn plan(&mut self) -> Result<Vec<MovementEvent>, ScheduleError> {
        let initial = self.initial.clone();
        let result = self.step(&initial);
        info!(
            "Expanded {} states ({} memo hits, {} stalled candidates), {} shortest path trees",
            self.stats.expanded_states,
            self.stats.memo_hits,
            self.stats.stalled_candidates,
            self.paths.num_cached_sources()
        );
        result
    }

    /// Returns the best continuation of `world`, i.e. the events appended after it.
    fn step(&mut self, world: &World) -> Result<Vec<MovementEvent>, ScheduleError> {
        let key = world.key();
        if self.config.memoize {
            if let Some(continuation) = self.memo.get(&key) {
                self.stats.memo_hits += 1;
                return Ok(continuation.clone());
            }
        }
        self.stats.expanded_states += 1;

        let candidates = world.candidates();
        let mut best: Option<(Score, Vec<MovementEvent>)> = None;
        for candidate in candidates {
            let mut next = world.clone();
            let mut continuation = self.apply(&mut next, candidate)?;
            if next.key() == key {
                debug!("Skipping {:?}, it does not change the state", candidate);
                self.stats.stalled_candidates += 1;
                continue;
            }
            continuation.extend(self.step(&next)?);

            let score = world.score(&continuation);
            if best
                .as_ref()
                .map_or(true, |(best_score, _)| score < *best_score)
            {
                best = Some((score, continuation));
            }
        }

        let continuation = match best {
            Some((_, continuation)) => continuation,
            None if world.is_complete() => Vec::new(),
            None => {
                return Err(ScheduleError::Unsolvable {
                    undelivered: world
                        .undelivered()
                        .map(|it| self.shipment_name(it).to_string())
                        .collect(),
                })
            }
        };

        if self.config.memoize {
            self.memo.insert(key, continuation.clone());
        }
        Ok(continuation)
    }

    /// Moves the vehicle of `candidate` towards the node the candidate is about and returns
    /// the resulting events.
    fn apply(
        &mut self,
        world: &mut World,
        candidate: Candidate,
    ) -> Result<Vec<MovementEvent>, ScheduleError> {
        let shipment = world.shipment(candidate.shipment);
        let target = match candidate.action {
            Action::InitiatePickup => shipment.origin,
            Action::Continue => shipment.destination,
        };
        let location = world.vehicle(candidate.vehicle).location;
        let path = self.paths.destination(location, target)?.clone();
        let events = move_vehicle(world, candidate.vehicle, &path);

        if candidate.action == Action::InitiatePickup {
            world
                .vehicle_mut(candidate.vehicle)
                .to_pick_up
                .insert(candidate.shipment);
            world.shipment_mut(candidate.shipment).status =
                Status::ScheduledFor(candidate.vehicle);
        }
        Ok(events)
    }
}
