use itertools::Itertools;
use serde::Serialize;

use crate::graph::Graph;
use crate::primitives::Distance;
use crate::schedule::movement::MovementEvent;
use crate::shipment::ShipmentIdx;

/// One line of the published schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub start: Distance,
    pub vehicle: String,
    pub from: String,
    pub picked_up: Vec<String>,
    pub to: String,
    pub delivered: Vec<String>,
}

/// Sorts the movement log by vehicle and start time and resolves all labels.
pub fn project(
    events: &[MovementEvent],
    graph: &Graph,
    vehicle_names: &[String],
    shipment_names: &[String],
) -> Vec<ScheduleRecord> {
    let shipment_labels = |shipments: &[ShipmentIdx]| {
        shipments
            .iter()
            .map(|it| shipment_names[it.0 as usize].clone())
            .collect_vec()
    };
    events
        .iter()
        .sorted_by_key(|event| (event.vehicle, event.start))
        .map(|event| ScheduleRecord {
            start: event.start,
            vehicle: vehicle_names[event.vehicle.0 as usize].clone(),
            from: graph.label(event.from).to_string(),
            picked_up: shipment_labels(&event.picked_up),
            to: graph.label(event.to).to_string(),
            delivered: shipment_labels(&event.delivered),
        })
        .collect()
}

/// Flat CSV shape of a `ScheduleRecord`; shipment lists are joined with `,`.
#[derive(Debug, Serialize)]
struct ScheduleRow<'a> {
    #[serde(rename = "W")]
    start: Distance,
    #[serde(rename = "T")]
    vehicle: &'a str,
    #[serde(rename = "N1")]
    from: &'a str,
    #[serde(rename = "P1")]
    picked_up: String,
    #[serde(rename = "N2")]
    to: &'a str,
    #[serde(rename = "P2")]
    delivered: String,
}

pub fn write_schedule(
    records: &[ScheduleRecord],
    stream: impl std::io::Write,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(stream);
    for record in records {
        writer.serialize(ScheduleRow {
            start: record.start,
            vehicle: &record.vehicle,
            from: &record.from,
            picked_up: record.picked_up.join(","),
            to: &record.to,
            delivered: record.delivered.join(","),
        })?;
    }
    writer.flush()?;
    Ok(())
}
