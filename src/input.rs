use std::fs::File;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::graph::ExtEdge;
use crate::shipment::ExtShipment;
use crate::vehicle::ExtVehicle;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Could not open {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Input {
    pub edges: Vec<ExtEdge>,
    pub shipments: Vec<ExtShipment>,
    pub vehicles: Vec<ExtVehicle>,
}

fn reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).delimiter(b';');

    builder
}

fn parse<T: DeserializeOwned>(stream: impl std::io::Read) -> Result<Vec<T>, csv::Error> {
    reader().from_reader(stream).deserialize().collect()
}

pub fn parse_edges(stream: impl std::io::Read) -> Result<Vec<ExtEdge>, csv::Error> {
    parse(stream)
}
pub fn parse_shipments(stream: impl std::io::Read) -> Result<Vec<ExtShipment>, csv::Error> {
    parse(stream)
}
pub fn parse_vehicles(stream: impl std::io::Read) -> Result<Vec<ExtVehicle>, csv::Error> {
    parse(stream)
}

fn read_file<T>(
    path: &str,
    parse_file: impl Fn(File) -> Result<Vec<T>, csv::Error>,
) -> Result<Vec<T>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_file(file).map_err(|source| InputError::Csv {
        path: path.to_string(),
        source,
    })
}

impl Input {
    pub fn read(
        edges_path: &str,
        shipments_path: &str,
        vehicles_path: &str,
    ) -> Result<Self, InputError> {
        Ok(Self {
            edges: read_file(edges_path, |file| parse_edges(file))?,
            shipments: read_file(shipments_path, |file| parse_shipments(file))?,
            vehicles: read_file(vehicles_path, |file| parse_vehicles(file))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edges() {
        let content = r#"name; from; to; distance
E1; A; B; 30
; B; C; 10"#;
        let edges = parse_edges(content.as_bytes()).unwrap();
        assert_eq!(
            edges,
            [
                ExtEdge {
                    name: Some("E1".into()),
                    from: "A".into(),
                    to: "B".into(),
                    distance: 30
                },
                ExtEdge {
                    name: None,
                    from: "B".into(),
                    to: "C".into(),
                    distance: 10
                }
            ]
        );
    }

    #[test]
    fn test_parse_edges_without_names() {
        let content = r#"from; to; distance
A; B; 30"#;
        let edges = parse_edges(content.as_bytes()).unwrap();
        assert_eq!(edges[0].name, None);
        assert_eq!(edges[0].distance, 30);
    }

    #[test]
    fn test_parse_shipments_and_vehicles() {
        let shipments = parse_shipments(
            r#"name; weight; from; to
K1; 5; A; C"#
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(
            shipments,
            [ExtShipment {
                name: "K1".into(),
                weight: 5,
                from: "A".into(),
                to: "C".into()
            }]
        );

        let vehicles = parse_vehicles(
            r#"name; capacity; start
Q1; 6; B"#
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(
            vehicles,
            [ExtVehicle {
                name: "Q1".into(),
                capacity: 6,
                start: "B".into()
            }]
        );
    }

    #[test]
    fn test_parse_invalid_distance() {
        let content = r#"from; to; distance
A; B; -3"#;
        assert!(parse_edges(content.as_bytes()).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let result = Input::read("does-not-exist.csv", "", "");
        assert!(matches!(result, Err(InputError::Io { path, .. }) if path == "does-not-exist.csv"));
    }
}
