pub mod col;
pub mod error;
pub mod graph;
pub mod indexer;
pub mod input;
pub mod output;
pub mod primitives;
pub mod schedule;
pub mod shipment;
pub mod shortest_path;
pub mod vehicle;
