use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("No path from {from} to {to}")]
    NotFound { from: String, to: String },
    #[error("No action left, but shipments {undelivered:?} are still undelivered")]
    Unsolvable { undelivered: Vec<String> },
}
