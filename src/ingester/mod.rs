pub mod scheduler;

pub use scheduler::{CycleStats, IngestState, Ingester, IngesterConfig};
