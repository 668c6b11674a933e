pub mod database;
pub mod types;

pub use database::{get_global_database, init_global_database, ShipmentDatabase};
pub use types::{CompanyRecord, ShipmentRecord, StoreStats, TransportMode};
