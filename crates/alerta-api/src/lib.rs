// alerta-api: Async Rust client for the Alerta Conecta incident backend

pub mod client;
pub mod contract;
pub mod error;
pub mod transport;
pub mod wire;

pub use client::IncidentClient;
pub use contract::BackendContract;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
