pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::{ApiMode, DevServerConfig};
pub use frameworks::server::{run, run_with_config};
pub use frameworks::transport::api_transport;
