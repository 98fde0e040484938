//! Command handlers: bridge CLI args -> core commands -> output formatting.

pub mod config_cmd;
pub mod products;
pub mod util;
