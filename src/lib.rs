pub mod cli;
pub mod config;
pub mod errors;
pub mod log;
pub mod resolve;
pub mod schema;
pub mod score;
pub mod ux;
pub mod wire;
pub mod wizard;
