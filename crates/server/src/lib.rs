pub mod block;
pub mod config;
pub mod query;
pub mod worldgen;
