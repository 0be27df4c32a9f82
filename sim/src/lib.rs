//! Agent-based market simulation on top of the agora matching engine.
//!
//! A tick-driven loop sequences agent turns (market maker, arbitrageur,
//! noise traders), submits their orders to the engine one at a time, and
//! settles the returned trades into per-agent accounts. The engine's book
//! value is threaded through every call; nothing here mutates it in place.

pub mod account;
pub mod agents;
pub mod config;
pub mod report;
pub mod runner;

pub use account::Account;
pub use agents::{Agent, Fill, MarketView};
pub use config::{ConfigError, SeedOrderConfig, SimConfig};
pub use report::{AgentSummary, ReportError, SimulationReport};
pub use runner::{SimulationConfig, SimulationMetrics, SimulationRunner, TickResult};
