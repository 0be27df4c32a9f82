//! Simulation configuration.
//!
//! A single JSON file describes the run: simulation parameters, one config
//! block per agent type, how many noise traders to spawn, and optional seed
//! orders rested in the book before the first tick.

use crate::agents::{
    Arbitrageur, ArbitrageurConfig, MarketMaker, MarketMakerConfig, NoiseTrader, NoiseTraderConfig,
};
use crate::runner::{SimulationConfig, SimulationRunner};
use agora_engine::{Price, Quantity, Side};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {error}")]
    Io { path: String, error: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid seed order: {0}")]
    SeedOrder(String),

    #[error("invalid agent config: {0}")]
    Agent(String),
}

/// An order rested in the book before the simulation starts. Seed orders
/// are inserted raw (no matching), so they can deliberately stage a crossed
/// book for the arbitrageur.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOrderConfig {
    pub side: Side,
    pub price: Price,
    pub quantity: i64,
}

/// Root configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub name: String,
    pub simulation: SimulationConfig,
    pub market_maker: MarketMakerConfig,
    pub arbitrageur: ArbitrageurConfig,
    pub noise: NoiseTraderConfig,
    /// Number of noise traders to spawn; each gets a derived seed.
    pub noise_traders: u32,
    pub seed_orders: Vec<SeedOrderConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            name: "Agora Market Simulation".to_string(),
            simulation: SimulationConfig::default(),
            market_maker: MarketMakerConfig::default(),
            arbitrageur: ArbitrageurConfig::default(),
            noise: NoiseTraderConfig::default(),
            noise_traders: 2,
            seed_orders: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Assemble a runner with the standard agent set: one market maker, one
    /// arbitrageur and the configured number of noise traders.
    pub fn build_runner(&self) -> Result<SimulationRunner, ConfigError> {
        // NoiseTrader::new panics on a bad sigma, so file-sourced values are
        // checked here where they can still be reported as an error.
        if !self.noise.price_sigma_ticks.is_finite() || self.noise.price_sigma_ticks < 0.0 {
            return Err(ConfigError::Agent(format!(
                "noise.price_sigma_ticks must be finite and >= 0, got {}",
                self.noise.price_sigma_ticks
            )));
        }

        let mut runner = SimulationRunner::new(self.simulation.clone());

        runner.add_agent(Box::new(MarketMaker::new(
            "mm-1",
            self.market_maker.clone(),
        )));
        runner.add_agent(Box::new(Arbitrageur::new(
            "arb-1",
            self.arbitrageur.clone(),
        )));
        for i in 0..self.noise_traders {
            let config = NoiseTraderConfig {
                seed: self.noise.seed.map(|s| s + u64::from(i)),
                ..self.noise.clone()
            };
            runner.add_agent(Box::new(NoiseTrader::new(format!("noise-{}", i + 1), config)));
        }

        runner
            .seed_book(self.seed_orders.iter().map(|seed| {
                (seed.side, seed.price, Quantity::new(seed.quantity))
            }))
            .map_err(|e| ConfigError::SeedOrder(e.to_string()))?;

        Ok(runner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_usable() {
        let config = SimConfig::default();
        assert_eq!(config.noise_traders, 2);
        assert!(config.seed_orders.is_empty());
        assert!(config.build_runner().is_ok());
    }

    #[test]
    fn parses_a_partial_json_config() {
        let json = r#"{
            "name": "smoke",
            "simulation": { "ticks": 10, "verbose": true },
            "noise_traders": 1,
            "noise": { "trade_probability": 1.0, "seed": 1 },
            "seed_orders": [
                { "side": "BUY", "price": "99.75", "quantity": 5 },
                { "side": "SELL", "price": "100.25", "quantity": 5 }
            ]
        }"#;

        let config = SimConfig::from_json(json).unwrap();
        assert_eq!(config.name, "smoke");
        assert_eq!(config.simulation.ticks, 10);
        assert!(config.simulation.verbose);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.market_maker.quote_size, 5);
        assert_eq!(config.seed_orders.len(), 2);
        assert_eq!(config.seed_orders[0].price, Price::from(dec!(99.75)));

        let runner = config.build_runner().unwrap();
        assert_eq!(runner.book().order_count(), 2);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_a_negative_noise_sigma() {
        let json = r#"{ "noise": { "price_sigma_ticks": -4.0 } }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert!(matches!(config.build_runner(), Err(ConfigError::Agent(_))));
    }

    #[test]
    fn rejects_non_positive_seed_orders() {
        let mut config = SimConfig::default();
        config.seed_orders.push(SeedOrderConfig {
            side: Side::Buy,
            price: Price::from(dec!(100)),
            quantity: 0,
        });
        assert!(matches!(
            config.build_runner(),
            Err(ConfigError::SeedOrder(_))
        ));
    }
}
