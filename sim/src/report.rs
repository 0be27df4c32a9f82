//! Run reporting: console rendering and JSON export.

use crate::runner::{SimulationMetrics, SimulationRunner};
use agora_engine::{depth_string, BookSnapshot, Trade};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {error}")]
    Io { path: String, error: String },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Final state of one agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSummary {
    pub owner: String,
    pub agent_type: String,
    pub orders: u64,
    pub fills: u64,
    pub inventory: i64,
    pub cash: Decimal,
    pub mark_to_market: Decimal,
}

/// Everything a run produced, in an export-friendly shape.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub name: String,
    pub metrics: SimulationMetrics,
    pub agents: Vec<AgentSummary>,
    pub trades: Vec<Trade>,
    pub book: BookSnapshot,
    /// Human-readable depth view of the final book.
    pub depth: String,
}

impl SimulationReport {
    /// Capture the final state of a runner.
    pub fn capture(name: impl Into<String>, runner: &SimulationRunner) -> Self {
        let mark = runner.mark_price();
        let agents = runner
            .slots()
            .iter()
            .map(|slot| AgentSummary {
                owner: slot.agent.owner().to_string(),
                agent_type: slot.agent.agent_type().to_string(),
                orders: slot.orders,
                fills: slot.fills,
                inventory: slot.account.inventory,
                cash: slot.account.cash,
                mark_to_market: slot.account.mark_to_market(mark),
            })
            .collect();

        SimulationReport {
            name: name.into(),
            metrics: runner.metrics().clone(),
            agents,
            trades: runner.trades().to_vec(),
            book: BookSnapshot::capture(runner.book()),
            depth: depth_string(runner.book()),
        }
    }

    /// Multi-line console summary.
    pub fn render_console(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", self.name);
        let _ = writeln!(
            out,
            "ticks: {}  orders: {}  trades: {}  volume: {}",
            self.metrics.total_ticks,
            self.metrics.total_orders,
            self.metrics.total_trades,
            self.metrics.total_volume
        );
        match self.metrics.final_mid {
            Some(mid) => {
                let _ = writeln!(
                    out,
                    "final mid: {}  volatility: {:.6}",
                    mid, self.metrics.price_volatility
                );
            }
            None => {
                let _ = writeln!(out, "final mid: n/a");
            }
        }
        let _ = writeln!(out, "{}", self.depth);
        let _ = writeln!(out, "-- agents --");
        for agent in &self.agents {
            let _ = writeln!(
                out,
                "{:<12} {:<12} orders={:<5} fills={:<5} inventory={:<6} cash={:<12} pnl={}",
                agent.owner,
                agent.agent_type,
                agent.orders,
                agent.fills,
                agent.inventory,
                agent.cash,
                agent.mark_to_market
            );
        }
        out
    }

    /// Write the full report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json).map_err(|e| ReportError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })
    }
}
