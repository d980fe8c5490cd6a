//! JSON-lines replay of order events and ticks through a [`TradeGate`]
//!
//! Each input line is one event, tagged by `kind`:
//!
//! ```text
//! {"kind":"order","stat_type":"orders_opened","amount":2}
//! {"kind":"set_limit","stat_type":"orders_opened","period":"per_hour","value":5}
//! {"kind":"tick","at":"2024-03-05T09:00:00Z","observation":{"market_closed":true}}
//! ```
//!
//! Each tick writes one [`TickReport`] line. Blank lines and lines starting
//! with `#` are skipped.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tradegate_core::{Observation, StatisticPeriod, StatisticType, TradeCondition, TradeGate};

/// One line of a replay script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Order events to count
    Order {
        stat_type: StatisticType,
        #[serde(default = "default_amount")]
        amount: u64,
    },
    /// Evaluate the gate at `at`
    Tick {
        at: DateTime<Utc>,
        #[serde(default)]
        observation: Observation,
    },
    /// Change limits; a missing type or period targets all of them
    SetLimit {
        stat_type: Option<StatisticType>,
        period: Option<StatisticPeriod>,
        value: u64,
    },
}

fn default_amount() -> u64 {
    1
}

/// Gate output for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub at: DateTime<Utc>,
    pub bits: u32,
    pub conditions: Vec<TradeCondition>,
    pub allows_trading: bool,
}

/// Totals for a finished replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: u64,
    pub ticks: u64,
    pub blocked_ticks: u64,
}

/// Apply one event, returning a report for ticks
pub fn apply(gate: &mut TradeGate, event: ReplayEvent) -> Option<TickReport> {
    match event {
        ReplayEvent::Order { stat_type, amount } => {
            gate.record(stat_type, amount);
            None
        }
        ReplayEvent::SetLimit {
            stat_type,
            period,
            value,
        } => {
            match (stat_type, period) {
                (Some(t), Some(p)) => gate.set_limit(t, p, value),
                (None, Some(p)) => gate.set_period_limit(p, value),
                (Some(t), None) => gate.set_type_limit(t, value),
                (None, None) => gate.set_all_limits(value),
            }
            None
        }
        ReplayEvent::Tick { at, observation } => {
            let states = gate.evaluate(at, &observation);
            Some(TickReport {
                at,
                bits: states.to_bits(),
                conditions: states.iter().collect(),
                allows_trading: states.allows_trading(),
            })
        }
    }
}

/// Replay every event from `input`, writing tick reports to `output`
pub fn run<R: BufRead, W: Write>(gate: &mut TradeGate, input: R, mut output: W) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: ReplayEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("Invalid event on line {}", line_no))?;
        summary.events += 1;

        if let Some(report) = apply(gate, event) {
            summary.ticks += 1;
            if !report.allows_trading {
                summary.blocked_ticks += 1;
            }
            serde_json::to_writer(&mut output, &report)?;
            writeln!(output)?;
        }
    }

    output.flush()?;
    Ok(summary)
}
