//! Forward-scanning win/loss backtest
//!
//! Every row past the warm-up floor where the trend condition holds is a
//! simulated entry at its close, with the same ATR stop and RR target the
//! live position builder uses. The next `horizon` candles (entry candle
//! included) decide the outcome:
//!
//! - stop touched: loss, even if the target was also reached. Intrabar path
//!   order is unknown, so the stop is assumed to come first.
//! - otherwise target touched: win.
//! - neither: discarded, not part of the sample.

use tracing::debug;

use crate::config::{BacktestSides, SignalConfig};
use crate::models::backtest::BacktestResult;
use crate::models::indicators::IndicatorRow;
use crate::models::signal::SignalDirection;

/// Outcome of one simulated entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    Win,
    Loss,
    Unresolved,
}

/// Direction of a simulated entry at `row`, if any.
fn entry_direction(row: &IndicatorRow, sides: BacktestSides) -> Option<SignalDirection> {
    let fast = row.ema_fast?;
    let slow = row.ema_slow?;
    if fast > slow {
        Some(SignalDirection::Buy)
    } else if fast < slow && sides == BacktestSides::Both {
        Some(SignalDirection::Sell)
    } else {
        None
    }
}

/// Resolve one entry against its scan window
pub fn resolve_trade(
    direction: SignalDirection,
    entry: f64,
    atr: f64,
    rr_ratio: f64,
    window: &[IndicatorRow],
) -> TradeOutcome {
    let highest = window
        .iter()
        .map(|r| r.candle.high)
        .fold(f64::NEG_INFINITY, f64::max);
    let lowest = window
        .iter()
        .map(|r| r.candle.low)
        .fold(f64::INFINITY, f64::min);

    let (stop_hit, target_hit) = match direction {
        SignalDirection::Buy => (lowest <= entry - atr, highest >= entry + atr * rr_ratio),
        SignalDirection::Sell => (highest >= entry + atr, lowest <= entry - atr * rr_ratio),
        SignalDirection::None => return TradeOutcome::Unresolved,
    };

    if stop_hit {
        TradeOutcome::Loss
    } else if target_hit {
        TradeOutcome::Win
    } else {
        TradeOutcome::Unresolved
    }
}

/// Replay `rows` and aggregate the simulated outcomes.
///
/// Returns `None` when no entry resolved to a win or a loss.
pub fn run_backtest(rows: &[IndicatorRow], config: &SignalConfig) -> Option<BacktestResult> {
    let horizon = config.backtest_horizon;
    let end = rows.len().saturating_sub(horizon);

    let mut wins = 0;
    let mut losses = 0;
    let mut unresolved = 0;

    for i in config.backtest_warmup..end {
        let row = &rows[i];
        let Some(direction) = entry_direction(row, config.backtest_sides) else {
            continue;
        };
        let Some(atr) = row.atr.filter(|a| a.is_finite()) else {
            continue;
        };

        let window = &rows[i..i + horizon];
        match resolve_trade(direction, row.close(), atr, config.rr_ratio, window) {
            TradeOutcome::Win => wins += 1,
            TradeOutcome::Loss => losses += 1,
            TradeOutcome::Unresolved => unresolved += 1,
        }
    }

    debug!(
        wins = wins,
        losses = losses,
        unresolved = unresolved,
        rows = rows.len(),
        "Backtest: {} wins, {} losses, {} unresolved over {} rows",
        wins,
        losses,
        unresolved,
        rows.len()
    );

    BacktestResult::from_counts(wins, losses, unresolved, config.rr_ratio)
}
