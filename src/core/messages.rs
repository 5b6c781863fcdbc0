//! Text of the advisory messages sent through the notifier

use crate::models::backtest::BacktestResult;
use crate::models::signal::TradeSignal;

pub fn startup_message(symbol: &str) -> String {
    format!("🚀 Aurum signal engine deployed and watching {}.", symbol)
}

pub fn heartbeat_message() -> String {
    "💓 Aurum signal engine is running.".to_string()
}

pub fn error_message(error: &str) -> String {
    format!("🚨 Signal cycle failed 🚨\n{}", error)
}

pub fn signal_message(signal: &TradeSignal) -> String {
    format!(
        "🔥 **{symbol} SIGNAL**\n\n\
         Direction: {direction}\n\
         Entry: {entry:.2}\n\
         Stop: {stop:.2}\n\
         Target: {target:.2}\n\n\
         Confidence: {confidence}/100\n\n\
         Position Size: {size:.3}\n\
         Potential Profit: ${profit:.2}\n\n\
         Status: ACTIVE ✅",
        symbol = signal.symbol,
        direction = signal.direction,
        entry = signal.entry,
        stop = signal.stop,
        target = signal.target,
        confidence = signal.confidence,
        size = signal.size,
        profit = signal.potential_profit,
    )
}

pub fn backtest_message(symbol: &str, result: &BacktestResult) -> String {
    format!(
        "📊 **{symbol} BACKTEST**\n\n\
         Win Rate: {win_rate:.1}%\n\
         Expectancy: {expectancy:.2}R (RR {rr})\n\
         Trades: {sample} ({wins} wins / {losses} losses, {unresolved} unresolved)",
        symbol = symbol,
        win_rate = result.win_rate * 100.0,
        expectancy = result.expectancy,
        rr = result.risk_reward,
        sample = result.sample_size,
        wins = result.wins,
        losses = result.losses,
        unresolved = result.unresolved,
    )
}
