//! External collaborators: candle supplier, notification sink, news gate.

pub mod market_data;
pub mod news;
pub mod notifier;
pub mod yahoo;

pub use market_data::{validate_series, MarketDataProvider, Timeframe};
pub use news::{ForexFactoryCalendar, NewsOracle};
pub use notifier::{DiscordNotifier, LogNotifier, Notifier, NotifyError};
pub use yahoo::YahooMarketDataProvider;
