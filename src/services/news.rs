//! High-impact economic event gate

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

#[async_trait::async_trait]
pub trait NewsOracle {
    /// Whether a high-impact event is close enough to pause signalling
    async fn high_impact_event_imminent(&self) -> bool;
}

/// One entry of the weekly calendar feed
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub country: String,
    pub date: String,
    #[serde(default)]
    pub impact: String,
}

impl CalendarEvent {
    pub fn is_high_impact(&self) -> bool {
        self.impact == "High"
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// True if any high-impact event lies within `window` before or after `now`.
///
/// Events with an unparseable date are ignored.
pub fn event_within_window(events: &[CalendarEvent], now: DateTime<Utc>, window: Duration) -> bool {
    events
        .iter()
        .filter(|event| event.is_high_impact())
        .filter_map(|event| event.time().map(|t| (event, t)))
        .any(|(event, time)| {
            let near = (time - now).abs() < window;
            if near {
                debug!(title = %event.title, country = %event.country, at = %time, "High-impact event near");
            }
            near
        })
}

/// Weekly economic calendar published as JSON (Forex Factory format).
pub struct ForexFactoryCalendar {
    client: reqwest::Client,
    url: String,
    window: Duration,
}

impl ForexFactoryCalendar {
    pub fn new(url: impl Into<String>, window_minutes: i64) -> Self {
        Self::with_client(url, window_minutes, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, window_minutes: i64, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.into(),
            window: Duration::minutes(window_minutes.clamp(1, crate::config::MAX_MINUTES)),
        }
    }

    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, reqwest::Error> {
        self.client
            .get(&self.url)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<CalendarEvent>>()
            .await
    }
}

#[async_trait::async_trait]
impl NewsOracle for ForexFactoryCalendar {
    /// A calendar that cannot be read does not block signalling.
    async fn high_impact_event_imminent(&self) -> bool {
        match self.fetch_events().await {
            Ok(events) => event_within_window(&events, Utc::now(), self.window),
            Err(e) => {
                warn!(error = %e, url = %self.url, "Economic calendar unavailable, not gating");
                false
            }
        }
    }
}
