//! Text rendering of one dashboard refresh.

use std::fmt::Write as _;

use ambient::AmbientFrame;
use chrono::{DateTime, Local, TimeZone, Utc};
use common::{Headline, Quote, Settings, WeatherReading};
use tracing::warn;

use crate::services::Services;

const PLACEHOLDER: &str = "--";
const MAX_HEADLINES: usize = 5;

/// Result of one refresh; `None` marks a feed that failed this tick.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub weather: Option<WeatherReading>,
    pub headlines: Option<Vec<Headline>>,
    pub quotes: Option<Vec<Quote>>,
}

pub struct Dashboard {
    services: Services,
    settings: Settings,
    last_temperature: Option<f64>,
}

impl Dashboard {
    pub fn new(services: Services, settings: Settings) -> Self {
        Self {
            services,
            settings,
            last_temperature: None,
        }
    }

    /// Fetch all three feeds concurrently. Failures are logged and dropped.
    pub async fn refresh(&mut self) -> Snapshot {
        let (weather, headlines, quotes) = tokio::join!(
            self.services.weather.fetch_current(),
            self.services.news.fetch_headlines(),
            self.services.market.fetch_snapshot(),
        );

        let snapshot = Snapshot {
            weather: weather
                .map_err(|e| warn!("Weather refresh failed: {}", e))
                .ok(),
            headlines: headlines
                .map_err(|e| warn!("News refresh failed: {}", e))
                .ok(),
            quotes: quotes
                .map_err(|e| warn!("Market refresh failed: {}", e))
                .ok(),
        };
        if let Some(reading) = &snapshot.weather {
            self.last_temperature = Some(reading.temperature_celsius);
        }
        snapshot
    }

    /// Temperature from the most recent successful weather fetch.
    pub fn last_temperature(&self) -> Option<f64> {
        self.last_temperature
    }

    pub fn frame<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AmbientFrame {
        AmbientFrame::at(now, self.last_temperature)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Render a snapshot as the plain-text dashboard.
pub fn render<Tz: TimeZone>(snapshot: &Snapshot, settings: &Settings, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "{}", now.format(settings.time_format.pattern()));
    let _ = writeln!(out, "{}", weather_line(snapshot.weather.as_ref(), settings));

    let _ = writeln!(out, "\nMarkets");
    match &snapshot.quotes {
        Some(quotes) => {
            let visible = settings.visible_quotes(quotes);
            if visible.is_empty() {
                let _ = writeln!(out, "  {}", PLACEHOLDER);
            }
            for quote in visible {
                let _ = writeln!(out, "  {}", quote_line(quote));
            }
        }
        None => {
            let _ = writeln!(out, "  {}", PLACEHOLDER);
        }
    }

    let _ = writeln!(out, "\nHeadlines");
    match &snapshot.headlines {
        Some(headlines) if !headlines.is_empty() => {
            for headline in headlines.iter().take(MAX_HEADLINES) {
                let _ = writeln!(out, "  {} ({})", headline.title, headline.source);
            }
        }
        _ => {
            let _ = writeln!(out, "  {}", PLACEHOLDER);
        }
    }
    out
}

/// Render with the clock shown in the zone named by `settings.timezone`.
///
/// `local` follows the host, `utc` is UTC, anything else is parsed as an
/// IANA identifier. Unknown identifiers fall back to local time.
pub fn render_in_zone(snapshot: &Snapshot, settings: &Settings, now: DateTime<Utc>) -> String {
    let zone = settings.timezone.trim();
    if zone.eq_ignore_ascii_case("local") {
        return render(snapshot, settings, &now.with_timezone(&Local));
    }
    if zone.eq_ignore_ascii_case("utc") {
        return render(snapshot, settings, &now);
    }
    match zone.parse::<chrono_tz::Tz>() {
        Ok(tz) => render(snapshot, settings, &now.with_timezone(&tz)),
        Err(e) => {
            warn!("Unknown timezone '{}' ({}), showing local time", zone, e);
            render(snapshot, settings, &now.with_timezone(&Local))
        }
    }
}

fn weather_line(weather: Option<&WeatherReading>, settings: &Settings) -> String {
    let Some(reading) = weather else {
        return format!("{}{}", PLACEHOLDER, settings.temperature_unit.symbol());
    };
    let unit = settings.temperature_unit;
    let mut line = format!(
        "{:.0}{} {}",
        unit.convert(reading.temperature_celsius),
        unit.symbol(),
        reading.condition
    );
    if settings.show_weather_location {
        line.push_str(" · ");
        line.push_str(&reading.location);
    }
    line
}

fn quote_line(quote: &Quote) -> String {
    let arrow = if quote.is_up() { '▲' } else { '▼' };
    format!(
        "{:<8} {:>12.2} {} {:+.2} ({:+.2}%)",
        quote.symbol, quote.price, arrow, quote.change, quote.change_percent
    )
}
