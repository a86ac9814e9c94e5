//! Weather page: current conditions for one location, with a retry control
//! shown only after a failure.

use super::ViewState;
use crate::clients::weather::{WeatherClient, WeatherIcon};
use crate::locale::{Locale, Msg};
use crate::models::WeatherSnapshot;
use crate::telemetry::{Level, Telemetry};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Ready payload of the weather page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub snapshot: WeatherSnapshot,
    pub icon: WeatherIcon,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherPage {
    #[serde(skip)]
    client: WeatherClient,
    pub location: String,
    pub state: ViewState<WeatherView>,
    /// Fetches issued so far, the initial load included.
    pub attempts: u32,
}

impl WeatherPage {
    pub fn new(client: WeatherClient, location: String) -> Self {
        Self {
            client,
            location,
            state: ViewState::Loading,
            attempts: 0,
        }
    }

    #[instrument(level = "info", skip_all, fields(location = %self.location))]
    pub async fn load(&mut self, telemetry: &Telemetry, locale: Locale) {
        self.state.begin();
        self.attempts += 1;

        let result = self.client.fetch_current(&self.location).await;
        if let Err(e) = &result {
            telemetry.capture_error(e, &[("page", "weather")]);
        }
        self.state.resolve(
            result.map(|snapshot| WeatherView {
                icon: WeatherIcon::for_condition(&snapshot.condition),
                snapshot,
            }),
            locale.text(Msg::WeatherError),
        );
    }

    /// The retry control is offered only on the error state.
    pub fn can_retry(&self) -> bool {
        self.state.is_error()
    }

    /// Run exactly one new fetch cycle. Ignored unless the page is in the
    /// error state.
    pub async fn retry(&mut self, telemetry: &Telemetry, locale: Locale) {
        if !self.can_retry() {
            warn!("Retry requested while the weather page is not in error");
            return;
        }
        telemetry.add_breadcrumb("retry weather", "user", Level::Info);
        info!(attempt = self.attempts + 1, "Retrying weather");
        self.load(telemetry, locale).await;
    }
}
