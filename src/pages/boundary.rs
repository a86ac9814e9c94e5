//! Render boundary: a panic inside a page becomes a crash screen instead of
//! tearing down the process.

use crate::locale::{Locale, Msg};
use crate::telemetry::{Level, Telemetry};
use crate::utils::truncate_for_log;
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Fallback shown in place of a page that panicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashScreen {
    pub route: &'static str,
    /// Panic message; only filled in for development builds.
    pub details: Option<String>,
}

impl CrashScreen {
    pub fn apology(&self, locale: Locale) -> &'static str {
        locale.text(Msg::Apology)
    }

    pub fn reset_hint(&self, locale: Locale) -> &'static str {
        locale.text(Msg::ApologyReset)
    }
}

impl fmt::Display for CrashScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page '{}' crashed", self.route)
    }
}

impl std::error::Error for CrashScreen {}

/// Run `page`, turning a panic into a [`CrashScreen`]. The panic is logged
/// and reported to telemetry tagged with the route.
pub async fn guard<F, T>(
    route: &'static str,
    telemetry: &Telemetry,
    show_details: bool,
    page: F,
) -> Result<T, CrashScreen>
where
    F: Future<Output = T>,
{
    match AssertUnwindSafe(page).catch_unwind().await {
        Ok(value) => Ok(value),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(route, panic = %truncate_for_log(&message, 500), "Page crashed");
            telemetry.capture_message(Level::Error, &message, &[("boundary", route)]);
            Err(CrashScreen {
                route,
                details: show_details.then_some(message),
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
