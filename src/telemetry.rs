//! Error reporting to Sentry.
//!
//! [`Telemetry`] is an explicitly created service handle: `main` builds it
//! with [`Telemetry::init`], passes clones to whoever reports errors, and
//! closes it with [`Telemetry::shutdown`] before exiting. The handle owns the
//! [`ClientInitGuard`]; dropping the last clone without calling `shutdown`
//! still flushes, but only `shutdown` bounds the wait.
//!
//! | Configuration | Behaviour |
//! |---------------|-----------|
//! | no DSN, or an unparseable one | disabled: events are only logged locally |
//! | DSN, development | events are built, logged locally and dropped before sending |
//! | DSN, production | events are sent |
//!
//! # Breadcrumbs
//!
//! The last [`MAX_BREADCRUMBS`] breadcrumbs are attached to every event.
//! Besides [`Telemetry::add_breadcrumb`], `main` installs the
//! `sentry-tracing` layer, which turns `info!` and louder log lines into
//! breadcrumbs as well.

use crate::config::Environment;
use sentry::protocol::{Breadcrumb, Event};
use sentry::types::Dsn;
use sentry::{ClientInitGuard, ClientOptions, Hub};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub use sentry::Level;

/// Breadcrumbs retained for attachment to events.
pub const MAX_BREADCRUMBS: usize = 100;

/// Longest [`Telemetry::shutdown`] waits for queued events to go out.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub dsn: Option<String>,
    pub environment: Environment,
    pub release: &'static str,
}

struct Inner {
    hub: Option<Arc<Hub>>,
    guard: Mutex<Option<ClientInitGuard>>,
    sending: bool,
}

/// Cloneable handle to the error reporter.
#[derive(Clone)]
pub struct Telemetry {
    inner: Arc<Inner>,
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.inner.hub.is_some())
            .field("sending", &self.inner.sending)
            .finish()
    }
}

impl Telemetry {
    /// Start the Sentry client and bind it to the calling thread's hub.
    ///
    /// # Arguments
    ///
    /// * `config` - DSN, environment and release reported with every event
    ///
    /// # Returns
    ///
    /// An enabled handle when the DSN parses, otherwise [`Telemetry::disabled`].
    /// In development the client is live but its `before_send` hook logs each
    /// event and drops it.
    #[instrument(level = "info", skip_all, fields(environment = config.environment.as_str()))]
    pub fn init(config: TelemetryConfig) -> Self {
        let dsn = match config.dsn.as_deref().map(str::parse::<Dsn>) {
            Some(Ok(dsn)) => dsn,
            Some(Err(e)) => {
                warn!(error = %e, "Invalid error reporting DSN; error reporting disabled");
                return Self::disabled();
            }
            None => {
                debug!("No DSN configured; error reporting disabled");
                return Self::disabled();
            }
        };

        let development = config.environment == Environment::Development;
        let mut options = ClientOptions {
            dsn: Some(dsn),
            environment: Some(Cow::Borrowed(config.environment.as_str())),
            release: Some(Cow::Borrowed(config.release)),
            max_breadcrumbs: MAX_BREADCRUMBS,
            ..Default::default()
        };
        if development {
            options.before_send = Some(Arc::new(|event: Event<'static>| {
                info!(
                    event_id = %event.event_id,
                    text = ?event.message,
                    tags = ?event.tags,
                    "Captured event; not sent in development"
                );
                None
            }));
        }

        let guard = sentry::init(options);
        if development {
            info!("Development environment; error reports stay local");
        } else {
            info!("Error reporting enabled");
        }

        Self {
            inner: Arc::new(Inner {
                hub: Some(Hub::current()),
                guard: Mutex::new(Some(guard)),
                sending: !development,
            }),
        }
    }

    /// A handle that reports nothing.
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(Inner {
                hub: None,
                guard: Mutex::new(None),
                sending: false,
            }),
        }
    }

    /// Whether events leave the process.
    pub fn is_sending(&self) -> bool {
        self.inner.sending
    }

    /// Record a breadcrumb for later events.
    pub fn add_breadcrumb(
        &self,
        message: impl Into<String>,
        category: impl Into<String>,
        level: Level,
    ) {
        if let Some(hub) = &self.inner.hub {
            hub.add_breadcrumb(Breadcrumb {
                category: Some(category.into()),
                message: Some(message.into()),
                level,
                ..Default::default()
            });
        }
    }

    /// Report an error with extra tags.
    pub fn capture_error(&self, err: &dyn std::error::Error, tags: &[(&str, &str)]) {
        debug!(error = %err, ?tags, "Captured error");
        if let Some(hub) = &self.inner.hub {
            hub.with_scope(
                |scope| {
                    scope.set_level(Some(Level::Error));
                    set_tags(scope, tags);
                },
                || hub.capture_error(err),
            );
        }
    }

    /// Report a message at the given level.
    pub fn capture_message(&self, level: Level, message: &str, tags: &[(&str, &str)]) {
        debug!(event_level = ?level, text = message, ?tags, "Captured message");
        if let Some(hub) = &self.inner.hub {
            hub.with_scope(|scope| set_tags(scope, tags), || {
                hub.capture_message(message, level)
            });
        }
    }

    /// Stop the client and wait, up to [`SHUTDOWN_TIMEOUT`], for queued
    /// events to be delivered.
    #[instrument(level = "info", skip_all)]
    pub async fn shutdown(&self) {
        let guard = self
            .inner
            .guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(guard) = guard else {
            return;
        };
        let Some(client) = self.inner.hub.as_ref().and_then(|hub| hub.client()) else {
            return;
        };

        match tokio::task::spawn_blocking(move || client.close(Some(SHUTDOWN_TIMEOUT))).await {
            Ok(true) => info!("Error reporter flushed"),
            Ok(false) => warn!("Timed out flushing error reports"),
            Err(e) => warn!(error = %e, "Error reporter shutdown failed"),
        }
        drop(guard);
    }
}

fn set_tags(scope: &mut sentry::Scope, tags: &[(&str, &str)]) {
    for (key, value) in tags {
        scope.set_tag(key, value);
    }
}
