use std::sync::Arc;
use std::thread;
use std::time::Duration;

use postgres::config::SslMode;
use postgres::Client;

use crate::config::DatabaseSettings;
use crate::errors::{FeederError, FeederResult};
use crate::storage::postgres::tls::tls_connector;
use crate::storage::retry::RetryPolicy;

const DEFAULT_PORT: u16 = 5432;

type Sleep = Arc<dyn Fn(Duration) + Send + Sync>;

/// Opens short-lived connections to the RDS instance.
///
/// Every call to [`PostgresStorage::connect`] yields a fresh client that is
/// closed when dropped. Transient failures are retried under the storage's
/// [`RetryPolicy`].
#[derive(Clone)]
pub struct PostgresStorage {
    settings: DatabaseSettings,
    retry: RetryPolicy,
    sleep: Sleep,
}

impl PostgresStorage {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self::with_retry(settings, RetryPolicy::default())
    }

    pub fn with_retry(settings: DatabaseSettings, retry: RetryPolicy) -> Self {
        Self {
            settings,
            retry,
            sleep: Arc::new(thread::sleep),
        }
    }

    /// Replace the wait between connection attempts.
    pub fn with_sleep<F>(mut self, sleep: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.sleep = Arc::new(sleep);
        self
    }

    pub fn connect(&self) -> FeederResult<Client> {
        let config = self.client_config()?;
        let tls = tls_connector(&self.settings)?;

        self.retry.run_with_sleep(
            |_| config.connect(tls.clone()).map_err(FeederError::from),
            FeederError::is_transient,
            |delay| (self.sleep)(delay),
        )
    }

    fn client_config(&self) -> FeederResult<postgres::Config> {
        let endpoint = required(&self.settings.endpoint, "RDS_ENDPOINT")?;
        let (host, port) = split_endpoint(endpoint)?;

        let mut config = postgres::Config::new();
        config
            .host(host)
            .port(port)
            .dbname(required(&self.settings.db_name, "RDS_DB_NAME")?)
            .user(required(&self.settings.username, "RDS_USERNAME")?)
            .password(required(&self.settings.password, "RDS_PASSWORD")?)
            .connect_timeout(self.settings.connect_timeout)
            .ssl_mode(SslMode::Require);

        Ok(config)
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> FeederResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| FeederError::MissingEnvVar(name.to_string()))
}

/// Accepts `host`, `host:port`, a bare IPv6 address, or `[addr]:port`.
fn split_endpoint(endpoint: &str) -> FeederResult<(&str, u16)> {
    let invalid = || FeederError::InvalidEnvVar {
        name: "RDS_ENDPOINT".to_string(),
        value: endpoint.to_string(),
    };

    if let Some(rest) = endpoint.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
        if tail.is_empty() {
            return Ok((host, DEFAULT_PORT));
        }
        let port = tail
            .strip_prefix(':')
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(invalid)?;
        return Ok((host, port));
    }

    match endpoint.split_once(':') {
        Some((host, port)) if !port.contains(':') => {
            let port = port.parse::<u16>().map_err(|_| invalid())?;
            Ok((host, port))
        }
        // More than one colon: an unbracketed IPv6 address
        _ => Ok((endpoint, DEFAULT_PORT)),
    }
}
