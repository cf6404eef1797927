//! Run configuration
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. the `key=value` file (`config.txt` unless `--config` says otherwise)
//! 2. `PRIMEFORGE_*` environment variables
//! 3. command-line flags
//!
//! `threads` and `limit` are required and must be positive integers. Everything
//! else has a default. Validation happens once, here, before any work starts.

use std::num::{NonZeroU64, NonZeroUsize};
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::primality::{PrimalityTester, TesterMode};
use crate::sink::{RecordFormat, SinkStrategy};

pub mod provider;

pub use provider::KeyValueFile;

pub const DEFAULT_CONFIG_PATH: &str = "config.txt";
pub const ENV_PREFIX: &str = "PRIMEFORGE_";

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub threads: NonZeroUsize,
    pub limit: NonZeroU64,
    pub strategy: SinkStrategy,
    pub tester: TesterMode,
    /// Helper tasks per candidate when `tester` is nested
    pub helpers: NonZeroUsize,
    pub format: RecordFormat,
}

impl Settings {
    pub fn new(threads: NonZeroUsize, limit: NonZeroU64) -> Self {
        Self {
            threads,
            limit,
            strategy: SinkStrategy::default(),
            tester: TesterMode::default(),
            helpers: threads,
            format: RecordFormat::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SinkStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_tester(mut self, tester: TesterMode, helpers: NonZeroUsize) -> Self {
        self.tester = tester;
        self.helpers = helpers;
        self
    }

    pub fn with_format(mut self, format: RecordFormat) -> Self {
        self.format = format;
        self
    }

    pub fn tester(&self) -> PrimalityTester {
        PrimalityTester::from_mode(self.tester, self.helpers)
    }

    /// Load and validate settings from every layer
    pub fn load<P: AsRef<Path>>(path: P, overrides: &Overrides) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());

        let figment = Figment::new()
            .merge(KeyValueFile::open(path)?)
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides));

        Self::from_figment(&figment)
    }

    /// Validate whatever the given figment holds
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let raw: RawSettings = figment.extract().map_err(classify)?;
        tracing::trace!("Raw configuration: {:?}", raw);

        let threads = to_usize("threads", required("threads", raw.threads)?)?;
        let limit = required("limit", raw.limit)?;
        let helpers = match raw.helpers {
            Some(_) => to_usize("helpers", required("helpers", raw.helpers)?)?,
            None => threads,
        };

        let settings = Settings {
            threads,
            limit,
            strategy: raw.strategy.unwrap_or_default(),
            tester: raw.tester.unwrap_or_default(),
            helpers,
            format: raw.format.unwrap_or_default(),
        };

        tracing::debug!("Configuration loaded: {:?}", settings);
        Ok(settings)
    }
}

/// Values given on the command line, applied over the file and environment.
///
/// `None` fields are left out of the merge entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<SinkStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tester: Option<TesterMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helpers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<RecordFormat>,
}

/// Shape of the merged layers before validation
#[derive(Debug, Deserialize)]
struct RawSettings {
    threads: Option<i64>,
    limit: Option<i64>,
    helpers: Option<i64>,
    strategy: Option<SinkStrategy>,
    tester: Option<TesterMode>,
    format: Option<RecordFormat>,
}

const NUMERIC_KEYS: [&str; 3] = ["threads", "limit", "helpers"];

fn required(key: &'static str, value: Option<i64>) -> Result<NonZeroU64, ConfigError> {
    let value = value.ok_or(ConfigError::MissingKey { key })?;
    u64::try_from(value)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(ConfigError::NotPositive { key, value })
}

fn to_usize(key: &'static str, value: NonZeroU64) -> Result<NonZeroUsize, ConfigError> {
    NonZeroUsize::try_from(value).map_err(|err| ConfigError::InvalidValue {
        key: key.to_owned(),
        detail: err.to_string(),
    })
}

/// Map a figment extraction failure onto the key it concerns
fn classify(error: figment::Error) -> ConfigError {
    let key = error.path.join(".");
    let detail = error.kind.to_string();

    if NUMERIC_KEYS.contains(&key.as_str()) {
        ConfigError::NotNumeric { key, detail }
    } else {
        ConfigError::InvalidValue { key, detail }
    }
}
