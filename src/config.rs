//! Instrumentation configuration.
//!
//! Most callers configure through [`InstrumentationBuilder`](crate::InstrumentationBuilder).
//! [`MetricsConfig`] is the file form of the same options, for hosts that
//! keep metric naming in their own TOML config:
//!
//! ```toml
//! prefix = "ydb"
//! delimiter = "_"
//! details = "DRIVER_CONN | TABLE_POOL"
//!
//! [names]
//! latency = "duration_ms"
//!
//! [labels]
//! database = "/local"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::names::MetricKind;

bitflags! {
    /// Event categories to instrument.
    ///
    /// The empty set binds nothing. Leaving details unconfigured binds
    /// [`Details::ALL`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Details: u32 {
        const DRIVER_CONN = 1 << 0;
        const DRIVER_DISCOVERY = 1 << 1;
        const DRIVER_CLUSTER = 1 << 2;
        const DRIVER_CREDENTIALS = 1 << 3;

        const TABLE_SESSION = 1 << 8;
        const TABLE_QUERY = 1 << 9;
        const TABLE_STREAM = 1 << 10;
        const TABLE_TRANSACTION = 1 << 11;
        const TABLE_POOL = 1 << 12;

        const RETRY = 1 << 16;

        const QUERY_SESSION = 1 << 20;
        const QUERY_EXECUTE = 1 << 21;
        const QUERY_POOL = 1 << 22;

        const SCHEME = 1 << 24;
        const SCRIPTING = 1 << 25;
        const COORDINATION = 1 << 26;
        const RATELIMITER = 1 << 27;
        const DATABASE_SQL = 1 << 28;

        const DRIVER_EVENTS = Self::DRIVER_CONN.bits()
            | Self::DRIVER_DISCOVERY.bits()
            | Self::DRIVER_CLUSTER.bits()
            | Self::DRIVER_CREDENTIALS.bits();
        const TABLE_EVENTS = Self::TABLE_SESSION.bits()
            | Self::TABLE_QUERY.bits()
            | Self::TABLE_STREAM.bits()
            | Self::TABLE_TRANSACTION.bits()
            | Self::TABLE_POOL.bits();
        const QUERY_EVENTS = Self::QUERY_SESSION.bits()
            | Self::QUERY_EXECUTE.bits()
            | Self::QUERY_POOL.bits();
        const ALL = Self::DRIVER_EVENTS.bits()
            | Self::TABLE_EVENTS.bits()
            | Self::RETRY.bits()
            | Self::QUERY_EVENTS.bits()
            | Self::SCHEME.bits()
            | Self::SCRIPTING.bits()
            | Self::COORDINATION.bits()
            | Self::RATELIMITER.bits()
            | Self::DATABASE_SQL.bits();
    }
}

/// Source of the details selection.
///
/// Read once, when the trace is built.
pub trait Detailer: Send + Sync {
    fn details(&self) -> Details;
}

impl Detailer for Details {
    fn details(&self) -> Details {
        *self
    }
}

/// File form of the instrumentation options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    /// Leading name part for every metric.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Name part delimiter (default: "/").
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Categories to bind (default: all).
    #[serde(default)]
    pub details: Option<Details>,
    /// Per-kind name overrides, keyed by kind identifier.
    #[serde(default)]
    pub names: HashMap<String, String>,
    /// Constant labels attached to every metric.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl MetricsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Name overrides with their kinds resolved.
    pub fn name_overrides(&self) -> Result<HashMap<MetricKind, String>> {
        self.names
            .iter()
            .map(|(ident, name)| Ok((ident.parse::<MetricKind>()?, name.clone())))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if let Some(delimiter) = &self.delimiter {
            if delimiter.trim().is_empty() {
                return Err(Error::InvalidDelimiter(delimiter.clone()));
            }
        }
        self.name_overrides()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_cover_members() {
        assert!(Details::DRIVER_EVENTS.contains(Details::DRIVER_CREDENTIALS));
        assert!(Details::TABLE_EVENTS.contains(Details::TABLE_POOL));
        assert!(Details::ALL.contains(Details::RETRY | Details::DRIVER_CONN));
        assert!(!Details::DRIVER_EVENTS.intersects(Details::TABLE_EVENTS));
        assert!(Details::QUERY_EVENTS.contains(Details::QUERY_POOL));
        assert!(!Details::QUERY_EVENTS.intersects(Details::TABLE_EVENTS));
        assert!(Details::ALL.contains(Details::SCHEME | Details::DATABASE_SQL));
    }

    #[test]
    fn details_as_detailer() {
        let d: &dyn Detailer = &Details::TABLE_QUERY;
        assert_eq!(d.details(), Details::TABLE_QUERY);
    }

    #[test]
    fn parses_full_document() {
        let config = MetricsConfig::from_toml_str(
            r#"
            prefix = "ydb"
            delimiter = "_"
            details = "DRIVER_CONN | TABLE_POOL"

            [names]
            latency = "duration_ms"
            conn_dial = "connect"

            [labels]
            database = "/local"
            "#,
        )
        .unwrap();

        assert_eq!(config.prefix.as_deref(), Some("ydb"));
        assert_eq!(config.delimiter.as_deref(), Some("_"));
        assert_eq!(config.details, Some(Details::DRIVER_CONN | Details::TABLE_POOL));
        assert_eq!(config.labels.get("database").map(String::as_str), Some("/local"));

        let names = config.name_overrides().unwrap();
        assert_eq!(names.get(&MetricKind::Latency).map(String::as_str), Some("duration_ms"));
        assert_eq!(names.get(&MetricKind::ConnDial).map(String::as_str), Some("connect"));
    }

    #[test]
    fn empty_document_is_default() {
        let config = MetricsConfig::from_toml_str("").unwrap();
        assert!(config.prefix.is_none());
        assert!(config.details.is_none());
        assert!(config.names.is_empty());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = MetricsConfig::from_toml_str("[names]\nlatency_seconds = \"x\"").unwrap_err();
        assert!(matches!(err, Error::UnknownKind(_)));
    }

    #[test]
    fn blank_delimiter_is_rejected() {
        let err = MetricsConfig::from_toml_str("delimiter = \" \"").unwrap_err();
        assert!(matches!(err, Error::InvalidDelimiter(_)));
    }

    #[test]
    fn malformed_document() {
        let err = MetricsConfig::from_toml_str("prefix = ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
