use std::sync::Arc;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = "/";

/// Custom join hook. Returning `None` falls back to [`default_join`].
pub type JoinFn = Arc<dyn Fn(&[&str]) -> Option<String> + Send + Sync>;

/// Flattens name parts into one metric name.
#[derive(Clone)]
pub struct Joiner {
    delimiter: String,
    prefix: Option<String>,
    custom: Option<JoinFn>,
}

impl Joiner {
    pub fn new(
        delimiter: impl Into<String>,
        prefix: Option<String>,
        custom: Option<JoinFn>,
    ) -> Self {
        Self {
            delimiter: delimiter.into(),
            prefix,
            custom,
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Join `parts` behind the configured prefix.
    ///
    /// The custom hook, when set, sees the full part list including the
    /// prefix.
    pub fn join(&self, parts: &[&str]) -> String {
        let mut all = Vec::with_capacity(parts.len() + 1);
        if let Some(prefix) = self.prefix.as_deref() {
            all.push(prefix);
        }
        all.extend_from_slice(parts);

        if let Some(custom) = &self.custom {
            if let Some(name) = custom(&all) {
                return name;
            }
        }
        default_join(&self.delimiter, &all)
    }
}

impl Default for Joiner {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, None, None)
    }
}

impl std::fmt::Debug for Joiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Joiner")
            .field("delimiter", &self.delimiter)
            .field("prefix", &self.prefix)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Trim each part, drop the blank ones, and join the rest with `delimiter`.
pub fn default_join(delimiter: &str, parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_in_order() {
        let joiner = Joiner::default();
        assert_eq!(
            joiner.join(&["driver", "conn", "dial", "total"]),
            "driver/conn/dial/total"
        );
    }

    #[test]
    fn blank_parts_are_dropped() {
        let joiner = Joiner::default();
        assert_eq!(joiner.join(&["driver", "", "conn"]), "driver/conn");
        assert_eq!(joiner.join(&["driver", "  \t", "conn"]), "driver/conn");
    }

    #[test]
    fn parts_are_trimmed() {
        assert_eq!(default_join(".", &[" a ", "b "]), "a.b");
    }

    #[test]
    fn prefix_goes_first() {
        let joiner = Joiner::new("_", Some("ydb".into()), None);
        assert_eq!(joiner.join(&["driver", "conn"]), "ydb_driver_conn");
    }

    #[test]
    fn empty_prefix_is_skipped() {
        let joiner = Joiner::new("_", Some(String::new()), None);
        assert_eq!(joiner.join(&["driver", "conn"]), "driver_conn");
    }

    #[test]
    fn deterministic() {
        let joiner = Joiner::new(".", Some("app".into()), None);
        let parts = ["table", "pool", "get", "total"];
        assert_eq!(joiner.join(&parts), joiner.join(&parts));
    }

    #[test]
    fn custom_join_takes_precedence() {
        let custom: JoinFn = Arc::new(|parts: &[&str]| Some(parts.join("::")));
        let joiner = Joiner::new("/", Some("ydb".into()), Some(custom));
        assert_eq!(joiner.join(&["driver", "conn"]), "ydb::driver::conn");
    }

    #[test]
    fn custom_join_can_decline() {
        let custom: JoinFn = Arc::new(|parts: &[&str]| {
            if parts.contains(&"special") {
                Some("special_metric".to_string())
            } else {
                None
            }
        });
        let joiner = Joiner::new("/", None, Some(custom));
        assert_eq!(joiner.join(&["special"]), "special_metric");
        assert_eq!(joiner.join(&["driver", "conn"]), "driver/conn");
    }
}
