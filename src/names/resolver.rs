use std::collections::HashMap;

use super::MetricKind;

/// Resolves [`MetricKind`]s to name parts.
///
/// Overrides win over the built-in defaults. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    overrides: HashMap<MetricKind, String>,
}

impl NameResolver {
    pub fn new(overrides: HashMap<MetricKind, String>) -> Self {
        Self { overrides }
    }

    /// The name part for `kind`.
    pub fn resolve(&self, kind: MetricKind) -> &str {
        match self.overrides.get(&kind) {
            Some(name) => name,
            None => kind.default_name(),
        }
    }

    /// Whether `kind` has a configured override.
    pub fn is_overridden(&self, kind: MetricKind) -> bool {
        self.overrides.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_without_override() {
        let resolver = NameResolver::default();
        assert_eq!(resolver.resolve(MetricKind::Total), "total");
        assert!(!resolver.is_overridden(MetricKind::Total));
    }

    #[test]
    fn override_wins_over_default() {
        let resolver = NameResolver::new(HashMap::from([(
            MetricKind::Latency,
            "duration_ms".to_string(),
        )]));
        assert_eq!(resolver.resolve(MetricKind::Latency), "duration_ms");
        assert_eq!(resolver.resolve(MetricKind::Error), "error");
    }

    #[test]
    fn empty_override_is_kept() {
        // An empty override drops the part from joined names.
        let resolver = NameResolver::new(HashMap::from([(MetricKind::Driver, String::new())]));
        assert_eq!(resolver.resolve(MetricKind::Driver), "");
    }
}
