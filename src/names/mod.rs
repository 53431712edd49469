//! Metric naming.
//!
//! A metric name is built from an ordered list of parts, most general first
//! (`driver` → `conn` → `dial` → `total`). Parts come from two places:
//!
//! - [`MetricKind`] dimensions, resolved by [`NameResolver`] to either a
//!   configured override or the built-in default.
//! - Dynamic values captured from events (endpoint addresses, method names,
//!   classified error names).
//!
//! [`Joiner`] flattens the parts into the single string that keys the
//! handle cache, so identical input must always produce identical output.

mod join;
mod kind;
mod resolver;

pub use join::{DEFAULT_DELIMITER, JoinFn, Joiner, default_join};
pub use kind::MetricKind;
pub use resolver::NameResolver;
