use ydb_metrics::trace::retry::{RetryDone, RetryStart};
use ydb_metrics::trace::table::SessionStart;
use ydb_metrics::{
    DEFAULT_DELIMITER, Done, GlobalRegistry, Instrumentation, Joiner, MetricKind, NameResolver,
    default_join,
};

#[test]
fn default_delimiter_is_slash() {
    assert_eq!(DEFAULT_DELIMITER, "/");
    assert_eq!(Joiner::default().join(&["a", "b"]), "a/b");
}

#[test]
fn blank_parts_are_dropped() {
    assert_eq!(default_join("_", &["", " driver ", "  ", "conn"]), "driver_conn");
    assert_eq!(default_join("_", &[]), "");
}

#[test]
fn prefix_leads_every_name() {
    let joiner = Joiner::new(".", Some("ydb".to_string()), None);
    assert_eq!(joiner.prefix(), Some("ydb"));
    assert_eq!(joiner.join(&["table", "pool", "limit"]), "ydb.table.pool.limit");
}

#[test]
fn resolver_prefers_override() {
    let resolver = NameResolver::new([(MetricKind::Total, "count".to_string())].into());
    assert_eq!(resolver.resolve(MetricKind::Total), "count");
    assert_eq!(resolver.resolve(MetricKind::Error), "error");
}

#[test]
fn builder_applies_name_batch() {
    let trace = Instrumentation::builder(GlobalRegistry)
        .names([
            (MetricKind::Table, "tbl"),
            (MetricKind::SessionKeepAlive, "ping"),
            (MetricKind::NonIdempotent, "unsafe"),
        ])
        .build();

    trace
        .table
        .on_session_keep_alive
        .start(&SessionStart::default())
        .done(&Done::ok());
    trace
        .retry
        .on_retry
        .start(&RetryStart { idempotent: false })
        .done(&RetryDone::default());

    let metrics = trace.metrics();
    assert!(metrics.contains("tbl/session/ping/total"));
    assert!(metrics.contains("retry/unsafe/attempts"));
    assert_eq!(metrics.name(MetricKind::Table), "tbl");
}

#[test]
fn blank_override_elides_part() {
    let trace = Instrumentation::builder(GlobalRegistry)
        .name(MetricKind::Driver, "")
        .build();

    trace
        .driver
        .on_conn_dial
        .start(&Default::default())
        .done(&Done::ok());

    assert!(trace.metrics().contains("conn/dial/total"));
}

#[test]
fn blank_delimiter_falls_back_to_default() {
    for delimiter in ["", "  "] {
        let trace = Instrumentation::builder(GlobalRegistry)
            .delimiter(delimiter)
            .build();

        trace
            .driver
            .on_conn_dial
            .start(&Default::default())
            .done(&Done::ok());

        assert!(trace.metrics().contains("driver/conn/dial/total"));
        assert!(!trace.metrics().contains("driverconndialtotal"));
    }
}
