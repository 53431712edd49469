use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::sql::StatementStart;
use crate::trace::{Done, Hook, OpContext, Start, Trace};

use super::{in_flight, record_done, tracked};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.database_sql;

    // Open connections are `conn/in_flight`, open transactions `tx/in_flight`.
    let d = scope.clone();
    t.on_connect = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            record_done(&d, &[d.name(MetricKind::SqlConnect)], &ctx, info.error());
            if info.error.is_none() {
                in_flight(&d, &[d.name(MetricKind::SqlConn)], 1.0);
            }
        },
    );

    let d = scope.clone();
    t.on_conn_close = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let conn = d.name(MetricKind::SqlConn);
            record_done(&d, &[conn, d.name(MetricKind::SqlConnClose)], &ctx, info.error());
            in_flight(&d, &[conn], -1.0);
        },
    );

    t.on_conn_ping = tracked(scope, &[MetricKind::SqlConn, MetricKind::SqlPing]);
    t.on_conn_prepare = tracked(scope, &[MetricKind::SqlConn, MetricKind::SqlPrepare]);
    t.on_conn_exec = statement(scope, MetricKind::SqlExec);
    t.on_conn_query = statement(scope, MetricKind::SqlQuery);

    let d = scope.clone();
    t.on_conn_begin = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::SqlConn), d.name(MetricKind::SqlBegin)];
            record_done(&d, &parts, &ctx, info.error());
            if info.error.is_none() {
                in_flight(&d, &[d.name(MetricKind::SqlTx)], 1.0);
            }
        },
    );

    t.on_tx_commit = finish_tx(scope, MetricKind::SqlCommit);
    t.on_tx_rollback = finish_tx(scope, MetricKind::SqlRollback);
}

/// Exec or query, split by the statement's idempotency.
fn statement(scope: &Scope, op: MetricKind) -> Hook<StatementStart, Done> {
    let s = scope.clone();
    let d = scope.clone();
    Hook::new(
        move |info: &StatementStart| {
            OpContext::new().with_part(s.name(MetricKind::idempotency(info.idempotent)))
        },
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::SqlConn), d.name(op), ctx.part(0)];
            record_done(&d, &parts, &ctx, info.error());
        },
    )
}

fn finish_tx(scope: &Scope, op: MetricKind) -> Hook<Start, Done> {
    let d = scope.clone();
    Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let tx = d.name(MetricKind::SqlTx);
            record_done(&d, &[tx, d.name(op)], &ctx, info.error());
            if info.error.is_none() {
                in_flight(&d, &[tx], -1.0);
            }
        },
    )
}
