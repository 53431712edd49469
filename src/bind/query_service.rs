use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::query::{ExecuteStart, PoolWithDone, QuerySessionCreateDone, QuerySessionStart};
use crate::trace::{Done, Hook, OpContext, Start, Trace};

use super::{path, record_done, tracked, tracked_in_flight};

pub(super) fn bind_session(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.query;

    let d = scope.clone();
    t.on_session_create = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &QuerySessionCreateDone| {
            let session = d.name(MetricKind::QuerySession);
            let err = info.error.as_deref();
            record_done(&d, &[session, d.name(MetricKind::QuerySessionCreate)], &ctx, err);
            if err.is_none() {
                d.gauge(&[session, d.name(MetricKind::Balance)])
                    .increment(1.0);
            }
        },
    );

    let d = scope.clone();
    t.on_session_delete = Hook::new(
        |_: &QuerySessionStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let session = d.name(MetricKind::QuerySession);
            let parts = [session, d.name(MetricKind::QuerySessionDelete)];
            record_done(&d, &parts, &ctx, info.error());
            d.gauge(&[session, d.name(MetricKind::Balance)])
                .decrement(1.0);
        },
    );
}

pub(super) fn bind_execute(scope: &Scope, trace: &mut Trace) {
    trace.query.on_execute = tracked_in_flight::<ExecuteStart>(scope, &[MetricKind::QueryExecute]);
}

pub(super) fn bind_pool(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.query;

    let d = scope.clone();
    t.on_pool_with = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &PoolWithDone| {
            let parts = [d.name(MetricKind::QueryPool), d.name(MetricKind::QueryPoolWith)];
            record_done(&d, &parts, &ctx, info.error.as_deref());
            d.gauge(&path(&parts, &[d.name(MetricKind::Attempts)]))
                .set(f64::from(info.attempts));
        },
    );

    t.on_pool_close = tracked(scope, &[MetricKind::QueryPool, MetricKind::QueryPoolClose]);
}
