use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::table::{PoolGetDone, PoolInitDone, PoolTakeDone, SessionStart};
use crate::trace::{Done, Hook, OpContext, Start, Trace};

use super::{in_flight, path, record_done};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.table;

    let d = scope.clone();
    t.on_pool_init = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &PoolInitDone| {
            let pool = d.name(MetricKind::Pool);
            record_done(&d, &[pool, d.name(MetricKind::PoolCreate)], &ctx, None);
            d.gauge(&[pool, d.name(MetricKind::Limit)])
                .set(info.limit as f64);
            d.gauge(&[pool, d.name(MetricKind::KeepAliveMinSize)])
                .set(info.keep_alive_min_size as f64);
        },
    );

    let d = scope.clone();
    t.on_pool_close = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::Pool), d.name(MetricKind::PoolClose)];
            record_done(&d, &parts, &ctx, info.error());
        },
    );

    // A session handed out by `get` stays in flight until `put`.
    let d = scope.clone();
    t.on_pool_get = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &PoolGetDone| {
            let pool = d.name(MetricKind::Pool);
            let parts = [pool, d.name(MetricKind::PoolGet)];
            let err = info.error.as_deref();
            record_done(&d, &parts, &ctx, err);
            d.gauge(&path(&parts, &[d.name(MetricKind::Attempts)]))
                .set(f64::from(info.attempts));
            if err.is_none() {
                in_flight(&d, &[pool], 1.0);
            }
        },
    );

    let d = scope.clone();
    t.on_pool_put = Hook::new(
        |_: &SessionStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let pool = d.name(MetricKind::Pool);
            record_done(&d, &[pool, d.name(MetricKind::PoolPut)], &ctx, info.error());
            in_flight(&d, &[pool], -1.0);
        },
    );

    let s = scope.clone();
    let d = scope.clone();
    t.on_pool_wait = Hook::new(
        move |_: &Start| {
            in_flight(&s, &[s.name(MetricKind::Pool), s.name(MetricKind::PoolWait)], 1.0);
            OpContext::new()
        },
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::Pool), d.name(MetricKind::PoolWait)];
            record_done(&d, &parts, &ctx, info.error());
            in_flight(&d, &parts, -1.0);
        },
    );

    let d = scope.clone();
    t.on_pool_take = Hook::new(
        |_: &SessionStart| OpContext::new(),
        move |ctx: OpContext, info: &PoolTakeDone| {
            let parts = [d.name(MetricKind::Pool), d.name(MetricKind::PoolTake)];
            record_done(&d, &parts, &ctx, info.error.as_deref());
        },
    );

    let d = scope.clone();
    t.on_pool_close_session = Hook::new(
        |_: &SessionStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::Pool), d.name(MetricKind::PoolCloseSession)];
            record_done(&d, &parts, &ctx, info.error());
        },
    );
}
