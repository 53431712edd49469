use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::table::{SessionCreateDone, SessionStart};
use crate::trace::{Done, Hook, OpContext, Start, Trace};

use super::record_done;

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.table;

    let d = scope.clone();
    t.on_session_create = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &SessionCreateDone| {
            let session = d.name(MetricKind::Session);
            let err = info.error.as_deref();
            record_done(&d, &[session, d.name(MetricKind::SessionCreate)], &ctx, err);
            if err.is_none() {
                d.gauge(&[session, d.name(MetricKind::Balance)])
                    .increment(1.0);
            }
        },
    );

    let d = scope.clone();
    t.on_session_keep_alive = Hook::new(
        |_: &SessionStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::Session), d.name(MetricKind::SessionKeepAlive)];
            record_done(&d, &parts, &ctx, info.error());
        },
    );

    // A failed delete still drops the session from the balance.
    let d = scope.clone();
    t.on_session_delete = Hook::new(
        |_: &SessionStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let session = d.name(MetricKind::Session);
            record_done(
                &d,
                &[session, d.name(MetricKind::SessionDelete)],
                &ctx,
                info.error(),
            );
            d.gauge(&[session, d.name(MetricKind::Balance)])
                .decrement(1.0);
        },
    );
}
