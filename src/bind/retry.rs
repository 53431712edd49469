use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::retry::{RetryDone, RetryStart};
use crate::trace::{Hook, OpContext, Trace};

use super::{path, record_done};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let s = scope.clone();
    let d = scope.clone();
    trace.retry.on_retry = Hook::new(
        move |info: &RetryStart| {
            OpContext::new().with_part(s.name(MetricKind::idempotency(info.idempotent)))
        },
        move |ctx: OpContext, info: &RetryDone| {
            let parts = [ctx.part(0)];
            record_done(&d, &parts, &ctx, info.error.as_deref());
            d.gauge(&path(&parts, &[d.name(MetricKind::Attempts)]))
                .set(f64::from(info.attempts));
        },
    );
}
