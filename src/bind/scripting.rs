use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::scripting::ScriptStart;
use crate::trace::{Done, OpContext, StreamHook, Trace};

use super::{in_flight, path, record_done, tracked};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.scripting;
    t.on_execute = tracked(scope, &[MetricKind::ScriptingExecute]);
    t.on_explain = tracked(scope, &[MetricKind::ScriptingExplain]);

    let s = scope.clone();
    let r = scope.clone();
    let d = scope.clone();
    t.on_stream_execute = StreamHook::new(
        move |_: &ScriptStart| {
            in_flight(&s, &[s.name(MetricKind::ScriptingStreamExecute)], 1.0);
            OpContext::new()
        },
        move |ctx: &mut OpContext, info: &Done| {
            ctx.received += 1;
            let recv = [r.name(MetricKind::ScriptingStreamExecute), r.name(MetricKind::Recv)];
            r.counter(&path(&recv, &[r.name(MetricKind::Total)]))
                .increment(1);
            r.count_error(&recv, info.error());
        },
        move |ctx: OpContext, info: &Done| {
            let op = d.name(MetricKind::ScriptingStreamExecute);
            record_done(&d, &[op], &ctx, info.error());
            in_flight(&d, &[op], -1.0);
            d.gauge(&[op, d.name(MetricKind::Recv), d.name(MetricKind::Messages)])
                .set(ctx.received as f64);
        },
    );
}
