use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::table::QueryStart;
use crate::trace::{Done, OpContext, StreamHook, Trace};

use super::{in_flight, path, record_done};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    trace.table.on_stream_read_table = stream(scope, MetricKind::StreamReadTable);
    trace.table.on_stream_execute_scan_query = stream(scope, MetricKind::StreamExecuteScan);
}

/// Streaming read under `stream/<op>`: in-flight while open, a counter per
/// received part, and the part count as a gauge once the stream ends.
fn stream(scope: &Scope, op: MetricKind) -> StreamHook<QueryStart, Done, Done> {
    let s = scope.clone();
    let r = scope.clone();
    let d = scope.clone();
    StreamHook::new(
        move |_: &QueryStart| {
            in_flight(&s, &[s.name(MetricKind::Stream), s.name(op)], 1.0);
            OpContext::new()
        },
        move |ctx: &mut OpContext, info: &Done| {
            ctx.received += 1;
            let recv = [r.name(MetricKind::Stream), r.name(op), r.name(MetricKind::Recv)];
            r.counter(&path(&recv, &[r.name(MetricKind::Total)]))
                .increment(1);
            r.count_error(&recv, info.error());
        },
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::Stream), d.name(op)];
            record_done(&d, &parts, &ctx, info.error());
            in_flight(&d, &parts, -1.0);
            d.gauge(&path(
                &parts,
                &[d.name(MetricKind::Recv), d.name(MetricKind::Messages)],
            ))
            .set(ctx.received as f64);
        },
    )
}
