use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::driver::{
    ConnCallStart, ConnInfo, ConnStart, ConnStateChangeDone, ConnStateChangeStart,
};
use crate::trace::{Done, Hook, Notify, OpContext, StreamHook, Trace};

use super::{in_flight, path, record_done};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.driver;

    let s = scope.clone();
    t.on_conn_new = Notify::new(move |info: &ConnInfo| {
        let conn = s.name(MetricKind::Conn);
        s.gauge(&[conn, s.name(MetricKind::Balance)]).increment(1.0);
        s.gauge(&[conn, s.name(MetricKind::Status), info.state.as_str()])
            .increment(1.0);
    });

    let s = scope.clone();
    t.on_conn_close = Notify::new(move |info: &ConnInfo| {
        let conn = s.name(MetricKind::Conn);
        s.gauge(&[conn, s.name(MetricKind::Balance)]).decrement(1.0);
        s.gauge(&[conn, s.name(MetricKind::Status), info.state.as_str()])
            .decrement(1.0);
    });

    let s = scope.clone();
    let d = scope.clone();
    t.on_conn_state_change = Hook::new(
        move |info: &ConnStateChangeStart| {
            s.gauge(&[
                s.name(MetricKind::Conn),
                s.name(MetricKind::Status),
                info.state.as_str(),
            ])
            .decrement(1.0);
            OpContext::new().with_part(info.endpoint.as_str())
        },
        move |ctx: OpContext, info: &ConnStateChangeDone| {
            let conn = d.name(MetricKind::Conn);
            let status = d.name(MetricKind::Status);
            d.gauge(&[conn, status, info.state.as_str()]).increment(1.0);
            d.gauge(&[conn, ctx.part(0), status])
                .set(f64::from(info.state.code()));
        },
    );

    let d = scope.clone();
    t.on_conn_dial = Hook::new(
        |_: &ConnStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let conn = d.name(MetricKind::Conn);
            record_done(&d, &[conn, d.name(MetricKind::ConnDial)], &ctx, info.error());
            if info.error.is_none() {
                in_flight(&d, &[conn], 1.0);
            }
        },
    );

    let d = scope.clone();
    t.on_conn_disconnect = Hook::new(
        |_: &ConnStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let conn = d.name(MetricKind::Conn);
            record_done(
                &d,
                &[conn, d.name(MetricKind::ConnDisconnect)],
                &ctx,
                info.error(),
            );
            if info.error.is_none() {
                in_flight(&d, &[conn], -1.0);
            }
        },
    );

    let s = scope.clone();
    let d = scope.clone();
    t.on_conn_invoke = Hook::new(
        move |info: &ConnCallStart| {
            let method = info.method_name();
            in_flight(
                &s,
                &[s.name(MetricKind::Conn), s.name(MetricKind::ConnInvoke), method],
                1.0,
            );
            OpContext::new().with_part(method)
        },
        move |ctx: OpContext, info: &Done| {
            let conn = d.name(MetricKind::Conn);
            let invoke = d.name(MetricKind::ConnInvoke);
            let method = ctx.part(0);
            // A blank method joins to the aggregate name, already counted below.
            if !method.trim().is_empty() {
                d.counter(&[conn, invoke, d.name(MetricKind::Total)])
                    .increment(1);
            }
            record_done(&d, &[conn, invoke, method], &ctx, info.error());
            in_flight(&d, &[conn, invoke, method], -1.0);
        },
    );

    let s = scope.clone();
    let r = scope.clone();
    let d = scope.clone();
    t.on_conn_stream = StreamHook::new(
        move |info: &ConnCallStart| {
            let method = info.method_name();
            in_flight(
                &s,
                &[s.name(MetricKind::Conn), s.name(MetricKind::ConnStream), method],
                1.0,
            );
            OpContext::new().with_part(method)
        },
        move |ctx: &mut OpContext, info: &Done| {
            ctx.received += 1;
            let recv = [
                r.name(MetricKind::Conn),
                r.name(MetricKind::ConnStream),
                r.name(MetricKind::Recv),
                ctx.part(0),
            ];
            r.counter(&path(&recv, &[r.name(MetricKind::Total)]))
                .increment(1);
            r.count_error(&recv, info.error());
        },
        move |ctx: OpContext, info: &Done| {
            let conn = d.name(MetricKind::Conn);
            let stream = d.name(MetricKind::ConnStream);
            let method = ctx.part(0);
            // A blank method joins to the aggregate name, already counted below.
            if !method.trim().is_empty() {
                d.counter(&[conn, stream, d.name(MetricKind::Total)])
                    .increment(1);
            }
            record_done(&d, &[conn, stream, method], &ctx, info.error());
            in_flight(&d, &[conn, stream, method], -1.0);
            d.gauge(&[
                conn,
                stream,
                d.name(MetricKind::Recv),
                method,
                d.name(MetricKind::Messages),
            ])
            .set(ctx.received as f64);
        },
    );
}
