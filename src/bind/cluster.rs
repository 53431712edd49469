use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::driver::{
    ClusterChangeDone, ClusterEndpoint, ClusterGetDone, PessimizeDone, PessimizeStart,
};
use crate::trace::{Hook, OpContext, Start, Trace};

use super::{path, record_done};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.driver;

    let d = scope.clone();
    t.on_cluster_get = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &ClusterGetDone| {
            let parts = [d.name(MetricKind::Cluster), d.name(MetricKind::ClusterGet)];
            record_done(&d, &parts, &ctx, info.error.as_deref());
        },
    );

    t.on_cluster_insert = membership(scope, MetricKind::ClusterInsert, 1.0);
    t.on_cluster_remove = membership(scope, MetricKind::ClusterRemove, -1.0);
    t.on_cluster_update = membership(scope, MetricKind::ClusterUpdate, 0.0);

    let d = scope.clone();
    t.on_pessimize_node = Hook::new(
        |_: &PessimizeStart| OpContext::new(),
        move |ctx: OpContext, info: &PessimizeDone| {
            let parts = [d.name(MetricKind::Cluster), d.name(MetricKind::ClusterPessimize)];
            record_done(&d, &parts, &ctx, info.error.as_deref());
        },
    );
}

/// Count a membership change and move `cluster/balance` by `delta` when it
/// was applied.
fn membership(
    scope: &Scope,
    op: MetricKind,
    delta: f64,
) -> Hook<ClusterEndpoint, ClusterChangeDone> {
    let d = scope.clone();
    Hook::new(
        |_: &ClusterEndpoint| OpContext::new(),
        move |_: OpContext, info: &ClusterChangeDone| {
            let cluster = d.name(MetricKind::Cluster);
            d.counter(&path(&[cluster, d.name(op)], &[d.name(MetricKind::Total)]))
                .increment(1);
            if info.applied && delta != 0.0 {
                d.gauge(&[cluster, d.name(MetricKind::Balance)])
                    .increment(delta);
            }
        },
    )
}
