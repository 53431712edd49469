use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::table::{ExecuteDataDone, QueryStart};
use crate::trace::{Done, Hook, OpContext, Trace};

use super::{in_flight, record_done};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.table;

    let s = scope.clone();
    let d = scope.clone();
    t.on_prepare_data_query = Hook::new(
        move |_: &QueryStart| {
            let parts = [s.name(MetricKind::Query), s.name(MetricKind::QueryPrepareData)];
            in_flight(&s, &parts, 1.0);
            OpContext::new()
        },
        move |ctx: OpContext, info: &Done| {
            let parts = [d.name(MetricKind::Query), d.name(MetricKind::QueryPrepareData)];
            record_done(&d, &parts, &ctx, info.error());
            in_flight(&d, &parts, -1.0);
        },
    );

    let s = scope.clone();
    let d = scope.clone();
    t.on_execute_data_query = Hook::new(
        move |_: &QueryStart| {
            let parts = [s.name(MetricKind::Query), s.name(MetricKind::QueryExecuteData)];
            in_flight(&s, &parts, 1.0);
            OpContext::new()
        },
        move |ctx: OpContext, info: &ExecuteDataDone| {
            let parts = [d.name(MetricKind::Query), d.name(MetricKind::QueryExecuteData)];
            let err = info.error.as_deref();
            record_done(&d, &parts, &ctx, err);
            in_flight(&d, &parts, -1.0);
            if err.is_none() {
                let plan = if info.prepared {
                    MetricKind::Prepared
                } else {
                    MetricKind::NotPrepared
                };
                d.counter(&[parts[0], parts[1], d.name(plan)]).increment(1);
            }
        },
    );
}
