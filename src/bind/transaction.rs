use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::table::{TxBeginDone, TxStart};
use crate::trace::{Done, Hook, OpContext, Trace};

use super::{in_flight, record_done};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.table;

    let d = scope.clone();
    t.on_begin_transaction = Hook::new(
        |_: &TxStart| OpContext::new(),
        move |ctx: OpContext, info: &TxBeginDone| {
            let tx = d.name(MetricKind::Transaction);
            let err = info.error.as_deref();
            record_done(&d, &[tx, d.name(MetricKind::TransactionBegin)], &ctx, err);
            if err.is_none() {
                in_flight(&d, &[tx], 1.0);
            }
        },
    );

    t.on_commit_transaction = finish(scope, MetricKind::TransactionCommit);
    t.on_rollback_transaction = finish(scope, MetricKind::TransactionRollback);
}

/// Commit or rollback: a successful one closes the transaction.
fn finish(scope: &Scope, op: MetricKind) -> Hook<TxStart, Done> {
    let d = scope.clone();
    Hook::new(
        |_: &TxStart| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            let tx = d.name(MetricKind::Transaction);
            record_done(&d, &[tx, d.name(op)], &ctx, info.error());
            if info.error.is_none() {
                in_flight(&d, &[tx], -1.0);
            }
        },
    )
}
