use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::Trace;

use super::{tracked, tracked_in_flight};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.coordination;
    t.on_create_node = tracked(scope, &[MetricKind::CoordinationCreateNode]);
    t.on_alter_node = tracked(scope, &[MetricKind::CoordinationAlterNode]);
    t.on_drop_node = tracked(scope, &[MetricKind::CoordinationDropNode]);
    t.on_describe_node = tracked(scope, &[MetricKind::CoordinationDescribeNode]);
    // Open sessions show up as `session/in_flight`.
    t.on_session = tracked_in_flight(scope, &[MetricKind::CoordinationSession]);
}
