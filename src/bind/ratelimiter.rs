use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::Trace;

use super::{tracked, tracked_in_flight};

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.ratelimiter;
    t.on_acquire = tracked_in_flight(scope, &[MetricKind::RatelimiterAcquire]);
    t.on_create_resource = tracked(scope, &[MetricKind::RatelimiterCreateResource]);
    t.on_alter_resource = tracked(scope, &[MetricKind::RatelimiterAlterResource]);
    t.on_drop_resource = tracked(scope, &[MetricKind::RatelimiterDropResource]);
    t.on_describe_resource = tracked(scope, &[MetricKind::RatelimiterDescribeResource]);
}
