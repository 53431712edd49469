use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::driver::{DiscoveryDone, DiscoveryStart};
use crate::trace::{Hook, OpContext, Trace};

use super::record_done;

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let d = scope.clone();
    trace.driver.on_discovery = Hook::new(
        |_: &DiscoveryStart| OpContext::new(),
        move |ctx: OpContext, info: &DiscoveryDone| {
            let discovery = d.name(MetricKind::Discovery);
            let err = info.error.as_deref();
            record_done(&d, &[discovery], &ctx, err);
            if err.is_none() {
                d.gauge(&[discovery, d.name(MetricKind::DiscoveryEndpoints)])
                    .set(info.endpoints.len() as f64);
            }
        },
    );
}
