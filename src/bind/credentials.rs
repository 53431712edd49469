use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::{Done, Hook, OpContext, Start, Trace};

use super::record_done;

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let d = scope.clone();
    trace.driver.on_get_credentials = Hook::new(
        |_: &Start| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            record_done(&d, &[d.name(MetricKind::GetCredentials)], &ctx, info.error());
        },
    );
}
