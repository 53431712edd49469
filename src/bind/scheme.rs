use crate::names::MetricKind;
use crate::scope::Scope;
use crate::trace::Trace;

use super::tracked;

pub(super) fn bind(scope: &Scope, trace: &mut Trace) {
    let t = &mut trace.scheme;
    t.on_list_directory = tracked(scope, &[MetricKind::SchemeListDirectory]);
    t.on_describe_path = tracked(scope, &[MetricKind::SchemeDescribePath]);
    t.on_make_directory = tracked(scope, &[MetricKind::SchemeMakeDirectory]);
    t.on_remove_directory = tracked(scope, &[MetricKind::SchemeRemoveDirectory]);
    t.on_modify_permissions = tracked(scope, &[MetricKind::SchemeModifyPermissions]);
}
