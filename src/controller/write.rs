//! Deciding how a requested value is written

use crate::settings::value::values_equal;
use crate::settings::{ConfigTarget, Inspection};
use serde_json::Value;

/// What writing a value actually does to the configuration
#[derive(Debug, Clone, PartialEq)]
pub enum WriteAction {
    /// The value equals the default: remove the overrides at these scopes
    Clear(Vec<ConfigTarget>),
    /// Store the value at a scope
    Write { target: ConfigTarget, value: Value },
}

/// Scopes holding an override, workspace first
pub fn override_targets(inspection: &Inspection) -> Vec<ConfigTarget> {
    [ConfigTarget::Workspace, ConfigTarget::Global]
        .into_iter()
        .filter(|target| inspection.value_at(*target).is_some())
        .collect()
}

/// Resolve a write request against the current state of a setting
///
/// A value equal to the default never gets written; the overrides that
/// shadow the default are cleared instead. Otherwise the value goes to the
/// explicit target, or to the workspace when it already overrides the
/// setting, or to the global scope.
pub fn resolve_write(
    inspection: &Inspection,
    value: Value,
    explicit_target: Option<ConfigTarget>,
) -> WriteAction {
    let is_default = inspection
        .default_value
        .as_ref()
        .is_some_and(|default| values_equal(default, &value));

    if is_default {
        return WriteAction::Clear(override_targets(inspection));
    }

    let target = explicit_target.unwrap_or(if inspection.workspace_value.is_some() {
        ConfigTarget::Workspace
    } else {
        ConfigTarget::Global
    });

    WriteAction::Write { target, value }
}
