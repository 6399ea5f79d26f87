//! Merge rules for Walker configs: the user document is the base, the bundled
//! template fills gaps.
//!
//! - `providers.default`: set union, user order first.
//! - `providers.prefixes`: union keyed by the (`prefix`, `provider`) pair.
//! - `providers.actions`: per group, union keyed by the `action` field.
//! - other top-level keys: copied from the template only when the user lacks them.
//!
//! Everything here is pure and total. Malformed members degrade to empty
//! containers; malformed template records are dropped.

use super::document;
use std::collections::HashSet;
use toml::{Table, Value};

pub const PROVIDERS_KEY: &str = "providers";
pub const DEFAULT_KEY: &str = "default";
pub const PREFIXES_KEY: &str = "prefixes";
pub const ACTIONS_KEY: &str = "actions";

/// `base` followed by every element of `extra` not already present.
///
/// A non-array `base` counts as empty.
pub fn union_sequence(base: Option<&Value>, extra: &[Value]) -> Vec<Value> {
    let mut result = document::sequence(base).to_vec();
    for item in extra {
        if !result.contains(item) {
            result.push(item.clone());
        }
    }
    result
}

/// Identity of a prefix binding. None for anything that is not a table
/// carrying both fields.
fn binding_key(binding: &Value) -> Option<(&Value, &Value)> {
    let record = binding.as_table()?;
    Some((record.get("prefix")?, record.get("provider")?))
}

/// Union of `[[providers.prefixes]]` entries keyed by (`prefix`, `provider`).
///
/// User entries are kept verbatim, malformed ones included. Malformed
/// template entries are never inserted.
pub fn union_prefix_bindings(user: Option<&Value>, template: &[Value]) -> Vec<Value> {
    let mut result = document::sequence(user).to_vec();
    for binding in template {
        let Some(key) = binding_key(binding) else {
            continue;
        };
        let exists = result
            .iter()
            .any(|existing| binding_key(existing) == Some(key));
        if !exists {
            result.push(binding.clone());
        }
    }
    result
}

/// Union of `[providers.actions]` groups.
///
/// Groups missing from the user take the template list wholesale. Existing
/// groups keep the user list and gain template actions whose `action` name is
/// not yet present. User-only groups pass through.
pub fn union_action_groups(user: Option<&Value>, template: &Table) -> Table {
    let mut result = document::table(user).cloned().unwrap_or_default();

    for (group, template_list) in template {
        let template_list = document::sequence(Some(template_list));

        let Some(user_list) = result.get(group) else {
            result.insert(group.clone(), Value::Array(template_list.to_vec()));
            continue;
        };

        let mut merged = document::sequence(Some(user_list)).to_vec();
        let mut seen: HashSet<String> = merged
            .iter()
            .filter_map(|record| document::string_field(record, "action"))
            .map(str::to_owned)
            .collect();

        for record in template_list {
            let Some(name) = document::string_field(record, "action") else {
                continue;
            };
            if seen.insert(name.to_owned()) {
                merged.push(record.clone());
            }
        }

        result.insert(group.clone(), Value::Array(merged));
    }

    result
}

/// Merge the `providers` section.
///
/// Each of `default`, `prefixes` and `actions` is merged only when the
/// template defines it with the expected shape; otherwise the user's member is
/// left alone. Other template-only members under `providers` are not copied.
pub fn reconcile_providers(user: Option<&Value>, template: &Table) -> Table {
    let mut providers = document::table(user).cloned().unwrap_or_default();

    if let Some(defaults) = template.get(DEFAULT_KEY).and_then(Value::as_array) {
        let merged = union_sequence(providers.get(DEFAULT_KEY), defaults);
        providers.insert(DEFAULT_KEY.to_string(), Value::Array(merged));
    }

    if let Some(prefixes) = template.get(PREFIXES_KEY).and_then(Value::as_array) {
        let merged = union_prefix_bindings(providers.get(PREFIXES_KEY), prefixes);
        providers.insert(PREFIXES_KEY.to_string(), Value::Array(merged));
    }

    if let Some(actions) = template.get(ACTIONS_KEY).and_then(Value::as_table) {
        let merged = union_action_groups(providers.get(ACTIONS_KEY), actions);
        providers.insert(ACTIONS_KEY.to_string(), Value::Table(merged));
    }

    providers
}

/// Reconcile a user document with the template. Pure, total and deterministic.
pub fn reconcile(user: &Table, template: &Table) -> Table {
    let mut merged = user.clone();

    if let Some(template_providers) = template.get(PROVIDERS_KEY).and_then(Value::as_table) {
        let providers = reconcile_providers(merged.get(PROVIDERS_KEY), template_providers);
        merged.insert(PROVIDERS_KEY.to_string(), Value::Table(providers));
    }

    for (key, value) in template {
        if key == PROVIDERS_KEY || merged.contains_key(key) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    merged
}
