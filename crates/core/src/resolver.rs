//! Cross-model reference resolution and import discovery.

use std::collections::BTreeMap;

use strapi_ts_common::FieldSpec;

use crate::config::GeneratorConfig;
use crate::graph::{ModelGraph, ResolvedModel};
use crate::ts::{Emit, TsImport};

/// Polymorphic relation target; resolves to `any` and is never imported.
pub const WILDCARD: &str = "*";

/// The single related-model key a field names, if any.
///
/// Checked in order: `collection`, `component`, `model`, then the last
/// segment of a `target` such as `api::article.article`.
pub fn reference_key(field: &FieldSpec) -> Option<&str> {
    field
        .collection
        .as_deref()
        .or(field.component.as_deref())
        .or(field.model.as_deref())
        .or_else(|| {
            field
                .target
                .as_deref()
                .and_then(|target| target.rsplit(['.', ':']).next())
        })
        .filter(|key| !key.is_empty())
}

/// Whether the field holds many instances of its type.
pub fn is_collection(field: &FieldSpec) -> bool {
    if field.collection.is_some() || field.repeatable {
        return true;
    }
    let target_only = field.component.is_none() && field.model.is_none() && field.target.is_some();
    target_only && field.relation.as_ref().is_some_and(|r| r.is_to_many())
}

/// Every key a field references: its single reference plus dynamic-zone members.
pub fn referenced_keys(field: &FieldSpec) -> impl Iterator<Item = &str> {
    reference_key(field).into_iter().chain(
        field
            .components
            .iter()
            .flatten()
            .map(String::as_str),
    )
}

/// Import path from one unit to another, e.g. `./tag` or `../layout/hero`.
pub fn relative_unit_path(from_unit: &str, to_unit: &str) -> String {
    let segments = |path: &str| -> Vec<String> {
        path.split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect()
    };
    let mut from_dir = segments(from_unit);
    from_dir.pop();
    let to = segments(to_unit);

    let common = from_dir
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();
    // The file name of the target always stays in the path.
    let common = common.min(to.len().saturating_sub(1));

    let ups = from_dir.len() - common;
    let rest = to[common..].join("/");
    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}

/// Imports needed by one model's unit, de-duplicated and sorted by rendered text.
///
/// Self references, the wildcard, unresolved keys and excluded fields
/// contribute nothing.
pub fn collect_imports(
    model: &ResolvedModel,
    graph: &ModelGraph,
    config: &GeneratorConfig,
) -> Vec<TsImport> {
    let type_only = config.overrides.import_as_type(&model.interface_name);
    let mut imports = BTreeMap::new();

    for (name, field) in model.record.attributes.iter() {
        if config.overrides.excludes(&model.interface_name, name) {
            continue;
        }
        for key in referenced_keys(field) {
            if key == WILDCARD {
                continue;
            }
            let Some(target) = graph.find(key) else {
                continue;
            };
            if target.model_key == model.model_key {
                continue;
            }
            let import = TsImport {
                items: vec![target.interface_name.clone()],
                from: relative_unit_path(&model.output_unit, &target.output_unit),
                type_only,
            };
            imports.insert(import.emit(), import);
        }
    }

    imports.into_values().collect()
}
