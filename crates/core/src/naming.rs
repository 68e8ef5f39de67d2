//! Identifier derivation for interfaces, enums, properties and output units.
//!
//! Each `resolve_*` function asks the configured override first and falls
//! back to the matching `default_*` function when the override declines.

use crate::config::GeneratorConfig;
use crate::ts::utils::capitalize_first;

/// Default interface name: upper-case the first character and every character
/// following a run of spaces, drop the spaces and strip slashes.
///
/// An empty input (or one that strips down to nothing) yields `unknown`.
pub fn default_interface_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == ' ' {
            upper_next = true;
            continue;
        }
        let upper = std::mem::take(&mut upper_next);
        if c == '/' {
            continue;
        }
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    if out.is_empty() {
        "unknown".to_string()
    } else {
        out
    }
}

/// Default enum name: `interfaceName + Capitalized(fieldName)`, or `any` for an empty field.
pub fn default_enum_name(field_name: &str, interface_name: &str) -> String {
    if field_name.is_empty() {
        return "any".to_string();
    }
    format!("{interface_name}{}", capitalize_first(field_name))
}

/// Default output unit.
///
/// Components map their dotted key to a path (`layout.hero` -> `layout/hero`);
/// top-level models use the lower-cased key, doubled when `nested` is set.
pub fn default_output_unit(model_key: &str, is_component: bool, nested: bool) -> String {
    if is_component {
        return model_key.replacen('.', "/", 1);
    }
    let lower = model_key.to_lowercase();
    if nested {
        format!("{lower}/{lower}")
    } else {
        lower
    }
}

/// Interface name for a record.
///
/// `component_folder` is the parent folder of a component definition and is
/// prefixed to the name so same-named components in different folders differ.
pub fn resolve_interface_name(
    display_name: Option<&str>,
    source_path: &str,
    component_folder: Option<&str>,
    config: &GeneratorConfig,
) -> String {
    let display = display_name.unwrap_or_default();
    if let Some(name) = config.overrides.interface_name(display, source_path) {
        return name;
    }
    if display.is_empty() {
        return "unknown".to_string();
    }
    match component_folder {
        Some(folder) => format!(
            "{}{}",
            default_interface_name(folder),
            default_interface_name(display)
        ),
        None => default_interface_name(display),
    }
}

/// Enum name: override, else `default_enum_name`.
pub fn resolve_enum_name(field_name: &str, interface_name: &str, config: &GeneratorConfig) -> String {
    config
        .overrides
        .enum_name(field_name, interface_name)
        .unwrap_or_else(|| default_enum_name(field_name, interface_name))
}

/// Property name: override, else the field name unchanged.
pub fn resolve_property_name(
    field_name: &str,
    interface_name: &str,
    config: &GeneratorConfig,
) -> String {
    config
        .overrides
        .property_name(field_name, interface_name)
        .unwrap_or_else(|| field_name.to_string())
}

/// Output unit path, always with forward slashes.
pub fn resolve_output_unit(
    model_key: &str,
    is_component: bool,
    interface_name: &str,
    source_path: &str,
    config: &GeneratorConfig,
) -> String {
    config
        .overrides
        .output_unit(interface_name, source_path)
        .unwrap_or_else(|| default_output_unit(model_key, is_component, config.nested))
        .replace('\\', "/")
}
