//! Field declarations to TypeScript properties and enums.

use strapi_ts_common::{Attributes, FieldKind, FieldSpec};

use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostic;
use crate::graph::ModelGraph;
use crate::naming;
use crate::resolver::{self, WILDCARD};
use crate::ts::{Emit, TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};

/// Synthesizes the properties of one interface.
///
/// Unresolved references are recorded in `diagnostics` and typed as `any`.
#[derive(Debug)]
pub struct Synthesizer<'a> {
    graph: &'a ModelGraph,
    config: &'a GeneratorConfig,
    interface: &'a str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Synthesizer<'a> {
    /// A synthesizer for the interface named `interface`.
    pub fn new(graph: &'a ModelGraph, config: &'a GeneratorConfig, interface: &'a str) -> Self {
        Self {
            graph,
            config,
            interface,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics gathered so far, in field order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// The property for one field: name, optionality and type.
    pub fn property(&mut self, field_name: &str, field: &FieldSpec) -> TsProp {
        let mut ty = self.field_type(field_name, field);
        if resolver::is_collection(field) {
            ty = ty.array_of();
        }
        TsProp {
            name: naming::resolve_property_name(field_name, self.interface, self.config),
            ty,
            optional: !is_required(field, self.config),
        }
    }

    /// The property as a declaration line body, e.g. `title?: string`.
    pub fn property_text(&mut self, field_name: &str, field: &FieldSpec) -> String {
        self.property(field_name, field).emit()
    }

    fn field_type(&mut self, field_name: &str, field: &FieldSpec) -> TsType {
        if let Some(key) = resolver::reference_key(field) {
            return self.resolve(field_name, key);
        }
        if field.is_kind(&FieldKind::DynamicZone) {
            return self.dynamic_zone(field_name, field);
        }
        match &field.kind {
            Some(kind) => self.scalar(kind, field_name, field),
            None => TsType::unknown(),
        }
    }

    fn resolve(&mut self, field_name: &str, key: &str) -> TsType {
        if key == WILDCARD {
            return TsType::any();
        }
        match self.graph.find(key) {
            Some(model) => TsType::Ref(model.interface_name.clone()),
            None => {
                self.diagnostics.push(Diagnostic::UnresolvedReference {
                    interface: self.interface.to_string(),
                    field: field_name.to_string(),
                    reference: key.to_string(),
                });
                TsType::any()
            }
        }
    }

    fn dynamic_zone(&mut self, field_name: &str, field: &FieldSpec) -> TsType {
        let members = field
            .components
            .iter()
            .flatten()
            .map(|component| self.resolve(field_name, component))
            .collect();
        let union = TsType::union(members);

        // A zero minimum reads as no minimum.
        let no_min = field.min.is_none() || field.min_bound() == Some(0);
        match (field.min_bound(), field.max_bound()) {
            (_, Some(1)) if no_min => TsType::Tuple(vec![union]),
            (Some(1), Some(1)) => TsType::Tuple(vec![union]),
            (Some(2), Some(2)) => TsType::Tuple(vec![union; 2]),
            (Some(3), Some(3)) => TsType::Tuple(vec![union; 3]),
            _ => union.array_of(),
        }
    }

    fn scalar(&self, kind: &FieldKind, field_name: &str, field: &FieldSpec) -> TsType {
        if let Some(custom) =
            self.config
                .overrides
                .property_type(kind.as_str(), field_name, self.interface)
        {
            return TsType::Ref(custom);
        }
        match kind {
            FieldKind::Text
            | FieldKind::RichText
            | FieldKind::Email
            | FieldKind::Password
            | FieldKind::Uid
            | FieldKind::Time
            | FieldKind::String => TsType::string(),
            FieldKind::Enumeration => match enum_values(field) {
                Some(_) if self.config.enums => TsType::Ref(naming::resolve_enum_name(
                    field_name,
                    self.interface,
                    self.config,
                )),
                Some(values) => TsType::union(
                    values
                        .iter()
                        .map(|v| TsType::Literal(TsLiteral::String(v.clone())))
                        .collect(),
                ),
                None => TsType::string(),
            },
            FieldKind::Date | FieldKind::DateTime | FieldKind::Timestamp => {
                TsType::Ref("Date".into())
            }
            FieldKind::Media => TsType::Ref("Blob".into()),
            FieldKind::Json => TsType::Map(Box::new(TsType::unknown())),
            FieldKind::Decimal
            | FieldKind::Float
            | FieldKind::BigInteger
            | FieldKind::Integer
            | FieldKind::Number => TsType::Primitive(TsPrimitive::Number),
            FieldKind::Boolean => TsType::Primitive(TsPrimitive::Boolean),
            // Relation-like kinds without a reference.
            FieldKind::Relation | FieldKind::Component | FieldKind::DynamicZone => TsType::any(),
            FieldKind::Other(_) => TsType::unknown(),
        }
    }
}

fn enum_values(field: &FieldSpec) -> Option<&[String]> {
    field
        .enum_values
        .as_deref()
        .filter(|values| !values.is_empty())
}

/// Whether a field is emitted without `?`.
pub fn is_required(field: &FieldSpec, config: &GeneratorConfig) -> bool {
    field.required
        || (resolver::is_collection(field) && !config.collection_can_be_undefined)
        || (field.is_kind(&FieldKind::DynamicZone) && field.has_positive_min())
}

/// Enum declarations for the enumeration fields of one interface.
///
/// Empty value lists and excluded fields produce nothing.
pub fn enum_defs(
    interface: &str,
    attributes: &Attributes,
    config: &GeneratorConfig,
) -> Vec<TsTypeDef> {
    attributes
        .iter()
        .filter(|(name, _)| !config.overrides.excludes(interface, name))
        .filter(|(_, field)| field.is_kind(&FieldKind::Enumeration))
        .filter_map(|(name, field)| {
            let values = enum_values(field)?;
            Some(TsTypeDef {
                name: naming::resolve_enum_name(name, interface, config),
                doc: None,
                kind: TypeDefKind::Enum {
                    members: values.to_vec(),
                },
            })
        })
        .collect()
}

/// Enum declarations rendered to text.
pub fn enum_text(interface: &str, attributes: &Attributes, config: &GeneratorConfig) -> Vec<String> {
    enum_defs(interface, attributes, config)
        .iter()
        .map(Emit::emit)
        .collect()
}
