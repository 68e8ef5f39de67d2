//! Content-model definition structs for serde deserialization.
//!
//! This module covers the subset of a Strapi content-type / component
//! definition document that type generation needs. Keys we do not understand
//! are ignored so newer definition files still load.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::ModelParseError;

/// One parsed definition document, tagged with where it came from.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelRecord {
    /// Path of the file on disk. Not part of the document itself.
    #[serde(rename = "_filename", default)]
    pub source_path: String,

    /// Whether the record is a reusable component. Not part of the document itself.
    #[serde(rename = "_isComponent", default)]
    pub is_component: bool,

    /// Database connection name (legacy definitions).
    pub connection: Option<String>,

    /// Pluralized storage name.
    pub collection_name: Option<String>,

    /// Display metadata.
    #[serde(default)]
    pub info: ModelInfo,

    /// Model options (timestamps, draft and publish, ...).
    pub options: Option<ModelOptions>,

    /// Declared fields, in document order.
    #[serde(default)]
    pub attributes: Attributes,
}

/// The `info` block of a definition.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Legacy display name.
    pub name: Option<String>,
    /// Display name used by newer definitions.
    pub display_name: Option<String>,
    /// Singular API name.
    pub singular_name: Option<String>,
    /// Plural API name.
    pub plural_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Admin panel icon.
    pub icon: Option<String>,
}

/// The `options` block of a definition.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    /// Either a flag or the pair of timestamp column names.
    pub timestamps: Option<serde_json::Value>,
    /// Whether drafts are enabled.
    pub draft_and_publish: Option<bool>,
    /// Whether lifecycle hooks are skipped for increments.
    pub increments: Option<bool>,
}

/// One declared attribute of a model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Scalar kind tag.
    #[serde(rename = "type")]
    pub kind: Option<FieldKind>,

    /// Storage column type override.
    pub column_type: Option<String>,

    /// Whether the field must be present.
    #[serde(default)]
    pub required: bool,

    /// Whether values must be unique.
    #[serde(default)]
    pub unique: bool,

    /// Default value (string, number or boolean in practice).
    pub default: Option<serde_json::Value>,

    /// Owning side of a many-to-many relation.
    #[serde(default)]
    pub dominant: bool,

    /// Related collection (to-many reference).
    pub collection: Option<String>,

    /// Related model (to-one reference).
    pub model: Option<String>,

    /// Inverse field on the related model.
    pub via: Option<String>,

    /// Plugin owning the related model.
    pub plugin: Option<String>,

    /// Allowed values of an enumeration field.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,

    /// Component reference (`folder.name`).
    pub component: Option<String>,

    /// Allowed components of a dynamic zone.
    pub components: Option<Vec<String>>,

    /// Repeatable component.
    #[serde(default)]
    pub repeatable: bool,

    /// Multiple media.
    #[serde(default)]
    pub multiple: bool,

    /// Minimum bound (length, value or cardinality depending on kind).
    pub min: Option<serde_json::Number>,

    /// Maximum bound (length, value or cardinality depending on kind).
    pub max: Option<serde_json::Number>,

    /// Relation kind.
    pub relation: Option<RelationKind>,

    /// Related model uid (`api::article.article`).
    pub target: Option<String>,
}

/// `3` and `3.0` are both the integer 3; `2.5` has no integral value.
fn integral(number: &serde_json::Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.fract() == 0.0 && value.abs() < 9.0e15)
            .map(|value| value as i64)
    })
}

impl FieldSpec {
    /// Integral minimum bound, if any.
    pub fn min_bound(&self) -> Option<i64> {
        self.min.as_ref().and_then(integral)
    }

    /// Integral maximum bound, if any.
    pub fn max_bound(&self) -> Option<i64> {
        self.max.as_ref().and_then(integral)
    }

    /// Whether the minimum bound is strictly positive.
    pub fn has_positive_min(&self) -> bool {
        self.min
            .as_ref()
            .and_then(serde_json::Number::as_f64)
            .is_some_and(|min| min > 0.0)
    }

    /// Whether the field has the given kind.
    pub fn is_kind(&self, kind: &FieldKind) -> bool {
        self.kind.as_ref() == Some(kind)
    }
}

/// Field kind tag. Parsed case-insensitively; unknown tags are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `text`
    Text,
    /// `richtext`
    RichText,
    /// `email`
    Email,
    /// `password`
    Password,
    /// `uid`
    Uid,
    /// `time`
    Time,
    /// `date`
    Date,
    /// `datetime`
    DateTime,
    /// `timestamp`
    Timestamp,
    /// `media`
    Media,
    /// `json`
    Json,
    /// `decimal`
    Decimal,
    /// `float`
    Float,
    /// `biginteger`
    BigInteger,
    /// `integer`
    Integer,
    /// `enumeration`
    Enumeration,
    /// `component`
    Component,
    /// `dynamiczone`
    DynamicZone,
    /// `relation`
    Relation,
    /// Any tag not listed above.
    Other(String),
}

impl FieldKind {
    /// The canonical tag as it appears in definition files.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Text => "text",
            FieldKind::RichText => "richtext",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Uid => "uid",
            FieldKind::Time => "time",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Media => "media",
            FieldKind::Json => "json",
            FieldKind::Decimal => "decimal",
            FieldKind::Float => "float",
            FieldKind::BigInteger => "biginteger",
            FieldKind::Integer => "integer",
            FieldKind::Enumeration => "enumeration",
            FieldKind::Component => "component",
            FieldKind::DynamicZone => "dynamiczone",
            FieldKind::Relation => "relation",
            FieldKind::Other(raw) => raw,
        }
    }
}

impl From<&str> for FieldKind {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "text" => FieldKind::Text,
            "richtext" => FieldKind::RichText,
            "email" => FieldKind::Email,
            "password" => FieldKind::Password,
            "uid" => FieldKind::Uid,
            "time" => FieldKind::Time,
            "date" => FieldKind::Date,
            "datetime" => FieldKind::DateTime,
            "timestamp" => FieldKind::Timestamp,
            "media" => FieldKind::Media,
            "json" => FieldKind::Json,
            "decimal" => FieldKind::Decimal,
            "float" => FieldKind::Float,
            "biginteger" => FieldKind::BigInteger,
            "integer" => FieldKind::Integer,
            "enumeration" => FieldKind::Enumeration,
            "component" => FieldKind::Component,
            "dynamiczone" => FieldKind::DynamicZone,
            "relation" => FieldKind::Relation,
            _ => FieldKind::Other(tag.to_string()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        FieldKind::from(tag.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation cardinality tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RelationKind {
    /// `oneToOne`
    OneToOne,
    /// `oneToMany`
    OneToMany,
    /// `manyToOne`
    ManyToOne,
    /// `manyToMany`
    ManyToMany,
    /// `morphOne`
    MorphOne,
    /// `morphMany`
    MorphMany,
    /// `morphToOne`
    MorphToOne,
    /// `morphToMany`
    MorphToMany,
    /// Any tag not listed above.
    Other(String),
}

impl RelationKind {
    /// The tag as it appears in definition files.
    pub fn as_str(&self) -> &str {
        match self {
            RelationKind::OneToOne => "oneToOne",
            RelationKind::OneToMany => "oneToMany",
            RelationKind::ManyToOne => "manyToOne",
            RelationKind::ManyToMany => "manyToMany",
            RelationKind::MorphOne => "morphOne",
            RelationKind::MorphMany => "morphMany",
            RelationKind::MorphToOne => "morphToOne",
            RelationKind::MorphToMany => "morphToMany",
            RelationKind::Other(raw) => raw,
        }
    }

    /// Whether the related side holds many records.
    pub fn is_to_many(&self) -> bool {
        self.as_str().to_ascii_lowercase().ends_with("many")
    }
}

impl From<String> for RelationKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "oneToOne" => RelationKind::OneToOne,
            "oneToMany" => RelationKind::OneToMany,
            "manyToOne" => RelationKind::ManyToOne,
            "manyToMany" => RelationKind::ManyToMany,
            "morphOne" => RelationKind::MorphOne,
            "morphMany" => RelationKind::MorphMany,
            "morphToOne" => RelationKind::MorphToOne,
            "morphToMany" => RelationKind::MorphToMany,
            _ => RelationKind::Other(tag),
        }
    }
}

impl From<RelationKind> for String {
    fn from(kind: RelationKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Attributes in document order.
///
/// JSON objects are unordered as far as `serde_json::Map` is concerned, but
/// the generated interface lists properties in the order they were authored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(String, FieldSpec)>);

impl Attributes {
    /// Build from `(name, field)` pairs, keeping the given order.
    pub fn new(fields: Vec<(String, FieldSpec)>) -> Self {
        Self(fields)
    }

    /// Iterate `(name, field)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.0.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldSpec)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, FieldSpec)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute name to attribute definition")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut fields: Vec<(String, FieldSpec)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, field)) = map.next_entry::<String, FieldSpec>()? {
                    // A repeated key keeps its first position and its last value.
                    if let Some(slot) = fields.iter_mut().find(|(n, _)| *n == name) {
                        slot.1 = field;
                    } else {
                        fields.push((name, field));
                    }
                }
                Ok(Attributes(fields))
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, field) in &self.0 {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

impl RawModelRecord {
    /// Parse a definition document, tagging it with its source path and classification.
    pub fn from_json(
        json: &str,
        source_path: impl Into<String>,
        is_component: bool,
    ) -> Result<Self, ModelParseError> {
        let source_path = source_path.into();
        let mut record: Self =
            serde_json::from_str(json).map_err(|source| ModelParseError::Json {
                path: source_path.clone(),
                source,
            })?;
        record.source_path = source_path;
        record.is_component = is_component;
        Ok(record)
    }

    /// The human-readable model name: `info.name`, else `info.displayName`.
    pub fn display_name(&self) -> Option<&str> {
        self.info
            .name
            .as_deref()
            .or(self.info.display_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}
