//! Generation options and caller-supplied naming/typing overrides.
//!
//! Every override may decline: returning `None` (or an empty string) hands
//! the decision back to the built-in default. The configuration is passed by
//! reference through every stage, so two runs with different options never
//! observe each other.

use std::fmt;

type NameFn = Box<dyn Fn(&str, &str) -> Option<String> + Send + Sync>;
type TypeFn = Box<dyn Fn(&str, &str, &str) -> Option<String> + Send + Sync>;
type FieldPredicateFn = Box<dyn Fn(&str, &str) -> bool + Send + Sync>;
type InterfaceFlagFn = Box<dyn Fn(&str) -> bool + Send + Sync>;
type ExtraFieldsFn = Box<dyn Fn(&str) -> Vec<ExtraField> + Send + Sync>;

/// An extra property appended verbatim to an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    /// Property name, emitted as-is.
    pub name: String,
    /// Property type, emitted as-is.
    pub ty: String,
}

impl ExtraField {
    /// Create an extra `name: ty` property.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Default)]
pub struct GeneratorConfig {
    /// Place each top-level model in its own folder: `article/article`.
    pub nested: bool,
    /// Emit `enum` declarations for enumeration fields instead of literal unions.
    pub enums: bool,
    /// Make collection and repeatable fields optional unless marked required.
    pub collection_can_be_undefined: bool,
    /// Caller-supplied naming and typing overrides.
    pub overrides: Overrides,
}

impl GeneratorConfig {
    /// Default options: flat output, literal unions, required collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle nested output paths.
    pub fn nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Toggle enum declarations.
    pub fn enums(mut self, enums: bool) -> Self {
        self.enums = enums;
        self
    }

    /// Toggle optional collections.
    pub fn collection_can_be_undefined(mut self, yes: bool) -> Self {
        self.collection_can_be_undefined = yes;
        self
    }

    /// Replace the override set.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Optional override callbacks, one per naming/typing decision.
#[derive(Default)]
pub struct Overrides {
    interface_name: Option<NameFn>,
    enum_name: Option<NameFn>,
    property_name: Option<NameFn>,
    property_type: Option<TypeFn>,
    output_unit: Option<NameFn>,
    exclude_field: Option<FieldPredicateFn>,
    extra_fields: Option<ExtraFieldsFn>,
    import_as_type: Option<InterfaceFlagFn>,
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("interface_name", &self.interface_name.is_some())
            .field("enum_name", &self.enum_name.is_some())
            .field("property_name", &self.property_name.is_some())
            .field("property_type", &self.property_type.is_some())
            .field("output_unit", &self.output_unit.is_some())
            .field("exclude_field", &self.exclude_field.is_some())
            .field("extra_fields", &self.extra_fields.is_some())
            .field("import_as_type", &self.import_as_type.is_some())
            .finish()
    }
}

/// Empty answers count as declining.
fn accepted(answer: Option<String>) -> Option<String> {
    answer.filter(|s| !s.is_empty())
}

impl Overrides {
    /// No overrides: every decision uses the default.
    pub fn new() -> Self {
        Self::default()
    }

    /// `(display_name, source_path) -> interface name`.
    pub fn with_interface_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.interface_name = Some(Box::new(f));
        self
    }

    /// `(field_name, interface_name) -> enum name`.
    pub fn with_enum_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.enum_name = Some(Box::new(f));
        self
    }

    /// `(field_name, interface_name) -> property name`.
    pub fn with_property_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.property_name = Some(Box::new(f));
        self
    }

    /// `(kind_tag, field_name, interface_name) -> property type`.
    ///
    /// Consulted for scalar fields only; relations always resolve through the graph.
    pub fn with_property_type<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.property_type = Some(Box::new(f));
        self
    }

    /// `(interface_name, source_path) -> output unit path` (no extension).
    pub fn with_output_unit<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.output_unit = Some(Box::new(f));
        self
    }

    /// `(interface_name, field_name) -> exclude?`.
    pub fn with_exclude_field<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        self.exclude_field = Some(Box::new(f));
        self
    }

    /// `interface_name -> extra properties`, appended after the declared fields.
    pub fn with_extra_fields<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Vec<ExtraField> + Send + Sync + 'static,
    {
        self.extra_fields = Some(Box::new(f));
        self
    }

    /// `interface_name -> use `import type`?` for the imports of that interface's unit.
    pub fn with_import_as_type<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.import_as_type = Some(Box::new(f));
        self
    }

    pub(crate) fn interface_name(&self, display_name: &str, source_path: &str) -> Option<String> {
        accepted(self.interface_name.as_ref()?(display_name, source_path))
    }

    pub(crate) fn enum_name(&self, field_name: &str, interface_name: &str) -> Option<String> {
        accepted(self.enum_name.as_ref()?(field_name, interface_name))
    }

    pub(crate) fn property_name(&self, field_name: &str, interface_name: &str) -> Option<String> {
        accepted(self.property_name.as_ref()?(field_name, interface_name))
    }

    pub(crate) fn property_type(
        &self,
        kind: &str,
        field_name: &str,
        interface_name: &str,
    ) -> Option<String> {
        accepted(self.property_type.as_ref()?(kind, field_name, interface_name))
    }

    pub(crate) fn output_unit(&self, interface_name: &str, source_path: &str) -> Option<String> {
        accepted(self.output_unit.as_ref()?(interface_name, source_path))
    }

    pub(crate) fn excludes(&self, interface_name: &str, field_name: &str) -> bool {
        self.exclude_field
            .as_ref()
            .is_some_and(|f| f(interface_name, field_name))
    }

    pub(crate) fn extra_fields(&self, interface_name: &str) -> Vec<ExtraField> {
        self.extra_fields
            .as_ref()
            .map(|f| f(interface_name))
            .unwrap_or_default()
    }

    pub(crate) fn import_as_type(&self, interface_name: &str) -> bool {
        self.import_as_type
            .as_ref()
            .is_some_and(|f| f(interface_name))
    }
}
