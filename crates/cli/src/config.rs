//! TOML configuration file and its merge with command line flags.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use strapi_ts_core::{ExtraField, GeneratorConfig, Overrides};

use crate::Cli;

/// Default output folder.
pub const DEFAULT_OUTPUT: &str = "types";

/// Matches every interface or field.
const ANY: &str = "*";

/// Contents of a `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Definition folders or files
    pub input: Vec<PathBuf>,
    /// Component definitions folder
    pub components: Option<PathBuf>,
    /// Output folder
    pub output: Option<PathBuf>,
    /// One folder per content type
    pub nested: bool,
    /// Enums instead of string literal unions
    #[serde(rename = "enum")]
    pub enums: bool,
    /// Collections may be undefined
    pub collection_can_be_undefined: bool,
    /// `[overrides]` table
    pub overrides: OverridesConfig,
}

/// Declarative overrides, compiled into generator callbacks.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverridesConfig {
    /// Interfaces whose imports use `import type`; `*` for all.
    pub import_as_type: Vec<String>,
    /// `Interface.field` rules, either side may be `*`. A bare name means `*.name`.
    pub exclude: Vec<String>,
    /// Display name -> interface name.
    pub interface_names: BTreeMap<String, String>,
    /// Kind tag -> TypeScript type.
    pub field_types: BTreeMap<String, String>,
    /// Field name -> property name.
    pub field_names: BTreeMap<String, String>,
    /// `Interface.field` -> enum name; the interface may be `*`.
    pub enum_names: BTreeMap<String, String>,
    /// Interface name -> unit path below the output folder, without extension.
    pub output_units: BTreeMap<String, String>,
    /// Extra properties appended to interfaces.
    pub add_field: Vec<AddField>,
}

/// An `[[overrides.add_field]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddField {
    /// Interface name, or `*`.
    pub interface: String,
    /// Property name
    pub name: String,
    /// TypeScript type, emitted verbatim
    #[serde(rename = "type")]
    pub ty: String,
}

fn matches(pattern: &str, value: &str) -> bool {
    pattern == ANY || pattern == value
}

impl FileConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read config file {}: {err}", path.display()))?;
        Self::parse(&text)
            .map_err(|err| format!("Failed to parse config file {}: {err}", path.display()))
    }

    /// Parse config file text.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Resolve relative paths against the folder holding the config file.
    fn relative_to(mut self, base: &Path) -> Self {
        self.input = self.input.iter().map(|p| base.join(p)).collect();
        self.components = self.components.map(|p| base.join(p));
        self.output = self.output.map(|p| base.join(p));
        self
    }
}

impl OverridesConfig {
    /// Compile the rules into generator callbacks.
    pub fn into_overrides(self) -> Overrides {
        let mut overrides = Overrides::new();

        if !self.import_as_type.is_empty() {
            let names = self.import_as_type;
            overrides = overrides
                .with_import_as_type(move |iface| names.iter().any(|n| matches(n, iface)));
        }

        if !self.exclude.is_empty() {
            let rules: Vec<(String, String)> = self
                .exclude
                .iter()
                .map(|rule| match rule.split_once('.') {
                    Some((iface, field)) => (iface.to_string(), field.to_string()),
                    None => (ANY.to_string(), rule.clone()),
                })
                .collect();
            overrides = overrides.with_exclude_field(move |iface, field| {
                rules
                    .iter()
                    .any(|(i, f)| matches(i, iface) && matches(f, field))
            });
        }

        if !self.interface_names.is_empty() {
            let names = self.interface_names;
            overrides = overrides.with_interface_name(move |display, _| names.get(display).cloned());
        }

        if !self.field_types.is_empty() {
            let types: BTreeMap<String, String> = self
                .field_types
                .into_iter()
                .map(|(kind, ty)| (kind.to_lowercase(), ty))
                .collect();
            overrides = overrides
                .with_property_type(move |kind, _, _| types.get(&kind.to_lowercase()).cloned());
        }

        if !self.field_names.is_empty() {
            let names = self.field_names;
            overrides = overrides.with_property_name(move |field, _| names.get(field).cloned());
        }

        if !self.enum_names.is_empty() {
            let names = self.enum_names;
            overrides = overrides.with_enum_name(move |field, iface| {
                names
                    .get(&format!("{iface}.{field}"))
                    .or_else(|| names.get(&format!("{ANY}.{field}")))
                    .cloned()
            });
        }

        if !self.output_units.is_empty() {
            let units = self.output_units;
            overrides = overrides.with_output_unit(move |iface, _| units.get(iface).cloned());
        }

        if !self.add_field.is_empty() {
            let fields = self.add_field;
            overrides = overrides.with_extra_fields(move |iface| {
                fields
                    .iter()
                    .filter(|f| matches(&f.interface, iface))
                    .map(|f| ExtraField::new(&f.name, &f.ty))
                    .collect()
            });
        }

        overrides
    }
}

/// Effective settings for one run.
#[derive(Debug)]
pub struct Settings {
    /// Definition folders or files
    pub inputs: Vec<PathBuf>,
    /// Component definitions folder
    pub components: Option<PathBuf>,
    /// Output folder
    pub output: PathBuf,
    /// Compare instead of writing
    pub check: bool,
    /// Generator options and compiled overrides
    pub generator: GeneratorConfig,
}

impl Settings {
    /// Merge the config file (if any) with the flags. Flags win; toggles are
    /// on when either source turns them on.
    pub fn resolve(cli: &Cli) -> Result<Self, String> {
        let file = match &cli.config {
            Some(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                FileConfig::load(path)?.relative_to(base)
            }
            None => FileConfig::default(),
        };

        let inputs = if cli.inputs.is_empty() {
            file.input
        } else {
            cli.inputs.clone()
        };
        let generator = GeneratorConfig::new()
            .nested(cli.nested || file.nested)
            .enums(cli.enums || file.enums)
            .collection_can_be_undefined(
                cli.collection_can_be_undefined || file.collection_can_be_undefined,
            )
            .with_overrides(file.overrides.into_overrides());

        Ok(Settings {
            inputs,
            components: cli.components.clone().or(file.components),
            output: cli
                .out
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            check: cli.check,
            generator,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use strapi_ts_common::RawModelRecord;

    const CONFIG: &str = r#"
input = ["api"]
components = "components"
enum = true

[overrides]
import_as_type = ["Article"]
exclude = ["Article.secret", "*.createdBy", "updatedBy"]
interface_names = { "Blog Post" = "Post" }
field_types = { RichText = "RichText" }
field_names = { "created_at" = "createdAt" }
enum_names = { "Article.status" = "PublicationState", "*.kind" = "Kind" }
output_units = { "Post" = "blog/post" }

[[overrides.add_field]]
interface = "*"
name = "locale"
type = "string"
"#;

    #[test]
    fn test_parse_config() {
        let config = FileConfig::parse(CONFIG).unwrap();
        assert_eq!(config.input, vec![PathBuf::from("api")]);
        assert_eq!(config.components, Some(PathBuf::from("components")));
        assert!(config.enums);
        assert!(!config.nested);
        assert_eq!(config.overrides.exclude.len(), 3);
        assert_eq!(config.overrides.add_field[0].ty, "string");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::parse("inputs = []").is_err());
    }

    #[test]
    fn test_compiled_overrides() {
        let overrides = FileConfig::parse(CONFIG).unwrap().overrides.into_overrides();
        let config = GeneratorConfig::new().enums(true).with_overrides(overrides);
        let records = vec![
            RawModelRecord::from_json(
                r#"{"info": {"name": "Article"}, "attributes": {
                    "secret": {"type": "string"},
                    "createdBy": {"type": "string"},
                    "updatedBy": {"type": "string"},
                    "created_at": {"type": "datetime"},
                    "body": {"type": "richtext"},
                    "status": {"type": "enumeration", "enum": ["draft"]},
                    "kind": {"type": "enumeration", "enum": ["news"]},
                    "post": {"model": "blog-post"}
                }}"#,
                "article.settings.json",
                false,
            )
            .unwrap(),
            RawModelRecord::from_json(
                r#"{"info": {"name": "Blog Post"}, "attributes": {"secret": {"type": "string"}}}"#,
                "blog-post.settings.json",
                false,
            )
            .unwrap(),
        ];
        let manifest = strapi_ts_core::generate(records, &config).unwrap();
        let article = &manifest.units[0].content;
        assert!(article.starts_with("import type { Post } from './blog/post';\n"));
        assert!(article.contains("  status?: PublicationState;\n"));
        assert!(article.contains("export enum PublicationState {"));
        assert!(article.contains("  kind?: Kind;\n"));
        assert!(!article.contains("secret"));
        assert!(!article.contains("createdBy"));
        assert!(!article.contains("updatedBy"));
        assert!(article.contains("  createdAt?: Date;\n"));
        assert!(article.contains("  body?: RichText;\n"));
        assert!(article.contains("  locale: string;\n}"));

        assert_eq!(manifest.units[1].path, "blog/post");
        let post = &manifest.units[1].content;
        assert!(post.contains("export interface Post {"));
        assert!(post.contains("  secret?: string;\n"));
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strapi-ts.toml");
        fs::write(&path, "input = [\"api\"]\noutput = \"generated\"\nnested = true\n").unwrap();

        let cli = Cli::try_parse_from([
            "strapi-ts",
            "--config",
            path.to_str().unwrap(),
            "-o",
            "elsewhere",
        ])
        .unwrap();
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.inputs, vec![dir.path().join("api")]);
        assert_eq!(settings.output, PathBuf::from("elsewhere"));
        assert!(settings.generator.nested);
        assert!(!settings.generator.enums);

        let cli = Cli::try_parse_from(["strapi-ts", "src"]).unwrap();
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.inputs, vec![PathBuf::from("src")]);
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
    }
}
