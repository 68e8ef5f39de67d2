//! The resolved model graph: one node per model key, built once per run.

use std::collections::HashMap;

use strapi_ts_common::RawModelRecord;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::naming;

/// Which discriminant property a model's interface carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discriminant {
    /// `__component: 'folder.name'`
    Component,
    /// `__contentType: 'name'`
    ContentType,
}

impl Discriminant {
    /// Property name carrying the model key.
    pub fn property(self) -> &'static str {
        match self {
            Discriminant::Component => "__component",
            Discriminant::ContentType => "__contentType",
        }
    }
}

/// A record plus the identifiers derived from it.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    /// The parsed definition
    pub record: RawModelRecord,
    /// Lower-cased join key: `folder.name` for components, `name` otherwise.
    pub model_key: String,
    /// Exported interface identifier.
    pub interface_name: String,
    /// Unit path relative to the output root, forward slashes, no extension.
    pub output_unit: String,
}

impl ResolvedModel {
    /// `__component` for components, `__contentType` otherwise.
    pub fn discriminant(&self) -> Discriminant {
        if self.record.is_component {
            Discriminant::Component
        } else {
            Discriminant::ContentType
        }
    }

    /// Display name for doc comments, falling back to the interface name.
    pub fn display_name(&self) -> &str {
        self.record
            .display_name()
            .unwrap_or(self.interface_name.as_str())
    }
}

/// Immutable set of resolved models, looked up by key.
#[derive(Debug, Default)]
pub struct ModelGraph {
    models: Vec<ResolvedModel>,
    by_key: HashMap<String, usize>,
}

fn path_segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty()).collect()
}

/// The model key for a source path, case unchanged.
///
/// Components use `<parent folder>.<file stem>`; top-level models use the file
/// name without `.settings.json`, or the parent folder for `schema.json`.
pub fn derive_model_key(source_path: &str, is_component: bool) -> Result<String> {
    let undefined = || Error::UndefinedModelKey {
        path: source_path.to_string(),
    };
    let segments = path_segments(source_path);
    let (file, parent) = match segments.as_slice() {
        [] => return Err(undefined()),
        [file] => (*file, None),
        [.., parent, file] => (*file, Some(*parent)),
    };

    let key = if is_component {
        let stem = file.strip_suffix(".json").unwrap_or(file);
        match parent {
            Some(parent) if !stem.is_empty() => format!("{parent}.{stem}"),
            _ => return Err(undefined()),
        }
    } else if file == "schema.json" {
        parent.ok_or_else(undefined)?.to_string()
    } else {
        file.strip_suffix(".settings.json")
            .or_else(|| file.strip_suffix(".json"))
            .unwrap_or(file)
            .to_string()
    };

    if key.is_empty() {
        return Err(undefined());
    }
    Ok(key)
}

fn component_folder(source_path: &str) -> Option<&str> {
    let segments = path_segments(source_path);
    segments.len().checked_sub(2).map(|i| segments[i])
}

impl ModelGraph {
    /// Resolve every record. Duplicate keys keep the position of the first
    /// record and the content of the last one.
    pub fn build(
        records: Vec<RawModelRecord>,
        config: &GeneratorConfig,
    ) -> Result<(Self, Vec<Diagnostic>)> {
        let mut graph = ModelGraph::default();
        let mut diagnostics = Vec::new();

        for record in records {
            let raw_key = derive_model_key(&record.source_path, record.is_component)?;
            let folder = if record.is_component {
                component_folder(&record.source_path)
            } else {
                None
            };
            let interface_name = naming::resolve_interface_name(
                record.display_name(),
                &record.source_path,
                folder,
                config,
            );
            let output_unit = naming::resolve_output_unit(
                &raw_key,
                record.is_component,
                &interface_name,
                &record.source_path,
                config,
            );
            let model = ResolvedModel {
                model_key: raw_key.to_lowercase(),
                interface_name,
                output_unit,
                record,
            };
            debug!(
                "Resolved model '{}' as {} -> {}",
                model.model_key, model.interface_name, model.output_unit
            );

            match graph.by_key.get(&model.model_key) {
                Some(&index) => {
                    let previous = &graph.models[index];
                    let diagnostic = Diagnostic::DuplicateModelKey {
                        key: model.model_key.clone(),
                        previous: previous.record.source_path.clone(),
                        replacement: model.record.source_path.clone(),
                        same_kind: previous.record.is_component == model.record.is_component,
                    };
                    diagnostic.log();
                    diagnostics.push(diagnostic);
                    graph.models[index] = model;
                }
                None => {
                    graph
                        .by_key
                        .insert(model.model_key.clone(), graph.models.len());
                    graph.models.push(model);
                }
            }
        }

        Ok((graph, diagnostics))
    }

    /// Case-insensitive lookup by model key.
    pub fn find(&self, key: &str) -> Option<&ResolvedModel> {
        self.by_key
            .get(&key.to_lowercase())
            .map(|&index| &self.models[index])
    }

    /// Models in build order.
    pub fn models(&self) -> &[ResolvedModel] {
        &self.models
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// No models at all.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn record(json: &str, path: &str, is_component: bool) -> RawModelRecord {
        RawModelRecord::from_json(json, path, is_component).unwrap()
    }

    #[test]
    fn test_derive_model_key() {
        assert_eq!(
            derive_model_key("api/article/models/article.settings.json", false).unwrap(),
            "article"
        );
        assert_eq!(
            derive_model_key("src/api/article/content-types/article/schema.json", false).unwrap(),
            "article"
        );
        assert_eq!(
            derive_model_key("components\\layout\\Hero.json", true).unwrap(),
            "layout.Hero"
        );
        assert_eq!(derive_model_key("tag.json", false).unwrap(), "tag");
    }

    #[test]
    fn test_undefined_model_key() {
        assert!(matches!(
            derive_model_key("", false),
            Err(Error::UndefinedModelKey { .. })
        ));
        assert!(matches!(
            derive_model_key("hero.json", true),
            Err(Error::UndefinedModelKey { .. })
        ));
        assert!(matches!(
            derive_model_key("schema.json", false),
            Err(Error::UndefinedModelKey { .. })
        ));
    }

    #[test]
    fn test_build_component_and_top_level() {
        let records = vec![
            record(
                r#"{"info": {"name": "Article"}, "attributes": {}}"#,
                "api/article/models/article.settings.json",
                false,
            ),
            record(
                r#"{"info": {"displayName": "Hero"}, "attributes": {}}"#,
                "components/layout/Hero.json",
                true,
            ),
        ];
        let (graph, diagnostics) = ModelGraph::build(records, &GeneratorConfig::new()).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(graph.len(), 2);

        let hero = graph.find("layout.hero").unwrap();
        assert_eq!(hero.interface_name, "LayoutHero");
        assert_eq!(hero.output_unit, "layout/Hero");
        assert_eq!(hero.discriminant(), Discriminant::Component);

        let article = graph.find("ARTICLE").unwrap();
        assert_eq!(article.output_unit, "article");
        assert_eq!(article.discriminant().property(), "__contentType");
    }

    #[test]
    fn test_nested_output_units() {
        let records = vec![record(
            r#"{"info": {"name": "Article"}, "attributes": {}}"#,
            "article.settings.json",
            false,
        )];
        let config = GeneratorConfig::new().nested(true);
        let (graph, _) = ModelGraph::build(records, &config).unwrap();
        assert_eq!(graph.models()[0].output_unit, "article/article");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let records = vec![
            record(
                r#"{"info": {"name": "Old"}, "attributes": {}}"#,
                "a/article.settings.json",
                false,
            ),
            record(
                r#"{"info": {"name": "Tag"}, "attributes": {}}"#,
                "tag.settings.json",
                false,
            ),
            record(
                r#"{"info": {"name": "New"}, "attributes": {}}"#,
                "b/article.settings.json",
                false,
            ),
        ];
        let (graph, diagnostics) = ModelGraph::build(records, &GeneratorConfig::new()).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.models()[0].interface_name, "New");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::DuplicateModelKey {
                key: "article".into(),
                previous: "a/article.settings.json".into(),
                replacement: "b/article.settings.json".into(),
                same_kind: true,
            }]
        );
    }

    #[test]
    fn test_build_fails_on_undefined_key() {
        let records = vec![record(r#"{"attributes": {}}"#, "hero.json", true)];
        let err = ModelGraph::build(records, &GeneratorConfig::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot derive a model key from source path 'hero.json'"
        );
    }
}
