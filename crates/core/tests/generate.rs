//! Whole-build properties of `generate`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use strapi_ts_core::{
    Diagnostic, GeneratorConfig, Manifest, Overrides, RawModelRecord, generate,
};

fn record(json: &str, path: &str, is_component: bool) -> RawModelRecord {
    RawModelRecord::from_json(json, path, is_component).unwrap()
}

fn unit<'a>(manifest: &'a Manifest, path: &str) -> &'a str {
    manifest
        .units
        .iter()
        .find(|u| u.path == path)
        .map(|u| u.content.as_str())
        .unwrap_or_else(|| panic!("no unit at {path}"))
}

fn article() -> RawModelRecord {
    record(
        r#"{
            "info": {"name": "Article"},
            "attributes": {
                "title": {"type": "text", "required": true},
                "status": {"type": "enumeration", "enum": ["draft", "published"]}
            }
        }"#,
        "api/article/models/article.settings.json",
        false,
    )
}

#[test]
fn article_with_enum_mode() {
    let manifest = generate(vec![article()], &GeneratorConfig::new().enums(true)).unwrap();
    assert!(manifest.diagnostics.is_empty());
    assert_eq!(
        unit(&manifest, "article"),
        r#"/**
 * Model definition for Article
 */
export interface Article {
  __contentType: 'article';
  id: string;
  title: string;
  status?: ArticleStatus;
}

export enum ArticleStatus {
  draft = "draft",
  published = "published",
}

export function isArticle(obj: { __contentType?: string }): obj is Article {
  return obj.__contentType === 'article';
}
"#
    );
    assert_eq!(manifest.index.content, "export * from './article';\n");
}

#[test]
fn component_key_and_discriminant() {
    let hero = record(
        r#"{"info": {"displayName": "Hero"}, "attributes": {}}"#,
        "src/components/layout/hero.json",
        true,
    );
    let manifest = generate(vec![hero], &GeneratorConfig::new()).unwrap();
    let text = unit(&manifest, "layout/hero");
    assert!(text.contains("export interface LayoutHero {\n  __component: 'layout.hero';\n"));
    assert!(text.contains("return obj.__component === 'layout.hero';"));
}

#[test]
fn excluded_field_keeps_id_and_discriminant() {
    let x = record(
        r#"{"info": {"name": "X"}, "attributes": {
            "secret": {"type": "password"},
            "tag": {"model": "tag"},
            "visible": {"type": "string"}
        }}"#,
        "x.settings.json",
        false,
    );
    let tag = record(r#"{"info": {"name": "Tag"}, "attributes": {}}"#, "tag.settings.json", false);
    let config = GeneratorConfig::new().with_overrides(
        Overrides::new().with_exclude_field(|iface, field| iface == "X" && field != "visible"),
    );
    let manifest = generate(vec![x, tag], &config).unwrap();
    let text = unit(&manifest, "x");
    assert!(!text.contains("secret"));
    assert!(!text.contains("import"));
    assert!(text.contains("  __contentType: 'x';\n  id: string;\n  visible?: string;\n}"));
}

#[test]
fn generation_is_idempotent() {
    let inputs = || {
        vec![
            article(),
            record(
                r#"{"info": {"name": "Tag"}, "attributes": {"articles": {"collection": "article"}}}"#,
                "tag.settings.json",
                false,
            ),
            record(
                r#"{"info": {"name": "Hero"}, "attributes": {"tags": {"collection": "tag"}}}"#,
                "components/layout/hero.json",
                true,
            ),
        ]
    };
    let config = GeneratorConfig::new().nested(true);
    let first = generate(inputs(), &config).unwrap();
    let second = generate(inputs(), &config).unwrap();
    assert_eq!(first.units, second.units);
    assert_eq!(first.index, second.index);
}

#[test]
fn imports_point_at_target_units() {
    let records = vec![
        record(
            r#"{"info": {"name": "Article"}, "attributes": {
                "tags": {"collection": "tag"},
                "seo": {"type": "component", "component": "shared.seo"}
            }}"#,
            "article.settings.json",
            false,
        ),
        record(
            r#"{"info": {"name": "Tag"}, "attributes": {"seo": {"type": "component", "component": "shared.seo"}}}"#,
            "tag.settings.json",
            false,
        ),
        record(
            r#"{"info": {"name": "Seo"}, "attributes": {"tag": {"model": "tag"}}}"#,
            "components/shared/seo.json",
            true,
        ),
    ];

    let manifest = generate(records.clone(), &GeneratorConfig::new()).unwrap();
    assert_eq!(
        unit(&manifest, "article"),
        "import { SharedSeo } from './shared/seo';\nimport { Tag } from './tag';\n\n/**\n * Model definition for Article\n */\nexport interface Article {\n  __contentType: 'article';\n  id: string;\n  tags: Tag[];\n  seo?: SharedSeo;\n}\n\nexport function isArticle(obj: { __contentType?: string }): obj is Article {\n  return obj.__contentType === 'article';\n}\n"
    );
    assert!(unit(&manifest, "shared/seo").starts_with("import { Tag } from '../tag';\n\n"));

    let nested = generate(records, &GeneratorConfig::new().nested(true)).unwrap();
    assert!(unit(&nested, "article/article").contains("import { Tag } from '../tag/tag';"));
    assert!(unit(&nested, "article/article").contains("import { SharedSeo } from '../shared/seo';"));
    assert!(unit(&nested, "shared/seo").contains("import { Tag } from '../tag/tag';"));
    assert_eq!(
        nested.index.content,
        "export * from './article/article';\nexport * from './shared/seo';\nexport * from './tag/tag';\n"
    );
}

#[test]
fn dynamic_zone_cardinality_with_two_components() {
    let zone = |name: &str, bounds: &str| {
        format!(
            r#""{name}": {{"type": "dynamiczone", "components": ["blocks.quote", "blocks.media"]{bounds}}}"#
        )
    };
    let page = record(
        &format!(
            r#"{{"info": {{"name": "Page"}}, "attributes": {{ {}, {}, {}, {}, {} }}}}"#,
            zone("one", r#", "min": 1, "max": 1"#),
            zone("atMostOne", r#", "max": 1"#),
            zone("two", r#", "min": 2, "max": 2"#),
            zone("three", r#", "min": 3, "max": 3"#),
            zone("many", r#", "min": 1, "max": 5"#),
        ),
        "page.settings.json",
        false,
    );
    let quote = record(r#"{"info": {"name": "Quote"}, "attributes": {}}"#, "components/blocks/quote.json", true);
    let media = record(r#"{"info": {"name": "Media"}, "attributes": {}}"#, "components/blocks/media.json", true);

    let manifest = generate(vec![page, quote, media], &GeneratorConfig::new()).unwrap();
    let text = unit(&manifest, "page");
    let union = "BlocksQuote | BlocksMedia";
    assert!(text.contains(&format!("  one: [{union}];\n")));
    assert!(text.contains(&format!("  atMostOne?: [{union}];\n")));
    assert!(text.contains(&format!("  two: [({union}), ({union})];\n")));
    assert!(text.contains(&format!("  three: [({union}), ({union}), ({union})];\n")));
    assert!(text.contains(&format!("  many: ({union})[];\n")));
    assert!(text.starts_with(
        "import { BlocksMedia } from './blocks/media';\nimport { BlocksQuote } from './blocks/quote';\n\n"
    ));
}

#[test]
fn unknown_kinds_and_missing_references_fall_back() {
    let post = record(
        r#"{"info": {"name": "Post"}, "attributes": {
            "location": {"type": "geopoint"},
            "mystery": {},
            "author": {"model": "writer"}
        }}"#,
        "post.settings.json",
        false,
    );
    let manifest = generate(vec![post], &GeneratorConfig::new()).unwrap();
    let text = unit(&manifest, "post");
    assert!(text.contains("  location?: unknown;\n"));
    assert!(text.contains("  mystery?: unknown;\n"));
    assert!(text.contains("  author?: any;\n"));
    assert_eq!(
        manifest.diagnostics,
        vec![Diagnostic::UnresolvedReference {
            interface: "Post".into(),
            field: "author".into(),
            reference: "writer".into(),
        }]
    );
}

#[test]
fn import_as_type_per_interface() {
    let records = vec![
        record(
            r#"{"info": {"name": "Article"}, "attributes": {"tags": {"collection": "tag"}}}"#,
            "article.settings.json",
            false,
        ),
        record(
            r#"{"info": {"name": "Tag"}, "attributes": {"articles": {"collection": "article"}}}"#,
            "tag.settings.json",
            false,
        ),
    ];
    let config = GeneratorConfig::new()
        .with_overrides(Overrides::new().with_import_as_type(|iface| iface == "Article"));
    let manifest = generate(records, &config).unwrap();
    assert!(unit(&manifest, "article").starts_with("import type { Tag } from './tag';\n"));
    assert!(unit(&manifest, "tag").starts_with("import { Article } from './article';\n"));
}

#[test]
fn undefined_model_key_is_fatal() {
    let broken = record(r#"{"info": {"name": "Hero"}, "attributes": {}}"#, "hero.json", true);
    let err = generate(vec![article(), broken], &GeneratorConfig::new()).unwrap_err();
    assert!(matches!(err, strapi_ts_core::Error::UndefinedModelKey { .. }));
}
