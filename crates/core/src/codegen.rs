//! Resolved model to TypeScript AST.
//!
//! The AST can then be emitted to strings via the `Emit` trait.

use strapi_ts_common::FieldSpec;

use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostic;
use crate::graph::{ModelGraph, ResolvedModel};
use crate::resolver;
use crate::synth::{self, Synthesizer};
use crate::ts::{
    TsExpr, TsFunction, TsLiteral, TsModule, TsParam, TsProp, TsStmt, TsType, TsTypeDef,
    TypeDefKind,
};

/// Build the module for one model: imports, interface, enums, type guard.
pub fn codegen_model(
    model: &ResolvedModel,
    graph: &ModelGraph,
    config: &GeneratorConfig,
) -> (TsModule, Vec<Diagnostic>) {
    let interface = model.interface_name.as_str();
    let imports = resolver::collect_imports(model, graph, config);

    let mut synth = Synthesizer::new(graph, config, interface);
    let mut properties = vec![discriminant_prop(model)];
    properties.push(synth.property("id", &id_field()));
    for (name, field) in model.record.attributes.iter() {
        if config.overrides.excludes(interface, name) {
            continue;
        }
        properties.push(synth.property(name, field));
    }
    let raw_members = config
        .overrides
        .extra_fields(interface)
        .into_iter()
        .map(|extra| format!("{}: {}", extra.name, extra.ty))
        .collect();

    let mut types = vec![TsTypeDef {
        name: interface.to_string(),
        doc: Some(format!("Model definition for {}", model.display_name())),
        kind: TypeDefKind::Interface {
            properties,
            raw_members,
        },
    }];
    if config.enums {
        types.extend(synth::enum_defs(interface, &model.record.attributes, config));
    }

    let module = TsModule {
        imports,
        types,
        functions: vec![codegen_guard(model)],
    };
    (module, synth.into_diagnostics())
}

/// The implicit `id` attribute every interface carries.
fn id_field() -> FieldSpec {
    FieldSpec {
        kind: Some("string".into()),
        required: true,
        ..FieldSpec::default()
    }
}

fn discriminant_prop(model: &ResolvedModel) -> TsProp {
    TsProp {
        name: model.discriminant().property().to_string(),
        ty: TsType::Literal(TsLiteral::String(model.model_key.clone())),
        optional: false,
    }
}

/// `export function isX(obj: { __contentType?: string }): obj is X`
fn codegen_guard(model: &ResolvedModel) -> TsFunction {
    let property = model.discriminant().property();
    TsFunction {
        name: format!("is{}", model.interface_name),
        params: vec![TsParam {
            name: "obj".into(),
            ty: TsType::Object(vec![TsProp {
                name: property.to_string(),
                ty: TsType::string(),
                optional: true,
            }]),
        }],
        return_type: TsType::Predicate {
            param: "obj".into(),
            ty: Box::new(TsType::Ref(model.interface_name.clone())),
        },
        body: vec![TsStmt::Return(TsExpr::StrictEqual {
            left: Box::new(TsExpr::Member {
                object: Box::new(TsExpr::Ident("obj".into())),
                prop: property.to_string(),
            }),
            right: Box::new(TsExpr::Literal(TsLiteral::String(model.model_key.clone()))),
        })],
    }
}
