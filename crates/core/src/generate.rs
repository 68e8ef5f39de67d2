//! Run entry point: records in, manifest of output units out.

use rayon::prelude::*;
use strapi_ts_common::RawModelRecord;
use tracing::{debug, info};

use crate::codegen::codegen_model;
use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::graph::ModelGraph;
use crate::ts::Emit;

/// Path of the aggregating index unit.
pub const INDEX_UNIT: &str = "index";

/// One generated source file: relative path without extension, and its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputUnit {
    /// Forward-slash path, e.g. `layout/hero`
    pub path: String,
    /// Full file text
    pub content: String,
}

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct Manifest {
    /// One unit per model, in load order.
    pub units: Vec<OutputUnit>,
    /// The `export * from` aggregator.
    pub index: OutputUnit,
    /// Non-fatal findings, already logged.
    pub diagnostics: Vec<Diagnostic>,
}

impl Manifest {
    /// Every unit including the index.
    pub fn all_units(&self) -> impl Iterator<Item = &OutputUnit> {
        std::iter::once(&self.index).chain(&self.units)
    }
}

/// Build the model graph and render every unit plus the index.
pub fn generate(records: Vec<RawModelRecord>, config: &GeneratorConfig) -> Result<Manifest> {
    debug!("Building model graph from {} records", records.len());
    let (graph, mut diagnostics) = ModelGraph::build(records, config)?;

    let rendered: Vec<(OutputUnit, Vec<Diagnostic>)> = graph
        .models()
        .par_iter()
        .map(|model| {
            let (module, diagnostics) = codegen_model(model, &graph, config);
            let unit = OutputUnit {
                path: model.output_unit.clone(),
                content: module.emit(),
            };
            (unit, diagnostics)
        })
        .collect();

    let mut units = Vec::with_capacity(rendered.len());
    for (unit, unit_diagnostics) in rendered {
        for diagnostic in &unit_diagnostics {
            diagnostic.log();
        }
        diagnostics.extend(unit_diagnostics);
        units.push(unit);
    }

    let index = render_index(&units);
    info!(
        "Generated {} units ({} diagnostics)",
        units.len(),
        diagnostics.len()
    );
    Ok(Manifest {
        units,
        index,
        diagnostics,
    })
}

/// The aggregator: one sorted `export * from './unit';` line per unit.
pub fn render_index(units: &[OutputUnit]) -> OutputUnit {
    let mut lines: Vec<String> = units
        .iter()
        .map(|unit| format!("export * from './{}';", unit.path.replace('\\', "/")))
        .collect();
    lines.sort();
    OutputUnit {
        path: INDEX_UNIT.to_string(),
        content: lines.join("\n") + "\n",
    }
}
