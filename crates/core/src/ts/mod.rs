//! Intermediate Representation for the generated TypeScript units.
//!
//! Generation is split in two steps:
//! 1. Codegen builds a structured AST per output unit (testable without text)
//! 2. Emission turns that AST into source text via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsStmt, TsFunction, TsModule)
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: Quoting and casing helpers shared with naming

mod emit;
mod types;
pub mod utils;

pub use emit::Emit;
pub use types::{
    TsExpr, TsFunction, TsImport, TsLiteral, TsModule, TsParam, TsPrimitive, TsProp, TsStmt,
    TsType, TsTypeDef, TypeDefKind,
};
