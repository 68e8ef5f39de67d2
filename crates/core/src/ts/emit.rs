//! TypeScript code emission via the Emit trait.
//!
//! This module provides a trait-based approach to converting TypeScript AST nodes
//! to string representations. Each AST type implements `Emit` for clean, composable
//! code generation.

use super::types::{
    TsExpr, TsFunction, TsImport, TsLiteral, TsModule, TsParam, TsPrimitive, TsProp, TsStmt,
    TsType, TsTypeDef, TypeDefKind,
};
use super::utils::{enum_member_key, escape_js_string, quote_if_needed, single_quoted};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Unknown => "unknown".to_string(),
            TsPrimitive::Any => "any".to_string(),
        }
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => single_quoted(s),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap unions in parentheses
                if inner.is_union() {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Tuple(slots) => {
                // A lone slot reads fine unparenthesized: [A | B]
                let wrap = slots.len() > 1;
                let parts: Vec<_> = slots
                    .iter()
                    .map(|slot| {
                        if wrap && slot.is_union() {
                            format!("({})", slot.emit())
                        } else {
                            slot.emit()
                        }
                    })
                    .collect();
                format!("[{}]", parts.join(", "))
            }
            TsType::Union(types) => types.iter().map(|t| t.emit()).collect::<Vec<_>>().join(" | "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(|p| p.emit()).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Map(value) => format!("{{ [key: string]: {} }}", value.emit()),
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Predicate { param, ty } => format!("{param} is {}", ty.emit()),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let mut output = String::new();
        if let Some(doc) = &self.doc {
            output.push_str("/**\n");
            for line in doc.lines() {
                output.push_str(&format!(" * {line}\n"));
            }
            output.push_str(" */\n");
        }

        match &self.kind {
            TypeDefKind::Interface {
                properties,
                raw_members,
            } => {
                output.push_str(&format!("export interface {} {{\n", self.name));
                for prop in properties {
                    output.push_str(&format!("  {};\n", prop.emit()));
                }
                for raw in raw_members {
                    output.push_str(&format!("  {raw};\n"));
                }
                output.push_str("}\n");
            }
            TypeDefKind::Enum { members } => {
                output.push_str(&format!("export enum {} {{\n", self.name));
                for value in members {
                    output.push_str(&format!(
                        "  {} = \"{}\",\n",
                        enum_member_key(value),
                        escape_js_string(value)
                    ));
                }
                output.push_str("}\n");
            }
        }
        output
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Member { object, prop } => {
                format!("{}.{}", object.emit(), prop)
            }
            TsExpr::StrictEqual { left, right } => {
                format!("{} === {}", left.emit(), right.emit())
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        format!("{}: {}", self.name, self.ty.emit())
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            TsStmt::Return(expr) => format!("{prefix}return {};\n", expr.emit()),
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let params_str = self.params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ");

        let mut output = format!(
            "export function {}({}): {} {{\n",
            self.name,
            params_str,
            self.return_type.emit()
        );
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        format!(
            "import {}{{ {} }} from {};\n",
            type_keyword,
            self.items.join(", "),
            single_quoted(&self.from)
        )
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = String::new();

        for import in &self.imports {
            output.push_str(&import.emit());
        }

        // Every block ends in a newline; separate blocks with one blank line.
        let blocks: Vec<String> = self
            .types
            .iter()
            .map(|t| t.emit())
            .chain(self.functions.iter().map(|f| f.emit()))
            .collect();

        if !self.imports.is_empty() && !blocks.is_empty() {
            output.push('\n');
        }
        output.push_str(&blocks.join("\n"));

        output
    }
}

// =============================================================================
// Tests
// =============================================================================
