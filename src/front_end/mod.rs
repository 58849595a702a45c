//! The pattern description language.
//!
//! ```text
//! (pattern (vertices (u1 0) (u2 1) (u3 2))
//!          (arcs (u1 u2) (u2 u3) (u3 u1)))
//! ```
//!
//! `(clique)` may stand in place of the `arcs` statement.

pub use ast::{Ast, Topology, VName};
pub use checker::check;
pub use codegen::codegen;
pub use parser::parse;

pub(crate) use parser::PatternRule;

pub mod error;

mod ast;
mod checker;
mod codegen;
mod parser;

/// Parse, check and build a pattern graph from its description.
pub fn compile(
    input: &str,
) -> std::result::Result<crate::pattern::PatternGraph, Box<dyn std::error::Error>> {
    let ast = parse(input)?;
    check(&ast)?;
    Ok(codegen(&ast)?)
}
