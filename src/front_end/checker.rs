use super::{error::Result, PatternRule};
use crate::front_end::{Ast, Topology, VName};
use std::collections::HashSet;

/// Check that the vertices are unique, every arc joins declared vertices and
/// at most one topology statement is given.
pub fn check(ast: &Ast) -> Result<()> {
    let names = check_vertices(ast.vertices().iter().map(|&(name, _)| name))?;
    match ast.topologies() {
        [] | [Topology::Clique] => Ok(()),
        [Topology::Arcs(arcs)] => check_arcs(&names, arcs),
        _ => Err(graph_error("more than one topology statement")),
    }
}

fn check_vertices<I>(names: I) -> Result<HashSet<VName>>
where
    I: IntoIterator<Item = VName>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(graph_error(&format!("duplicate vertex u{}", name)));
        }
    }
    if seen.is_empty() {
        Err(graph_error("no vertices"))
    } else {
        Ok(seen)
    }
}

fn check_arcs(names: &HashSet<VName>, arcs: &[(VName, VName)]) -> Result<()> {
    for &(src, dst) in arcs {
        for name in &[src, dst] {
            if !names.contains(name) {
                return Err(graph_error(&format!("undeclared vertex u{}", name)));
            }
        }
    }
    Ok(())
}

fn graph_error(message: &str) -> pest::error::Error<PatternRule> {
    pest::error::Error::new_from_pos(
        pest::error::ErrorVariant::CustomError {
            message: String::from(message),
        },
        pest::Position::from_start(""),
    )
}
