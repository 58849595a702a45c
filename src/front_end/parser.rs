use super::error::Result;
use crate::{
    front_end::{ast::VName, Ast, Topology},
    types::VLabel,
};
use itertools::Itertools;
use pest::Parser;
use pest_derive::Parser;

pub type PatternRule = Rule;

#[derive(Parser)]
#[grammar = "front_end/grammar.pest"]
struct PatternParser;

pub fn parse(input: &str) -> Result<Ast> {
    let mut ast = Ast::default();
    for pair in PatternParser::parse(Rule::stat, input)? {
        match pair.as_rule() {
            Rule::vertices_stat => ast.set_vertices(parse_vertices_stat(pair)?),
            Rule::arcs_stat => ast.add_topology(Topology::Arcs(parse_arcs_stat(pair)?)),
            Rule::clique_stat => ast.add_topology(Topology::Clique),
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }
    Ok(ast)
}

fn parse_vertices_stat(pair: pest::iterators::Pair<Rule>) -> Result<Vec<(VName, VLabel)>> {
    let mut vertices = vec![];
    for (name, vlabel) in pair.into_inner().tuples() {
        vertices.push((parse_ident(&name)?, parse_label(&vlabel)?));
    }
    Ok(vertices)
}

fn parse_arcs_stat(pair: pest::iterators::Pair<Rule>) -> Result<Vec<(VName, VName)>> {
    let mut arcs = vec![];
    for (src, dst) in pair.into_inner().tuples() {
        arcs.push((parse_ident(&src)?, parse_ident(&dst)?));
    }
    Ok(arcs)
}

fn parse_ident(pair: &pest::iterators::Pair<Rule>) -> Result<VName> {
    pair.as_str()[1..]
        .parse()
        .map_err(|_| custom_error(pair, "vertex name out of range"))
}

fn parse_label(pair: &pest::iterators::Pair<Rule>) -> Result<VLabel> {
    pair.as_str()
        .parse()
        .map_err(|_| custom_error(pair, "label out of range"))
}

fn custom_error(pair: &pest::iterators::Pair<Rule>, message: &str) -> pest::error::Error<Rule> {
    pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: String::from(message),
        },
        pair.as_span(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arcs() {
        assert_eq!(
            parse(
                "\
(pattern (vertices (u1 0) (u2 1) (u3 -2))
         (arcs (u1 u2) (u2 u3)))
"
            ),
            Ok(Ast::new(
                vec![(1, 0), (2, 1), (3, -2)],
                vec![Topology::Arcs(vec![(1, 2), (2, 3)])]
            ))
        );
    }

    #[test]
    fn test_clique() {
        assert_eq!(
            parse(
                "\
; a labeled triangle
(pattern (vertices (u0 0) (u1 1) (u2 2))
         (clique))
"
            ),
            Ok(Ast::new(
                vec![(0, 0), (1, 1), (2, 2)],
                vec![Topology::Clique]
            ))
        );
    }

    #[test]
    fn test_no_topology() {
        assert_eq!(
            parse("(pattern (vertices (u7 3)))"),
            Ok(Ast::new(vec![(7, 3)], vec![]))
        );
    }

    #[test]
    fn test_syntax_error() {
        assert!(parse("(pattern (arcs (u1 u2)))").is_err());
        assert!(parse("(pattern (vertices (v1 0)))").is_err());
        assert!(parse("(pattern (vertices (u1 0))) trailing").is_err());
        assert!(parse("(pattern (vertices (u1 99999999999999999999)))").is_err());
    }
}
