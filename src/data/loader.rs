use crate::{
    data::DataGraph,
    types::{VId, VLabel},
};
use log::info;
use memmap::Mmap;
use std::{
    convert::TryFrom,
    fs::File,
    io::{Error, ErrorKind},
    path::Path,
};

/// Reads a whitespace separated edge list into a data graph.
///
/// Every line is `src dst [payload]`; the integer payload column is ignored,
/// and any other column count is an `InvalidData` error. Blank
/// lines and lines starting with `#` or `%` are skipped. All vertices are
/// labeled `0`.
pub fn read_edge_list<P: AsRef<Path>>(path: P) -> std::io::Result<DataGraph> {
    let file = File::open(path.as_ref())?;
    info!("reading edge list {}...", path.as_ref().display());
    let arcs = if file.metadata()?.len() == 0 {
        vec![]
    } else {
        let mmap = unsafe { Mmap::map(&file)? };
        parse_edge_list(
            std::str::from_utf8(&mmap).map_err(|e| Error::new(ErrorKind::InvalidData, e))?,
        )?
    };
    info!("read {} arcs", arcs.len());
    Ok(DataGraph::new(vec![], arcs))
}

fn parse_edge_list(text: &str) -> std::io::Result<Vec<(VId, VId)>> {
    let mut arcs = vec![];
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        let fields: Vec<_> = line.split_whitespace().collect();
        let arc = match fields.as_slice() {
            [src, dst] => parse_arc(src, dst),
            [src, dst, payload] => payload
                .parse::<VLabel>()
                .ok()
                .and_then(|_| parse_arc(src, dst)),
            _ => None,
        };
        arcs.push(arc.ok_or_else(|| invalid_line(lineno, line))?);
    }
    Ok(arcs)
}

/// Both ids must leave room for an id space of `max_id + 1` vertices.
fn parse_arc(src: &str, dst: &str) -> Option<(VId, VId)> {
    let parse_vid = |s: &str| {
        s.parse::<VId>()
            .ok()
            .filter(|vid| vid.checked_add(1).is_some())
    };
    Some((parse_vid(src)?, parse_vid(dst)?))
}

fn invalid_line(lineno: usize, line: &str) -> Error {
    Error::new(
        ErrorKind::InvalidData,
        format!("line {}: invalid arc {:?}", lineno + 1, line),
    )
}

/// Reads the data graph stored in a SQLite3 database.
///
/// The database must have the following schema:
///
/// ```sql
/// CREATE TABLE vertices (vid INT, vlabel INT);
/// CREATE TABLE edges (src INT, dst INT);
/// ```
pub fn read_sqlite(conn: &rusqlite::Connection) -> rusqlite::Result<DataGraph> {
    let mut vertices_stmt = conn.prepare("SELECT vid, vlabel FROM vertices")?;
    let vertices = vertices_stmt
        .query_map([], |row| Ok((to_vid(row, 0)?, row.get::<_, VLabel>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let mut edges_stmt = conn.prepare("SELECT src, dst FROM edges")?;
    let arcs = edges_stmt
        .query_map([], |row| Ok((to_vid(row, 0)?, to_vid(row, 1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    info!("read {} vertices and {} arcs", vertices.len(), arcs.len());
    Ok(DataGraph::new(vertices, arcs))
}

fn to_vid(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<VId> {
    let value: i64 = row.get(idx)?;
    VId::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, value))
}
