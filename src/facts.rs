use std::fs;
use std::path::Path;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{all_consuming, map, map_res};
use nom::sequence::{delimited, preceded, terminated, tuple};
use serde::{Serialize, Deserialize};

use crate::cost::{Cost, CostEntry};
use crate::dimacs::read_integer;
use crate::error::{Error, Result};
use crate::graph::{Graph, Pair};

/** content of a fact file, as written by the instance writer */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactFile {
    /// N in `vertex(1..N).`
    pub vertex_count: Option<usize>,
    /// `edge(u,v).` facts, in file order
    pub edges: Vec<Pair>,
    /// `cost(i,j,c).` facts, in file order
    pub costs: Vec<CostEntry>,
    /// K in `#const k = K.`
    pub color_count: Option<usize>,
}

impl FactFile {
    /// rebuilds the graph described by the vertex and edge facts
    pub fn to_graph(&self) -> Result<Graph> {
        let n = self.vertex_count
            .ok_or_else(|| Error::Format("missing vertex count".to_string()))?;
        Graph::new(n, self.edges.iter().cloned())
    }
}

/// one recognized line of a fact file
#[derive(Debug, PartialEq, Eq)]
enum Fact {
    Vertices(usize),
    Edge(Pair),
    Cost(CostEntry),
    ColorCount(usize),
}

fn read_cost(s:&str) -> IResult<&str, Cost> {
    map_res(digit1, |d:&str| d.parse::<Cost>())(s)
}

/// `vertex(1..N).`
fn read_vertices(s:&str) -> IResult<&str, Fact> {
    map(delimited(tag("vertex(1.."), read_integer, tag(").")), Fact::Vertices)(s)
}

/// `edge(u,v).`
fn read_edge_fact(s:&str) -> IResult<&str, Fact> {
    map(
        delimited(tag("edge("), tuple((read_integer, preceded(char(','), read_integer))), tag(").")),
        Fact::Edge
    )(s)
}

/// `cost(i,j,c).`
fn read_cost_fact(s:&str) -> IResult<&str, Fact> {
    map(
        delimited(
            tag("cost("),
            tuple((read_integer, preceded(char(','), read_integer), preceded(char(','), read_cost))),
            tag(").")
        ),
        |(i,j,cost)| Fact::Cost(CostEntry { pair:(i,j), cost })
    )(s)
}

/// `#const k = K.`
fn read_color_count(s:&str) -> IResult<&str, Fact> {
    map(
        preceded(
            tuple((tag("#const"), space1, tag("k"), space0, char('='), space0)),
            terminated(read_integer, char('.'))
        ),
        Fact::ColorCount
    )(s)
}

fn read_fact(s:&str) -> IResult<&str, Fact> {
    all_consuming(alt((read_vertices, read_edge_fact, read_cost_fact, read_color_count)))(s)
}

/** reads a fact file. Blank lines and `%` comments are skipped;
any other unrecognized line is an error. */
pub fn parse_facts(text:&str) -> Result<FactFile> {
    let mut res = FactFile::default();
    for (i,raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let (_,fact) = read_fact(line)
            .map_err(|_| Error::format_at(i+1, format!("unrecognized fact \"{}\"", line)))?;
        match fact {
            Fact::Vertices(n) => {
                if res.vertex_count.replace(n).is_some() {
                    return Err(Error::format_at(i+1, "duplicate vertex declaration"));
                }
            },
            Fact::ColorCount(k) => {
                if res.color_count.replace(k).is_some() {
                    return Err(Error::format_at(i+1, "duplicate color count"));
                }
            },
            Fact::Edge(e) => res.edges.push(e),
            Fact::Cost(c) => res.costs.push(c),
        }
    }
    Ok(res)
}

/// reads a fact file from disk
pub fn read_fact_file(filename:&Path) -> Result<FactFile> {
    let s = fs::read_to_string(filename).map_err(|e| Error::io(filename, e))?;
    parse_facts(&s).map_err(|e| match e {
        Error::Format(msg) => Error::Format(format!("{}: {}", filename.display(), msg)),
        other => other,
    })
}

/** statistics of a generated instance */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSummary {
    /// instance name (file stem)
    pub name: String,
    /// number of vertices
    pub nb_vertices: usize,
    /// number of edge facts
    pub nb_edges: usize,
    /// number of costed non-adjacent pairs
    pub nb_costs: usize,
    /// fixed number of colors, if any
    pub color_count: Option<usize>,
}

impl InstanceSummary {
    /// counts the facts of a parsed file
    pub fn new(name:&str, facts:&FactFile) -> Self {
        Self {
            name: name.to_string(),
            nb_vertices: facts.vertex_count.unwrap_or(0),
            nb_edges: facts.edges.len(),
            nb_costs: facts.costs.len(),
            color_count: facts.color_count,
        }
    }
}
