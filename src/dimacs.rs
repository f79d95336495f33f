use std::fs;
use std::path::Path;

use nom::IResult;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, digit1, space0, space1};
use nom::combinator::{map_res, opt};
use nom::sequence::{preceded, separated_pair, terminated, tuple};

use crate::error::{Error, Result};
use crate::graph::{Graph, Pair, VertexId};


/** reads a graph in the DIMACS edge format.

 - `p <format> <n> [<m>]` declares the number of vertices n (exactly once)
 - `e <u> <v>` declares an edge (repeated edges collapse)
 - any other line is ignored
*/
pub fn parse_graph(text:&str) -> Result<Graph> {
    let mut n:Option<usize> = None;
    let mut edges:Vec<Pair> = Vec::new();
    for (i,raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r').trim();
        match line.split_whitespace().next() {
            Some("p") => {
                let (_,(nb_vertices,_)) = read_header(line)
                    .map_err(|_| Error::format_at(i+1, format!("invalid problem line \"{}\"", line)))?;
                if n.is_some() {
                    return Err(Error::format_at(i+1, "duplicate problem line"));
                }
                n = Some(nb_vertices);
            },
            Some("e") => {
                let (_,edge) = read_edge(line)
                    .map_err(|_| Error::format_at(i+1, format!("invalid edge line \"{}\"", line)))?;
                edges.push(edge);
            },
            _ => {} // comments and unknown records
        }
    }
    let n = n.ok_or_else(|| Error::Format("missing vertex count".to_string()))?;
    log::debug!("read {} vertices, {} edge lines", n, edges.len());
    Graph::new(n, edges)
}

/// reads a DIMACS graph from a file
pub fn read_graph_file(filename:&Path) -> Result<Graph> {
    let s = fs::read_to_string(filename).map_err(|e| Error::io(filename, e))?;
    parse_graph(&s).map_err(|e| match e {
        Error::Format(msg) => Error::Format(format!("{}: {}", filename.display(), msg)),
        other => other,
    })
}

/// reads a vertex index or a count
pub(crate) fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    separated_pair(read_integer, space1, read_integer)(s)
}

/// reads header containing (n, optional m)
pub fn read_header(s:&str) -> IResult<&str, (usize,Option<usize>)> {
    preceded(
        tuple((tag("p"), space1, alpha1, space1)),
        terminated(
            tuple((read_integer, opt(preceded(space1, read_integer)))),
            space0
        )
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (VertexId,VertexId)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}
