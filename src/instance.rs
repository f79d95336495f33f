/*
Implements:
 - the instance bundle (graph + costs + optional color count)
 - its serialization as a fact file, written atomically
 - the generation pipeline: DIMACS text -> graph -> costs -> fact text
*/
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::GeneratorConfig;
use crate::cost::{CostEntry, assign_costs};
use crate::dimacs::{parse_graph, read_graph_file};
use crate::error::{Error, Result};
use crate::graph::Graph;

/** problem instance given to the solver. Immutable once built. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// underlying graph
    graph: Graph,
    /// costs of the non-adjacent pairs
    costs: Vec<CostEntry>,
    /// optional fixed number of colors
    color_count: Option<usize>,
}

impl Instance {

    /** bundles a graph, its costs and an optional color count.

    Fails if a cost is given to an edge, to a pair outside [1,n] or not written (i,j)
    with i < j, to the same pair twice, or if a cost or the color count is 0.
    */
    pub fn new(graph:Graph, mut costs:Vec<CostEntry>, color_count:Option<usize>) -> Result<Self> {
        if color_count == Some(0) {
            return Err(Error::Config("the color count must be positive".to_string()));
        }
        costs.sort();
        for c in &costs {
            let (i,j) = c.pair;
            if i < 1 || i >= j || j > graph.nb_vertices() {
                return Err(Error::Format(format!(
                    "invalid cost pair ({},{}) for {} vertices", i, j, graph.nb_vertices()
                )));
            }
            if graph.are_adjacent(i, j) {
                return Err(Error::Format(format!("cost given to the edge ({},{})", i, j)));
            }
            if c.cost == 0 {
                return Err(Error::Config(format!("zero cost for the pair ({},{})", i, j)));
            }
        }
        if let Some(w) = costs.windows(2).find(|w| w[0].pair == w[1].pair) {
            return Err(Error::Format(format!(
                "several costs for the pair ({},{})", w[0].pair.0, w[0].pair.1
            )));
        }
        Ok(Self { graph, costs, color_count })
    }

    /// computes the costs of a graph according to the configuration
    pub fn generate(graph:Graph, config:&GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let costs = assign_costs(&graph, &config.cost, config.max_candidates)?;
        Self::new(graph, costs, config.color_count)
    }

    /// graph of the instance
    pub fn graph(&self) -> &Graph { &self.graph }

    /// cost entries, sorted by pair
    pub fn costs(&self) -> &[CostEntry] { &self.costs }

    /// fixed number of colors, if any
    pub fn color_count(&self) -> Option<usize> { self.color_count }

    /// writes the fact file (see write_instance)
    pub fn write(&self, path:&Path) -> Result<PathBuf> {
        write_instance(path, self)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(k) = self.color_count {
            writeln!(f, "% Color bound")?;
            writeln!(f, "#const k = {}.", k)?;
            writeln!(f)?;
        }
        writeln!(f, "% Graph description")?;
        writeln!(f, "vertex(1..{}).", self.graph.nb_vertices())?;
        for (u,v) in self.graph.edges() {
            writeln!(f, "edge({},{}).", u, v)?;
        }
        writeln!(f)?;
        writeln!(f, "% Define costs")?;
        for c in &self.costs {
            writeln!(f, "{}", c)?;
        }
        Ok(())
    }
}

/** writes an instance as a fact file and returns its path.

The text is first written to a temporary file next to the destination, then
moved over it: either the whole file is visible or nothing is.
*/
pub fn write_instance(path:&Path, instance:&Instance) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;
    tmp.write_all(instance.to_string().as_bytes()).map_err(|e| Error::io(path, e))?;
    tmp.flush().map_err(|e| Error::io(path, e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    log::info!(
        "wrote {} ({} vertices, {} edges, {} costs)",
        path.display(), instance.graph.nb_vertices(), instance.graph.nb_edges(), instance.costs.len()
    );
    Ok(path.to_path_buf())
}

/// DIMACS text -> fact text, without touching the file system
pub fn generate_from_str(text:&str, config:&GeneratorConfig) -> Result<String> {
    let graph = parse_graph(text)?;
    Ok(Instance::generate(graph, config)?.to_string())
}

/// reads a DIMACS file, generates its instance and writes it to output
pub fn generate_file(input:&Path, output:&Path, config:&GeneratorConfig) -> Result<Instance> {
    let graph = read_graph_file(input)?;
    graph.display_statistics();
    let instance = Instance::generate(graph, config)?;
    instance.write(output)?;
    Ok(instance)
}

/// creates a directory (and its parents) if needed
pub fn ensure_dir(dir:&Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::cost::CostPolicy;
    use crate::facts::parse_facts;

    fn config(cost:CostPolicy) -> GeneratorConfig {
        GeneratorConfig { cost, ..GeneratorConfig::default() }
    }

    #[test]
    fn test_fact_text() {
        let text = generate_from_str("p edge 3 1\ne 1 2\n", &config(CostPolicy::Product)).unwrap();
        assert_eq!(
            text,
            "% Graph description\nvertex(1..3).\nedge(1,2).\n\n% Define costs\ncost(1,3,3).\ncost(2,3,6).\n"
        );
    }

    #[test]
    fn test_color_count_line() {
        let conf = GeneratorConfig { cost:CostPolicy::None, max_candidates:0, color_count:Some(4) };
        let text = generate_from_str("p edge 3 1\ne 2 1\n", &conf).unwrap();
        assert!(text.starts_with("% Color bound\n#const k = 4.\n\n"));
        assert!(text.contains("edge(1,2).\n"));
        assert!(!text.contains("cost("));
    }

    #[test]
    fn test_round_trip() {
        let graph = read_graph_file(Path::new("insts/grid2x2.col")).unwrap();
        let instance = Instance::generate(
            graph.clone(), &config(CostPolicy::Random { max_cost:10, seed:Some(5) })
        ).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = instance.write(&dir.path().join("grid2x2.lp")).unwrap();
        let facts = parse_facts(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(facts.to_graph().unwrap(), graph);
        assert_eq!(facts.costs, instance.costs());
        assert_eq!(facts.color_count, None);
    }

    #[test]
    fn test_generate_file_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let conf = config(CostPolicy::Random { max_cost:50, seed:Some(11) });
        let a = generate_file(Path::new("insts/paw.col"), &dir.path().join("a.lp"), &conf).unwrap();
        let b = generate_file(Path::new("insts/paw.col"), &dir.path().join("b.lp"), &conf).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            fs::read_to_string(dir.path().join("a.lp")).unwrap(),
            fs::read_to_string(dir.path().join("b.lp")).unwrap()
        );
    }

    #[test]
    fn test_overwrite_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.lp");
        fs::write(&path, "stale content").unwrap();
        let graph = Graph::new(2, vec![(1,2)]).unwrap();
        Instance::new(graph, vec![], None).unwrap().write(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "% Graph description\nvertex(1..2).\nedge(1,2).\n\n% Define costs\n"
        );
    }

    #[test]
    fn test_rejects_invalid_costs() {
        let graph = Graph::new(3, vec![(1,2)]).unwrap();
        let entry = |i, j, cost| CostEntry { pair:(i,j), cost };
        // cost on an edge
        let res = Instance::new(graph.clone(), vec![entry(1,2,3)], None);
        assert!(matches!(res, Err(Error::Format(_))));
        // zero cost
        let res = Instance::new(graph.clone(), vec![entry(1,3,0)], None);
        assert!(matches!(res, Err(Error::Config(_))));
        // same pair twice
        let res = Instance::new(graph.clone(), vec![entry(1,3,4), entry(2,3,1), entry(1,3,9)], None);
        assert!(matches!(res, Err(Error::Format(_))));
        // endpoint outside [1,n]
        let res = Instance::new(graph.clone(), vec![entry(3,7,1)], None);
        assert!(matches!(res, Err(Error::Format(_))));
        let res = Instance::new(graph.clone(), vec![entry(0,3,1)], None);
        assert!(matches!(res, Err(Error::Format(_))));
        // reversed pair
        let res = Instance::new(graph.clone(), vec![entry(3,1,1)], None);
        assert!(matches!(res, Err(Error::Format(_))));
        // zero colors
        let res = Instance::new(graph.clone(), vec![], Some(0));
        assert!(matches!(res, Err(Error::Config(_))));
        // valid costs, given in any order
        let inst = Instance::new(graph, vec![entry(2,3,6), entry(1,3,3)], Some(2)).unwrap();
        assert_eq!(inst.costs(), &[entry(1,3,3), entry(2,3,6)][..]);
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("graph.lp");
        let graph = Graph::new(2, vec![]).unwrap();
        let res = Instance::new(graph, vec![], None).unwrap().write(&path);
        assert!(matches!(res, Err(Error::Io { .. })));
        assert!(!path.exists());
    }
}
