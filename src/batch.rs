/*
Implements:
 - generation of one instance per graph file of a directory
 - summaries of the instances of a directory
*/
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ColorBounds, GeneratorConfig};
use crate::dimacs::read_graph_file;
use crate::error::{Error, Result};
use crate::facts::{InstanceSummary, read_fact_file};
use crate::instance::{Instance, ensure_dir};

/// extension of the DIMACS graph files
pub const GRAPH_EXTENSION:&str = "col";

/// extension of the generated fact files
pub const INSTANCE_EXTENSION:&str = "lp";

/// files of a directory with the given extension, sorted by name
pub fn list_files(dir:&Path, extension:&str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut res = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == extension) {
            res.push(path);
        }
    }
    res.sort();
    Ok(res)
}

/// name of a graph or an instance (file name without extension)
pub fn file_stem(path:&Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/** generates an instance for each `.col` graph of graphs_dir, written in instances_dir.

Graphs listed in the color bounds produce one instance per distinct bound
(`<name>_k<K>.lp`), the others a single `<name>.lp` using the color count of the
configuration. Every instance is generated independently from the same configuration,
so a seeded run does not depend on the processing order.
*/
pub fn generate_batch(
    graphs_dir:&Path,
    instances_dir:&Path,
    config:&GeneratorConfig,
    bounds:&ColorBounds,
) -> Result<Vec<InstanceSummary>> {
    config.validate()?;
    ensure_dir(instances_dir)?;
    let graph_files = list_files(graphs_dir, GRAPH_EXTENSION)?;
    if graph_files.is_empty() {
        log::warn!("no .{} file in {}", GRAPH_EXTENSION, graphs_dir.display());
    }
    let mut res = Vec::new();
    for graph_file in &graph_files {
        let name = file_stem(graph_file);
        let graph = read_graph_file(graph_file)?;
        log::debug!("{}: {} vertices, {} edges", name, graph.nb_vertices(), graph.nb_edges());
        let color_counts = bounds.color_counts(&name);
        let targets:Vec<(String, GeneratorConfig)> = if color_counts.is_empty() {
            vec![(name.clone(), config.clone())]
        } else {
            color_counts.iter()
                .map(|k| (format!("{}_k{}", name, k), config.with_color_count(Some(*k))))
                .collect()
        };
        for (inst_name, inst_config) in targets {
            let instance = Instance::generate(graph.clone(), &inst_config)?;
            let path = instances_dir.join(format!("{}.{}", inst_name, INSTANCE_EXTENSION));
            instance.write(&path)?;
            res.push(InstanceSummary {
                name: inst_name,
                nb_vertices: instance.graph().nb_vertices(),
                nb_edges: instance.graph().nb_edges(),
                nb_costs: instance.costs().len(),
                color_count: instance.color_count(),
            });
        }
    }
    Ok(res)
}

/// summarizes every `.lp` instance of a directory
pub fn summarize_instances(instances_dir:&Path) -> Result<Vec<InstanceSummary>> {
    list_files(instances_dir, INSTANCE_EXTENSION)?.iter()
        .map(|path| {
            let facts = read_fact_file(path)?;
            Ok(InstanceSummary::new(&file_stem(path), &facts))
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::cost::CostPolicy;

    fn graphs_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["grid2x2", "paw"].iter() {
            fs::copy(
                format!("insts/{}.col", name),
                dir.path().join(format!("{}.col", name))
            ).unwrap();
        }
        fs::write(dir.path().join("README.txt"), "not a graph").unwrap();
        dir
    }

    #[test]
    fn test_list_files() {
        let dir = graphs_dir();
        let files = list_files(dir.path(), GRAPH_EXTENSION).unwrap();
        let names:Vec<String> = files.iter().map(|p| file_stem(p)).collect();
        assert_eq!(names, vec!["grid2x2", "paw"]);
    }

    #[test]
    fn test_generate_batch() {
        let graphs = graphs_dir();
        let out = tempfile::tempdir().unwrap();
        let instances_dir = out.path().join("instances");
        let config = GeneratorConfig {
            cost: CostPolicy::Constant { cost:2 },
            ..GeneratorConfig::default()
        };
        let summaries = generate_batch(
            graphs.path(), &instances_dir, &config, &ColorBounds::default()
        ).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "grid2x2");
        assert_eq!(summaries[0].nb_costs, 2);
        assert_eq!(summaries[1].name, "paw");
        assert_eq!(summaries[1].nb_costs, 2);
        // the written files describe the same graphs
        let facts = read_fact_file(&instances_dir.join("paw.lp")).unwrap();
        assert_eq!(facts.to_graph().unwrap(), read_graph_file(Path::new("insts/paw.col")).unwrap());
        assert_eq!(summarize_instances(&instances_dir).unwrap(), summaries);
    }

    #[test]
    fn test_generate_batch_with_bounds() {
        let graphs = graphs_dir();
        let out = tempfile::tempdir().unwrap();
        let bounds = ColorBounds::from_pairs(vec![("paw", 3, 4)]).unwrap();
        let config = GeneratorConfig {
            cost: CostPolicy::Random { max_cost:10, seed:Some(1) },
            ..GeneratorConfig::default()
        };
        let summaries = generate_batch(graphs.path(), out.path(), &config, &bounds).unwrap();
        let names:Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["grid2x2", "paw_k3", "paw_k4"]);
        let k3 = read_fact_file(&out.path().join("paw_k3.lp")).unwrap();
        let k4 = read_fact_file(&out.path().join("paw_k4.lp")).unwrap();
        assert_eq!(k3.color_count, Some(3));
        assert_eq!(k4.color_count, Some(4));
        // same seed: same costs for both bounds
        assert_eq!(k3.costs, k4.costs);
    }

    #[test]
    fn test_invalid_graph_stops_batch() {
        let graphs = tempfile::tempdir().unwrap();
        fs::write(graphs.path().join("broken.col"), "e 1 2\n").unwrap();
        let out = tempfile::tempdir().unwrap();
        let res = generate_batch(graphs.path(), out.path(), &GeneratorConfig::default(), &ColorBounds::default());
        assert!(matches!(res, Err(Error::Format(_))));
    }
}
