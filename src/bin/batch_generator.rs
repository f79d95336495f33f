use std::path::Path;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::{App, load_yaml};
use serde_json::json;

use robust_color::batch::{generate_batch, summarize_instances};
use robust_color::config::ColorBounds;
use robust_color::facts::InstanceSummary;
use robust_color::util::{read_params, export_stats, init_logger};


/// prints one line per instance
fn display_summaries(summaries:&[InstanceSummary]) {
    println!("\t{:>25}{:>10}{:>10}{:>10}{:>8}", "instance", "vertices", "edges", "costs", "k");
    for s in summaries {
        let k = s.color_count.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "\t{:>25}{:>10}{:>10}{:>10}{:>8}",
            s.name, s.nb_vertices, s.nb_edges, s.nb_costs, k
        );
    }
}

/** generates (or summarizes) the instances of a directory of graphs */
pub fn main() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("batch_generator.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    init_logger(main_args.is_present("verbose"));
    if let Some(args) = main_args.subcommand_matches("generate") {
        let graphs_dir = args.value_of("graphs").unwrap_or_default();
        let instances_dir = args.value_of("instances").unwrap_or_default();
        let config = read_params(args)?;
        let bounds = match args.value_of("bounds") {
            None => ColorBounds::default(),
            Some(filename) => {
                let b = ColorBounds::from_file(Path::new(filename))?;
                println!("color bounds for {} graphs", b.len());
                b
            }
        };
        let t_start = Instant::now();
        let summaries = generate_batch(
            Path::new(graphs_dir), Path::new(instances_dir), &config, &bounds
        )?;
        let duration = t_start.elapsed().as_secs_f32();
        display_summaries(&summaries);
        println!("generated {} instances in {:.3} seconds", summaries.len(), duration);
        let stats = json!({
            "graphs_dir": graphs_dir,
            "instances_dir": instances_dir,
            "config": config,
            "instances": summaries,
            "time_searched": duration,
        });
        export_stats(args.value_of("perf"), &stats)?;
    } else if let Some(args) = main_args.subcommand_matches("summarize") {
        let instances_dir = args.value_of("instances").unwrap_or_default();
        let summaries = summarize_instances(Path::new(instances_dir))?;
        display_summaries(&summaries);
        export_stats(args.value_of("perf"), &json!(summaries))?;
    } else {
        bail!("unknown subcommand (expected generate or summarize)");
    }
    Ok(())
}
