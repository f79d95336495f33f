use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::{App, load_yaml};
use serde_json::json;

use robust_color::instance::generate_file;
use robust_color::util::{read_params, export_stats, init_logger};


/** generates a robust coloring instance from a DIMACS graph */
pub fn main() -> Result<()> {
    // parse arguments
    let yaml = load_yaml!("instance_generator.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    init_logger(main_args.is_present("verbose"));
    let inst_filename = main_args.value_of("instance").unwrap_or_default();
    let output = main_args.value_of("output").unwrap_or("graph.lp");
    let config = read_params(&main_args)?;

    // generate the instance
    let t_start = Instant::now();
    println!("reading graph: {}...", inst_filename);
    let instance = generate_file(Path::new(inst_filename), Path::new(output), &config)?;
    let duration = t_start.elapsed().as_secs_f32();
    println!(
        "wrote {} in {:.3} seconds. Nb costs: {}",
        output, duration, instance.costs().len()
    );

    // export statistics
    let stats = json!({
        "inst_name": inst_filename,
        "output": output,
        "cost_policy": config.cost.name(),
        "nb_vertices": instance.graph().nb_vertices(),
        "nb_edges": instance.graph().nb_edges(),
        "nb_costs": instance.costs().len(),
        "color_count": instance.color_count(),
        "time_searched": duration,
    });
    export_stats(main_args.value_of("perf"), &stats)?;
    Ok(())
}

