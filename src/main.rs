use std::path::Path;

mod perf;
mod perf_data;
mod perf_plot;
mod perf_style;

fn main() {
    let data = &*perf_data::DFS_TRAVERSAL;
    data.validate().expect("invalid profiling data");

    let style = perf_style::select(perf_style::PREFERRED);

    let out_dir = Path::new("docs");
    let overview = out_dir.join("performance_graphs.png");
    let individual = out_dir.join("performance_graphs_individual.png");
    let comparison = out_dir.join("performance_graphs_comparison.png");

    perf_plot::write_overview(data, style, &overview).expect("failed to plot overview");
    println!("Graphs saved to {}", overview.display());

    perf_plot::write_individual(data, style, &individual).expect("failed to plot individual charts");
    println!("Individual graphs saved to {}", individual.display());

    perf_plot::write_comparison(data, style, &comparison).expect("failed to plot comparison");
    println!("Comparison chart saved to {}", comparison.display());

    println!();
    println!("All graphs generated successfully!");
    println!();
    println!("Generated files:");
    println!("  - {} (4-panel overview)", overview.display());
    println!("  - {} (3 individual charts)", individual.display());
    println!("  - {} (speedup vs efficiency)", comparison.display());
}
