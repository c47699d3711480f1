use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};

use equiprofile::analysis::{self, summary};
use equiprofile::chart::ChartBundle;
use equiprofile::data::loader;

fn main() -> Result<()> {
    env_logger::init();

    let mut as_json = false;
    let mut path: Option<PathBuf> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    let Some(path) = path else {
        bail!("usage: equiprofile [--json] <dataset.json|dataset.csv>");
    };

    let dataset = loader::load_file(&path)?;
    log::info!(
        "loaded {} records, {} columns from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );

    let profile = analysis::profile_dataset(&dataset);
    let summary = summary::summarize(&dataset, &profile);
    let charts = ChartBundle::build(&dataset, &profile);

    if as_json {
        let doc = serde_json::json!({
            "dataset": { "id": dataset.id, "name": dataset.name },
            "metrics": profile.metrics,
            "summary": summary,
            "charts": charts,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Dataset: {}  ({} records)", dataset.name, summary.total_equipment);

    println!("\nType distribution:");
    for (ty, count, pct) in
        equiprofile::analysis::distribution::distribution_shares(&profile.distribution, dataset.len())
    {
        println!("  {ty:<24} {count:>5} units  ({pct:.1}%)");
    }

    println!("\nParameter metrics:");
    for m in &profile.metrics {
        println!(
            "  {name}\n    avg {avg:.2}  min {min:.2}  max {max:.2}  std {std:.2}\n    \
             median {median:.2}  Q1 {q1:.2}  Q3 {q3:.2}  IQR {iqr:.2}\n    \
             {n} data points, {outliers} outliers → {efficiency} / {status}",
            name = m.parameter,
            avg = m.average,
            min = m.min,
            max = m.max,
            std = m.std,
            median = m.median,
            q1 = m.q1,
            q3 = m.q3,
            iqr = m.iqr,
            n = m.data_points,
            outliers = m.outliers,
            efficiency = m.efficiency,
            status = m.status,
        );
    }

    Ok(())
}
