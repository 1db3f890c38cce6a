use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use failure::Error;
use meshquant::{
    Axis,
    pipeline::{MeshReport, Pipeline, ReportSink},
};

use crate::{
    args::{GlobalArgs, RunArgs},
    commands::{print_bins, print_points, print_stats},
    ui,
};


pub fn run(global_args: &GlobalArgs, args: &RunArgs) -> Result<(), Error> {
    let start_time = Instant::now();
    let config = args.to_config();

    info!(
        "Quantizing with {} bins ({} bit) using {}",
        config.n_bins,
        config.n_bins.bits(),
        config.methods.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" and "),
    );

    let mut sink = TerminalSink {
        samples: global_args.samples_or(3),
        chart: !args.no_chart,
        processed: 0,
        failed: 0,
    };
    let summary = Pipeline::new(config).run(&mut sink)?;

    if sink.failed > 0 {
        warn!("{} of {} meshes could not be processed", sink.failed, sink.failed + sink.processed);
    }
    info!(
        "Processed {} meshes ({} summary rows) in {:.2?}",
        sink.processed,
        summary.len(),
        start_time.elapsed(),
    );

    Ok(())
}

/// Prints pipeline results as they come in.
struct TerminalSink {
    samples: usize,
    chart: bool,
    processed: usize,
    failed: usize,
}

impl ReportSink for TerminalSink {
    fn start(&mut self, files: &[PathBuf]) {
        if files.is_empty() {
            warn!("No .obj files found, nothing to do");
        } else {
            info!("Found {} mesh files", files.len());
        }
    }

    fn mesh(&mut self, report: &MeshReport) {
        self.processed += 1;

        println!();
        info!("File: {}", report.name);
        print_stats(&report.stats);

        for m in &report.methods {
            println!();
            println!(
                "  [{}] MSE: {:.8}, MAE: {:.8}",
                m.method.to_string().to_uppercase(),
                m.errors.mse,
                m.errors.mae,
            );
            print_bins(&m.quantized, self.samples);
            print_points("reconstructed vertices", &m.reconstructed, self.samples);

            if self.chart {
                let labels = Axis::ALL.iter().map(|a| a.to_string()).collect::<Vec<_>>();
                let bars = labels.iter()
                    .zip(&Axis::ALL)
                    .map(|(label, &axis)| (label.as_str(), m.errors.axis_mse(axis)))
                    .collect::<Vec<_>>();

                println!();
                ui::print_bar_chart(
                    &format!("Per-axis reconstruction MSE: {} ({})", report.name, m.method),
                    &bars,
                );
            }
        }
    }

    fn failure(&mut self, path: &Path, error: &Error) {
        self.failed += 1;

        warn!("Skipping '{}': {}", path.display(), error);
        for cause in error.iter_causes() {
            warn!("  ... caused by: {}", cause);
        }
    }

    fn summary_saved(&mut self, path: &Path, rows: usize) {
        println!();
        info!("Summary saved to {} ({} rows)", path.display(), rows);
    }
}
