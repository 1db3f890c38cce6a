//! Running the whole normalize → quantize → reconstruct → analyze chain over
//! a directory of meshes.
//!
//! All settings are passed explicitly through [`Config`]. Results are
//! handed to a [`ReportSink`] one mesh at a time, so the caller decides how
//! to present them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use failure::{bail, ResultExt};

use crate::{
    analysis::{compute_errors, ErrorReport},
    error::{Degeneracy, Error},
    io::{obj, FileFormat},
    normalize::{Method, NormalizationParams, Normalizer},
    points::{PointSet, PointStats},
    quantize::{BinCount, QuantizedPointSet, Quantizer},
    reconstruct::reconstruct,
    report::{OutputLayout, Summary, SummaryRow},
};


/// Settings of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory that is searched (non-recursively) for `.obj` files.
    pub input_dir: PathBuf,

    /// Number of quantization levels per coordinate.
    pub n_bins: BinCount,

    /// Whether normalized and reconstructed point sets as well as the summary
    /// table are written to disk.
    pub save_results: bool,

    /// Path of the summary table.
    pub summary_file: PathBuf,

    /// Directory below which `output_normalized/` and
    /// `output_reconstructed/` are created.
    pub output_dir: PathBuf,

    /// The normalization methods to run, in this order.
    pub methods: Vec<Method>,

    /// If set, a file that fails to process is reported to the sink and
    /// skipped. Otherwise the first failure aborts the run.
    pub keep_going: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("8samples"),
            n_bins: BinCount::DEFAULT,
            save_results: true,
            summary_file: PathBuf::from("mesh_summary.csv"),
            output_dir: PathBuf::from("."),
            methods: Method::ALL.to_vec(),
            keep_going: false,
        }
    }
}


/// Everything derived from one point set with one normalization method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodReport {
    pub method: Method,
    pub params: NormalizationParams,
    pub normalized: PointSet,
    pub quantized: QuantizedPointSet,
    pub reconstructed: PointSet,
    pub errors: ErrorReport,
}

/// The results for one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    /// File name without directory, used as mesh identifier.
    pub name: String,
    pub path: PathBuf,
    pub stats: PointStats,
    pub methods: Vec<MethodReport>,
}

/// Normalizes, quantizes, dequantizes and reconstructs `points` and compares
/// the result to the input.
pub fn process_points(
    points: &PointSet,
    normalizer: &dyn Normalizer,
    n_bins: BinCount,
) -> Result<MethodReport, Error> {
    let normalized = normalizer.normalize(points)?;
    let quantizer = Quantizer::new(n_bins, normalizer.domain());

    let quantized = quantizer.quantize(&normalized.points)?;
    let dequantized = quantizer.dequantize(&quantized);
    let reconstructed = reconstruct(&dequantized, &normalized.params)?;
    let errors = compute_errors(points, &reconstructed)?;

    Ok(MethodReport {
        method: normalizer.method(),
        params: normalized.params,
        normalized: normalized.points,
        quantized,
        reconstructed,
        errors,
    })
}

/// Loads the file at `path` and runs all configured methods on it.
pub fn process_file(path: &Path, config: &Config) -> Result<MeshReport, Error> {
    let points = obj::read_file(path)?;
    let stats = points.stats().ok_or(Degeneracy::Empty)?;

    let methods = config.methods.iter()
        .map(|m| process_points(&points, m.normalizer(), config.n_bins))
        .collect::<Result<Vec<_>, _>>()?;

    let name = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(MeshReport {
        name,
        path: path.to_owned(),
        stats,
        methods,
    })
}

/// Returns all `.obj` files directly inside `dir`, sorted by name.
pub fn mesh_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && FileFormat::from_extension(&path) == Some(FileFormat::Obj) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}


/// Receives the results of a [`Pipeline`] run while it progresses.
pub trait ReportSink {
    /// Called once before the first file is processed.
    fn start(&mut self, _files: &[PathBuf]) {}

    /// Called after a file has been processed (and saved, if enabled).
    fn mesh(&mut self, report: &MeshReport);

    /// Called for a failed file if `Config::keep_going` is set.
    fn failure(&mut self, _path: &Path, _error: &failure::Error) {}

    /// Called after the summary table has been written.
    fn summary_saved(&mut self, _path: &Path, _rows: usize) {}
}

/// A sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn mesh(&mut self, _: &MeshReport) {}
}


/// Processes every mesh of the input directory, one after another.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the pipeline and returns the accumulated summary.
    ///
    /// Errors name the file they occurred in. With `keep_going`, the run only
    /// fails if not a single file could be processed.
    pub fn run(&self, sink: &mut impl ReportSink) -> Result<Summary, failure::Error> {
        let config = &self.config;
        let files = mesh_files(&config.input_dir)
            .context("failed to list input meshes")?;
        sink.start(&files);

        let layout = OutputLayout::new(&config.output_dir);
        let mut summary = Summary::new();
        let mut failed = 0;

        for path in &files {
            let result = self.process_and_save(path, &layout)
                .with_context(|_| format!("failed to process '{}'", path.display()));

            match result {
                Ok(report) => {
                    sink.mesh(&report);
                    for m in &report.methods {
                        summary.push(SummaryRow::new(&report.name, m.method, m.errors));
                    }
                }
                Err(e) if config.keep_going => {
                    sink.failure(path, &failure::Error::from(e));
                    failed += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if failed > 0 && failed == files.len() {
            bail!("none of the {} input meshes could be processed", failed);
        }

        if config.save_results && !summary.is_empty() {
            summary.write_file(&config.summary_file)
                .context("failed to write summary table")?;
            sink.summary_saved(&config.summary_file, summary.len());
        }

        Ok(summary)
    }

    fn process_and_save(&self, path: &Path, layout: &OutputLayout) -> Result<MeshReport, Error> {
        let report = process_file(path, &self.config)?;
        if self.config.save_results {
            for m in &report.methods {
                layout.save(&report.name, m)?;
            }
        }

        Ok(report)
    }
}
