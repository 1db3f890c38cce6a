use std::path::{Path, PathBuf};

use failure::{bail, Error, ResultExt};
use meshquant::{
    PointSet,
    io::{obj, FileFormat},
    pipeline::mesh_files,
    points::PointStats,
    quantize::QuantizedPointSet,
    Axis,
};

use crate::ui;


pub mod info;
pub mod normalize;
pub mod run;


/// Returns the mesh files `path` refers to: the file itself or all `.obj`
/// files inside the directory.
fn input_files(path: &Path) -> Result<Vec<PathBuf>, Error> {
    if path.is_dir() {
        let files = mesh_files(path)
            .context(format!("failed to list meshes in '{}'", path.display()))?;
        if files.is_empty() {
            warn!("No .obj files found in '{}'", path.display());
        }
        Ok(files)
    } else if path.is_file() {
        if FileFormat::from_extension(path).is_none() {
            warn!("'{}' does not have an .obj extension, reading it as OBJ anyway", path.display());
        }
        Ok(vec![path.to_owned()])
    } else {
        bail!("'{}' is neither a file nor a directory", path.display());
    }
}

/// Reads one OBJ file, showing progress.
fn load(path: &Path) -> Result<PointSet, Error> {
    let points = progress!(["Reading '{}'", path.display()] => {
        obj::read_file(path).context(format!("failed to read '{}'", path.display()))?
    });

    Ok(points)
}

/// Prints the vertex count and a min/max/mean/std table.
fn print_stats(stats: &PointStats) {
    println!("    Number of vertices: {}", ui::fmt_with_thousand_sep(stats.count as u64));
    let rows = Axis::ALL.iter().map(|&axis| {
        let s = stats.axis(axis);
        vec![
            axis.to_string(),
            format!("{:.6}", s.min),
            format!("{:.6}", s.max),
            format!("{:.6}", s.mean),
            format!("{:.6}", s.std),
        ]
    }).collect::<Vec<_>>();

    ui::print_table(&["axis", "min", "max", "mean", "std"], &rows);
}

/// Prints the first `n` points of `points`.
fn print_points(title: &str, points: &PointSet, n: usize) {
    let n = n.min(points.len());
    println!("    First {} {}:", n, title);
    for p in points.iter().take(n) {
        println!("      [{:>14.8} {:>14.8} {:>14.8}]", p.x, p.y, p.z);
    }
}

/// Prints the first `n` bin triples of `quantized`.
fn print_bins(quantized: &QuantizedPointSet, n: usize) {
    let n = n.min(quantized.len());
    println!("    First {} quantized vertices:", n);
    for [x, y, z] in quantized.bins().iter().take(n) {
        println!("      [{:>6} {:>6} {:>6}]", x, y, z);
    }
}
