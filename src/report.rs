//! Persisting pipeline results: derived point sets and the summary table.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    analysis::ErrorReport,
    error::Error,
    io::obj,
    normalize::Method,
    pipeline::MethodReport,
};


/// Header of the summary table.
pub const SUMMARY_HEADER: [&str; 7] = ["File", "Method", "MSE", "MAE", "MSE_X", "MSE_Y", "MSE_Z"];


/// One row of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub file: String,
    pub method: Method,
    pub errors: ErrorReport,
}

impl SummaryRow {
    pub fn new(file: impl Into<String>, method: Method, errors: ErrorReport) -> Self {
        Self {
            file: file.into(),
            method,
            errors,
        }
    }

    fn cells(&self) -> [String; 7] {
        let e = &self.errors;
        [
            self.file.clone(),
            self.method.to_string(),
            e.mse.to_string(),
            e.mae.to_string(),
            e.per_axis_mse[0].to_string(),
            e.per_axis_mse[1].to_string(),
            e.per_axis_mse[2].to_string(),
        ]
    }
}

/// All summary rows of one run, in processing order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: SummaryRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table as comma separated values, header first.
    pub fn write_to(&self, mut w: impl Write) -> io::Result<()> {
        writeln!(w, "{}", SUMMARY_HEADER.join(","))?;
        for row in &self.rows {
            let cells = row.cells();
            let cells = cells.iter().map(|c| csv_field(c)).collect::<Vec<_>>();
            writeln!(w, "{}", cells.join(","))?;
        }
        w.flush()
    }

    /// Writes the table to `path`, replacing an existing file.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        self.write_to(BufWriter::new(file)).map_err(|e| Error::io(path, e))
    }
}

/// Quotes a field if it contains a separator, quote or line break.
fn csv_field(s: &str) -> String {
    if s.contains(|c: char| c == ',' || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}


/// Where derived point sets are written to:
/// `<root>/output_normalized/<method>/<file>` and
/// `<root>/output_reconstructed/<method>/<file>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn normalized_path(&self, method: Method, file: &str) -> PathBuf {
        self.root.join("output_normalized").join(method.to_string()).join(file)
    }

    pub fn reconstructed_path(&self, method: Method, file: &str) -> PathBuf {
        self.root.join("output_reconstructed").join(method.to_string()).join(file)
    }

    /// Writes the normalized and reconstructed point sets of `report`.
    pub fn save(&self, file: &str, report: &MethodReport) -> Result<(), Error> {
        obj::write_file(self.normalized_path(report.method, file), &report.normalized)?;
        obj::write_file(self.reconstructed_path(report.method, file), &report.reconstructed)?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use failure::Error;

    use super::*;

    fn errors(mse: f64) -> ErrorReport {
        ErrorReport {
            mse,
            mae: 0.5,
            per_axis_mse: [mse, 0.0, 0.25],
        }
    }

    #[test]
    fn summary_table() -> Result<(), Error> {
        let mut summary = Summary::new();
        summary.push(SummaryRow::new("bunny.obj", Method::MinMax, errors(1.5)));
        summary.push(SummaryRow::new("odd,name.obj", Method::UnitSphere, errors(0.0)));

        let mut out = Vec::new();
        summary.write_to(&mut out)?;

        assert_eq!(String::from_utf8(out)?, "\
            File,Method,MSE,MAE,MSE_X,MSE_Y,MSE_Z\n\
            bunny.obj,minmax,1.5,0.5,1.5,0,0.25\n\
            \"odd,name.obj\",unitsphere,0,0.5,0,0,0.25\n\
        ");

        Ok(())
    }

    #[test]
    fn summary_below_regular_file() {
        let dir = std::env::temp_dir()
            .join(format!("meshquant-report-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("blocker.txt"), "not a directory").unwrap();

        let target = dir.join("blocker.txt").join("summary.csv");
        match Summary::new().write_file(&target) {
            Err(crate::error::Error::Io(path, _)) => assert_eq!(path.0, target),
            other => panic!("expected IO error, got {:?}", other),
        }
    }

    #[test]
    fn output_paths() {
        let layout = OutputLayout::new("out");
        assert_eq!(
            layout.normalized_path(Method::MinMax, "a.obj"),
            Path::new("out/output_normalized/minmax/a.obj"),
        );
        assert_eq!(
            layout.reconstructed_path(Method::UnitSphere, "a.obj"),
            Path::new("out/output_reconstructed/unitsphere/a.obj"),
        );
    }
}
