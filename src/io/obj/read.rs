use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    math::{Axis, Pos3},
    points::PointSet,
};
use super::VERTEX_MARKER;


/// Reads the vertex positions of an OBJ file.
#[derive(Debug)]
pub struct Reader<R: BufRead> {
    reader: R,
    source: PathBuf,
}

impl Reader<BufReader<File>> {
    /// Opens the file at `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;

        Ok(Self {
            reader: BufReader::new(file),
            source: path.to_owned(),
        })
    }
}

impl<R: BufRead> Reader<R> {
    /// Creates a reader from an arbitrary buffered source. IO errors are
    /// reported with the placeholder path `<stream>`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            source: PathBuf::from("<stream>"),
        }
    }

    /// Reads all vertex lines, in file order. All other lines are ignored.
    pub fn read(self) -> Result<PointSet, Error> {
        let source = self.source;
        let mut points = Vec::new();

        for (idx, line) in self.reader.lines().enumerate() {
            let line = line.map_err(|e| Error::io(&source, e))?;
            if let Some(p) = parse_vertex_line(&line, idx + 1)? {
                points.push(p);
            }
        }

        Ok(PointSet::new(points))
    }
}

/// Returns `Ok(None)` for lines that are not vertex lines.
fn parse_vertex_line(line: &str, line_no: usize) -> Result<Option<Pos3>, Error> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(VERTEX_MARKER) {
        return Ok(None);
    }

    let mut coord = |axis: Axis| -> Result<f64, Error> {
        let token = tokens.next().ok_or_else(|| {
            Error::parse(line_no, format!("missing {} coordinate", axis))
        })?;

        let value = token.parse::<f64>().map_err(|_| {
            Error::parse(line_no, format!("{} coordinate '{}' is not a number", axis, token))
        })?;

        if !value.is_finite() {
            return Err(Error::parse(
                line_no,
                format!("{} coordinate '{}' is not finite", axis, token),
            ));
        }

        Ok(value)
    };

    // Anything after the third coordinate (the optional `w` component or
    // vertex colors) is ignored.
    let x = coord(Axis::X)?;
    let y = coord(Axis::Y)?;
    let z = coord(Axis::Z)?;

    Ok(Some(Pos3::new(x, y, z)))
}
