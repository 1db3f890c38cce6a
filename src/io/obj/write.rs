use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    points::PointSet,
};
use super::VERTEX_MARKER;


/// Writes point sets as OBJ files that only contain vertex lines.
#[derive(Debug)]
pub struct Writer<W: Write> {
    writer: W,
    target: PathBuf,
}

impl Writer<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`, including all missing
    /// parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| Error::io(path, e))?;

        Ok(Self {
            writer: BufWriter::new(file),
            target: path.to_owned(),
        })
    }
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            target: PathBuf::from("<stream>"),
        }
    }

    /// Writes one `v x y z` line per point.
    pub fn write(&mut self, points: &PointSet) -> Result<(), Error> {
        self.write_raw(points).map_err(|e| Error::io(&self.target, e))
    }

    fn write_raw(&mut self, points: &PointSet) -> io::Result<()> {
        for p in points {
            writeln!(self.writer, "{} {} {} {}", VERTEX_MARKER, p.x, p.y, p.z)?;
        }
        self.writer.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
