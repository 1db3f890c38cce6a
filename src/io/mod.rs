//! Reading and writing point sets.
//!
//! Only the vertex positions of Wavefront OBJ files are supported. Faces,
//! normals, texture coordinates and everything else are skipped when
//! reading and never written.

use std::path::Path;


pub mod obj;


/// Represents one of the supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Obj,
}

impl FileFormat {
    /// Tries to guess the file format from the file extension.
    ///
    /// Returns `None` if:
    /// - the path/file has no extension in its name, or
    /// - the extension is no valid UTF8, or
    /// - the file extension is not known.
    ///
    /// The comparison is case sensitive: `mesh.OBJ` is not recognized.
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| {
                match ext {
                    "obj" => Some(FileFormat::Obj),
                    _ => None,
                }
            })
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FileFormat::Obj => "OBJ",
        }.fmt(f)
    }
}
