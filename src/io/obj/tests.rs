use std::{fs, path::PathBuf};

use failure::Error;

use crate::{
    error,
    math::Pos3,
    points::PointSet,
};
use super::{Reader, Writer};


fn read_str(src: &str) -> Result<PointSet, error::Error> {
    Reader::new(src.as_bytes()).read()
}

// ===========================================================================
// ===== Reading
// ===========================================================================
#[test]
fn read_tetrahedron() -> Result<(), Error> {
    let points = read_str(include_str!("../../../tests/files/obj/tetrahedron.obj"))?;

    assert_eq!(points.as_slice(), &[
        Pos3::new(0.0, 0.0, 0.0),
        Pos3::new(1.0, 0.0, 0.0),
        Pos3::new(0.0, 2.0, 0.0),
        Pos3::new(0.0, 0.0, 4.0),
    ]);

    Ok(())
}

#[test]
fn read_ignores_trailing_tokens() -> Result<(), Error> {
    let points = read_str(include_str!("../../../tests/files/obj/extra_tokens.obj"))?;

    // `vp` is not a vertex line, leading whitespace is fine.
    assert_eq!(points.as_slice(), &[
        Pos3::new(1.0, 2.0, 3.0),
        Pos3::new(-150.0, 0.25, 7.0),
        Pos3::new(4.0, 5.0, 6.0),
    ]);

    Ok(())
}

#[test]
fn read_empty() -> Result<(), Error> {
    assert!(read_str("")?.is_empty());
    assert!(read_str("# only a comment\nf 1 2 3\n")?.is_empty());

    Ok(())
}

#[test]
fn read_missing_coordinate() {
    let res = read_str(include_str!("../../../tests/files/obj/missing_coordinate.obj"));
    match res {
        Err(error::Error::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn read_invalid_number() {
    match read_str("v 1 2 3\nv 1 zwei 3\n") {
        Err(error::Error::Parse { line, reason }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("zwei"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn read_rejects_non_finite() {
    assert!(read_str("v nan 0 0\n").is_err());
    assert!(read_str("v 0 inf 0\n").is_err());
}

#[test]
fn open_missing_file() {
    match Reader::open("this/file/does/not/exist.obj") {
        Err(error::Error::Io(path, _)) => {
            assert!(path.to_string().ends_with("exist.obj"));
        }
        other => panic!("expected IO error, got {:?}", other),
    }
}


// ===========================================================================
// ===== Writing
// ===========================================================================
#[test]
fn write_vertex_lines() -> Result<(), Error> {
    let points = PointSet::new(vec![
        Pos3::new(0.0, 0.5, -1.0),
        Pos3::new(1.25, 2.0, 1e-7),
    ]);

    let mut writer = Writer::new(Vec::new());
    writer.write(&points)?;
    let out = String::from_utf8(writer.into_inner())?;

    assert_eq!(out, "v 0 0.5 -1\nv 1.25 2 0.0000001\n");

    // Reading the output again yields exactly the same points.
    assert_eq!(read_str(&out)?, points);

    Ok(())
}

/// A directory containing the regular file `blocker.txt`.
fn dir_with_blocker(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("meshquant-obj-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("blocker.txt"), "not a directory").unwrap();
    dir
}

#[test]
fn create_below_regular_file() {
    let dir = dir_with_blocker("create");

    match Writer::create(dir.join("blocker.txt").join("out.obj")) {
        Err(error::Error::Io(path, _)) => {
            assert!(path.to_string().contains("blocker.txt"), "{}", path);
        }
        other => panic!("expected IO error, got {:?}", other),
    }

    match super::write_file(dir.join("blocker.txt").join("sub").join("out.obj"), &PointSet::default()) {
        Err(error::Error::Io(path, _)) => {
            assert!(path.to_string().contains("blocker.txt"), "{}", path);
        }
        other => panic!("expected IO error, got {:?}", other),
    }
}
