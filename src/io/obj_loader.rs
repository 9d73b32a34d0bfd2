//! Wavefront OBJ loading.
//!
//! Only the subset needed for triangle meshes is understood: `v`, `vt`, `vn`
//! and triangular `f` records. Other records (comments, groups, materials,
//! smoothing groups) are skipped.

use crate::core::geometry::Face;
use crate::core::math::vector::{Vec2, Vec3};
use crate::scene::mesh::Mesh;
use log::{debug, info, warn};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;
use thiserror::Error;

/// Which attribute pool a face index points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PoolKind::Position => "position",
            PoolKind::TexCoord => "texture coordinate",
            PoolKind::Normal => "normal",
        })
    }
}

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read OBJ file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: '{keyword}' record has too few components")]
    MissingComponent { line: usize, keyword: &'static str },
    #[error("line {line}: face has {count} vertices, only triangles are supported")]
    FaceArity { line: usize, count: usize },
    #[error("line {line}: malformed face vertex '{token}'")]
    MalformedIndex { line: usize, token: String },
    #[error("line {line}: face mixes vertex records with and without texture/normal indices")]
    MixedFaceFormat { line: usize },
    /// `index` is the 1-based value as written in the file.
    #[error("line {line}: {kind} index {index} is out of range ({len} defined)")]
    IndexOutOfRange {
        line: usize,
        kind: PoolKind,
        index: usize,
        len: usize,
    },
}

/// Controls how forgiving the parser is with numeric fields.
#[derive(Debug, Clone, Copy)]
pub struct ObjLoadOptions {
    /// When false, malformed or missing floats in `v`/`vt`/`vn` records are
    /// replaced by 0.0 (with a warning) instead of failing the load.
    /// Face records are always strict.
    pub strict: bool,
}

impl Default for ObjLoadOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// One `a[/b[/c]]` record of a face, already converted to 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VertexRef {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>,
}

struct RawFace {
    line: usize,
    vertices: [VertexRef; 3],
}

#[derive(Default)]
struct ObjPools {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
    faces: Vec<RawFace>,
}

/// Loads an OBJ file with the default (strict) options.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
    load_obj_with_options(path, &ObjLoadOptions::default())
}

pub fn load_obj_with_options<P: AsRef<Path>>(
    path: P,
    options: &ObjLoadOptions,
) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());

    let bytes = fs::read(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj_bytes(&bytes, options)
}

/// Parses raw OBJ file contents.
///
/// Exporters often write comments and names in legacy 8-bit encodings, so
/// invalid UTF-8 is replaced rather than rejected. A replaced byte inside a
/// numeric field still fails that line as an invalid number.
pub fn parse_obj_bytes(bytes: &[u8], options: &ObjLoadOptions) -> Result<Mesh, ObjError> {
    let source = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = source {
        debug!("OBJ data is not valid UTF-8, invalid bytes replaced");
    }
    parse_obj(&source, options)
}

/// Parses OBJ text into a mesh.
///
/// Either every face resolves or the whole parse fails; no partial mesh is
/// ever returned.
pub fn parse_obj(source: &str, options: &ObjLoadOptions) -> Result<Mesh, ObjError> {
    let mut pools = ObjPools::default();

    for (i, line) in source.lines().enumerate() {
        let line_no = i + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_floats::<3>(tokens, line_no, "v", options)?;
                pools.positions.push(Vec3::new(x, y, z));
            }
            Some("vt") => {
                // A third (w) component is allowed but carries no meaning here.
                let [u, v] = parse_floats::<2>(tokens, line_no, "vt", options)?;
                pools.tex_coords.push(Vec2::new(u, v));
            }
            Some("vn") => {
                let [x, y, z] = parse_floats::<3>(tokens, line_no, "vn", options)?;
                pools.normals.push(Vec3::new(x, y, z));
            }
            Some("f") => pools.faces.push(parse_face(tokens, line_no)?),
            _ => {}
        }
    }

    let faces = resolve_faces(&pools)?;

    info!(
        "OBJ loaded: {} positions, {} texture coordinates, {} normals, {} faces",
        pools.positions.len(),
        pools.tex_coords.len(),
        pools.normals.len(),
        faces.len()
    );

    Ok(Mesh::new(faces))
}

fn parse_floats<const N: usize>(
    mut tokens: SplitWhitespace<'_>,
    line: usize,
    keyword: &'static str,
    options: &ObjLoadOptions,
) -> Result<[f64; N], ObjError> {
    let mut values = [0.0; N];

    for value in values.iter_mut() {
        let Some(token) = tokens.next() else {
            if options.strict {
                return Err(ObjError::MissingComponent { line, keyword });
            }
            warn!("line {line}: '{keyword}' record has too few components, using 0");
            break;
        };

        // `f64::from_str` also accepts "nan" and "inf", which are not coordinates.
        *value = match token.parse::<f64>().ok().filter(|v| v.is_finite()) {
            Some(v) => v,
            None if !options.strict => {
                warn!("line {line}: invalid number '{token}', using 0");
                0.0
            }
            None => {
                return Err(ObjError::InvalidNumber {
                    line,
                    token: token.to_string(),
                });
            }
        };
    }

    Ok(values)
}

fn parse_face(tokens: SplitWhitespace<'_>, line: usize) -> Result<RawFace, ObjError> {
    let records: Vec<&str> = tokens.collect();
    if records.len() != 3 {
        return Err(ObjError::FaceArity {
            line,
            count: records.len(),
        });
    }

    let vertices = [
        parse_vertex_ref(records[0], line)?,
        parse_vertex_ref(records[1], line)?,
        parse_vertex_ref(records[2], line)?,
    ];

    // All three records must agree on which attributes they reference.
    let has_tex = vertices[0].tex_coord.is_some();
    let has_normal = vertices[0].normal.is_some();
    if vertices
        .iter()
        .any(|v| v.tex_coord.is_some() != has_tex || v.normal.is_some() != has_normal)
    {
        return Err(ObjError::MixedFaceFormat { line });
    }

    Ok(RawFace { line, vertices })
}

/// Parses `a`, `a/b`, `a/b/c` or `a//c`.
fn parse_vertex_ref(token: &str, line: usize) -> Result<VertexRef, ObjError> {
    let malformed = || ObjError::MalformedIndex {
        line,
        token: token.to_string(),
    };

    let mut parts = token.split('/');
    let position = parts.next().and_then(parse_index).ok_or_else(malformed)?;

    let optional_index = |part: Option<&str>| match part {
        None | Some("") => Ok(None),
        Some(s) => parse_index(s).map(Some).ok_or_else(malformed),
    };
    let tex_coord = optional_index(parts.next())?;
    let normal = optional_index(parts.next())?;

    if parts.next().is_some() {
        return Err(malformed());
    }

    Ok(VertexRef {
        position,
        tex_coord,
        normal,
    })
}

/// Converts a 1-based file index to a 0-based one. Zero and negative
/// (relative) indices are not supported.
fn parse_index(s: &str) -> Option<usize> {
    s.parse::<usize>().ok()?.checked_sub(1)
}

fn resolve_faces(pools: &ObjPools) -> Result<Vec<Face>, ObjError> {
    let mut faces = Vec::with_capacity(pools.faces.len());

    for raw in &pools.faces {
        let [a, b, c] = raw.vertices;

        let mut face = Face::new([
            lookup(&pools.positions, a.position, PoolKind::Position, raw.line)?,
            lookup(&pools.positions, b.position, PoolKind::Position, raw.line)?,
            lookup(&pools.positions, c.position, PoolKind::Position, raw.line)?,
        ]);

        if let (Some(ta), Some(tb), Some(tc)) = (a.tex_coord, b.tex_coord, c.tex_coord) {
            face.tex_coords = Some([
                lookup(&pools.tex_coords, ta, PoolKind::TexCoord, raw.line)?,
                lookup(&pools.tex_coords, tb, PoolKind::TexCoord, raw.line)?,
                lookup(&pools.tex_coords, tc, PoolKind::TexCoord, raw.line)?,
            ]);
        }

        if let (Some(na), Some(nb), Some(nc)) = (a.normal, b.normal, c.normal) {
            face.normals = Some([
                lookup(&pools.normals, na, PoolKind::Normal, raw.line)?,
                lookup(&pools.normals, nb, PoolKind::Normal, raw.line)?,
                lookup(&pools.normals, nc, PoolKind::Normal, raw.line)?,
            ]);
        }

        faces.push(face);
    }

    Ok(faces)
}

fn lookup<T: Copy>(pool: &[T], index: usize, kind: PoolKind, line: usize) -> Result<T, ObjError> {
    pool.get(index)
        .copied()
        .ok_or_else(|| ObjError::IndexOutOfRange {
            line,
            kind,
            index: index + 1,
            len: pool.len(),
        })
}
