// ──────────────────────────────────────────────────────────────────────────
// assets/loader.rs
//
//  *   map text file                 ──╮
//  *   directory of wall PNGs          │   --->  world::Map (border checked)
//  *   directory of sprite PNGs        │          + TextureBank + PngSprites
//  *   thing list                    ──╯          + Vec<Billboard>
// ──────────────────────────────────────────────────────────────────────────

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

use glam::{Vec2, vec2};

use crate::world::{
    Anchor, Billboard, Map, MapError, PngSprites, SourceRect, Texture, TextureBank, TextureError,
};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("{path}: {source}")]
    Texture { path: PathBuf, source: TextureError },

    #[error("no PNG files in {0}")]
    NoTextures(PathBuf),

    #[error("{path}:{line}: {msg}")]
    Things {
        path: PathBuf,
        line: usize,
        msg: String,
    },
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Read, parse and border-check a text map.
pub fn load_map(path: &Path) -> Result<Map, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.into(),
        source,
    })?;
    let map = Map::parse(&text)?;
    map.validate_border()?;
    info!(
        "map {} loaded: {}x{}",
        path.display(),
        map.width(),
        map.height()
    );
    Ok(map)
}

/// Every `*.png` in `dir`, sorted by file name.
pub fn png_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.into(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Wall textures from `dir`, in file-name order: the first file becomes the
/// door texture (id 0), the n-th file is what map digit `n` refers to.
pub fn load_wall_textures(dir: &Path) -> Result<TextureBank, LoadError> {
    let files = png_files(dir)?;
    let mut decoded = files.iter().map(|path| {
        Texture::load_png(path).map_err(|source| LoadError::Texture {
            path: path.clone(),
            source,
        })
    });

    let door = decoded
        .next()
        .ok_or_else(|| LoadError::NoTextures(dir.into()))??;
    let mut bank = TextureBank::new(door).map_err(|source| LoadError::Texture {
        path: files[0].clone(),
        source,
    })?;

    for (path, tex) in files.iter().skip(1).zip(decoded) {
        let tex = tex?;
        let id = bank
            .insert(tex.name.clone(), tex)
            .map_err(|source| LoadError::Texture {
                path: path.clone(),
                source,
            })?;
        debug!("wall texture {id}: {}", path.display());
    }
    info!("{} wall textures from {}", bank.len(), dir.display());
    Ok(bank)
}

/// Sprite sheets in `dir`; decoding is deferred to the renderer's cache.
pub fn sprite_sheets(dir: &Path) -> Result<PngSprites, LoadError> {
    let files = png_files(dir)?;
    info!("{} sprite sheets in {}", files.len(), dir.display());
    Ok(PngSprites::new(files))
}

/// Billboards from a thing list, one per line:
///
/// ```text
/// # x    y    sheet   [scale] [bottom|top|center]
/// 4.5  2.5  barrel
/// 9.5  3.5  lamp    0.5     top
/// ```
///
/// `sheet` is a file stem from the sprite directory. Blank lines and `#`
/// comments are skipped.
pub fn load_things(path: &Path, sprites: &PngSprites) -> Result<Vec<Billboard>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.into(),
        source,
    })?;
    let things = parse_things(&text, sprites).map_err(|(line, msg)| LoadError::Things {
        path: path.into(),
        line,
        msg,
    })?;
    info!("{} things from {}", things.len(), path.display());
    Ok(things)
}

fn parse_things(text: &str, sprites: &PngSprites) -> Result<Vec<Billboard>, (usize, String)> {
    let mut out = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let err = |msg: String| (n + 1, msg);
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [x, y, name, rest @ ..] = fields.as_slice() else {
            return Err(err(format!("expected `x y sheet`, got {line:?}")));
        };
        let num = |s: &str| s.parse::<f32>().map_err(|e| err(format!("{s:?}: {e}")));
        let pos = vec2(num(*x)?, num(*y)?);
        let sprite = sprites
            .id_of(*name)
            .ok_or_else(|| err(format!("no sprite sheet named {name:?}")))?;

        let mut bb = Billboard::new(pos, sprite, SourceRect::WHOLE);
        for field in rest {
            bb = match field.to_ascii_lowercase().as_str() {
                "bottom" => bb.with_anchor(Anchor::Bottom),
                "top" => bb.with_anchor(Anchor::Top),
                "center" | "centre" => bb.with_anchor(Anchor::Center),
                other => bb.with_scale(Vec2::splat(num(other)?)),
            };
        }
        out.push(bb);
    }
    Ok(out)
}
