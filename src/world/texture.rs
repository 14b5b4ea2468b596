// Format-agnostic repository of wall textures decoded by the asset loader.
// The renderer and world logic interact through `TextureId` only.

use std::{collections::HashMap, path::Path};

use crate::renderer::{Rgba, rgba};

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` used for every door face.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const DOOR_TEXTURE: TextureId = 0;

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: Rgba = rgba(0xA0, 0xA0, 0xA0, 0xFF);
        const DARK: Rgba = rgba(0x40, 0x40, 0x40, 0xFF);
        let mut pix = vec![0; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

/// Things that can go wrong when building or using the bank.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Wall sampling wraps with a bitmask, so both sides must be 2^n.
    #[error("texture `{name}` is {w}x{h}, wall textures need power-of-two sides")]
    NotPowerOfTwo { name: String, w: usize, h: usize },

    #[error("texture `{name}` has {actual} pixels, expected {expected}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("sprite texture {0} unknown to its source")]
    UnknownSprite(u32),

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
}

impl Texture {
    /// Wrap already decoded pixels, checking that the buffer matches `w*h`.
    pub fn new<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        pixels: Vec<Rgba>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if pixels.len() != w * h {
            return Err(TextureError::SizeMismatch {
                name,
                expected: w * h,
                actual: pixels.len(),
            });
        }
        Ok(Self { name, w, h, pixels })
    }

    /// Convert an RGBA8 image into packed ARGB texels.
    pub fn from_image<S: Into<String>>(name: S, img: &image::RgbaImage) -> Self {
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                rgba(r, g, b, a)
            })
            .collect();
        Self {
            name: name.into(),
            w: img.width() as usize,
            h: img.height() as usize,
            pixels,
        }
    }

    /// Decode a PNG from disk; the file stem becomes the texture name.
    pub fn load_png(path: &Path) -> Result<Self, TextureError> {
        let img = image::open(path)?.into_rgba8();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("?")
            .to_ascii_uppercase();
        Ok(Self::from_image(name, &img))
    }

    #[inline]
    pub fn is_pow2(&self) -> bool {
        self.w.is_power_of_two() && self.h.is_power_of_two()
    }

    /// Texel at column `u`, row `v`. Callers keep both in range.
    #[inline(always)]
    pub fn texel(&self, u: usize, v: usize) -> Rgba {
        self.pixels[v * self.w + u]
    }
}

/// Ordered set of wall textures.
///
/// * Stores exactly one copy of every name.
/// * ID **0** is always the door texture.
/// * Every texture has power-of-two sides; this is checked on insert so the
///   column sampler can wrap with a mask.
#[derive(Debug)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create a bank whose handle **0** is `door_tex`.
    pub fn new(door_tex: Texture) -> Result<Self, TextureError> {
        let mut bank = Self {
            by_name: HashMap::new(),
            data: Vec::new(),
        };
        bank.insert("DOOR", door_tex)?;
        Ok(bank)
    }

    pub fn default_with_checker() -> Self {
        let tex = Texture::default();
        let mut by_name = HashMap::new();
        by_name.insert("DOOR".into(), DOOR_TEXTURE);
        Self {
            by_name,
            data: vec![tex],
        }
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the door).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a constructed bank: the door is always present.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Obtain the id for a *loaded* texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Fallback-safe query: unknown ids resolve to the door texture.
    #[inline]
    pub fn texture_or_door(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or(&self.data[0])
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`) or a side is not a
    ///   power of two (`NotPowerOfTwo`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        if !tex.is_pow2() {
            return Err(TextureError::NotPowerOfTwo {
                name,
                w: tex.w,
                h: tex.h,
            });
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tex(color: Rgba) -> Texture {
        Texture::new("Dummy", 2, 2, vec![color; 4]).unwrap()
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::default_with_checker();
        let red = bank.insert("RED", dummy_tex(0xFF_FF0000)).unwrap();
        let blue = bank.insert("BLUE", dummy_tex(0xFF_0000FF)).unwrap();

        assert_ne!(red, DOOR_TEXTURE);
        assert_ne!(blue, red);
        assert_eq!(bank.id("RED"), Some(red));
        assert_eq!(bank.id("BLUE"), Some(blue));
        assert_eq!(bank.id("NOPE"), None);

        assert_eq!(bank.texture(red).unwrap().pixels[0], 0xFF_FF0000);
        assert_eq!(bank.texture(blue).unwrap().pixels[0], 0xFF_0000FF);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::default_with_checker();
        bank.insert("WOOD", dummy_tex(1)).unwrap();
        let err = bank.insert("WOOD", dummy_tex(2)).unwrap_err();
        assert!(matches!(err, TextureError::Duplicate(ref n) if n == "WOOD"));
        // texture count still 2 (door + first WOOD)
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn non_power_of_two_rejected() {
        let mut bank = TextureBank::default_with_checker();
        let tex = Texture::new("ODD", 3, 4, vec![0; 12]).unwrap();
        let err = bank.insert("ODD", tex).unwrap_err();
        assert!(matches!(err, TextureError::NotPowerOfTwo { w: 3, h: 4, .. }));
        assert!(TextureBank::new(Texture::new("D", 6, 6, vec![0; 36]).unwrap()).is_err());
    }

    #[test]
    fn size_mismatch_rejected() {
        let err = Texture::new("SHORT", 4, 4, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            TextureError::SizeMismatch {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn bad_id_falls_back_to_door() {
        let bank = TextureBank::default_with_checker();
        let bad = TextureId::MAX;
        assert!(matches!(bank.texture(bad), Err(TextureError::BadId(id)) if id == bad));
        assert_eq!(bank.texture_or_door(bad).name, "CHECKER");
    }

    #[test]
    fn door_only_bank_is_not_empty() {
        let mut bank = TextureBank::default_with_checker();
        assert_eq!(bank.len(), 1);
        assert!(!bank.is_empty());
        bank.insert("WOOD", dummy_tex(1)).unwrap();
        assert!(!bank.is_empty());

        let bank = TextureBank::new(dummy_tex(2)).unwrap();
        assert!(!bank.is_empty());
    }

    #[test]
    fn bank_debug_names_its_textures() {
        let bank = TextureBank::default_with_checker();
        let dbg = format!("{bank:?}");
        assert!(dbg.contains("DOOR"));
        assert!(dbg.contains("CHECKER"));
    }

    #[test]
    fn from_image_packs_argb() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([0x11, 0x22, 0x33, 0x44]));
        img.put_pixel(1, 0, image::Rgba([0xFF, 0x00, 0x00, 0x00]));
        let tex = Texture::from_image("IMG", &img);
        assert_eq!((tex.w, tex.h), (2, 1));
        assert_eq!(tex.texel(0, 0), 0x44_112233);
        assert_eq!(tex.texel(1, 0), 0x00_FF0000);
    }
}
