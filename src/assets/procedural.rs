//! Built-in art so the binaries run without any asset files.

use glam::{Vec2, vec2};

use crate::{
    renderer::{Rgba, rgba},
    sim::{Animation, Sprite, TicRunner},
    world::{Anchor, MemorySprites, SourceRect, SpriteId, Texture, TextureBank, TextureError},
};

const SIZE: usize = 64;

pub const BARREL: SpriteId = SpriteId(0);
/// Two 32x32 frames side by side.
pub const LAMP_SHEET: SpriteId = SpriteId(1);
pub const PILLAR: SpriteId = SpriteId(2);

/// First and second lamp frame inside [`LAMP_SHEET`].
pub const LAMP_FRAMES: [SourceRect; 2] = [
    SourceRect::new(0, 0, 32, 32),
    SourceRect::new(32, 0, 32, 32),
];

pub const DEMO_MAP: &str = "\
################
#@.....#.......#
#......#...2...#
#......|.......#
#......#...2...#
###-####.......#
#......#########
#..3.......3...#
#..............#
#..3.......3...#
################
";

fn texture(name: &str, f: impl Fn(usize, usize) -> Rgba) -> Texture {
    let mut pixels = Vec::with_capacity(SIZE * SIZE);
    for y in 0..SIZE {
        for x in 0..SIZE {
            pixels.push(f(x, y));
        }
    }
    Texture {
        name: name.into(),
        w: SIZE,
        h: SIZE,
        pixels,
    }
}

fn door() -> Texture {
    texture("DOOR", |x, y| {
        let frame = x < 4 || x >= SIZE - 4 || y < 4 || y >= SIZE - 4;
        let handle = (48..52).contains(&x) && (28..36).contains(&y);
        match (frame, handle) {
            (true, _) => rgba(0x50, 0x30, 0x10, 0xFF),
            (_, true) => rgba(0xD0, 0xB0, 0x30, 0xFF),
            _ if x % 16 == 0 => rgba(0x70, 0x48, 0x20, 0xFF),
            _ => rgba(0x90, 0x60, 0x30, 0xFF),
        }
    })
}

fn brick() -> Texture {
    texture("BRICK", |x, y| {
        let row = y / 16;
        let offset = if row % 2 == 0 { 0 } else { 16 };
        if y % 16 == 0 || (x + offset) % 32 == 0 {
            rgba(0x60, 0x60, 0x60, 0xFF)
        } else {
            rgba(0xA0, 0x30, 0x20, 0xFF)
        }
    })
}

fn stone() -> Texture {
    texture("STONE", |x, y| {
        let v = ((x * 7 + y * 13) ^ (x * y)) % 48;
        let c = 0x60 + v as u8;
        rgba(c, c, c.saturating_add(8), 0xFF)
    })
}

fn mossy() -> Texture {
    texture("MOSSY", |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            rgba(0x30, 0x70, 0x30, 0xFF)
        } else {
            rgba(0x50, 0x50, 0x48, 0xFF)
        }
    })
}

/// Door, brick, stone, mossy: ids 0..=3.
pub fn wall_bank() -> Result<TextureBank, TextureError> {
    let mut bank = TextureBank::new(door())?;
    for tex in [brick(), stone(), mossy()] {
        bank.insert(tex.name.clone(), tex)?;
    }
    Ok(bank)
}

fn disc(w: usize, h: usize, colour: Rgba) -> Vec<Rgba> {
    let (cx, cy, r) = (w as f32 / 2.0, h as f32 / 2.0, w.min(h) as f32 / 2.0);
    let mut px = vec![0; w * h];
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
            if dx * dx + dy * dy <= r * r {
                px[y * w + x] = colour;
            }
        }
    }
    px
}

/// Sprite sheets for the demo billboards.
pub fn demo_sprites() -> MemorySprites {
    let mut sprites = MemorySprites::new();

    // barrel: banded rectangle, transparent corners
    let barrel = texture("BARREL", |x, y| {
        if !(12..52).contains(&x) || y < 16 {
            0
        } else if y % 12 < 2 {
            rgba(0x30, 0x30, 0x30, 0xFF)
        } else {
            rgba(0x40, 0x80, 0x40, 0xFF)
        }
    });
    sprites.insert(BARREL, barrel);

    // lamp: a lit and a dim frame
    let mut lamp = vec![0; 64 * 32];
    for (frame, colour) in [rgba(0xFF, 0xF0, 0x80, 0xFF), rgba(0x80, 0x70, 0x30, 0xFF)]
        .into_iter()
        .enumerate()
    {
        let bulb = disc(32, 32, colour);
        for y in 0..32 {
            lamp[y * 64 + frame * 32..y * 64 + frame * 32 + 32]
                .copy_from_slice(&bulb[y * 32..y * 32 + 32]);
        }
    }
    sprites.insert(
        LAMP_SHEET,
        Texture {
            name: "LAMP".into(),
            w: 64,
            h: 32,
            pixels: lamp,
        },
    );

    let pillar = texture("PILLAR", |x, _| {
        if (24..40).contains(&x) {
            rgba(0xB0, 0xB0, 0xA0, 0xFF)
        } else {
            0
        }
    });
    sprites.insert(PILLAR, pillar);

    sprites
}

/// Props for [`DEMO_MAP`]: barrels and pillars on the floor, blinking lamps
/// under the ceiling.
pub fn spawn_demo_things(sim: &mut TicRunner) {
    let standing = |id| Sprite {
        id,
        source: SourceRect::WHOLE,
        scale: Vec2::ONE,
        anchor: Anchor::Bottom,
    };
    for pos in [vec2(4.5, 2.5), vec2(5.5, 3.5), vec2(9.5, 1.5)] {
        sim.spawn_billboard(pos, standing(BARREL));
    }
    for pos in [vec2(7.5, 8.5), vec2(5.5, 8.0), vec2(9.5, 8.0)] {
        sim.spawn_billboard(pos, standing(PILLAR));
    }

    let lamp = Sprite {
        id: LAMP_SHEET,
        source: LAMP_FRAMES[0],
        scale: Vec2::splat(0.4),
        anchor: Anchor::Top,
    };
    for pos in [vec2(3.5, 2.5), vec2(10.5, 3.5), vec2(13.5, 8.5)] {
        sim.spawn_animated(pos, lamp, Animation::new(LAMP_FRAMES.to_vec(), 12));
    }
}
