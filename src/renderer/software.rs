//! ---------------------------------------------------------------------------
//! Classic software (CPU) raycaster
//!
//! * Fills a column-first frame-buffer in **0xAARRGGBB** format.
//! * Wall pass: one DDA ray per column, textured strip, then the first door
//!   crossed is drawn on top. Each column leaves its nearest depth behind.
//! * Billboard pass: sprites sorted far-to-near, tested per column against
//!   the depth buffer, alpha-cutout.
//! ---------------------------------------------------------------------------

mod columns;
mod doors;
mod frame;
mod raycast;
mod sprite_cache;
mod sprites;

pub use columns::{RUN_FILL_STEP, Slice, Strip};
pub use frame::{DepthBuffer, FrameBuffer, transpose};
pub use raycast::{DoorHit, NO_DELTA, Side, WallHit, camera_x, cast_column, cast_ray};
pub use sprite_cache::SpriteCache;
pub use sprites::{SpriteProjection, project};

use log::debug;

use crate::{
    renderer::{RenderConfig, Renderer, Rgba},
    world::{Billboard, Camera, DOOR_TEXTURE, SpriteSource, TextureBank, TileMap},
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Wolfenstein-style column renderer.
pub struct Software {
    frame: FrameBuffer,
    depth: DepthBuffer,
    walls: TextureBank,
    sprite_cache: SpriteCache,
    /// reused every frame by the billboard pass
    projections: Vec<SpriteProjection>,
    config: RenderConfig,
}

impl Software {
    /// `width` is the length of a column, `height` the number of columns;
    /// see [`FrameBuffer`] for the orientation.
    pub fn new(
        width: usize,
        height: usize,
        walls: TextureBank,
        sprites: Box<dyn SpriteSource>,
        config: RenderConfig,
    ) -> Self {
        debug!(
            "software raycaster {width}x{height}, {} wall textures, fog {}..{}",
            walls.len(),
            config.fog_start,
            config.fog_distance
        );
        Self {
            frame: FrameBuffer::new(width, height),
            depth: DepthBuffer::new(height),
            walls,
            sprite_cache: SpriteCache::new(sprites),
            projections: Vec::new(),
            config,
        }
    }

    /// Render a complete frame and borrow the result.
    pub fn render<M: TileMap>(
        &mut self,
        camera: &Camera,
        map: &M,
        billboards: &[Billboard],
    ) -> &FrameBuffer {
        self.depth.reset();
        self.draw_walls(camera, map);
        self.draw_sprites(camera, billboards);
        &self.frame
    }

    #[inline]
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    #[inline]
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of sprite sheets looked up so far.
    pub fn cached_sprites(&self) -> usize {
        self.sprite_cache.len()
    }

    /// Free decoded sprite sheets now instead of at drop.
    pub fn release_textures(&mut self) {
        self.sprite_cache.release();
    }

    /*──────────────────────── wall pass ──────────────────────────────*/

    fn draw_walls<M: TileMap>(&mut self, camera: &Camera, map: &M) {
        let count = self.frame.height();
        // a face one unit away spans as many pixels as there are columns
        let frame_size = count as f32;
        let door_tex = self.walls.texture_or_door(DOOR_TEXTURE);

        for c in 0..count {
            let hit = cast_column(map, camera, c, count);
            let tex = self.walls.texture_or_door(hit.texture());
            let slice = Slice {
                tex_u: columns::texel_column(
                    columns::wall_u(camera.pos, hit.ray, hit.side, hit.dist),
                    hit.ray,
                    hit.side,
                    tex.w,
                ),
                dist: hit.dist,
            };

            let column = self.frame.column_mut(c);
            columns::paint_column(column, &self.config, tex, slice, frame_size);
            let nearest = doors::composite_door(
                column,
                map,
                camera.pos,
                &hit,
                door_tex,
                &self.config,
                frame_size,
            );
            self.depth.set(c, nearest);
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn draw_frame<M: TileMap>(&mut self, camera: &Camera, map: &M, billboards: &[Billboard]) {
        self.render(camera, map, billboards);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(self.frame.pixels(), self.frame.width(), self.frame.height());
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::{rgba, shade},
        world::{Anchor, Map, MemorySprites, SourceRect, SpriteId, Texture, Tile},
    };
    use glam::vec2;

    const ROOM: &str = "\
##########
#........#
#........#
#........#
#........#
#........#
#........#
#........#
#........#
##########";

    /* tiny helpers ---------------------------------------------------*/
    fn stripes(name: &str, a: Rgba, b: Rgba) -> Texture {
        let pixels = (0..16 * 16)
            .map(|i| if (i % 16) < 8 { a } else { b })
            .collect();
        Texture::new(name, 16, 16, pixels).unwrap()
    }

    fn bank() -> TextureBank {
        let mut bank = TextureBank::new(stripes("DOOR", rgba(200, 0, 0, 255), rgba(0, 200, 0, 255)))
            .unwrap();
        bank.insert("WALL", stripes("WALL", rgba(0, 0, 200, 255), rgba(200, 200, 0, 255)))
            .unwrap();
        bank
    }

    fn sprites() -> MemorySprites {
        let mut s = MemorySprites::new();
        s.insert(
            SpriteId(1),
            Texture::new("BARREL", 4, 4, vec![rgba(255, 0, 255, 255); 16]).unwrap(),
        );
        s
    }

    fn software(w: usize, h: usize) -> Software {
        Software::new(w, h, bank(), Box::new(sprites()), RenderConfig::default())
    }

    fn camera() -> Camera {
        Camera::new(vec2(5.0, 5.0), vec2(1.0, 0.0), vec2(0.0, 0.45))
    }

    /// Room with a door tile (or a plain wall) across the corridor at x=7.
    fn room_with(tile: Tile, open: f32) -> Map {
        let mut map = Map::parse(ROOM).unwrap();
        let mut tiles = Vec::new();
        for row in 0..10 {
            for col in 0..10 {
                tiles.push(if col == 7 && (1..9).contains(&row) {
                    tile
                } else {
                    map.tile_at(col, row)
                });
            }
        }
        map = Map::from_tiles(10, 10, tiles, |_, _| true).unwrap();
        for row in 1..9 {
            if let Some(d) = map.door_at_mut(7, row) {
                d.open_amount = open;
            }
        }
        map
    }

    #[test]
    fn empty_room_scenario() {
        let map = Map::parse(ROOM).unwrap();
        let mut sw = software(320, 200);
        sw.render(&camera(), &map, &[]);

        let depth = sw.depth().as_slice();
        assert_eq!(depth.len(), 200);
        assert!((depth[0] - depth[199]).abs() < 1e-5);
        assert!((depth[100] - 4.0).abs() < 1e-4);
        assert!(depth.iter().all(|&d| (d - 4.0).abs() < 1e-3));

        // wall strip is 200/4 = 50 px centred on 160
        let cfg = *sw.config();
        let col = sw.frame().column(100);
        assert!(col[..135].iter().all(|&p| p == cfg.ceiling_color));
        assert!(col[185..].iter().all(|&p| p == cfg.floor_color));
        assert!(col[135..185].iter().all(|&p| p != cfg.ceiling_color && p != cfg.floor_color));
    }

    #[test]
    fn wall_is_fogged_by_distance() {
        let map = Map::parse(ROOM).unwrap();
        let mut sw = software(320, 200);
        sw.render(&camera(), &map, &[]);
        let px = sw.frame().column(100)[160];
        let f = sw.config().fog_factor(4.0);
        let raw = [rgba(0, 0, 200, 255), rgba(200, 200, 0, 255)];
        assert!(raw.iter().any(|&r| shade(r, f) == px));
    }

    #[test]
    fn rendering_is_deterministic() {
        let map = Map::parse(ROOM).unwrap();
        let cam = Camera::from_yaw(vec2(3.3, 6.1), 0.7, 1.2);
        let bbs = [Billboard::new(vec2(6.0, 7.5), SpriteId(1), SourceRect::new(0, 0, 4, 4))];
        let mut sw = software(160, 120);
        let first = sw.render(&cam, &map, &bbs).clone();
        let second = sw.render(&cam, &map, &bbs).clone();
        assert_eq!(first, second);

        let mut other = software(160, 120);
        assert_eq!(&first, other.render(&cam, &map, &bbs));
    }

    #[test]
    fn closed_door_matches_solid_wall() {
        let door = room_with(Tile::Door, 0.0);
        let wall = room_with(Tile::Wall(0), 0.0);
        let cam = Camera::new(vec2(2.5, 4.3), vec2(1.0, 0.2).normalize(), vec2(-0.1, 0.5));

        let mut a = software(120, 90);
        let mut b = software(120, 90);
        let fa = a.render(&cam, &door, &[]).clone();
        let fb = b.render(&cam, &wall, &[]).clone();
        assert_eq!(fa, fb);
        assert_eq!(a.depth().as_slice(), b.depth().as_slice());
    }

    #[test]
    fn open_door_shows_the_wall_behind() {
        let open = room_with(Tile::Door, 1.0);
        let plain = Map::parse(ROOM).unwrap();
        let cam = Camera::new(vec2(2.5, 4.3), vec2(1.0, 0.0), vec2(0.0, 0.5));

        let mut a = software(120, 90);
        let mut b = software(120, 90);
        assert_eq!(a.render(&cam, &open, &[]), b.render(&cam, &plain, &[]));
    }

    #[test]
    fn half_open_door_leaves_a_gap() {
        let half = room_with(Tile::Door, 0.5);
        let cam = Camera::new(vec2(2.5, 4.5), vec2(1.0, 0.0), vec2(0.0, 0.5));
        let mut sw = software(120, 90);
        sw.render(&cam, &half, &[]);

        // rays landing on the first half of each door tile look through the
        // gap at the far wall
        let d = sw.depth().as_slice();
        let near = d.iter().filter(|&&x| (x - 4.5).abs() < 1e-3).count();
        let far = d.iter().filter(|&&x| (x - 6.5).abs() < 1e-3).count();
        assert!(near > 0 && far > 0, "near {near}, far {far}");
        assert_eq!(near + far, d.len());
    }

    #[test]
    fn sprites_are_occluded_by_walls_and_each_other() {
        let map = Map::parse(ROOM).unwrap();
        let cam = camera();
        let mut sw = software(320, 200);
        let base = sw.render(&cam, &map, &[]).clone();

        // behind the wall: no change at all
        let hidden = [Billboard::new(vec2(12.0, 5.0), SpriteId(1), SourceRect::new(0, 0, 4, 4))];
        assert_eq!(&base, sw.render(&cam, &map, &hidden));

        // in front: covers the centre column around the horizon
        let visible = [Billboard::new(vec2(7.0, 5.0), SpriteId(1), SourceRect::new(0, 0, 4, 4))
            .with_anchor(Anchor::Center)];
        let frame = sw.render(&cam, &map, &visible);
        assert_eq!(frame.column(100)[160], rgba(255, 0, 255, 255));
        assert_eq!(sw.cached_sprites(), 1);
    }

    #[test]
    fn nearer_sprite_wins_regardless_of_order() {
        let map = Map::parse(ROOM).unwrap();
        let mut src = sprites();
        src.insert(
            SpriteId(2),
            Texture::new("LAMP", 4, 4, vec![rgba(0, 255, 255, 255); 16]).unwrap(),
        );
        let mut sw = Software::new(320, 200, bank(), Box::new(src), RenderConfig::default());
        let rect = SourceRect::new(0, 0, 4, 4);
        let near = Billboard::new(vec2(6.5, 5.0), SpriteId(2), rect).with_anchor(Anchor::Center);
        let far = Billboard::new(vec2(8.0, 5.0), SpriteId(1), rect).with_anchor(Anchor::Center);

        for order in [[near, far], [far, near]] {
            let frame = sw.render(&camera(), &map, &order);
            assert_eq!(frame.column(100)[160], rgba(0, 255, 255, 255));
        }
    }

    #[test]
    fn missing_sprite_is_skipped() {
        let map = Map::parse(ROOM).unwrap();
        let mut sw = software(64, 48);
        let base = sw.render(&camera(), &map, &[]).clone();
        let ghost = [Billboard::new(vec2(7.0, 5.0), SpriteId(99), SourceRect::new(0, 0, 4, 4))];
        assert_eq!(&base, sw.render(&camera(), &map, &ghost));
        sw.release_textures();
        assert_eq!(sw.cached_sprites(), 0);
    }

    #[test]
    fn trait_submits_whole_buffer() {
        let map = Map::parse(ROOM).unwrap();
        let mut sw = software(32, 24);
        sw.draw_frame(&camera(), &map, &[]);
        let mut seen = (0, 0, 0);
        sw.end_frame(|fb, w, h| seen = (fb.len(), w, h));
        assert_eq!(seen, (32 * 24, 32, 24));
    }

    #[test]
    fn submitted_frame_rotates_like_the_buffer() {
        let map = Map::parse(ROOM).unwrap();
        let mut sw = software(32, 24);
        sw.draw_frame(&camera(), &map, &[]);

        let mut via_submit = vec![0u32; 32 * 24];
        sw.end_frame(|px, column_len, columns| {
            transpose(px, column_len, columns, &mut via_submit)
        });
        let mut direct = vec![0u32; 32 * 24];
        sw.frame().transpose_into(&mut direct);
        assert_eq!(via_submit, direct);
        assert_ne!(via_submit, vec![0u32; 32 * 24]);
    }
}
