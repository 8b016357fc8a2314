use crate::foundation::core::{GridPos, Rgb};
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::ingest::map::GridMap;
use crate::render::surface::ReplaySurface;
use crate::timeline::frames::{AgentMark, FrameSnapshot};
use anyhow::anyhow;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Options controlling raster output.
#[derive(Clone, Copy, Debug)]
pub struct RasterOpts {
    /// Side length of one map cell in pixels.
    pub cell_px: u32,
    /// Fill color for passable cells.
    pub passable: Rgb,
    /// Fill color for obstacle cells.
    pub obstacle: Rgb,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            cell_px: 8,
            passable: Rgb::new(0xe8, 0xe8, 0xe8),
            obstacle: Rgb::new(0x28, 0x28, 0x28),
        }
    }
}

/// Surface that rasterizes pushes into RGBA images.
///
/// The background and goal overlay are baked into a base image once; each
/// presented frame is the base plus the frame's agent dots. The most recent
/// frame stays available via [`RasterSurface::last_frame`] until the next
/// push.
#[derive(Default)]
pub struct RasterSurface {
    opts: RasterOpts,
    base: Option<RgbaImage>,
    last: Option<RgbaImage>,
}

impl RasterSurface {
    /// Create a surface with the given options.
    pub fn new(opts: RasterOpts) -> Self {
        Self {
            opts,
            base: None,
            last: None,
        }
    }

    /// The most recently presented frame, if any.
    pub fn last_frame(&self) -> Option<&RgbaImage> {
        self.last.as_ref()
    }

    /// Encode the most recently presented frame as a PNG file.
    pub fn save_last(&self, path: &Path) -> ReplayResult<()> {
        let img = self
            .last
            .as_ref()
            .ok_or_else(|| ReplayError::Other(anyhow!("no frame presented yet")))?;
        img.save(path)
            .map_err(|e| ReplayError::Other(anyhow!("write '{}': {e}", path.display())))
    }

    fn fill_cell(&self, img: &mut RgbaImage, pos: GridPos, color: Rgb, inset: u32) {
        let cell = self.opts.cell_px;
        let x0 = pos.col * cell;
        let y0 = pos.row * cell;
        for y in (y0 + inset)..(y0 + cell).saturating_sub(inset) {
            for x in (x0 + inset)..(x0 + cell).saturating_sub(inset) {
                if x < img.width() && y < img.height() {
                    img.put_pixel(x, y, Rgba([color.r, color.g, color.b, 0xff]));
                }
            }
        }
    }

    fn draw_x_marker(&self, img: &mut RgbaImage, pos: GridPos, color: Rgb) {
        let cell = self.opts.cell_px;
        let x0 = pos.col * cell;
        let y0 = pos.row * cell;
        for i in 0..cell {
            for (x, y) in [(x0 + i, y0 + i), (x0 + cell - 1 - i, y0 + i)] {
                if x < img.width() && y < img.height() {
                    img.put_pixel(x, y, Rgba([color.r, color.g, color.b, 0xff]));
                }
            }
        }
    }
}

impl ReplaySurface for RasterSurface {
    fn set_background(&mut self, map: &GridMap) -> ReplayResult<()> {
        let cell = self.opts.cell_px;
        let width = map.width() as u32 * cell;
        let height = map.height() as u32 * cell;
        let mut img = RgbaImage::new(width, height);
        for row in 0..map.height() {
            for col in 0..map.width() {
                let c = if map.is_passable(row, col) {
                    self.opts.passable
                } else {
                    self.opts.obstacle
                };
                self.fill_cell(
                    &mut img,
                    GridPos::new(row as u32, col as u32),
                    c,
                    0,
                );
            }
        }
        self.base = Some(img);
        self.last = None;
        Ok(())
    }

    fn draw_goals(&mut self, goals: &[AgentMark]) -> ReplayResult<()> {
        // Take the base image so the immutable marker helper can borrow
        // `self` while drawing into it.
        let mut base = self.base.take().ok_or_else(|| {
            ReplayError::Other(anyhow!("draw_goals called before set_background"))
        })?;
        for mark in goals {
            self.draw_x_marker(&mut base, mark.pos, mark.color);
        }
        self.base = Some(base);
        Ok(())
    }

    fn present_frame(&mut self, snapshot: &FrameSnapshot) -> ReplayResult<()> {
        let base = self
            .base
            .as_ref()
            .ok_or_else(|| ReplayError::Other(anyhow!("present_frame called before set_background")))?;
        let mut img = base.clone();
        for mark in &snapshot.marks {
            self.fill_cell(&mut img, mark.pos, mark.color, 1);
        }
        self.last = Some(img);
        Ok(())
    }
}
