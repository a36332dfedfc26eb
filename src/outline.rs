//! Drawing of polygon edges (no interior) into a raster
use crate::{BoundingBox, ImageMut, MaskError, Pixel, Raster, Ring};

/// Stamps the edges of a closed ring into a raster
///
/// Implementations must be idempotent: drawing the same edge twice leaves the
/// raster unchanged. Only edges are drawn, the interior is left untouched.
pub trait OutlineDrawer: Send + Sync {
    /// Name of the drawer, used in logs and errors
    fn name(&self) -> &str;

    /// Draw edges connecting consecutive `ring` pixels, including the edge from
    /// the last pixel back to the first one, with `value`.
    fn draw_outline(&self, raster: &mut Raster, ring: &[Pixel], value: u8)
    -> Result<(), MaskError>;
}

impl<D: OutlineDrawer + ?Sized> OutlineDrawer for &D {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn draw_outline(
        &self,
        raster: &mut Raster,
        ring: &[Pixel],
        value: u8,
    ) -> Result<(), MaskError> {
        (**self).draw_outline(raster, ring, value)
    }
}

impl<D: OutlineDrawer + ?Sized> OutlineDrawer for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn draw_outline(
        &self,
        raster: &mut Raster,
        ring: &[Pixel],
        value: u8,
    ) -> Result<(), MaskError> {
        (**self).draw_outline(raster, ring, value)
    }
}

/// One pixel wide edges traced with Bresenham's line algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct LineOutline;

impl OutlineDrawer for LineOutline {
    fn name(&self) -> &str {
        "line"
    }

    fn draw_outline(
        &self,
        raster: &mut Raster,
        ring: &[Pixel],
        value: u8,
    ) -> Result<(), MaskError> {
        match ring {
            [] => {}
            [pixel] => put_pixel(raster, *pixel, value),
            _ => {
                let closing = ring.last().copied().zip(ring.first().copied());
                let edges = ring.windows(2).map(|edge| (edge[0], edge[1]));
                for (p0, p1) in edges.chain(closing) {
                    draw_line(raster, p0, p1, value);
                }
            }
        }
        Ok(())
    }
}

/// Set pixel, points outside of the raster are clipped
fn put_pixel(raster: &mut Raster, pixel: Pixel, value: u8) {
    if pixel.x < 0 || pixel.y < 0 {
        return;
    }
    if let Some(target) = raster.get_mut(pixel.y as usize, pixel.x as usize) {
        *target = value;
    }
}

/// Draw a line between `p0` and `p1` (both included) using Bresenham's algorithm
fn draw_line(raster: &mut Raster, p0: Pixel, p1: Pixel, value: u8) {
    let Pixel { mut x, mut y } = p0;
    let dx = (p1.x - x).abs();
    let dy = -(p1.y - y).abs();
    let sx = if x < p1.x { 1 } else { -1 };
    let sy = if y < p1.y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(raster, Pixel { x, y }, value);
        if x == p1.x && y == p1.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw outlines of all rings into a zero initialised raster covering `bbox`
///
/// Ring vertices are snapped to the pixel grid and translated so that the
/// top-left corner of `bbox` becomes the raster origin.
pub fn draw_outline(
    drawer: &dyn OutlineDrawer,
    rings: &[Ring],
    bbox: BoundingBox,
    value: u8,
) -> Result<Raster, MaskError> {
    let mut raster = Raster::new_default(bbox.size());
    let origin = bbox.origin();
    let mut pixels = Vec::new();
    for ring in rings {
        pixels.clear();
        pixels.extend(ring.iter().map(|point| point.to_pixel(origin)));
        drawer.draw_outline(&mut raster, &pixels, value)?;
    }
    tracing::debug!(
        "[outline:{}] rings={} pixels={}",
        drawer.name(),
        rings.len(),
        raster.count_foreground()
    );
    Ok(raster)
}
