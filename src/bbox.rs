//! Integer bounding box of a geometry on the pixel grid
use crate::{BBox, EPSILON, MaskError, Pixel, Point, Ring, Scalar, Size};
use std::fmt;

/// Largest number of pixels a geometry's raster may cover
pub const MAX_RASTER_PIXELS: u128 = 1 << 30;

/// 2^63, every floored coordinate in `[-2^63, 2^63)` is exactly representable as `i64`
const I64_BOUND: Scalar = 9_223_372_036_854_775_808.0;

/// Floor coordinate onto the pixel grid, `None` if it does not fit `i64`
fn grid(value: Scalar) -> Option<i64> {
    let value = value.floor();
    (-I64_BOUND..I64_BOUND)
        .contains(&value)
        .then_some(value as i64)
}

/// Inclusive integer bounds of a geometry, `x_max >= x_min` and `y_max >= y_min`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl BoundingBox {
    /// Construct bounding box which includes pixels `p0` and `p1`
    pub fn new(p0: Pixel, p1: Pixel) -> Self {
        Self {
            x_min: p0.x.min(p1.x),
            y_min: p0.y.min(p1.y),
            x_max: p0.x.max(p1.x),
            y_max: p0.y.max(p1.y),
        }
    }

    /// Pixel grid bounds of a float bounding box
    ///
    /// Both corners are floored, vertices are snapped to the pixel grid the
    /// same way, so every drawn vertex falls inside of the inclusive bounds.
    /// Fails if the bounds do not fit `i64` or cover more than
    /// [`MAX_RASTER_PIXELS`] pixels.
    pub fn from_bbox(bbox: BBox) -> Result<Self, MaskError> {
        let (min, max) = (bbox.min(), bbox.max());
        let too_large = || MaskError::RasterTooLarge {
            width: (max.x().floor() - min.x().floor() + 1.0) as u128,
            height: (max.y().floor() - min.y().floor() + 1.0) as u128,
        };
        let (Some(x_min), Some(y_min), Some(x_max), Some(y_max)) =
            (grid(min.x()), grid(min.y()), grid(max.x()), grid(max.y()))
        else {
            return Err(too_large());
        };
        let width = (x_max as i128 - x_min as i128 + 1) as u128;
        let height = (y_max as i128 - y_min as i128 + 1) as u128;
        if width
            .checked_mul(height)
            .is_none_or(|pixels| pixels > MAX_RASTER_PIXELS)
        {
            return Err(MaskError::RasterTooLarge { width, height });
        }
        Ok(Self::new(Pixel::new(x_min, y_min), Pixel::new(x_max, y_max)))
    }

    /// Union of extents of all rings
    ///
    /// Fails if there are no rings, some ring has less than three vertices or
    /// non-finite coordinates, or the combined extent has zero area or is too
    /// large to be rasterized.
    pub fn from_rings(rings: &[Ring]) -> Result<Self, MaskError> {
        if rings.is_empty() {
            return Err(MaskError::degenerate("geometry has no rings"));
        }
        let mut extent: Option<BBox> = None;
        for (index, ring) in rings.iter().enumerate() {
            if ring.len() < 3 {
                return Err(MaskError::degenerate(format!(
                    "ring {} has {} vertices, at least 3 are required",
                    index,
                    ring.len()
                )));
            }
            if !ring.iter().all(Point::is_finite) {
                return Err(MaskError::degenerate(format!(
                    "ring {} has non-finite coordinates",
                    index
                )));
            }
            let Some(ring_bbox) = BBox::from_points(ring) else {
                continue;
            };
            extent = Some(match extent {
                Some(extent) => extent.union(ring_bbox),
                None => ring_bbox,
            });
        }
        let extent = extent.ok_or_else(|| MaskError::degenerate("geometry has no vertices"))?;
        if extent.width() < EPSILON || extent.height() < EPSILON {
            return Err(MaskError::degenerate(format!(
                "bounding box has zero area: {:?}",
                extent
            )));
        }
        Self::from_bbox(extent)
    }

    /// Create bounding box that spans both boxes
    pub fn union(&self, other: BoundingBox) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Top-left pixel, origin of the raster-local coordinates
    pub fn origin(&self) -> Pixel {
        Pixel::new(self.x_min, self.y_min)
    }

    /// Number of pixel columns covered by the box
    pub fn width(&self) -> usize {
        self.x_max.abs_diff(self.x_min).saturating_add(1) as usize
    }

    /// Number of pixel rows covered by the box
    pub fn height(&self) -> usize {
        self.y_max.abs_diff(self.y_min).saturating_add(1) as usize
    }

    /// Size of the raster which holds the box
    pub fn size(&self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Bounds as `(x_min, y_min, x_max, y_max)`
    pub fn to_tuple(&self) -> (i64, i64, i64, i64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox({}, {}, {}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}
