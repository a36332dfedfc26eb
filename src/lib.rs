//! Conversion of polygonal annotations into solid raster masks.
//!
//! Main features:
//!  - Polygon and multi-polygon (with holes) rasterization into label masks
//!  - Topological thinning of outlines and robust scanline fill
//!  - GeoJSON input (`serde` feature)
//!  - Patch tiling helpers for overlapping patch based inference
//!
#![deny(warnings)]

mod bbox;
mod error;
#[cfg(feature = "serde")]
mod geojson;
mod geometry;
mod image;
mod mask;
mod options;
mod outline;
mod scanline;
mod text;
mod thin;
mod tile;
mod utils;

pub use bbox::{BoundingBox, MAX_RASTER_PIXELS};
pub use error::MaskError;
pub use geometry::{
    BBox, EPSILON, Geometry, GeometryKind, Pixel, Point, Ring, Scalar, scalar_fmt,
};
pub use image::{Image, ImageIter, ImageMut, ImageOwned, Raster, Shape, Size};
pub use mask::{MaskBuilder, PolygonMask, polygon_mask};
pub use options::{Label, MaskOptions};
pub use outline::{LineOutline, OutlineDrawer, draw_outline};
pub use scanline::{intersection_points, scanline_fill};
pub use text::decode_byte_literals;
pub use thin::{Thinner, ZhangSuenThinner};
pub use tile::{PaddedSize, overlapping_coords_2d, padded_size};
