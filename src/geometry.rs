use crate::MaskError;
use std::{fmt, str::FromStr};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;

/// Format floats in a compact way
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Vertex of a polygon ring in annotation coordinates.
#[derive(Clone, Copy, PartialEq)]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        Ok(())
    }
}

impl Point {
    #[inline]
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(&self) -> Scalar {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub fn y(&self) -> Scalar {
        self.0[1]
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite()
    }

    /// Pixel containing this point, relative to `origin`
    #[inline]
    pub fn to_pixel(self, origin: Pixel) -> Pixel {
        Pixel {
            x: self.x().floor() as i64 - origin.x,
            y: self.y().floor() as i64 - origin.y,
        }
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl From<[Scalar; 2]> for Point {
    #[inline]
    fn from(xy: [Scalar; 2]) -> Self {
        Self(xy)
    }
}

/// Integer pixel location, `x` is a column and `y` is a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub x: i64,
    pub y: i64,
}

impl Pixel {
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Bounding box with sides directed along the axes
#[derive(Clone, Copy, PartialEq)]
pub struct BBox {
    /// Point with minimal x and y values
    min: Point,
    /// Point with maximum x and y values
    max: Point,
}

impl BBox {
    /// Construct bounding box which includes points `p0` and `p1`
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point([x0, y0]),
            max: Point([x1, y1]),
        }
    }

    /// Smallest bounding box containing all points, `None` if there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(BBox::new(first, first), |bbox, point| bbox.extend(*point)))
    }

    /// Point with minimum values of x and y coordinates
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// Point with maximum values of x and y coordinates
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// Width of the bounding box
    #[inline]
    pub fn width(&self) -> Scalar {
        self.max.x() - self.min.x()
    }

    /// Height of the bounding box
    #[inline]
    pub fn height(&self) -> Scalar {
        self.max.y() - self.min.y()
    }

    /// Extend bounding box so it would contain provided point
    pub fn extend(&self, point: Point) -> Self {
        let Point([x, y]) = point;
        Self {
            min: Point([self.min.x().min(x), self.min.y().min(y)]),
            max: Point([self.max.x().max(x), self.max.y().max(y)]),
        }
    }

    /// Create bounding box that spans both bbox-es
    pub fn union(&self, other: BBox) -> Self {
        self.extend(other.min).extend(other.max)
    }
}

impl fmt::Debug for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox x=")?;
        scalar_fmt(f, self.min.x())?;
        write!(f, ", y=")?;
        scalar_fmt(f, self.min.y())?;
        write!(f, ", w=")?;
        scalar_fmt(f, self.width())?;
        write!(f, ", h=")?;
        scalar_fmt(f, self.height())
    }
}

/// Implicitly closed sequence of vertices, the last vertex connects back to the first one
pub type Ring = Vec<Point>;

/// Kind of polygonal geometry an annotation carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = MaskError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Polygon" => Ok(GeometryKind::Polygon),
            "MultiPolygon" => Ok(GeometryKind::MultiPolygon),
            _ => Err(MaskError::UnsupportedGeometryType {
                name: name.to_owned(),
            }),
        }
    }
}

/// Polygonal annotation: a kind tag and all of its rings
///
/// Rings of a multi-polygon are flattened into a single list, outer rings
/// and holes alike. They all share one raster and the even-odd fill sorts
/// out which areas are inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    rings: Vec<Ring>,
}

impl Geometry {
    pub fn new(kind: GeometryKind, rings: Vec<Ring>) -> Self {
        Self { kind, rings }
    }

    /// Polygon made of an outer ring optionally followed by holes
    pub fn polygon<R, P>(rings: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        Self {
            kind: GeometryKind::Polygon,
            rings: collect_rings(rings),
        }
    }

    /// Multi-polygon, each item is a list of rings of one polygon
    pub fn multi_polygon<G, R, P>(polygons: impl IntoIterator<Item = G>) -> Self
    where
        G: IntoIterator<Item = R>,
        R: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        Self {
            kind: GeometryKind::MultiPolygon,
            rings: polygons.into_iter().flat_map(collect_rings).collect(),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }
}

fn collect_rings<R, P>(rings: impl IntoIterator<Item = R>) -> Vec<Ring>
where
    R: IntoIterator<Item = P>,
    P: Into<Point>,
{
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(Into::into).collect())
        .collect()
}
