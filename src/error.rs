use crate::bbox::MAX_RASTER_PIXELS;
use std::{fmt, str::Utf8Error};

/// Error produced while building a mask or one of its collaborators
#[derive(Debug)]
pub enum MaskError {
    /// Empty ring list, ring with less than 3 vertices or zero area extent
    DegenerateGeometry { reason: String },
    /// Geometry bounds do not fit the integer pixel grid or the raster limit
    RasterTooLarge { width: u128, height: u128 },
    /// Geometry type other than `Polygon` or `MultiPolygon`
    UnsupportedGeometryType { name: String },
    /// Label is zero or does not fit into a pixel
    InvalidLabel { value: i64 },
    /// Inconsistent patch tiling parameters
    InvalidPatch { reason: String },
    /// Byte literal is not valid UTF-8
    InvalidText(Utf8Error),
    /// Outline drawer or thinner failed
    Capability { name: String, reason: String },
    /// GeoJSON document does not describe a polygonal geometry
    #[cfg(feature = "serde")]
    InvalidGeoJson { reason: String },
    /// JSON error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl MaskError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn patch(reason: impl Into<String>) -> Self {
        Self::InvalidPatch {
            reason: reason.into(),
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn geojson(reason: impl Into<String>) -> Self {
        Self::InvalidGeoJson {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MaskError::*;
        match self {
            DegenerateGeometry { reason } => write!(f, "degenerate geometry: {reason}"),
            RasterTooLarge { width, height } => write!(
                f,
                "raster {width}x{height} exceeds the limit of {MAX_RASTER_PIXELS} pixels"
            ),
            UnsupportedGeometryType { name } => {
                write!(f, "unsupported geometry type: {name:?}")
            }
            InvalidLabel { value } => write!(f, "label must be in 1..=255, got {value}"),
            InvalidPatch { reason } => write!(f, "invalid patch parameters: {reason}"),
            InvalidText(error) => write!(f, "byte literal is not valid text: {error}"),
            Capability { name, reason } => write!(f, "[{name}] {reason}"),
            #[cfg(feature = "serde")]
            InvalidGeoJson { reason } => write!(f, "invalid GeoJSON: {reason}"),
            #[cfg(feature = "serde")]
            Json(error) => write!(f, "{error}"),
        }
    }
}

impl From<Utf8Error> for MaskError {
    fn from(error: Utf8Error) -> Self {
        Self::InvalidText(error)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for MaskError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<MaskError> for std::io::Error {
    fn from(error: MaskError) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, error)
    }
}

impl std::error::Error for MaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MaskError::InvalidText(error) => Some(error),
            #[cfg(feature = "serde")]
            MaskError::Json(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = MaskError::degenerate("ring 0 has 2 vertices");
        assert_eq!(error.to_string(), "degenerate geometry: ring 0 has 2 vertices");

        let error = MaskError::InvalidLabel { value: 0 };
        assert_eq!(error.to_string(), "label must be in 1..=255, got 0");

        let error = MaskError::RasterTooLarge {
            width: 2,
            height: 3,
        };
        assert_eq!(
            error.to_string(),
            "raster 2x3 exceeds the limit of 1073741824 pixels"
        );

        let error = MaskError::Capability {
            name: "thin".to_owned(),
            reason: "out of memory".to_owned(),
        };
        assert_eq!(error.to_string(), "[thin] out of memory");
    }

    #[test]
    fn test_io_conversion() {
        let error: std::io::Error = MaskError::patch("window is empty").into();
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
    }
}
