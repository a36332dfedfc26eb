//! Reading polygonal geometries from GeoJSON
use crate::{Geometry, GeometryKind, MaskError, Point, Ring};
use serde_json::Value;
use std::str::FromStr;

impl Geometry {
    /// Construct geometry from a GeoJSON `Feature` or a bare geometry object
    ///
    /// Only `Polygon` and `MultiPolygon` are supported, extra position
    /// components (e.g. elevation) are ignored.
    pub fn from_geojson(value: &Value) -> Result<Self, MaskError> {
        let object = value
            .as_object()
            .ok_or_else(|| MaskError::geojson("expected an object"))?;
        let name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| MaskError::geojson("missing `type`"))?;
        if name == "Feature" {
            let geometry = object
                .get("geometry")
                .filter(|geometry| !geometry.is_null())
                .ok_or_else(|| MaskError::geojson("feature has no geometry"))?;
            return Self::from_geojson(geometry);
        }

        let kind: GeometryKind = name.parse()?;
        let coords = object
            .get("coordinates")
            .ok_or_else(|| MaskError::geojson("missing `coordinates`"))?;
        let rings = match kind {
            GeometryKind::Polygon => parse_polygon(coords)?,
            GeometryKind::MultiPolygon => {
                let mut rings = Vec::new();
                for polygon in array(coords, "multi-polygon")? {
                    rings.extend(parse_polygon(polygon)?);
                }
                rings
            }
        };
        tracing::trace!("[geojson] kind={} rings={}", kind, rings.len());
        Ok(Geometry::new(kind, rings))
    }
}

impl FromStr for Geometry {
    type Err = MaskError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_geojson(&value)
    }
}

fn array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, MaskError> {
    value
        .as_array()
        .ok_or_else(|| MaskError::geojson(format!("{} must be an array", what)))
}

fn parse_polygon(value: &Value) -> Result<Vec<Ring>, MaskError> {
    array(value, "polygon")?.iter().map(parse_ring).collect()
}

fn parse_ring(value: &Value) -> Result<Ring, MaskError> {
    array(value, "ring")?.iter().map(parse_position).collect()
}

fn parse_position(value: &Value) -> Result<Point, MaskError> {
    match array(value, "position")?.as_slice() {
        [x, y, ..] => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(MaskError::geojson(format!(
                "position components must be numbers: {}",
                value
            ))),
        },
        _ => Err(MaskError::geojson(format!(
            "position must have at least two components: {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_polygon() -> Result<(), MaskError> {
        let geometry: Geometry = r#"{
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                [[2.5, 2.5], [5, 2.5, 100], [5, 5]]
            ]
        }"#
        .parse()?;
        assert_eq!(geometry.kind(), GeometryKind::Polygon);
        assert_eq!(geometry.rings().len(), 2);
        assert_eq!(geometry.rings()[0].len(), 5);
        assert_eq!(geometry.rings()[1][1], Point::new(5.0, 2.5));
        Ok(())
    }

    #[test]
    fn test_feature_multi_polygon() -> Result<(), MaskError> {
        let feature = json!({
            "type": "Feature",
            "properties": {"label": 3},
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[0, 0], [4, 0], [4, 4]]],
                    [[[10, 0], [14, 0], [14, 4]], [[11, 1], [12, 1], [12, 2]]]
                ]
            }
        });
        let geometry = Geometry::from_geojson(&feature)?;
        assert_eq!(geometry.kind(), GeometryKind::MultiPolygon);
        assert_eq!(geometry.rings().len(), 3);
        assert_eq!(geometry.rings()[2][0], Point::new(11.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_errors() {
        let unsupported = json!({"type": "LineString", "coordinates": [[0, 0], [1, 1]]});
        match Geometry::from_geojson(&unsupported) {
            Err(MaskError::UnsupportedGeometryType { name }) => assert_eq!(name, "LineString"),
            result => panic!("unexpected result: {:?}", result),
        }

        let invalid = [
            json!([1, 2, 3]),
            json!({"coordinates": []}),
            json!({"type": "Polygon"}),
            json!({"type": "Polygon", "coordinates": [[[0, 0], [1]]]}),
            json!({"type": "Polygon", "coordinates": [[[0, "1"], [1, 1], [2, 0]]]}),
            json!({"type": "MultiPolygon", "coordinates": {}}),
            json!({"type": "Feature", "geometry": null}),
        ];
        for value in invalid.iter() {
            assert!(
                matches!(
                    Geometry::from_geojson(value),
                    Err(MaskError::InvalidGeoJson { .. })
                ),
                "{}",
                value
            );
        }

        assert!(matches!(
            "{not json".parse::<Geometry>(),
            Err(MaskError::Json(_))
        ));
    }
}
