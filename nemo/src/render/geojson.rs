use crate::candidates::CandidateSet;
use crate::error::Result;
use crate::render::{ResultRenderer, Role};
use crate::search::RemotePoint;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Position, Value};
use nemo_types::geo::impls::GeoPoint2d;
use nemo_types::geo::GeoPoint;
use std::io::Write;

/// Writes the result as a GeoJSON `FeatureCollection`.
///
/// The collection has three features: a `MultiPoint` of the targets, a `MultiPoint` of the
/// candidates and a `Point` of the winner. Each feature has a `role` property, the winner also has
/// `distance_km`.
#[derive(Debug)]
pub struct GeoJsonRenderer<W> {
    writer: W,
    pretty: bool,
}

impl<W: Write> GeoJsonRenderer<W> {
    /// Creates a renderer writing compact JSON.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Writes indented JSON.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Builds the feature collection without writing it.
    pub fn feature_collection(
        targets: &[GeoPoint2d],
        candidates: &CandidateSet,
        remote: &RemotePoint,
    ) -> FeatureCollection {
        let mut winner = JsonObject::new();
        winner.insert("distance_km".to_string(), remote.distance_km.into());

        let features = vec![
            feature(
                Value::MultiPoint(targets.iter().map(position).collect()),
                Role::Target,
                JsonObject::new(),
            ),
            feature(
                Value::MultiPoint(candidates.iter().map(position).collect()),
                Role::Candidate,
                JsonObject::new(),
            ),
            feature(Value::Point(position(&remote.point)), Role::Remote, winner),
        ];

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

impl<W: Write> ResultRenderer for GeoJsonRenderer<W> {
    fn render(
        &mut self,
        targets: &[GeoPoint2d],
        candidates: &CandidateSet,
        remote: &RemotePoint,
    ) -> Result<()> {
        let collection = Self::feature_collection(targets, candidates, remote);
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &collection)?;
        } else {
            serde_json::to_writer(&mut self.writer, &collection)?;
        }
        self.writer.flush()?;

        Ok(())
    }
}

fn position(point: &GeoPoint2d) -> Position {
    vec![point.lon(), point.lat()]
}

fn feature(value: Value, role: Role, mut properties: JsonObject) -> Feature {
    properties.insert("role".to_string(), role.as_str().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nemo_types::geo::NewGeoPoint;
    use serde_json::Value as JsonValue;

    fn result() -> (Vec<GeoPoint2d>, CandidateSet, RemotePoint) {
        let targets = vec![GeoPoint2d::latlon(10.0, 20.0), GeoPoint2d::latlon(-5.0, 170.0)];
        let mut candidates = CandidateSet::default();
        candidates.insert(GeoPoint2d::latlon(1.0, 2.0));
        candidates.insert(GeoPoint2d::latlon(3.0, 4.0));
        let remote = RemotePoint {
            point: GeoPoint2d::latlon(3.0, 4.0),
            distance_km: 1234.5,
        };

        (targets, candidates, remote)
    }

    #[test]
    fn writes_feature_collection() {
        let (targets, candidates, remote) = result();
        let mut renderer = GeoJsonRenderer::new(vec![]);
        renderer.render(&targets, &candidates, &remote).unwrap();

        let json: JsonValue = serde_json::from_slice(&renderer.into_inner()).unwrap();
        assert_eq!(json["type"], "FeatureCollection");

        let features = json["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);

        assert_eq!(features[0]["properties"]["role"], "target");
        assert_eq!(features[0]["geometry"]["type"], "MultiPoint");
        assert_eq!(
            features[0]["geometry"]["coordinates"][1],
            serde_json::json!([170.0, -5.0])
        );

        assert_eq!(features[1]["properties"]["role"], "candidate");
        assert_eq!(
            features[1]["geometry"]["coordinates"].as_array().unwrap().len(),
            2
        );

        assert_eq!(features[2]["properties"]["role"], "remote");
        assert_eq!(features[2]["properties"]["distance_km"], 1234.5);
        assert_eq!(
            features[2]["geometry"]["coordinates"],
            serde_json::json!([4.0, 3.0])
        );
    }

    #[test]
    fn parses_as_geojson() {
        let (targets, candidates, remote) = result();
        let mut renderer = GeoJsonRenderer::new(vec![]).pretty();
        renderer.render(&targets, &candidates, &remote).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let parsed = text.parse::<geojson::GeoJson>().unwrap();
        let collection = FeatureCollection::try_from(parsed).unwrap();
        assert_eq!(collection.features.len(), 3);
    }
}
