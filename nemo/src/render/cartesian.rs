use crate::candidates::CandidateSet;
use crate::error::{NemoError, Result};
use crate::render::{ResultRenderer, Role};
use crate::search::RemotePoint;
use nemo_types::cartesian::{CartesianPoint3d, Point3};
use nemo_types::geo::impls::projection::SphereProjection;
use nemo_types::geo::impls::GeoPoint2d;
use nemo_types::geo::Projection;
use serde::Serialize;
use std::io::Write;

/// Writes all points as `role,x,y,z` CSV rows on a sphere, for 3d scatter plots.
pub struct CartesianDump<W: Write> {
    writer: csv::Writer<W>,
    projection: SphereProjection<GeoPoint2d, Point3>,
}

#[derive(Serialize)]
struct Row {
    role: Role,
    x: f64,
    y: f64,
    z: f64,
}

impl<W: Write> CartesianDump<W> {
    /// Creates a dump of points on the sphere of the given radius.
    pub fn new(writer: W, radius: f64) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            projection: SphereProjection::new(radius),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|err| {
            NemoError::FsIo(std::io::Error::new(
                err.error().kind(),
                err.error().to_string(),
            ))
        })
    }

    fn write_point(&mut self, role: Role, point: &GeoPoint2d) -> Result<()> {
        let Some(position) = self.projection.project(point) else {
            log::debug!("Skipping non-finite {} point {point:?}", role.as_str());
            return Ok(());
        };

        self.writer.serialize(Row {
            role,
            x: position.x(),
            y: position.y(),
            z: position.z(),
        })?;

        Ok(())
    }
}

impl<W: Write> ResultRenderer for CartesianDump<W> {
    fn render(
        &mut self,
        targets: &[GeoPoint2d],
        candidates: &CandidateSet,
        remote: &RemotePoint,
    ) -> Result<()> {
        for target in targets {
            self.write_point(Role::Target, target)?;
        }
        for candidate in candidates.iter() {
            self.write_point(Role::Candidate, candidate)?;
        }
        self.write_point(Role::Remote, &remote.point)?;
        self.writer.flush()?;

        Ok(())
    }
}
