//! Output of the search results for external viewers.
//!
//! Renderers receive everything they draw as arguments and keep no state between calls other than
//! their output.

use crate::candidates::CandidateSet;
use crate::error::Result;
use crate::search::RemotePoint;
use nemo_types::geo::impls::GeoPoint2d;
use serde::Serialize;

mod cartesian;
mod geojson;

pub use cartesian::CartesianDump;
pub use self::geojson::GeoJsonRenderer;

/// Writes targets, candidates and the winner of a search somewhere.
pub trait ResultRenderer {
    /// Renders one result.
    fn render(
        &mut self,
        targets: &[GeoPoint2d],
        candidates: &CandidateSet,
        remote: &RemotePoint,
    ) -> Result<()>;
}

/// What a rendered point stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Input point.
    Target,
    /// Voronoi vertex considered by the search.
    Candidate,
    /// The most remote point.
    Remote,
}

impl Role {
    /// Name of the role used in the output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Target => "target",
            Role::Candidate => "candidate",
            Role::Remote => "remote",
        }
    }
}
