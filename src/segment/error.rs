use thiserror::Error;

/// Why a spline produced no segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentBuildError {
    /// The config has no default entry, or the default entry has no mesh.
    #[error("no default mesh is configured")]
    MissingBaseMesh,

    /// Fewer than two control points means there is no interval to fill.
    #[error("spline has {point_count} control point(s), at least 2 are needed")]
    DegenerateCurve { point_count: usize },
}

/// Failure to bend a source mesh onto a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeformError {
    #[error("source mesh has no Float32x3 position attribute")]
    MissingPositions,
}
