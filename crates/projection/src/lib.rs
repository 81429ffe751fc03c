//! Analytic grid-coordinate resolution.
//!
//! The BC-WRF grid is defined on a Lambert Conformal Conic projection, so
//! a lat/lon can be mapped to its grid cell with closed-form trigonometry
//! instead of scanning the reference table. Only the Lambert family is
//! implemented; the other projection codes the model format enumerates are
//! rejected rather than silently producing wrong coordinates, which would
//! corrupt downstream tile selection.

pub mod lambert;

pub use lambert::{LambertGrid, LambertGridParams};

use wrf_common::{GridError, GridResult};

/// Projection families enumerated by the model metadata. Integer codes
/// follow the WPS convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    LatLon,
    LambertConformal,
    PolarStereographic,
    Mercator,
}

impl ProjectionKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::LatLon),
            1 => Some(Self::LambertConformal),
            2 => Some(Self::PolarStereographic),
            3 => Some(Self::Mercator),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LatLon => "lat/lon",
            Self::LambertConformal => "lambert conformal",
            Self::PolarStereographic => "polar stereographic",
            Self::Mercator => "mercator",
        }
    }
}

/// Build the analytic resolver for a projection family. Everything except
/// Lambert Conformal fails with an unsupported-projection error.
pub fn resolver_for(kind: ProjectionKind) -> GridResult<LambertGrid> {
    match kind {
        ProjectionKind::LambertConformal => Ok(LambertGrid::bc_wrf()),
        other => Err(GridError::UnsupportedProjection(other.name().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_codes() {
        assert_eq!(
            ProjectionKind::from_code(1),
            Some(ProjectionKind::LambertConformal)
        );
        assert_eq!(
            ProjectionKind::from_code(2),
            Some(ProjectionKind::PolarStereographic)
        );
        assert_eq!(ProjectionKind::from_code(99), None);
    }

    #[test]
    fn test_only_lambert_is_supported() {
        assert!(resolver_for(ProjectionKind::LambertConformal).is_ok());
        for kind in [
            ProjectionKind::LatLon,
            ProjectionKind::PolarStereographic,
            ProjectionKind::Mercator,
        ] {
            let err = resolver_for(kind).unwrap_err();
            assert!(
                matches!(err, GridError::UnsupportedProjection(_)),
                "expected unsupported projection for {:?}, got {:?}",
                kind,
                err
            );
        }
    }
}
