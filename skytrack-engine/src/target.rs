//! Tracked-target model.
//!
//! A tagged variant with capability accessors instead of a class
//! hierarchy: the pipeline only ever asks a target for its catalog place
//! and, if it has them, its proper-motion parameters. Solar-system
//! variants carry externally supplied geocentric coordinates (ephemeris
//! lookup is a collaborator outside this crate) and exist so the
//! planetary-parallax extension point has something to key on.

use crate::coords::Equatorial;

/// Proper-motion parameters of a stellar target.
///
/// `ra_arcsec_per_year` is dRA/dt in arcseconds of RA per Julian year
/// (not multiplied by cos(dec)); `dec_arcsec_per_year` is dDec/dt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProperMotion {
    pub ra_arcsec_per_year: f64,
    pub dec_arcsec_per_year: f64,
}

/// The object the engine is tracking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Stellar {
        name: String,
        /// ICRS catalog place at epoch J2000.0.
        catalog: Equatorial,
        proper_motion: Option<ProperMotion>,
        parallax_arcsec: Option<f64>,
        radial_velocity_km_s: Option<f64>,
    },
    MajorPlanet {
        name: String,
        geocentric: Equatorial,
    },
    MinorPlanet {
        name: String,
        geocentric: Equatorial,
    },
    Comet {
        name: String,
        geocentric: Equatorial,
    },
}

impl Target {
    /// Convenience constructor for a fixed star with no proper motion.
    /// RA and Dec in degrees, ICRS.
    pub fn stellar(name: &str, ra_deg: f64, dec_deg: f64) -> Self {
        Self::Stellar {
            name: name.to_string(),
            catalog: Equatorial::from_degrees(ra_deg, dec_deg),
            proper_motion: None,
            parallax_arcsec: None,
            radial_velocity_km_s: None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stellar { name, .. }
            | Self::MajorPlanet { name, .. }
            | Self::MinorPlanet { name, .. }
            | Self::Comet { name, .. } => name,
        }
    }

    /// The coordinates the pipeline starts from: the ICRS catalog place
    /// for stars, the supplied geocentric place for solar-system bodies.
    pub fn catalog_place(&self) -> Equatorial {
        match self {
            Self::Stellar { catalog, .. } => *catalog,
            Self::MajorPlanet { geocentric, .. }
            | Self::MinorPlanet { geocentric, .. }
            | Self::Comet { geocentric, .. } => *geocentric,
        }
    }

    /// Proper-motion parameters, if this target type carries them.
    pub fn proper_motion_params(&self) -> Option<ProperMotion> {
        match self {
            Self::Stellar { proper_motion, .. } => *proper_motion,
            _ => None,
        }
    }

    /// Annual parallax in arcseconds, if known.
    pub fn parallax_arcsec(&self) -> Option<f64> {
        match self {
            Self::Stellar {
                parallax_arcsec, ..
            } => *parallax_arcsec,
            _ => None,
        }
    }
}
