use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown problem category: {0}")]
pub struct ParseCategoryError(pub String);

/// Closed set of drill categories.
///
/// Every variant has exactly one generator and one catalog entry; both are
/// dispatched with exhaustive `match`es so adding a variant without them does
/// not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    HoursToDecimal,
    ReciprocalHeading,
    Hydroplaning,
    TempConversion,
    IsaDeviation,
    PressureAltitude,
    Crosswind,
    HeadwindTailwind,
    DriftAngle,
    UnitConversion,
    VisibilityRvr,
    FuelWeight,
    FuelDumping,
    MagneticCompass,
    SixtyToOne,
    StandardRateTurn,
    TurnRadius,
    TrueAirspeed,
    TimeSpeedDistance,
    DescentPlanning,
    VisualDescentPoint,
    GlideDistance,
    CloudBase,
    HoldingPattern,
    FuelEndurance,
    SlantRange,
    CompassMath,
}

impl Category {
    pub const ALL: [Category; 27] = [
        Category::HoursToDecimal,
        Category::ReciprocalHeading,
        Category::Hydroplaning,
        Category::TempConversion,
        Category::IsaDeviation,
        Category::PressureAltitude,
        Category::Crosswind,
        Category::HeadwindTailwind,
        Category::DriftAngle,
        Category::UnitConversion,
        Category::VisibilityRvr,
        Category::FuelWeight,
        Category::FuelDumping,
        Category::MagneticCompass,
        Category::SixtyToOne,
        Category::StandardRateTurn,
        Category::TurnRadius,
        Category::TrueAirspeed,
        Category::TimeSpeedDistance,
        Category::DescentPlanning,
        Category::VisualDescentPoint,
        Category::GlideDistance,
        Category::CloudBase,
        Category::HoldingPattern,
        Category::FuelEndurance,
        Category::SlantRange,
        Category::CompassMath,
    ];

    /// Stable kebab-case identifier used in storage and on the command line.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Category::HoursToDecimal => "hours-to-decimal",
            Category::ReciprocalHeading => "reciprocal-heading",
            Category::Hydroplaning => "hydroplaning",
            Category::TempConversion => "temp-conversion",
            Category::IsaDeviation => "isa-deviation",
            Category::PressureAltitude => "pressure-altitude",
            Category::Crosswind => "crosswind",
            Category::HeadwindTailwind => "headwind-tailwind",
            Category::DriftAngle => "drift-angle",
            Category::UnitConversion => "unit-conversion",
            Category::VisibilityRvr => "visibility-rvr",
            Category::FuelWeight => "fuel-weight",
            Category::FuelDumping => "fuel-dumping",
            Category::MagneticCompass => "magnetic-compass",
            Category::SixtyToOne => "sixty-to-one",
            Category::StandardRateTurn => "standard-rate-turn",
            Category::TurnRadius => "turn-radius",
            Category::TrueAirspeed => "true-airspeed",
            Category::TimeSpeedDistance => "time-speed-distance",
            Category::DescentPlanning => "descent-planning",
            Category::VisualDescentPoint => "visual-descent-point",
            Category::GlideDistance => "glide-distance",
            Category::CloudBase => "cloud-base",
            Category::HoldingPattern => "holding-pattern",
            Category::FuelEndurance => "fuel-endurance",
            Category::SlantRange => "slant-range",
            Category::CompassMath => "compass-math",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.slug())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == needle)
            .ok_or_else(|| ParseCategoryError(needle.to_string()))
    }
}
