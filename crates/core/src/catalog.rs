//! Formula catalog: the reference card behind every drill category.

use crate::model::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleStep {
    pub step: &'static str,
    pub explanation: &'static str,
}

/// Worked example shown on the reference screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryExample {
    pub problem: &'static str,
    pub steps: &'static [ExampleStep],
    pub answer: &'static str,
    pub tip: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub formula: &'static str,
    pub example: CategoryExample,
}

const fn step(step: &'static str, explanation: &'static str) -> ExampleStep {
    ExampleStep { step, explanation }
}

/// Catalog entry for `category`.
#[must_use]
pub fn info(category: Category) -> &'static CategoryInfo {
    match category {
        Category::HoursToDecimal => &HOURS_TO_DECIMAL,
        Category::ReciprocalHeading => &RECIPROCAL_HEADING,
        Category::Hydroplaning => &HYDROPLANING,
        Category::TempConversion => &TEMP_CONVERSION,
        Category::IsaDeviation => &ISA_DEVIATION,
        Category::PressureAltitude => &PRESSURE_ALTITUDE,
        Category::Crosswind => &CROSSWIND,
        Category::HeadwindTailwind => &HEADWIND_TAILWIND,
        Category::DriftAngle => &DRIFT_ANGLE,
        Category::UnitConversion => &UNIT_CONVERSION,
        Category::VisibilityRvr => &VISIBILITY_RVR,
        Category::FuelWeight => &FUEL_WEIGHT,
        Category::FuelDumping => &FUEL_DUMPING,
        Category::MagneticCompass => &MAGNETIC_COMPASS,
        Category::SixtyToOne => &SIXTY_TO_ONE,
        Category::StandardRateTurn => &STANDARD_RATE_TURN,
        Category::TurnRadius => &TURN_RADIUS,
        Category::TrueAirspeed => &TRUE_AIRSPEED,
        Category::TimeSpeedDistance => &TIME_SPEED_DISTANCE,
        Category::DescentPlanning => &DESCENT_PLANNING,
        Category::VisualDescentPoint => &VISUAL_DESCENT_POINT,
        Category::GlideDistance => &GLIDE_DISTANCE,
        Category::CloudBase => &CLOUD_BASE,
        Category::HoldingPattern => &HOLDING_PATTERN,
        Category::FuelEndurance => &FUEL_ENDURANCE,
        Category::SlantRange => &SLANT_RANGE,
        Category::CompassMath => &COMPASS_MATH,
    }
}

//
// ─── TIME & HEADINGS ───────────────────────────────────────────────────────────
//

const HOURS_TO_DECIMAL: CategoryInfo = CategoryInfo {
    name: "Hours to Decimal",
    description: "Convert time in hours:minutes to decimal hours",
    formula: "Every 6 minutes = 0.1 hour (e.g., 1:15 = 1.25 hours)",
    example: CategoryExample {
        problem: "Convert 2 hours 45 minutes to decimal hours",
        steps: &[
            step("Start with hours: 2", "The hours stay the same"),
            step("Convert 45 minutes", "Every 6 minutes = 0.1 hours"),
            step("45 ÷ 6 = 7.5 tenths", "45 minutes = 0.75 hours"),
            step("2 + 0.75 = 2.75", "Add hours + decimal minutes"),
        ],
        answer: "2.75 hours",
        tip: Some("Quick trick: 15 min = 0.25, 30 min = 0.50, 45 min = 0.75"),
    },
};

const RECIPROCAL_HEADING: CategoryInfo = CategoryInfo {
    name: "Reciprocal Heading",
    description: "Calculate the opposite heading (180° difference)",
    formula: "If heading < 180°: add 200, subtract 20. If heading > 180°: subtract 200, add 20",
    example: CategoryExample {
        problem: "What is the reciprocal of heading 070°?",
        steps: &[
            step("Heading is 070°", "Less than 180°, so add 200 and subtract 20"),
            step("070 + 200 = 270", "First, add 200"),
            step("270 - 20 = 250", "Then subtract 20"),
        ],
        answer: "250°",
        tip: Some("For 270°: 270 - 200 + 20 = 090°"),
    },
};

const MAGNETIC_COMPASS: CategoryInfo = CategoryInfo {
    name: "Magnetic Compass",
    description: "Compass error corrections for turns",
    formula: "UNOS: Undershoot North, Overshoot South. Lead = (bank ÷ 3) + latitude",
    example: CategoryExample {
        problem: "At 30°N latitude, rolling out on 360° (North). What lead point?",
        steps: &[
            step("Target is North (360°)", "UNOS says Undershoot North"),
            step("Normal lead point = 15°", "Standard rollout lead"),
            step("Add latitude: 15 + 30 = 45°", "Latitude compensation"),
            step("Undershoot by 45°", "Start rollout early"),
        ],
        answer: "Begin rollout at 315° (45° before target)",
        tip: Some(
            "UNOS = Undershoot North, Overshoot South. ANDS = Accelerate North, Decelerate South (E/W headings only)",
        ),
    },
};

const COMPASS_MATH: CategoryInfo = CategoryInfo {
    name: "Compass Math",
    description: "Add and subtract common turn angles from a heading",
    formula: "Right 90° = +100 - 10 | Left 90° = -100 + 10 | Wrap past 360° back to 001°-360°",
    example: CategoryExample {
        problem: "Heading 300°. What heading after a RIGHT 90° turn?",
        steps: &[
            step("300 + 100 = 400", "Add 100"),
            step("400 - 10 = 390", "Then subtract 10"),
            step("390 - 360 = 030", "Wrap past north"),
        ],
        answer: "030°",
        tip: Some("Adding 210° is the same as subtracting 150°; used for parallel hold entries"),
    },
};

const HOLDING_PATTERN: CategoryInfo = CategoryInfo {
    name: "Holding Pattern",
    description: "Outbound heading and timing corrections in a hold",
    formula: "Outbound heading = Reciprocal ± (3 × WCA) | Outbound time = 60 s ± 1 s/kt (0.5 s/kt quartering)",
    example: CategoryExample {
        problem: "Holding inbound 090°, WCA 5° with wind from the left. Outbound heading?",
        steps: &[
            step("090 + 180 = 270", "Outbound course is the reciprocal"),
            step("5 × 3 = 15°", "Triple the inbound correction"),
            step("270 + 15 = 285", "Wind from the left inbound is from the right outbound"),
        ],
        answer: "285°",
        tip: Some("Tailwind outbound: shorten the leg. Headwind outbound: lengthen it."),
    },
};

//
// ─── WIND ──────────────────────────────────────────────────────────────────────
//

const CROSSWIND: CategoryInfo = CategoryInfo {
    name: "Crosswind Component",
    description: "Calculate crosswind from wind angle",
    formula: "30° = 50%, 45° = 70%, 60° = 90%, 90° = 100% of wind speed",
    example: CategoryExample {
        problem: "Runway 09, wind 060° at 20 knots. What is the crosswind?",
        steps: &[
            step("Runway 09 = 090°", "Convert runway to heading"),
            step("090 - 060 = 30°", "Angle between runway and wind"),
            step("30° = 50% crosswind", "Use the crosswind table"),
            step("20 × 0.50 = 10", "Apply percentage to wind speed"),
        ],
        answer: "10 knots crosswind",
        tip: Some("30° is half, 45° is three quarters, 60° is almost all, 90° is full crosswind"),
    },
};

const HEADWIND_TAILWIND: CategoryInfo = CategoryInfo {
    name: "Headwind/Tailwind",
    description: "Calculate headwind or tailwind component",
    formula: "0° = 100%, 30° = 90%, 45° = 70%, 60° = 50%, 90° = 0% of wind speed",
    example: CategoryExample {
        problem: "Runway 27, wind 300° at 30 knots. What is the headwind?",
        steps: &[
            step("Runway 27 = 270°", "Convert runway to heading"),
            step("300 - 270 = 30°", "Angle off the nose"),
            step("30° = 90% headwind", "Use the headwind table"),
            step("30 × 0.90 = 27", "Apply percentage to wind speed"),
        ],
        answer: "27 knots headwind",
        tip: Some("Headwind percentages mirror the crosswind table"),
    },
};

const DRIFT_ANGLE: CategoryInfo = CategoryInfo {
    name: "Drift Angle",
    description: "Calculate drift angle from crosswind",
    formula: "Drift = (Crosswind × 60) ÷ TAS",
    example: CategoryExample {
        problem: "TAS 120 knots, crosswind 10 knots. What is drift angle?",
        steps: &[
            step("TAS ÷ 60 = 120 ÷ 60 = 2", "NM per minute"),
            step("1° drift per 2 knots crosswind", "At 120 kts TAS"),
            step("10 ÷ 2 = 5°", "Crosswind ÷ (TAS/60)"),
        ],
        answer: "5° drift",
        tip: Some("At 60 kts: 1° per 1 kt crosswind. At 120 kts: 1° per 2 kts."),
    },
};

const HYDROPLANING: CategoryInfo = CategoryInfo {
    name: "Hydroplaning Speed",
    description: "Calculate minimum hydroplaning speed",
    formula: "V = 9 × √(tire pressure in psi)",
    example: CategoryExample {
        problem: "Tire pressure is 49 psi. What is the hydroplaning speed?",
        steps: &[
            step("Find √49", "Square root of tire pressure"),
            step("√49 = 7", "7 × 7 = 49"),
            step("9 × 7 = 63", "Multiply by 9"),
        ],
        answer: "63 knots",
        tip: Some("Memorize common square roots: √36=6, √49=7, √64=8, √81=9, √100=10"),
    },
};

//
// ─── ATMOSPHERE ────────────────────────────────────────────────────────────────
//

const TEMP_CONVERSION: CategoryInfo = CategoryInfo {
    name: "Temperature Conversion",
    description: "Convert between Fahrenheit and Celsius",
    formula: "°F = (°C × 2) - 10% + 32  |  °C = (°F - 32 + 10%) ÷ 2",
    example: CategoryExample {
        problem: "Convert 20°C to Fahrenheit",
        steps: &[
            step("20 × 2 = 40", "Double the Celsius temperature"),
            step("10% of 40 = 4", "Calculate 10% to subtract"),
            step("40 - 4 = 36", "Subtract the 10%"),
            step("36 + 32 = 68", "Add 32"),
        ],
        answer: "68°F",
        tip: Some("Minus 10% turns the doubling into the real 1.8 multiplier"),
    },
};

const ISA_DEVIATION: CategoryInfo = CategoryInfo {
    name: "ISA Temperature",
    description: "Calculate ISA temperature and deviation",
    formula: "ISA = 15°C - (altitude in 1000s × 2). Deviation = Actual - ISA",
    example: CategoryExample {
        problem: "At FL250, actual temp is -40°C. What is ISA deviation?",
        steps: &[
            step("FL250 = 25,000 ft", "Convert flight level to altitude"),
            step("ISA = 15 - (25 × 2)", "Use the formula"),
            step("ISA = 15 - 50 = -35°C", "Standard temp at FL250"),
            step("Deviation = -40 - (-35)", "Actual minus ISA"),
            step("-40 + 35 = -5", "ISA -5°C (colder than standard)"),
        ],
        answer: "ISA -5°C",
        tip: Some("ISA drops 2°C per 1000 ft. Sea level = 15°C, 10,000 ft = -5°C"),
    },
};

const PRESSURE_ALTITUDE: CategoryInfo = CategoryInfo {
    name: "Pressure Altitude",
    description: "Calculate pressure altitude from altimeter setting",
    formula: "For each 0.01\" Hg difference from 29.92: ±10 feet",
    example: CategoryExample {
        problem: "Field elevation 2,000 ft, altimeter 30.42. What is pressure altitude?",
        steps: &[
            step("30.42 - 29.92 = 0.50", "Difference from standard"),
            step("0.50 × 100 = 50", "Convert to hundredths"),
            step("50 × 10 = 500 ft", "Each 0.01\" = 10 feet"),
            step("High pressure = lower altitude", "Subtract from field elevation"),
            step("2,000 - 500 = 1,500", "Pressure altitude"),
        ],
        answer: "1,500 ft",
        tip: Some("High to low, look out below"),
    },
};

const TRUE_AIRSPEED: CategoryInfo = CategoryInfo {
    name: "True Airspeed",
    description: "Calculate TAS from IAS and altitude",
    formula: "TAS = IAS + (IAS × Altitude in 1000s × 2%)",
    example: CategoryExample {
        problem: "IAS 150 knots at 10,000 ft. What is TAS?",
        steps: &[
            step("Altitude = 10 (thousands)", "10,000 ÷ 1000"),
            step("10 × 2% = 20%", "2% per thousand feet"),
            step("150 × 0.20 = 30", "20% of IAS"),
            step("150 + 30 = 180", "Add to IAS"),
        ],
        answer: "180 knots TAS",
        tip: Some("Add 2% to IAS for every 1,000 ft of altitude"),
    },
};

const CLOUD_BASE: CategoryInfo = CategoryInfo {
    name: "Cloud Base",
    description: "Estimate cloud base height from dew point spread",
    formula: "Cloud Base (ft AGL) = Dew Point Spread (°C) × 400",
    example: CategoryExample {
        problem: "Temperature is 25°C, dew point is 15°C. What is the cloud base?",
        steps: &[
            step("25 - 15 = 10°C", "Calculate the dew point spread"),
            step("10 × 400 = 4,000 ft", "Multiply spread by 400 ft per degree"),
        ],
        answer: "4,000 ft AGL",
        tip: Some("Small spread means low clouds or fog. Allow ±200 ft margin."),
    },
};

//
// ─── CONVERSIONS ───────────────────────────────────────────────────────────────
//

const UNIT_CONVERSION: CategoryInfo = CategoryInfo {
    name: "Unit Conversion",
    description: "Convert between nautical/statute miles, knots/mph",
    formula: "1 NM = 1.15 SM, 1 knot = 1.15 MPH, 60 knots = 1 NM/min",
    example: CategoryExample {
        problem: "Convert 100 NM to statute miles",
        steps: &[
            step("1 NM = 1.15 SM", "Conversion factor"),
            step("100 × 1.15 = 115", "Multiply NM by 1.15"),
        ],
        answer: "115 statute miles",
        tip: Some("NM to SM: add 15%. SM to NM: divide by 1.15"),
    },
};

const VISIBILITY_RVR: CategoryInfo = CategoryInfo {
    name: "Visibility to RVR",
    description: "Convert visibility (SM) to runway visual range (feet)",
    formula: "1/4 SM = 1600 ft, 1/2 SM = 2400 ft, 3/4 SM = 4000 ft, 1 SM = 5000 ft",
    example: CategoryExample {
        problem: "Visibility is 1/2 SM. What is the equivalent RVR?",
        steps: &[
            step("Look up 1/2 SM in table", "This is a memorization problem"),
            step("1/2 SM = 2400 ft RVR", "From the conversion table"),
        ],
        answer: "2400 feet",
        tip: Some("1/4=1600, 1/2=2400, 3/4=4000, 1=5000, 1.5=6000"),
    },
};

const FUEL_WEIGHT: CategoryInfo = CategoryInfo {
    name: "Fuel Weight",
    description: "Convert between gallons and pounds of fuel",
    formula: "Avgas: 6.0 lbs/gal | Jet A: 6.7 lbs/gal",
    example: CategoryExample {
        problem: "How much does 50 gallons of Jet A weigh?",
        steps: &[
            step("Jet A = 6.7 lbs/gal", "Use Jet A density"),
            step("50 × 6.7 = 335", "Multiply gallons by weight"),
        ],
        answer: "335 lbs",
        tip: Some("Avgas ≈ 6 lbs/gal, Jet A ≈ 7 lbs/gal for a quick estimate"),
    },
};

//
// ─── FUEL ──────────────────────────────────────────────────────────────────────
//

const FUEL_DUMPING: CategoryInfo = CategoryInfo {
    name: "Fuel Dumping",
    description: "Calculate fuel dump time or amount",
    formula: "Time = Fuel ÷ Dump Rate  |  Fuel = Dump Rate × Time",
    example: CategoryExample {
        problem: "Need to dump 3,000 lbs at 1,500 lbs/min. How long?",
        steps: &[
            step("Time = Fuel ÷ Rate", "Use the time formula"),
            step("3,000 ÷ 1,500 = 2", "Divide fuel by rate"),
        ],
        answer: "2 minutes",
        tip: Some("Amount = Rate × Time, rearranged as needed"),
    },
};

const FUEL_ENDURANCE: CategoryInfo = CategoryInfo {
    name: "Fuel Endurance",
    description: "Fuel required, endurance, and reserves for VFR and IFR flights",
    formula: "Endurance = Fuel ÷ Flow | Required = (Flight + Reserve) × Flow. Reserve: VFR day 30 min, night 45 min, IFR alternate + 45 min",
    example: CategoryExample {
        problem: "VFR day flight of 2:30 at 12 gph. How many gallons needed?",
        steps: &[
            step("2:30 = 2.5 hrs", "Convert flight time"),
            step("2.5 + 0.5 = 3.0 hrs", "Add 30 minute day reserve"),
            step("3.0 × 12 = 36", "Multiply by fuel flow"),
        ],
        answer: "36 gallons",
        tip: None,
    },
};

//
// ─── NAVIGATION ────────────────────────────────────────────────────────────────
//

const SIXTY_TO_ONE: CategoryInfo = CategoryInfo {
    name: "60-to-1 Rule",
    description: "Calculate arc distance or radials crossed",
    formula: "At 60 NM: 1° = 1 NM. Radials per mile = 60 ÷ DME",
    example: CategoryExample {
        problem: "At 30 DME, how many NM between radials 10° apart?",
        steps: &[
            step("At 60 NM: 1° = 1 NM", "The base 60-to-1 rule"),
            step("At 30 NM: 1° = 0.5 NM", "Half the distance = half the arc"),
            step("10° × 0.5 = 5 NM", "Arc distance"),
        ],
        answer: "5 NM",
        tip: Some("Arc = (DME × degrees) ÷ 60"),
    },
};

const STANDARD_RATE_TURN: CategoryInfo = CategoryInfo {
    name: "Standard Rate Turn",
    description: "Calculate bank angle for 3°/sec turn",
    formula: "Bank Angle = (TAS ÷ 10) × 1.5 (max 30° for IFR)",
    example: CategoryExample {
        problem: "TAS is 140 knots. What bank angle for standard rate?",
        steps: &[
            step("140 ÷ 10 = 14", "Divide TAS by 10"),
            step("14 × 1.5 = 21°", "Multiply by 1.5"),
        ],
        answer: "21° bank",
        tip: Some("Alternative: TAS ÷ 10 + 7 gives the same at 140 kts"),
    },
};

const TURN_RADIUS: CategoryInfo = CategoryInfo {
    name: "Turn Radius",
    description: "Calculate turn radius in nautical miles",
    formula: "Turn Radius = TAS ÷ 200",
    example: CategoryExample {
        problem: "TAS 180 knots. What is the turn radius?",
        steps: &[
            step("180 ÷ 200", "Divide TAS by 200"),
            step("180 ÷ 200 = 0.9 NM", "Turn radius"),
        ],
        answer: "0.9 NM radius",
        tip: Some("At 120 kts: 0.6 NM. At 240 kts: 1.2 NM."),
    },
};

const TIME_SPEED_DISTANCE: CategoryInfo = CategoryInfo {
    name: "Time-Speed-Distance",
    description: "Calculate time, speed, or distance",
    formula: "Distance = Ground Speed × Time. 60 knots = 1 NM/min",
    example: CategoryExample {
        problem: "Ground speed 150 knots, distance 50 NM. How long?",
        steps: &[
            step("150 kts = 2.5 NM/min", "150 ÷ 60 = 2.5"),
            step("50 ÷ 2.5 = 20 minutes", "Distance ÷ rate"),
        ],
        answer: "20 minutes",
        tip: Some("Convert GS to NM/min first, then divide distance by that rate"),
    },
};

const GLIDE_DISTANCE: CategoryInfo = CategoryInfo {
    name: "Glide Distance",
    description: "Calculate glide distance for engine-out scenarios",
    formula: "Glide Distance = (Altitude ÷ 6000) × Glide Ratio",
    example: CategoryExample {
        problem: "At 18,000 ft with 15:1 glide ratio. How far can you glide?",
        steps: &[
            step("18,000 ÷ 6,000 = 3", "6,000 ft is about 1 NM vertically"),
            step("3 × 15 = 45 NM", "Multiply vertical NM by glide ratio"),
        ],
        answer: "45 NM",
        tip: Some("Headwind reduces range, tailwind extends it"),
    },
};

const SLANT_RANGE: CategoryInfo = CategoryInfo {
    name: "Slant Range",
    description: "DME slant range versus ground distance",
    formula: "Over the station: DME = Altitude ÷ 6000 | Slant² = Ground² + (Altitude ÷ 6000)²",
    example: CategoryExample {
        problem: "Directly over a VOR at 12,000 ft. What does the DME read?",
        steps: &[step("12,000 ÷ 6,000 = 2", "6,000 ft is about 1 NM")],
        answer: "2.0 DME",
        tip: Some("Close to the station and high up, DME overstates ground distance"),
    },
};

//
// ─── APPROACH ──────────────────────────────────────────────────────────────────
//

const DESCENT_PLANNING: CategoryInfo = CategoryInfo {
    name: "Descent Planning",
    description: "Calculate top of descent, descent rate, and glidepath altitudes",
    formula: "3-to-1 Rule: Distance = Altitude to lose (in 1000s) × 3 | Rate = GS × 5",
    example: CategoryExample {
        problem: "Cruise at FL350, descend to 5,000 ft. Where to start?",
        steps: &[
            step("35,000 - 5,000 = 30,000 ft", "Altitude to lose"),
            step("30,000 ÷ 1000 = 30", "In thousands"),
            step("30 × 3 = 90 NM", "3 NM per 1000 ft"),
        ],
        answer: "Begin descent 90 NM out",
        tip: Some("Add 10 NM for deceleration on jets"),
    },
};

const VISUAL_DESCENT_POINT: CategoryInfo = CategoryInfo {
    name: "Visual Descent Point",
    description: "Calculate VDP distance or timing for non-precision approaches",
    formula: "VDP DME = (HAT ÷ 300) + Threshold DME | VDP Time = Approach Time - (HAT ÷ 10)",
    example: CategoryExample {
        problem: "MDA HAT is 400 ft, threshold at 1.5 DME. What is the VDP?",
        steps: &[
            step("HAT ÷ 300 = 400 ÷ 300", "Distance for a 3° descent (300 ft/NM)"),
            step("400 ÷ 300 = 1.3 NM", "Distance from threshold to begin descent"),
            step("1.3 + 1.5 = 2.8 DME", "Add threshold DME"),
        ],
        answer: "2.8 DME",
        tip: Some("Timing method: HAT ÷ 10 = seconds before MAP at 600 fpm"),
    },
};
