//! Unit conversion over an enumerated set of direct rules.
//!
//! Unit names are normalized to short codes, then the ordered pair
//! `(from, to)` is looked up directly. There is no inverse derivation and no
//! chaining through a third unit: a pair without a rule simply has no answer.

use serde::Serialize;
use std::collections::HashMap;

type Rule = fn(f64) -> f64;

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub value: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} = {} {}",
            super::calculator::format_result(self.value),
            self.from,
            super::calculator::format_result(self.result),
            self.to
        )
    }
}

/// Long-form names and abbreviations mapped to canonical short codes.
const SYNONYMS: &[(&str, &str)] = &[
    // length
    ("meter", "m"),
    ("meters", "m"),
    ("metre", "m"),
    ("metres", "m"),
    ("kilometer", "km"),
    ("kilometers", "km"),
    ("kilometre", "km"),
    ("kilometres", "km"),
    ("centimeter", "cm"),
    ("centimeters", "cm"),
    ("centimetre", "cm"),
    ("centimetres", "cm"),
    ("millimeter", "mm"),
    ("millimeters", "mm"),
    ("millimetre", "mm"),
    ("millimetres", "mm"),
    ("mile", "mi"),
    ("miles", "mi"),
    ("foot", "ft"),
    ("feet", "ft"),
    ("inch", "in"),
    ("inches", "in"),
    ("yard", "yd"),
    ("yards", "yd"),
    // speed
    ("kph", "km/h"),
    ("kmh", "km/h"),
    ("kmph", "km/h"),
    ("km per hour", "km/h"),
    ("kilometer per hour", "km/h"),
    ("kilometers per hour", "km/h"),
    ("kilometres per hour", "km/h"),
    ("mps", "m/s"),
    ("m per second", "m/s"),
    ("meter per second", "m/s"),
    ("meters per second", "m/s"),
    ("metres per second", "m/s"),
    ("mile per hour", "mph"),
    ("miles per hour", "mph"),
    // temperature
    ("celsius", "c"),
    ("centigrade", "c"),
    ("°c", "c"),
    ("degc", "c"),
    ("fahrenheit", "f"),
    ("°f", "f"),
    ("degf", "f"),
    ("kelvin", "k"),
    ("kelvins", "k"),
    // mass
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("kgs", "kg"),
    ("gram", "g"),
    ("grams", "g"),
    ("milligram", "mg"),
    ("milligrams", "mg"),
    ("pound", "lb"),
    ("pounds", "lb"),
    ("lbs", "lb"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    // time
    ("sec", "s"),
    ("secs", "s"),
    ("second", "s"),
    ("seconds", "s"),
    ("minute", "min"),
    ("minutes", "min"),
    ("mins", "min"),
    ("hour", "h"),
    ("hours", "h"),
    ("hr", "h"),
    ("hrs", "h"),
    ("days", "day"),
    ("d", "day"),
    // energy
    ("joule", "j"),
    ("joules", "j"),
    ("kilojoule", "kj"),
    ("kilojoules", "kj"),
    ("calorie", "cal"),
    ("calories", "cal"),
    ("kilocalorie", "kcal"),
    ("kilocalories", "kcal"),
    ("electronvolt", "ev"),
    ("electronvolts", "ev"),
    ("electron volt", "ev"),
    ("electron volts", "ev"),
    ("kilowatt hour", "kwh"),
    ("kilowatt hours", "kwh"),
    ("kilowatt-hour", "kwh"),
    ("kilowatt-hours", "kwh"),
];

const EV_IN_J: f64 = 1.602176634e-19;
const CAL_IN_J: f64 = 4.184;
const KWH_IN_J: f64 = 3.6e6;

/// Direct conversion rules keyed by canonical `(from, to)`.
const RULES: &[((&str, &str), Rule)] = &[
    // length
    (("m", "km"), |x| x / 1000.0),
    (("km", "m"), |x| x * 1000.0),
    (("m", "cm"), |x| x * 100.0),
    (("cm", "m"), |x| x / 100.0),
    (("m", "mm"), |x| x * 1000.0),
    (("mm", "m"), |x| x / 1000.0),
    (("km", "mi"), |x| x / 1.609344),
    (("mi", "km"), |x| x * 1.609344),
    (("m", "ft"), |x| x / 0.3048),
    (("ft", "m"), |x| x * 0.3048),
    (("ft", "in"), |x| x * 12.0),
    (("in", "ft"), |x| x / 12.0),
    (("m", "in"), |x| x / 0.0254),
    (("in", "m"), |x| x * 0.0254),
    (("yd", "m"), |x| x * 0.9144),
    (("m", "yd"), |x| x / 0.9144),
    // speed
    (("km/h", "m/s"), |x| x * 1000.0 / 3600.0),
    (("m/s", "km/h"), |x| x * 3600.0 / 1000.0),
    (("mph", "km/h"), |x| x * 1.609344),
    (("km/h", "mph"), |x| x / 1.609344),
    (("mph", "m/s"), |x| x * 0.44704),
    (("m/s", "mph"), |x| x / 0.44704),
    // temperature
    (("c", "f"), |x| x * 9.0 / 5.0 + 32.0),
    (("f", "c"), |x| (x - 32.0) * 5.0 / 9.0),
    (("c", "k"), |x| x + 273.15),
    (("k", "c"), |x| x - 273.15),
    (("f", "k"), |x| (x - 32.0) * 5.0 / 9.0 + 273.15),
    (("k", "f"), |x| (x - 273.15) * 9.0 / 5.0 + 32.0),
    // mass
    (("kg", "g"), |x| x * 1000.0),
    (("g", "kg"), |x| x / 1000.0),
    (("g", "mg"), |x| x * 1000.0),
    (("mg", "g"), |x| x / 1000.0),
    (("kg", "lb"), |x| x / 0.45359237),
    (("lb", "kg"), |x| x * 0.45359237),
    (("lb", "oz"), |x| x * 16.0),
    (("oz", "lb"), |x| x / 16.0),
    // time
    (("h", "min"), |x| x * 60.0),
    (("min", "h"), |x| x / 60.0),
    (("min", "s"), |x| x * 60.0),
    (("s", "min"), |x| x / 60.0),
    (("h", "s"), |x| x * 3600.0),
    (("s", "h"), |x| x / 3600.0),
    (("day", "h"), |x| x * 24.0),
    (("h", "day"), |x| x / 24.0),
    // energy
    (("j", "kj"), |x| x / 1000.0),
    (("kj", "j"), |x| x * 1000.0),
    (("j", "cal"), |x| x / CAL_IN_J),
    (("cal", "j"), |x| x * CAL_IN_J),
    (("kcal", "kj"), |x| x * CAL_IN_J),
    (("kj", "kcal"), |x| x / CAL_IN_J),
    (("ev", "j"), |x| x * EV_IN_J),
    (("j", "ev"), |x| x / EV_IN_J),
    (("kwh", "j"), |x| x * KWH_IN_J),
    (("j", "kwh"), |x| x / KWH_IN_J),
];

/// Converter over the enumerated rule table.
pub struct UnitConverter {
    synonyms: HashMap<&'static str, &'static str>,
    rules: HashMap<(&'static str, &'static str), Rule>,
}

impl UnitConverter {
    pub fn new() -> Self {
        Self {
            synonyms: SYNONYMS.iter().copied().collect(),
            rules: RULES.iter().copied().collect(),
        }
    }

    /// Normalize a unit name to its canonical short code.
    ///
    /// Unknown names are returned lowercased and trimmed so they can still
    /// match a rule written with that spelling.
    pub fn normalize(&self, unit: &str) -> String {
        let cleaned = unit
            .trim()
            .trim_end_matches(['.', '?', '!', ','])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let cleaned = cleaned
            .strip_prefix("degrees ")
            .or_else(|| cleaned.strip_prefix("degree "))
            .unwrap_or(&cleaned)
            .to_string();

        match self.synonyms.get(cleaned.as_str()) {
            Some(code) => code.to_string(),
            None => cleaned,
        }
    }

    /// Convert `value` between two units, or `None` when no direct rule exists.
    pub fn convert(&self, value: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
        let from = self.normalize(from_unit);
        let to = self.normalize(to_unit);
        self.rules
            .get(&(from.as_str(), to.as_str()))
            .map(|rule| rule(value))
    }

    /// Like [`convert`](Self::convert) but keeps the normalized units for display.
    pub fn conversion(&self, value: f64, from_unit: &str, to_unit: &str) -> Option<Conversion> {
        let result = self.convert(value, from_unit, to_unit)?;
        Some(Conversion {
            value,
            from: self.normalize(from_unit),
            to: self.normalize(to_unit),
            result,
        })
    }

    /// Whether `unit` normalizes to a code used by any rule.
    pub fn is_known_unit(&self, unit: &str) -> bool {
        let code = self.normalize(unit);
        self.rules.keys().any(|(from, to)| *from == code || *to == code)
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}
