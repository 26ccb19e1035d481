//! Physics formula catalog.

use serde::Serialize;

/// A formula with a legend for its variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaRecord {
    pub key: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
    /// Symbol and meaning, in display order.
    pub variables: &'static [(&'static str, &'static str)],
    pub category: &'static str,
}

static FORMULAS: &[FormulaRecord] = &[
    FormulaRecord {
        key: "newton_second_law",
        formula: "F = m * a",
        description: "Force equals mass times acceleration (Newton's Second Law)",
        variables: &[("F", "Force (N)"), ("m", "Mass (kg)"), ("a", "Acceleration (m/s²)")],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "kinetic_energy",
        formula: "KE = (1/2) * m * v^2",
        description: "Kinetic energy of a moving object",
        variables: &[("KE", "Kinetic Energy (J)"), ("m", "Mass (kg)"), ("v", "Velocity (m/s)")],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "potential_energy",
        formula: "PE = m * g * h",
        description: "Gravitational potential energy",
        variables: &[
            ("PE", "Potential Energy (J)"),
            ("m", "Mass (kg)"),
            ("g", "Acceleration due to gravity (m/s²)"),
            ("h", "Height (m)"),
        ],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "work_energy",
        formula: "W = F * d * cos(θ)",
        description: "Work done by a force over a displacement",
        variables: &[
            ("W", "Work (J)"),
            ("F", "Force (N)"),
            ("d", "Displacement (m)"),
            ("θ", "Angle between force and displacement (degrees)"),
        ],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "power",
        formula: "P = W / t",
        description: "Power as work done per unit time",
        variables: &[("P", "Power (W)"), ("W", "Work (J)"), ("t", "Time (s)")],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "momentum",
        formula: "p = m * v",
        description: "Linear momentum of a moving object",
        variables: &[("p", "Momentum (kg⋅m/s)"), ("m", "Mass (kg)"), ("v", "Velocity (m/s)")],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "ohms_law",
        formula: "V = I * R",
        description: "Ohm's law relating voltage, current, and resistance",
        variables: &[("V", "Voltage (V)"), ("I", "Current (A)"), ("R", "Resistance (Ω)")],
        category: "Electromagnetism",
    },
    FormulaRecord {
        key: "wave_equation",
        formula: "v = f * λ",
        description: "Wave speed as frequency times wavelength",
        variables: &[("v", "Wave speed (m/s)"), ("f", "Frequency (Hz)"), ("λ", "Wavelength (m)")],
        category: "Waves",
    },
    FormulaRecord {
        key: "gravitational_force",
        formula: "F = G * m₁ * m₂ / r^2",
        description: "Universal law of gravitation",
        variables: &[
            ("F", "Gravitational force (N)"),
            ("G", "Gravitational constant (N⋅m²/kg²)"),
            ("m₁,m₂", "Masses (kg)"),
            ("r", "Distance between masses (m)"),
        ],
        category: "Gravitation",
    },
    FormulaRecord {
        key: "impulse",
        formula: "J = F * Δt",
        description: "Impulse as force applied over time",
        variables: &[("J", "Impulse (N⋅s)"), ("F", "Force (N)"), ("Δt", "Time interval (s)")],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "projectile_range",
        formula: "R = (v₀^2 * sin(2θ)) / g",
        description: "Range of a projectile launched from and landing on level ground",
        variables: &[
            ("R", "Range (m)"),
            ("v₀", "Initial velocity (m/s)"),
            ("θ", "Launch angle (degrees)"),
            ("g", "Acceleration due to gravity (m/s²)"),
        ],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "hookes_law",
        formula: "F = -k * x",
        description: "Hooke's law for spring force",
        variables: &[
            ("F", "Force (N)"),
            ("k", "Spring constant (N/m)"),
            ("x", "Displacement from equilibrium (m)"),
        ],
        category: "Mechanics",
    },
    FormulaRecord {
        key: "electric_field",
        formula: "E = k * q / r^2",
        description: "Electric field due to a point charge",
        variables: &[
            ("E", "Electric field (N/C)"),
            ("k", "Coulomb constant (N⋅m²/C²)"),
            ("q", "Charge (C)"),
            ("r", "Distance (m)"),
        ],
        category: "Electromagnetism",
    },
    FormulaRecord {
        key: "snells_law",
        formula: "n₁ * sin(θ₁) = n₂ * sin(θ₂)",
        description: "Snell's law for refraction",
        variables: &[
            ("n₁,n₂", "Refractive indices"),
            ("θ₁,θ₂", "Angles of incidence and refraction (degrees)"),
        ],
        category: "Optics",
    },
];

/// Read-only access to the formula catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaCatalog;

impl FormulaCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn all(&self) -> &'static [FormulaRecord] {
        FORMULAS
    }

    pub fn get(&self, key: &str) -> Option<&'static FormulaRecord> {
        let key = key.trim().to_lowercase();
        FORMULAS.iter().find(|f| f.key == key)
    }

    /// Every formula where any whitespace-separated query word is a substring
    /// of its key, description, category, or a variable symbol or meaning.
    ///
    /// Results keep catalog order.
    pub fn search(&self, query: &str) -> Vec<&'static FormulaRecord> {
        let query = query.trim().to_lowercase();
        let words: Vec<&str> = query.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        FORMULAS
            .iter()
            .filter(|f| words.iter().any(|word| matches_word(f, word)))
            .collect()
    }

    pub fn format(&self, record: &FormulaRecord) -> String {
        let legend = record
            .variables
            .iter()
            .map(|(symbol, meaning)| format!("{} = {}", symbol, meaning))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}: {} ({}; {})",
            record.description, record.formula, record.category, legend
        )
    }
}

fn matches_word(record: &FormulaRecord, word: &str) -> bool {
    record.key.contains(word)
        || record.description.to_lowercase().contains(word)
        || record.category.to_lowercase().contains(word)
        || record
            .variables
            .iter()
            .any(|(symbol, meaning)| {
                symbol.to_lowercase().contains(word) || meaning.to_lowercase().contains(word)
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kinetic_energy_by_token() {
        let catalog = FormulaCatalog::new();
        let keys: Vec<_> = catalog
            .search("what is kinetic energy")
            .iter()
            .map(|f| f.key)
            .collect();
        assert!(keys.contains(&"kinetic_energy"));
    }

    #[test]
    fn test_search_is_any_word() {
        let catalog = FormulaCatalog::new();
        let keys: Vec<_> = catalog.search("refraction xyzzy").iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["snells_law"]);
    }

    #[test]
    fn test_search_matches_variables() {
        let catalog = FormulaCatalog::new();
        let keys: Vec<_> = catalog.search("resistance").iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["ohms_law"]);
        assert!(catalog.search("wavelength").iter().any(|f| f.key == "wave_equation"));
    }

    #[test]
    fn test_search_empty_and_unmatched() {
        let catalog = FormulaCatalog::new();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("xyzzy").is_empty());
    }

    #[test]
    fn test_get_and_format() {
        let catalog = FormulaCatalog::new();
        let ohm = catalog.get("OHMS_LAW").unwrap();
        assert_eq!(
            catalog.format(ohm),
            "Ohm's law relating voltage, current, and resistance: V = I * R \
             (Electromagnetism; V = Voltage (V), I = Current (A), R = Resistance (Ω))"
        );
    }
}
