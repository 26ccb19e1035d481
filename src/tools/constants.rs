//! Physical constants table.

use serde::Serialize;

/// A physical constant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantRecord {
    /// Canonical lowercase snake_case key.
    pub key: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

const fn constant(
    key: &'static str,
    name: &'static str,
    symbol: &'static str,
    value: f64,
    unit: &'static str,
    description: &'static str,
) -> ConstantRecord {
    ConstantRecord {
        key,
        name,
        symbol,
        value,
        unit,
        description,
    }
}

static CONSTANTS: &[ConstantRecord] = &[
    constant("speed_of_light", "Speed of Light", "c", 299792458.0, "m/s", "The speed of light in vacuum"),
    constant("gravitational_constant", "Gravitational Constant", "G", 6.67430e-11, "m³/kg⋅s²", "Universal gravitational constant"),
    constant("planck_constant", "Planck Constant", "h", 6.62607015e-34, "J⋅s", "Planck constant"),
    constant("reduced_planck_constant", "Reduced Planck Constant", "ℏ", 1.054571817e-34, "J⋅s", "Reduced Planck constant (h/2π)"),
    constant("boltzmann_constant", "Boltzmann Constant", "k_B", 1.380649e-23, "J/K", "Boltzmann constant"),
    constant("avogadro_number", "Avogadro Number", "N_A", 6.02214076e23, "mol⁻¹", "Avogadro constant"),
    constant("gas_constant", "Gas Constant", "R", 8.314462618, "J/(mol⋅K)", "Universal gas constant"),
    constant("elementary_charge", "Elementary Charge", "e", 1.602176634e-19, "C", "Elementary electric charge"),
    constant("electron_mass", "Electron Mass", "m_e", 9.1093837015e-31, "kg", "Rest mass of electron"),
    constant("proton_mass", "Proton Mass", "m_p", 1.67262192369e-27, "kg", "Rest mass of proton"),
    constant("neutron_mass", "Neutron Mass", "m_n", 1.67492749804e-27, "kg", "Rest mass of neutron"),
    constant("vacuum_permittivity", "Vacuum Permittivity", "ε₀", 8.8541878128e-12, "F/m", "Electric permittivity of free space"),
    constant("vacuum_permeability", "Vacuum Permeability", "μ₀", 1.25663706212e-6, "H/m", "Magnetic permeability of free space"),
    constant("earth_gravity", "Standard Gravity", "g", 9.80665, "m/s²", "Standard acceleration due to gravity on Earth"),
    constant("stefan_boltzmann_constant", "Stefan-Boltzmann Constant", "σ", 5.670374419e-8, "W/(m²⋅K⁴)", "Stefan-Boltzmann constant"),
    constant("fine_structure_constant", "Fine Structure Constant", "α", 7.2973525693e-3, "dimensionless", "Fine structure constant"),
];

/// Keyword phrases that identify a constant in a question. Several phrases
/// may map to the same key.
const ALIASES: &[(&str, &str)] = &[
    ("speed of light", "speed_of_light"),
    ("light speed", "speed_of_light"),
    ("gravitational constant", "gravitational_constant"),
    ("gravity constant", "gravitational_constant"),
    ("big g", "gravitational_constant"),
    ("planck", "planck_constant"),
    ("reduced planck", "reduced_planck_constant"),
    ("h-bar", "reduced_planck_constant"),
    ("hbar", "reduced_planck_constant"),
    ("boltzmann", "boltzmann_constant"),
    ("avogadro", "avogadro_number"),
    ("gas constant", "gas_constant"),
    ("elementary charge", "elementary_charge"),
    ("electron charge", "elementary_charge"),
    ("charge of an electron", "elementary_charge"),
    ("electron mass", "electron_mass"),
    ("mass of an electron", "electron_mass"),
    ("mass of electron", "electron_mass"),
    ("proton mass", "proton_mass"),
    ("mass of a proton", "proton_mass"),
    ("neutron mass", "neutron_mass"),
    ("mass of a neutron", "neutron_mass"),
    ("permittivity", "vacuum_permittivity"),
    ("epsilon naught", "vacuum_permittivity"),
    ("permeability", "vacuum_permeability"),
    ("standard gravity", "earth_gravity"),
    ("acceleration due to gravity", "earth_gravity"),
    ("gravitational acceleration", "earth_gravity"),
    ("earth gravity", "earth_gravity"),
    ("stefan-boltzmann", "stefan_boltzmann_constant"),
    ("stefan boltzmann", "stefan_boltzmann_constant"),
    ("fine structure", "fine_structure_constant"),
    ("fine-structure", "fine_structure_constant"),
];

/// Read-only access to the constants table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantsTable;

impl ConstantsTable {
    pub fn new() -> Self {
        Self
    }

    pub fn get(&self, key: &str) -> Option<&'static ConstantRecord> {
        let key = key.trim().to_lowercase();
        CONSTANTS.iter().find(|c| c.key == key)
    }

    pub fn all(&self) -> &'static [ConstantRecord] {
        CONSTANTS
    }

    pub fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        ALIASES
    }

    /// Substring search over name, symbol and description.
    pub fn search(&self, term: &str) -> Vec<&'static ConstantRecord> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        CONSTANTS
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&term)
                    || c.symbol.to_lowercase().contains(&term)
                    || c.description.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Case-insensitive symbol lookup. `g` and `G` collide, the first entry wins.
    pub fn by_symbol(&self, symbol: &str) -> Option<&'static ConstantRecord> {
        let symbol = symbol.trim().to_lowercase();
        CONSTANTS.iter().find(|c| c.symbol.to_lowercase() == symbol)
    }

    /// Every constant with at least one alias present in the query.
    ///
    /// Each constant appears once, in table order.
    pub fn identify(&self, query: &str) -> Vec<&'static ConstantRecord> {
        let query = query.to_lowercase();
        CONSTANTS
            .iter()
            .filter(|c| {
                ALIASES
                    .iter()
                    .any(|(alias, key)| *key == c.key && query.contains(alias))
            })
            .collect()
    }

    /// One-line display with the value in readable notation.
    pub fn format(&self, record: &ConstantRecord) -> String {
        format!(
            "{} ({}): {} {} - {}",
            record.name,
            record.symbol,
            format_value(record.value),
            record.unit,
            record.description
        )
    }
}

/// Scientific notation outside [0.001, 1e6], otherwise up to ten decimals.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() <= 1e15 {
        return format!("{:.0}", value);
    }
    if value.abs() < 0.001 || value.abs() > 1_000_000.0 {
        return super::calculator::scientific(value, 6);
    }
    let fixed = format!("{:.10}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_point_at_real_keys() {
        let table = ConstantsTable::new();
        for (alias, key) in table.aliases() {
            assert!(table.get(key).is_some(), "alias {alias} -> missing {key}");
        }
    }

    #[test]
    fn test_identify_deduplicates() {
        let table = ConstantsTable::new();
        let found = table.identify("Is light speed the same as the speed of light?");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "speed_of_light");
    }

    #[test]
    fn test_identify_multiple() {
        let table = ConstantsTable::new();
        let keys: Vec<_> = table
            .identify("Relate the Planck constant to the Boltzmann constant")
            .iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec!["planck_constant", "boltzmann_constant"]);
    }

    #[test]
    fn test_lookup_by_key_and_symbol() {
        let table = ConstantsTable::new();
        assert_eq!(table.get("Gas_Constant").unwrap().symbol, "R");
        assert_eq!(table.by_symbol("N_A").unwrap().key, "avogadro_number");
        assert!(table.get("warp_factor").is_none());
    }

    #[test]
    fn test_search() {
        let table = ConstantsTable::new();
        let keys: Vec<_> = table.search("mass").iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["electron_mass", "proton_mass", "neutron_mass"]);
        assert!(table.search("  ").is_empty());
    }

    #[test]
    fn test_format() {
        let table = ConstantsTable::new();
        let c = table.get("speed_of_light").unwrap();
        assert_eq!(
            table.format(c),
            "Speed of Light (c): 299792458 m/s - The speed of light in vacuum"
        );
        let g = table.get("earth_gravity").unwrap();
        assert!(table.format(g).contains("9.80665 m/s²"));
        let h = table.get("planck_constant").unwrap();
        assert!(table.format(h).contains("6.626070e-34"));
        let mu = table.get("vacuum_permeability").unwrap();
        assert!(table.format(mu).contains("1.256637e-06 H/m"));
        let na = table.get("avogadro_number").unwrap();
        assert!(table.format(na).contains("6.022141e+23"));
    }
}
