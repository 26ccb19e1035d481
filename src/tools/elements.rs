//! Periodic table lookup.

use serde::Serialize;

/// A chemical element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRecord {
    pub name: &'static str,
    pub symbol: &'static str,
    pub atomic_number: u8,
    /// Standard atomic weight in u.
    pub atomic_mass: f64,
    /// IUPAC group; `None` for the f-block.
    pub group: Option<u8>,
    pub period: u8,
    pub electron_configuration: &'static str,
    pub category: &'static str,
    /// State at standard temperature and pressure.
    pub physical_state: &'static str,
    pub description: &'static str,
}

#[allow(clippy::too_many_arguments)]
const fn element(
    name: &'static str,
    symbol: &'static str,
    atomic_number: u8,
    atomic_mass: f64,
    group: Option<u8>,
    period: u8,
    electron_configuration: &'static str,
    category: &'static str,
    physical_state: &'static str,
    description: &'static str,
) -> ElementRecord {
    ElementRecord {
        name,
        symbol,
        atomic_number,
        atomic_mass,
        group,
        period,
        electron_configuration,
        category,
        physical_state,
        description,
    }
}

static ELEMENTS: &[ElementRecord] = &[
    element("Hydrogen", "H", 1, 1.008, Some(1), 1, "1s¹", "nonmetal", "gas", "A colorless, odorless gas, highly reactive and the most abundant element in the universe."),
    element("Helium", "He", 2, 4.0026, Some(18), 1, "1s²", "noble gas", "gas", "A noble gas, inert and used in balloons and cryogenics."),
    element("Lithium", "Li", 3, 6.94, Some(1), 2, "[He] 2s¹", "alkali metal", "solid", "A soft, silvery alkali metal used in rechargeable batteries."),
    element("Beryllium", "Be", 4, 9.0122, Some(2), 2, "[He] 2s²", "alkaline earth metal", "solid", "A hard, grayish alkaline earth metal."),
    element("Boron", "B", 5, 10.81, Some(13), 2, "[He] 2s² 2p¹", "metalloid", "solid", "A metalloid used in semiconductors and borosilicate glass."),
    element("Carbon", "C", 6, 12.011, Some(14), 2, "[He] 2s² 2p²", "nonmetal", "solid", "Basis of organic chemistry, exists as graphite and diamond."),
    element("Nitrogen", "N", 7, 14.007, Some(15), 2, "[He] 2s² 2p³", "nonmetal", "gas", "A colorless gas that makes up 78% of Earth's atmosphere."),
    element("Oxygen", "O", 8, 15.999, Some(16), 2, "[He] 2s² 2p⁴", "nonmetal", "gas", "A reactive gas essential for respiration and combustion."),
    element("Fluorine", "F", 9, 18.998, Some(17), 2, "[He] 2s² 2p⁵", "halogen", "gas", "The most electronegative element, a pale yellow toxic gas."),
    element("Neon", "Ne", 10, 20.180, Some(18), 2, "[He] 2s² 2p⁶", "noble gas", "gas", "A noble gas that glows reddish-orange in discharge tubes."),
    element("Sodium", "Na", 11, 22.990, Some(1), 3, "[Ne] 3s¹", "alkali metal", "solid", "A soft, highly reactive metal found in table salt."),
    element("Magnesium", "Mg", 12, 24.305, Some(2), 3, "[Ne] 3s²", "alkaline earth metal", "solid", "A light metal that burns with a bright white flame."),
    element("Aluminum", "Al", 13, 26.982, Some(13), 3, "[Ne] 3s² 3p¹", "post-transition metal", "solid", "A light, corrosion-resistant metal widely used in packaging and aircraft."),
    element("Silicon", "Si", 14, 28.085, Some(14), 3, "[Ne] 3s² 3p²", "metalloid", "solid", "A metalloid at the heart of modern electronics."),
    element("Phosphorus", "P", 15, 30.974, Some(15), 3, "[Ne] 3s² 3p³", "nonmetal", "solid", "A reactive nonmetal essential to DNA and ATP."),
    element("Sulfur", "S", 16, 32.06, Some(16), 3, "[Ne] 3s² 3p⁴", "nonmetal", "solid", "A yellow nonmetal used to make sulfuric acid."),
    element("Chlorine", "Cl", 17, 35.45, Some(17), 3, "[Ne] 3s² 3p⁵", "halogen", "gas", "A greenish-yellow toxic gas used in water treatment."),
    element("Argon", "Ar", 18, 39.948, Some(18), 3, "[Ne] 3s² 3p⁶", "noble gas", "gas", "An inert gas that makes up about 1% of the atmosphere."),
    element("Potassium", "K", 19, 39.098, Some(1), 4, "[Ar] 4s¹", "alkali metal", "solid", "A soft alkali metal vital for nerve function."),
    element("Calcium", "Ca", 20, 40.078, Some(2), 4, "[Ar] 4s²", "alkaline earth metal", "solid", "An alkaline earth metal found in bones, teeth and limestone."),
    element("Scandium", "Sc", 21, 44.956, Some(3), 4, "[Ar] 3d¹ 4s²", "transition metal", "solid", "A light transition metal used in aerospace alloys."),
    element("Titanium", "Ti", 22, 47.867, Some(4), 4, "[Ar] 3d² 4s²", "transition metal", "solid", "A strong, light, corrosion-resistant metal."),
    element("Vanadium", "V", 23, 50.942, Some(5), 4, "[Ar] 3d³ 4s²", "transition metal", "solid", "A hard transition metal used to strengthen steel."),
    element("Chromium", "Cr", 24, 51.996, Some(6), 4, "[Ar] 3d⁵ 4s¹", "transition metal", "solid", "A shiny, hard metal used in stainless steel and plating."),
    element("Manganese", "Mn", 25, 54.938, Some(7), 4, "[Ar] 3d⁵ 4s²", "transition metal", "solid", "A brittle transition metal important in steelmaking."),
    element("Iron", "Fe", 26, 55.845, Some(8), 4, "[Ar] 3d⁶ 4s²", "transition metal", "solid", "The main component of steel and of Earth's core."),
    element("Cobalt", "Co", 27, 58.933, Some(9), 4, "[Ar] 3d⁷ 4s²", "transition metal", "solid", "A ferromagnetic metal used in magnets and batteries."),
    element("Nickel", "Ni", 28, 58.693, Some(10), 4, "[Ar] 3d⁸ 4s²", "transition metal", "solid", "A corrosion-resistant metal used in coins and alloys."),
    element("Copper", "Cu", 29, 63.546, Some(11), 4, "[Ar] 3d¹⁰ 4s¹", "transition metal", "solid", "A reddish metal and excellent electrical conductor."),
    element("Zinc", "Zn", 30, 65.38, Some(12), 4, "[Ar] 3d¹⁰ 4s²", "transition metal", "solid", "A bluish-white metal used to galvanize steel."),
    element("Silver", "Ag", 47, 107.87, Some(11), 5, "[Kr] 4d¹⁰ 5s¹", "transition metal", "solid", "The best electrical conductor of all metals."),
    element("Tin", "Sn", 50, 118.71, Some(14), 5, "[Kr] 4d¹⁰ 5s² 5p²", "post-transition metal", "solid", "A soft metal used in solder and bronze."),
    element("Iodine", "I", 53, 126.90, Some(17), 5, "[Kr] 4d¹⁰ 5s² 5p⁵", "halogen", "solid", "A purple-black halogen essential for thyroid hormones."),
    element("Platinum", "Pt", 78, 195.08, Some(10), 6, "[Xe] 4f¹⁴ 5d⁹ 6s¹", "transition metal", "solid", "A dense, unreactive precious metal used in catalytic converters."),
    element("Gold", "Au", 79, 196.97, Some(11), 6, "[Xe] 4f¹⁴ 5d¹⁰ 6s¹", "transition metal", "solid", "A dense, malleable precious metal that does not tarnish."),
    element("Mercury", "Hg", 80, 200.59, Some(12), 6, "[Xe] 4f¹⁴ 5d¹⁰ 6s²", "transition metal", "liquid", "The only metal that is liquid at room temperature."),
    element("Lead", "Pb", 82, 207.2, Some(14), 6, "[Xe] 4f¹⁴ 5d¹⁰ 6s² 6p²", "post-transition metal", "solid", "A dense, soft, toxic metal once used in pipes and paint."),
    element("Uranium", "U", 92, 238.03, None, 7, "[Rn] 5f³ 6d¹ 7s²", "actinide", "solid", "A radioactive actinide used as nuclear fuel."),
];

/// Alternate spellings accepted by name lookup.
const NAME_ALIASES: &[(&str, &str)] = &[("aluminium", "aluminum"), ("sulphur", "sulfur")];

/// Read-only access to the periodic table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodicTable;

impl PeriodicTable {
    pub fn new() -> Self {
        Self
    }

    pub fn all(&self) -> &'static [ElementRecord] {
        ELEMENTS
    }

    /// Look up by lowercase name, accepting common alternate spellings.
    pub fn by_name(&self, name: &str) -> Option<&'static ElementRecord> {
        let name = name.trim().to_lowercase();
        let name = NAME_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map_or(name.as_str(), |(_, canonical)| *canonical);
        ELEMENTS.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive symbol lookup.
    pub fn by_symbol(&self, symbol: &str) -> Option<&'static ElementRecord> {
        let symbol = symbol.trim();
        ELEMENTS.iter().find(|e| e.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Name first, then symbol.
    pub fn lookup(&self, name_or_symbol: &str) -> Option<&'static ElementRecord> {
        self.by_name(name_or_symbol)
            .or_else(|| self.by_symbol(name_or_symbol))
    }

    pub fn format_info(&self, element: &ElementRecord) -> String {
        let group = element
            .group
            .map_or_else(|| "f-block".to_string(), |g| g.to_string());
        format!(
            "Element: {}\n\
             Atomic Number: {}\n\
             Atomic Mass: {} u\n\
             Symbol: {}\n\
             Group: {}\n\
             Period: {}\n\
             Electron Configuration: {}\n\
             Category: {}\n\
             State at STP: {}\n\
             Description: {}",
            element.name,
            element.atomic_number,
            element.atomic_mass,
            element.symbol,
            group,
            element.period,
            element.electron_configuration,
            element.category,
            element.physical_state,
            element.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let table = PeriodicTable::new();
        let carbon = table.by_name("Carbon").unwrap();
        assert_eq!(carbon.atomic_number, 6);
        assert_eq!(carbon.symbol, "C");
        assert_eq!(table.by_name("aluminium").unwrap().symbol, "Al");
        assert!(table.by_name("unobtainium").is_none());
    }

    #[test]
    fn test_lookup_by_symbol_is_case_insensitive() {
        let table = PeriodicTable::new();
        assert_eq!(table.by_symbol("na").unwrap().name, "Sodium");
        assert_eq!(table.by_symbol("FE").unwrap().name, "Iron");
        assert_eq!(table.lookup("Au").unwrap().name, "Gold");
    }

    #[test]
    fn test_repeated_lookups_are_identical() {
        let table = PeriodicTable::new();
        let first = table.by_name("oxygen").unwrap();
        let second = table.by_name("oxygen").unwrap();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_table_is_consistent() {
        let table = PeriodicTable::new();
        let mut numbers: Vec<_> = table.all().iter().map(|e| e.atomic_number).collect();
        let len = numbers.len();
        numbers.dedup();
        assert_eq!(numbers.len(), len);
        assert!(table.all().windows(2).all(|w| w[0].atomic_number < w[1].atomic_number));
    }

    #[test]
    fn test_format_info() {
        let table = PeriodicTable::new();
        let info = table.format_info(table.by_name("uranium").unwrap());
        assert!(info.starts_with("Element: Uranium\nAtomic Number: 92"));
        assert!(info.contains("Group: f-block"));
        assert!(info.contains("Atomic Mass: 238.03 u"));
    }
}
