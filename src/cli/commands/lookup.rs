//! Offline tool commands: calculator, unit converter and table lookups.

use crate::cli::Output;
use crate::tools::{Calculator, ConstantsTable, FormulaCatalog, PeriodicTable, UnitConverter};
use anyhow::Result;

/// Evaluate an expression.
pub fn run_calc(expression: &str) -> Result<()> {
    let result = Calculator::new().evaluate(expression);

    if result.success {
        Output::success(&result.to_string());
        Ok(())
    } else {
        let error = result.error.unwrap_or_else(|| "evaluation failed".to_string());
        Output::error(&error);
        anyhow::bail!("Could not evaluate '{}'", expression)
    }
}

/// Convert a value between units.
pub fn run_convert(value: f64, from: &str, to: &str) -> Result<()> {
    let converter = UnitConverter::new();

    match converter.conversion(value, from, to) {
        Some(conversion) => {
            Output::success(&conversion.to_string());
            Ok(())
        }
        None => {
            Output::error(&format!("No conversion rule from '{}' to '{}'", from, to));
            if !converter.is_known_unit(from) {
                Output::info(&format!("'{}' is not a known unit.", from));
            }
            if !converter.is_known_unit(to) {
                Output::info(&format!("'{}' is not a known unit.", to));
            }
            anyhow::bail!("Unsupported conversion")
        }
    }
}

/// Show an element's record.
pub fn run_element(name: &str) -> Result<()> {
    let table = PeriodicTable::new();

    match table.lookup(name) {
        Some(element) => {
            Output::header(element.name);
            for line in table.format_info(element).lines() {
                println!("  {}", line);
            }
            Ok(())
        }
        None => {
            Output::error(&format!("Element '{}' not found", name));
            anyhow::bail!("Unknown element")
        }
    }
}

/// Show a constant by key or symbol, or every constant matching a search term.
pub fn run_constant(name: &str) -> Result<()> {
    let table = ConstantsTable::new();

    if let Some(constant) = table.get(name).or_else(|| table.by_symbol(name)) {
        Output::success(&table.format(constant));
        return Ok(());
    }

    let matches = table.search(name);
    if matches.is_empty() {
        Output::error(&format!("No constant matches '{}'", name));
        anyhow::bail!("Unknown constant");
    }

    Output::header(&format!("Constants matching '{}'", name));
    for constant in matches {
        Output::list_item(&table.format(constant));
    }
    Ok(())
}

/// Search the formula catalog.
pub fn run_formula(query: &str) -> Result<()> {
    let catalog = FormulaCatalog::new();
    let matches = catalog.search(query);

    if matches.is_empty() {
        Output::warning(&format!("No formula matches '{}'", query));
        return Ok(());
    }

    Output::header(&format!("Formulas matching '{}'", query));
    for formula in matches {
        Output::list_item(&catalog.format(formula));
    }
    Ok(())
}
