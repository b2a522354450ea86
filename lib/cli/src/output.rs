use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use color_eyre::eyre::WrapErr;
use log::info;

use ctt_sat_core::cnf::Formula;

/// Writes `formula` as WCNF if it has soft clauses, as DIMACS CNF otherwise.
pub fn write_formula(path: &Path, formula: &Formula) -> color_eyre::Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("Could not create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    let format = if formula.is_weighted() {
        write!(writer, "{}", formula.wcnf())?;
        "WCNF"
    } else {
        write!(writer, "{}", formula.dimacs())?;
        "DIMACS"
    };
    writer.flush()?;
    info!("Wrote {} ({}) to '{}'", formula, format, path.display());
    Ok(())
}
