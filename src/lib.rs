use pyo3::prelude::*;
use pyo3::types::PyModule;

mod chart;
mod error;
mod model;
mod palette;
mod schema;
mod strat;

use model::WellModel;

/// Export schema constants as Python submodules
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Collar
    let collar = PyModule::new(m.py(), "collar")?;
    collar.add("WELL_ID", schema::collar::WELL_ID)?;
    m.add_submodule(&collar)?;

    // Geology (full detail)
    let geology = PyModule::new(m.py(), "geology")?;
    geology.add("WELL_ID", schema::geology::WELL_ID)?;
    geology.add("FROM", schema::geology::FROM)?;
    geology.add("TO", schema::geology::TO)?;
    m.add_submodule(&geology)?;

    // Simplified stratigraphy
    let strat = PyModule::new(m.py(), "strat")?;
    strat.add("WELL_ID", schema::strat::WELL_ID)?;
    strat.add("FROM", schema::strat::FROM)?;
    strat.add("TO", schema::strat::TO)?;
    strat.add("UNIT", schema::strat::UNIT)?;
    m.add_submodule(&strat)?;

    // LAS points
    let las = PyModule::new(m.py(), "las")?;
    las.add("HOLE_ID", schema::las::HOLE_ID)?;
    las.add("DEPTH", schema::las::DEPTH)?;
    las.add("SUMMARY", schema::las::SUMMARY.to_vec())?;
    m.add_submodule(&las)?;

    // Survey dip
    let survey = PyModule::new(m.py(), "survey")?;
    survey.add("WELL_ID", schema::survey::WELL_ID)?;
    m.add_submodule(&survey)?;

    // Missing-data summary
    let missing = PyModule::new(m.py(), "missing")?;
    missing.add("COLUMN", schema::missing::COLUMN)?;
    missing.add("ROWS", schema::missing::ROWS)?;
    missing.add("NULLS", schema::missing::NULLS)?;
    missing.add("NULL_FRACTION", schema::missing::NULL_FRACTION)?;
    m.add_submodule(&missing)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<WellModel>()?;
    add_schema_exports(m)?;
    Ok(())
}
