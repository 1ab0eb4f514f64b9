/// Column-name constants for the five well-data tables.
/// Single source of truth - exported to Python via PyO3.

// ── Collar columns ──────────────────────────────────────────────────────────
pub mod collar {
    pub const WELL_ID: &str = "WellID";
}

// ── Geology columns (full detail) ───────────────────────────────────────────
pub mod geology {
    pub const WELL_ID: &str = "WellID";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
}

// ── Simplified-stratigraphy columns ─────────────────────────────────────────
pub mod strat {
    pub const WELL_ID: &str = "WellID";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const UNIT: &str = "Strat_Simplified_Viro";
}

// ── LAS point columns ───────────────────────────────────────────────────────
pub mod las {
    pub const HOLE_ID: &str = "holeid";
    pub const DEPTH: &str = "depth";

    /// Variable/description rows for the LAS summary table, in the
    /// column order of the source file.
    pub const SUMMARY: [(&str, &str); 19] = [
        ("AC", "Acoustic log (travel time)"),
        ("CAL", "Caliper log (borehole diameter)"),
        ("CN", "Compensated Neutron log (neutron porosity)"),
        ("DEN", "Bulk Density (g/cc)"),
        ("depth", "Depth of measurement in meters"),
        ("GR", "Gamma Ray (API units)"),
        ("holeid", "Well identifier"),
        ("PERM", "Permeability (mD)"),
        ("PF", "Formation factor (resistivity factor)"),
        ("POR", "Porosity (%)"),
        ("PORT", "Total porosity (%)"),
        ("PORW", "Water-filled porosity (%)"),
        ("R16", "Resistivity at 16 inches (ohm-m)"),
        ("R64", "Resistivity at 64 inches (ohm-m)"),
        ("RD", "Deep resistivity (ohm-m)"),
        ("RLML", "Laterolog medium resistivity (ohm-m)"),
        ("RNML", "Neutron-medium resistivity (ohm-m)"),
        ("SP", "Spontaneous Potential (mV)"),
        ("TEMP", "Temperature (\u{b0}C)"),
    ];
}

// ── Survey dip columns ──────────────────────────────────────────────────────
pub mod survey {
    pub const WELL_ID: &str = "WellID";
}

// ── Missing-data summary columns (produced, not consumed) ───────────────────
pub mod missing {
    pub const COLUMN: &str = "column";
    pub const ROWS: &str = "rows";
    pub const NULLS: &str = "nulls";
    pub const NULL_FRACTION: &str = "null_fraction";
}
