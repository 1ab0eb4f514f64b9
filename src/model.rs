use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::PathBuf;

use polars::prelude::*;

use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::chart::{self, ChartConfig};
use crate::error::DashError;
use crate::palette::ColorMap;
use crate::schema::*;
use crate::strat::{build_segments, extract_intervals, WellIntervals};

/// In-memory session over the five well-data tables.
///
/// Tables are loaded once, held immutable, and every view is a full
/// recomputation from them. A failed load leaves the slot empty, so
/// operations that need the table raise `NotLoaded`.
#[pyclass]
pub struct WellModel {
    base_path: PathBuf,
    collar: Option<DataFrame>,
    geology: Option<DataFrame>,
    strat: Option<DataFrame>,
    las_points: Option<DataFrame>,
    survey_dip: Option<DataFrame>,
}

#[pymethods]
impl WellModel {
    #[new]
    fn new(base_path: String) -> Self {
        Self {
            base_path: PathBuf::from(base_path),
            collar: None,
            geology: None,
            strat: None,
            las_points: None,
            survey_dip: None,
        }
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load any CSV into a Polars DataFrame with all columns as strings.
    /// Optionally rename columns via a map.
    #[pyo3(signature = (filename, rename=None))]
    fn load_csv(
        &self,
        filename: &str,
        rename: Option<HashMap<String, String>>,
    ) -> PyResult<PyDataFrame> {
        let df = self.read_csv_as_strings(filename, rename)?;
        Ok(PyDataFrame(df))
    }

    /// Load the collar CSV.
    ///
    /// Required columns: WellID. Location/metadata columns are
    /// preserved as strings.
    #[pyo3(signature = (filename=None))]
    fn load_collar(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let fname = filename.unwrap_or("Wells_Collar.csv");
        let raw = self.read_csv_as_strings(fname, None)?;
        Self::require_columns(&raw, &[collar::WELL_ID])?;
        self.collar = Some(raw.clone());
        Ok(PyDataFrame(raw))
    }

    /// Load the full-detail geology CSV.
    ///
    /// Required columns: WellID, From, To. The source file carries
    /// latin1 text, so it is decoded byte-per-code-point before
    /// parsing. From/To are cast to Float64.
    #[pyo3(signature = (filename=None))]
    fn load_geology(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let fname = filename.unwrap_or("Wells_Geology.csv");
        let raw = self.read_csv_latin1(fname)?;
        Self::require_columns(&raw, &[geology::WELL_ID, geology::FROM, geology::TO])?;

        let df = raw
            .lazy()
            .with_columns([
                col(geology::FROM).cast(DataType::Float64),
                col(geology::TO).cast(DataType::Float64),
            ])
            .collect()
            .map_err(DashError::from)?;

        self.geology = Some(df.clone());
        Ok(PyDataFrame(df))
    }

    /// Load the simplified-stratigraphy CSV, the interval-record
    /// source for the strata chart.
    ///
    /// Required columns: WellID, From, To, Strat_Simplified_Viro.
    /// From/To are cast to Float64; depth order, overlap, and
    /// From < To are deliberately NOT validated here.
    #[pyo3(signature = (filename=None))]
    fn load_strat(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let fname = filename.unwrap_or("Wells_Geology_StratSimpl.csv");
        let raw = self.read_csv_as_strings(fname, None)?;
        Self::require_columns(
            &raw,
            &[strat::WELL_ID, strat::FROM, strat::TO, strat::UNIT],
        )?;

        let df = raw
            .lazy()
            .with_columns([
                col(strat::FROM).cast(DataType::Float64),
                col(strat::TO).cast(DataType::Float64),
            ])
            .collect()
            .map_err(DashError::from)?;

        self.strat = Some(df.clone());
        Ok(PyDataFrame(df))
    }

    /// Load the LAS points CSV.
    ///
    /// Required columns: holeid, depth. Every column except holeid is
    /// cast to Float64; unparseable cells become nulls, which is what
    /// the missing-data views count.
    #[pyo3(signature = (filename=None))]
    fn load_las_points(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let fname = filename.unwrap_or("Wells_LAS_Points.csv");
        let raw = self.read_csv_as_strings(fname, None)?;
        Self::require_columns(&raw, &[las::HOLE_ID, las::DEPTH])?;

        let curve_cols: Vec<String> = raw
            .get_column_names_str()
            .iter()
            .filter(|c| **c != las::HOLE_ID)
            .map(|c| c.to_string())
            .collect();
        let casts: Vec<Expr> = curve_cols
            .iter()
            .map(|c| col(c.as_str()).cast(DataType::Float64))
            .collect();

        let df = raw
            .lazy()
            .with_columns(casts)
            .collect()
            .map_err(DashError::from)?;

        self.las_points = Some(df.clone());
        Ok(PyDataFrame(df))
    }

    /// Load the survey dip CSV.
    ///
    /// Required columns: WellID. Directional-survey columns are
    /// preserved as strings.
    #[pyo3(signature = (filename=None))]
    fn load_survey_dip(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let fname = filename.unwrap_or("Wells_Survey_Dip.csv");
        let raw = self.read_csv_as_strings(fname, None)?;
        Self::require_columns(&raw, &[survey::WELL_ID])?;
        self.survey_dip = Some(raw.clone());
        Ok(PyDataFrame(raw))
    }

    /// Load all five tables with their default filenames. Any failure
    /// aborts the whole load; no partial dashboard.
    fn load_all(&mut self) -> PyResult<()> {
        self.load_collar(None)?;
        self.load_geology(None)?;
        self.load_strat(None)?;
        self.load_las_points(None)?;
        self.load_survey_dip(None)?;
        Ok(())
    }

    // ── Previews ────────────────────────────────────────────────────────────

    /// First `n` rows of a loaded table, for the shell's previews.
    /// Table names: collar, geology, strat, las_points, survey_dip.
    #[pyo3(signature = (table, n=5))]
    fn head(&self, table: &str, n: usize) -> PyResult<PyDataFrame> {
        let df = self.table(table)?;
        Ok(PyDataFrame(df.head(Some(n))))
    }

    // ── Selection candidates ────────────────────────────────────────────────

    /// Distinct hole ids of the LAS table, in first-seen order.
    fn well_ids(&self) -> PyResult<Vec<String>> {
        let df = self.require_loaded(&self.las_points, "las_points")?;
        let ids = df.column(las::HOLE_ID).map_err(DashError::from)?
            .str()
            .map_err(DashError::from)?;

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in ids.into_iter().flatten() {
            if seen.insert(id) {
                out.push(id.to_string());
            }
        }
        Ok(out)
    }

    /// LAS column names that are plottable variables, i.e. everything
    /// except holeid and depth.
    fn las_variables(&self) -> PyResult<Vec<String>> {
        let df = self.require_loaded(&self.las_points, "las_points")?;
        Ok(df
            .get_column_names_str()
            .iter()
            .filter(|c| **c != las::HOLE_ID && **c != las::DEPTH)
            .map(|c| c.to_string())
            .collect())
    }

    /// The static Variable/Description summary of the LAS dataset.
    #[staticmethod]
    fn las_summary() -> PyResult<PyDataFrame> {
        let variables: Vec<&str> = las::SUMMARY.iter().map(|(v, _)| *v).collect();
        let descriptions: Vec<&str> = las::SUMMARY.iter().map(|(_, d)| *d).collect();
        let df = DataFrame::new(vec![
            Series::new("Variable".into(), variables).into(),
            Series::new("Description".into(), descriptions).into(),
        ])
        .map_err(DashError::from)?;
        Ok(PyDataFrame(df))
    }

    // ── LAS views ───────────────────────────────────────────────────────────

    /// holeid, depth and one selected variable, rows where the
    /// variable is null dropped. Feeds the shell's line-profile chart.
    fn las_profile(&self, variable: &str) -> PyResult<PyDataFrame> {
        let df = self.require_loaded(&self.las_points, "las_points")?;
        if !df.schema().contains(variable) {
            return Err(DashError::MissingColumn(variable.to_string()).into());
        }

        let out = df
            .clone()
            .lazy()
            .select([col(las::HOLE_ID), col(las::DEPTH), col(variable)])
            .filter(col(variable).is_not_null())
            .collect()
            .map_err(DashError::from)?;
        Ok(PyDataFrame(out))
    }

    /// LAS rows for one well, all columns.
    fn filter_las_by_well(&self, holeid: &str) -> PyResult<PyDataFrame> {
        let df = self.require_loaded(&self.las_points, "las_points")?;
        let out = df
            .clone()
            .lazy()
            .filter(col(las::HOLE_ID).eq(lit(holeid)))
            .collect()
            .map_err(DashError::from)?;
        Ok(PyDataFrame(out))
    }

    /// Per-column row/null counts over the whole LAS table.
    fn missing_counts(&self) -> PyResult<PyDataFrame> {
        let df = self.require_loaded(&self.las_points, "las_points")?;
        Ok(PyDataFrame(Self::missing_summary(df)?))
    }

    /// Per-column row/null counts over one well's LAS rows.
    fn missing_counts_for_well(&self, holeid: &str) -> PyResult<PyDataFrame> {
        let filtered = self.filter_las_by_well(holeid)?;
        Ok(PyDataFrame(Self::missing_summary(&filtered.0)?))
    }

    // ── Stratigraphy chart ──────────────────────────────────────────────────

    /// Run the full strata pipeline over the loaded simplified-
    /// stratigraphy table and return the composite chart as a
    /// self-contained HTML string.
    ///
    /// Colors are assigned to unit labels in first-seen order and are
    /// stable for the duration of this call only. Use with
    /// `streamlit.components.v1.html(...)` or `IPython.display.HTML`.
    #[pyo3(signature = (title=None, lane_height_px=28, initial_zoom=1.0))]
    fn render_strata_chart(
        &self,
        title: Option<&str>,
        lane_height_px: u32,
        initial_zoom: f64,
    ) -> PyResult<String> {
        let df = self.require_loaded(&self.strat, "strat")?;
        let rows = extract_intervals(df)?;

        let colors = ColorMap::from_labels(rows.iter().map(|r| r.unit_label.as_str()));
        let wells = WellIntervals::partition(rows);
        let segments = build_segments(&wells, &colors);

        let legend: Vec<_> = colors
            .labels()
            .iter()
            .filter_map(|l| colors.color_of(l).map(|c| (l.clone(), c)))
            .collect();

        let mut config = ChartConfig {
            lane_height_px,
            initial_zoom,
            ..ChartConfig::default()
        };
        if let Some(t) = title {
            config.title = t.to_string();
        }

        Ok(chart::generate_strata_html(
            &segments,
            &wells.well_ids(),
            &legend,
            &config,
        ))
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn collar_df(&self) -> Option<PyDataFrame> {
        self.collar.clone().map(PyDataFrame)
    }

    #[getter]
    fn geology_df(&self) -> Option<PyDataFrame> {
        self.geology.clone().map(PyDataFrame)
    }

    #[getter]
    fn strat_df(&self) -> Option<PyDataFrame> {
        self.strat.clone().map(PyDataFrame)
    }

    #[getter]
    fn las_points_df(&self) -> Option<PyDataFrame> {
        self.las_points.clone().map(PyDataFrame)
    }

    #[getter]
    fn survey_dip_df(&self) -> Option<PyDataFrame> {
        self.survey_dip.clone().map(PyDataFrame)
    }
}

// ── Private helpers ─────────────────────────────────────────────────────────

impl WellModel {
    /// Read a CSV file with all columns as String dtype.
    /// Trims whitespace from column names and applies optional rename.
    fn read_csv_as_strings(
        &self,
        filename: &str,
        rename: Option<HashMap<String, String>>,
    ) -> Result<DataFrame, DashError> {
        let path = self.base_path.join(filename);
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .try_into_reader_with_file_path(Some(path))?
            .finish()?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        if let Some(map) = rename {
            let old: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
            let new: Vec<&str> = map.values().map(|s| s.as_str()).collect();
            df = df.lazy().rename(old, new, true).collect()?;
        }

        Ok(df)
    }

    /// Read a latin1-encoded CSV with all columns as String dtype.
    /// latin1 maps each byte straight to the same code point, so the
    /// decode is a plain byte-to-char widening.
    fn read_csv_latin1(&self, filename: &str) -> Result<DataFrame, DashError> {
        let path = self.base_path.join(filename);
        let bytes = std::fs::read(path)?;
        let text: String = bytes.iter().map(|&b| b as char).collect();

        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
            .finish()?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        Ok(df)
    }

    fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), DashError> {
        for &col_name in required {
            if df.column(col_name).is_err() {
                return Err(DashError::MissingColumn(col_name.to_string()));
            }
        }
        Ok(())
    }

    fn require_loaded<'a>(
        &self,
        slot: &'a Option<DataFrame>,
        name: &str,
    ) -> Result<&'a DataFrame, DashError> {
        slot.as_ref().ok_or_else(|| DashError::NotLoaded(name.to_string()))
    }

    fn table(&self, name: &str) -> Result<&DataFrame, DashError> {
        let slot = match name {
            "collar" => &self.collar,
            "geology" => &self.geology,
            "strat" => &self.strat,
            "las_points" => &self.las_points,
            "survey_dip" => &self.survey_dip,
            other => {
                return Err(DashError::InvalidData(format!(
                    "Unknown table: '{}'. Expected one of collar, geology, strat, \
                     las_points, survey_dip",
                    other
                )))
            }
        };
        self.require_loaded(slot, name)
    }

    /// column / rows / nulls / null_fraction over every column of `df`.
    fn missing_summary(df: &DataFrame) -> Result<DataFrame, DashError> {
        let rows = df.height() as u32;
        let mut names: Vec<String> = Vec::with_capacity(df.width());
        let mut nulls: Vec<u32> = Vec::with_capacity(df.width());
        let mut fractions: Vec<f64> = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let n = column.null_count() as u32;
            names.push(column.name().to_string());
            nulls.push(n);
            fractions.push(if rows == 0 {
                0.0
            } else {
                f64::from(n) / f64::from(rows)
            });
        }

        let width = df.width();
        let out = DataFrame::new(vec![
            Series::new(missing::COLUMN.into(), names).into(),
            Series::new(missing::ROWS.into(), vec![rows; width]).into(),
            Series::new(missing::NULLS.into(), nulls).into(),
            Series::new(missing::NULL_FRACTION.into(), fractions).into(),
        ])?;
        Ok(out)
    }
}
