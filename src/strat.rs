/// Simplified-stratigraphy pipeline: interval extraction, stable
/// per-well partition, and colored segment construction.
///
/// The partition and the color map are both keyed by first-seen order,
/// built explicitly once per pass so the ordering is a contract and
/// not an accident of table iteration. Depth ranges are taken as-is:
/// inverted or overlapping intervals pass through and show up in the
/// chart, since hiding them would mask data-quality problems the
/// dashboard exists to surface.
use std::collections::HashMap;

use polars::prelude::*;

use crate::error::DashError;
use crate::palette::{ColorMap, Rgba, UNMAPPED};
use crate::schema::strat;

/// One stratigraphic interval row for one well.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub well_id: String,
    pub from_depth: f64,
    pub to_depth: f64,
    pub unit_label: String,
}

impl Interval {
    pub fn length(&self) -> f64 {
        self.to_depth - self.from_depth
    }
}

/// Extract interval rows from the simplified-strata DataFrame.
///
/// Null well ids and labels become empty strings, null depths become
/// NaN; no row is dropped.
pub fn extract_intervals(df: &DataFrame) -> Result<Vec<Interval>, DashError> {
    let well_ids = df.column(strat::WELL_ID)?.str()?;
    let from_depths = df.column(strat::FROM)?.f64()?;
    let to_depths = df.column(strat::TO)?.f64()?;
    let labels = df.column(strat::UNIT)?.str()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(Interval {
            well_id: well_ids.get(i).unwrap_or("").to_string(),
            from_depth: from_depths.get(i).unwrap_or(f64::NAN),
            to_depth: to_depths.get(i).unwrap_or(f64::NAN),
            unit_label: labels.get(i).unwrap_or("").to_string(),
        });
    }
    Ok(rows)
}

/// Stable partition of intervals by well id.
///
/// Wells appear in the order their first interval appears; within a
/// well the original relative row order is preserved. Wells with no
/// rows never materialize.
pub struct WellIntervals {
    wells: Vec<(String, Vec<Interval>)>,
    index: HashMap<String, usize>,
}

impl WellIntervals {
    pub fn partition<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut wells: Vec<(String, Vec<Interval>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for row in rows {
            let slot = *index.entry(row.well_id.clone()).or_insert_with(|| {
                wells.push((row.well_id.clone(), Vec::new()));
                wells.len() - 1
            });
            wells[slot].1.push(row);
        }
        Self { wells, index }
    }

    /// (well id, intervals) pairs in first-seen well order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Interval])> {
        self.wells.iter().map(|(w, v)| (w.as_str(), v.as_slice()))
    }

    pub fn get(&self, well_id: &str) -> Option<&[Interval]> {
        self.index.get(well_id).map(|&i| self.wells[i].1.as_slice())
    }

    /// Well ids in first-seen order.
    pub fn well_ids(&self) -> Vec<String> {
        self.wells.iter().map(|(w, _)| w.clone()).collect()
    }

    pub fn interval_count(&self) -> usize {
        self.wells.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

/// One positioned, colored bar segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub well_id: String,
    /// Stacking origin along the depth axis (= from_depth).
    pub base: f64,
    /// to_depth - from_depth; may be non-positive for bad source rows.
    pub length: f64,
    pub color: Rgba,
    pub label: String,
}

/// Emit one segment per interval, wells in first-seen order, in-well
/// order preserved. Labels missing from the color map fall back to the
/// unmapped grey.
pub fn build_segments(wells: &WellIntervals, colors: &ColorMap) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(wells.interval_count());
    for (well_id, intervals) in wells.iter() {
        for interval in intervals {
            segments.push(Segment {
                well_id: well_id.to_string(),
                base: interval.from_depth,
                length: interval.length(),
                color: colors.color_of(&interval.unit_label).unwrap_or(UNMAPPED),
                label: interval.unit_label.clone(),
            });
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    fn iv(well: &str, from: f64, to: f64, label: &str) -> Interval {
        Interval {
            well_id: well.to_string(),
            from_depth: from,
            to_depth: to,
            unit_label: label.to_string(),
        }
    }

    fn three_row_fixture() -> Vec<Interval> {
        vec![
            iv("W1", 0.0, 10.0, "Sand"),
            iv("W1", 10.0, 25.0, "Shale"),
            iv("W2", 0.0, 15.0, "Sand"),
        ]
    }

    #[test]
    fn partition_groups_by_well_in_first_seen_order() {
        let wells = WellIntervals::partition(three_row_fixture());
        assert_eq!(wells.well_ids(), ["W1", "W2"]);
        assert_eq!(wells.get("W1").unwrap().len(), 2);
        assert_eq!(wells.get("W2").unwrap().len(), 1);
        assert_eq!(wells.get("W3"), None);
    }

    #[test]
    fn partition_is_stable_within_a_well() {
        let rows = vec![
            iv("W1", 40.0, 50.0, "Coal"),
            iv("W2", 0.0, 5.0, "Sand"),
            iv("W1", 0.0, 10.0, "Sand"),
            iv("W1", 20.0, 30.0, "Shale"),
        ];
        let wells = WellIntervals::partition(rows.clone());
        // Interleaved W2 row does not disturb W1's relative order,
        // and no re-sorting by depth happens.
        assert_eq!(
            wells.get("W1").unwrap(),
            &[rows[0].clone(), rows[2].clone(), rows[3].clone()][..]
        );
    }

    #[test]
    fn segments_carry_base_length_and_shared_colors() {
        let rows = three_row_fixture();
        let colors = ColorMap::from_labels(rows.iter().map(|r| r.unit_label.as_str()));
        let wells = WellIntervals::partition(rows);
        let segments = build_segments(&wells, &colors);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].well_id, "W1");
        assert_eq!((segments[0].base, segments[0].length), (0.0, 10.0));
        assert_eq!((segments[1].base, segments[1].length), (10.0, 15.0));
        assert_eq!(segments[2].well_id, "W2");
        assert_eq!((segments[2].base, segments[2].length), (0.0, 15.0));

        // Both Sand segments share a color, Shale differs.
        assert_eq!(segments[0].color, segments[2].color);
        assert_ne!(segments[0].color, segments[1].color);
        assert_eq!(segments[0].color, PALETTE[0]);
        assert_eq!(segments[1].color, PALETTE[1]);
    }

    #[test]
    fn segment_count_matches_row_count() {
        let rows: Vec<Interval> = (0..37)
            .map(|i| {
                let well = format!("W{}", i % 5);
                iv(&well, f64::from(i), f64::from(i + 1), "Sand")
            })
            .collect();
        let colors = ColorMap::from_labels(rows.iter().map(|r| r.unit_label.as_str()));
        let wells = WellIntervals::partition(rows);
        assert_eq!(build_segments(&wells, &colors).len(), 37);
    }

    #[test]
    fn inverted_interval_passes_through_with_negative_length() {
        let rows = vec![iv("W1", 10.0, 8.0, "Sand")];
        let colors = ColorMap::from_labels(rows.iter().map(|r| r.unit_label.as_str()));
        let wells = WellIntervals::partition(rows);
        let segments = build_segments(&wells, &colors);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].base, 10.0);
        assert_eq!(segments[0].length, -2.0);
    }

    #[test]
    fn empty_input_yields_empty_partition_and_no_segments() {
        let wells = WellIntervals::partition(Vec::new());
        assert!(wells.is_empty());
        let colors = ColorMap::from_labels(std::iter::empty::<&str>());
        assert!(build_segments(&wells, &colors).is_empty());
    }

    #[test]
    fn missing_label_falls_back_to_unmapped_grey() {
        let rows = vec![iv("W1", 0.0, 10.0, "Sand")];
        let colors = ColorMap::from_labels(std::iter::empty::<&str>());
        let wells = WellIntervals::partition(rows);
        let segments = build_segments(&wells, &colors);
        assert_eq!(segments[0].color, UNMAPPED);
    }

    #[test]
    fn extract_reads_rows_and_absorbs_nulls() {
        let df = polars::df!(
            "WellID" => [Some("W1"), Some("W1"), None],
            "From" => [Some(0.0), None, Some(5.0)],
            "To" => [Some(10.0), Some(25.0), Some(9.0)],
            "Strat_Simplified_Viro" => [Some("Sand"), None, Some("Coal")],
        )
        .unwrap();

        let rows = extract_intervals(&df).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], iv("W1", 0.0, 10.0, "Sand"));
        assert!(rows[1].from_depth.is_nan());
        assert_eq!(rows[1].unit_label, "");
        assert_eq!(rows[2].well_id, "");
    }

    #[test]
    fn extract_requires_the_strat_columns() {
        let df = polars::df!("WellID" => ["W1"], "From" => [0.0]).unwrap();
        assert!(matches!(
            extract_intervals(&df),
            Err(DashError::Polars(_))
        ));
    }
}
