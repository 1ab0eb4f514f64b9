/// Stacked-bar chart composition for the simplified stratigraphy.
///
/// Produces a self-contained HTML string with inline JS that draws:
/// - One horizontal rect per interval segment, positioned by its own
///   base/length along a continuous shared depth axis
/// - One categorical lane per well, in first-seen well order
/// - A legend entry per distinct unit label
/// - Zoom, scrolling, and tooltips
///
/// All SVG rendering is done client-side by strat_chart.js. This
/// module serializes the segment data to JSON and emits the HTML
/// shell. Non-finite or non-positive segment geometry is preserved in
/// the payload (the JS clamps drawn widths to zero) so bad source
/// rows stay visible in the data.
use std::fmt::Write as FmtWrite;

use crate::palette::Rgba;
use crate::strat::Segment;

const CHART_JS: &str = include_str!("strat_chart.js");

// ── Config ──────────────────────────────────────────────────────────────────

/// Chart layout options, all with shell-friendly defaults.
pub struct ChartConfig {
    pub title: String,
    /// Fixed pixel height per well lane.
    pub lane_height_px: u32,
    /// Initial zoom level (1.0 = full depth range fits the view).
    pub initial_zoom: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Simplified Stratigraphy for Wells".to_string(),
            lane_height_px: 28,
            initial_zoom: 1.0,
        }
    }
}

// ── HTML generation ─────────────────────────────────────────────────────────

/// Main entry point: generates a self-contained HTML string.
///
/// `lanes` is the first-seen well order; `legend` the first-seen label
/// order with the colors of the pass. Zero segments yield a
/// placeholder div rather than an error.
pub fn generate_strata_html(
    segments: &[Segment],
    lanes: &[String],
    legend: &[(String, Rgba)],
    config: &ChartConfig,
) -> String {
    if segments.is_empty() {
        return "<div>No stratigraphic intervals to visualize.</div>".to_string();
    }

    // Depth extent over finite endpoints only; NaN rows still ship in
    // the payload but must not poison the axis.
    let mut depth_min = f64::INFINITY;
    let mut depth_max = f64::NEG_INFINITY;
    for s in segments {
        for v in [s.base, s.base + s.length] {
            if v.is_finite() {
                depth_min = depth_min.min(v);
                depth_max = depth_max.max(v);
            }
        }
    }
    if depth_min > depth_max {
        depth_min = 0.0;
        depth_max = 1.0;
    }

    format!(
        r##"<div style="position:relative; width:100%; border:1px solid #dee2e6; border-radius:4px; background:#fff;">
  <div style="padding:4px 8px; border-bottom:1px solid #dee2e6; font-family:sans-serif; font-size:12px; color:#495057; display:flex; align-items:center; gap:8px;">
    <span style="font-weight:600;">{title}</span>
    <button onclick="wskZoom(1.5)" style="cursor:pointer; padding:2px 8px;">Zoom +</button>
    <button onclick="wskZoom(1/1.5)" style="cursor:pointer; padding:2px 8px;">Zoom &#8722;</button>
    <button onclick="wskResetZoom()" style="cursor:pointer; padding:2px 8px;">Reset</button>
    <span id="wsk-zoom-label" style="color:#868e96; font-size:11px;">1.0x</span>
  </div>
  <div id="wsk-scroll-container" style="overflow:auto; max-height:600px;">
    <svg id="wsk-svg" xmlns="http://www.w3.org/2000/svg" width="100" height="100">
      <style>
        .lane-label {{ font-family: sans-serif; font-size: 12px; fill: #495057; text-anchor: end; }}
        .axis-label {{ font-family: sans-serif; font-size: 10px; fill: #868e96; text-anchor: middle; }}
        .axis-title {{ font-family: sans-serif; font-size: 11px; fill: #495057; text-anchor: middle; }}
        .strat-rect {{ stroke: #fff; stroke-width: 0.5; cursor: pointer; }}
        .strat-rect:hover {{ stroke: #212529; stroke-width: 1.5; }}
        .legend-label {{ font-family: sans-serif; font-size: 11px; fill: #495057; }}
      </style>
    </svg>
  </div>
</div>
<script>
{chart_js}
StratChart.create({{
  zoom: {zoom},
  depthMin: {depth_min}, depthMax: {depth_max},
  marginLeft: 120, marginTop: 24,
  marginRight: 180, marginBottom: 44,
  laneHeight: {lane_height}, rectPadding: 4,
  depthAxisTitle: "Depth (m)", laneAxisTitle: "Well ID",
  segments: {segments_json},
  lanes: {lanes_json},
  legend: {legend_json}
}});
</script>"##,
        title = escape_html(&config.title),
        zoom = config.initial_zoom,
        depth_min = depth_min,
        depth_max = depth_max,
        lane_height = config.lane_height_px,
        segments_json = segments_to_json(segments),
        lanes_json = lanes_to_json(lanes),
        legend_json = legend_to_json(legend),
        chart_js = CHART_JS,
    )
}

// ── JSON serialization helpers ──────────────────────────────────────────────

/// JSON number, with non-finite values mapped to null.
fn json_num(v: f64) -> String {
    if v.is_finite() {
        format!("{}", v)
    } else {
        "null".to_string()
    }
}

fn segments_to_json(segments: &[Segment]) -> String {
    let mut s = String::from("[");
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            r##"{{"well_id":"{}","base":{},"length":{},"color":"{}","label":"{}"}}"##,
            escape_json(&seg.well_id),
            json_num(seg.base),
            json_num(seg.length),
            seg.color.css(),
            escape_json(&seg.label),
        )
        .unwrap();
    }
    s.push(']');
    s
}

fn lanes_to_json(lanes: &[String]) -> String {
    let mut s = String::from("[");
    for (i, lane) in lanes.iter().enumerate() {
        if i > 0 {
            s.push(',');
        }
        write!(s, r##""{}""##, escape_json(lane)).unwrap();
    }
    s.push(']');
    s
}

fn legend_to_json(legend: &[(String, Rgba)]) -> String {
    let mut s = String::from("[");
    for (i, (label, color)) in legend.iter().enumerate() {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            r##"{{"label":"{}","color":"{}"}}"##,
            escape_json(label),
            color.css(),
        )
        .unwrap();
    }
    s.push(']');
    s
}

fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
