//! HTML report generation for comparison datasets.
//!
//! Generate a self-contained HTML file with embedded
//! [Plotly.js](https://plotly.com/javascript/) charts that overlay the
//! histogram on the analytic curves.
//!
//! # Charts included
//!
//! | Chart | Description |
//! |---|---|
//! | **Density** | Empirical density per bin (bars) against the analytic PDF (line) |
//! | **Cumulative** | Empirical cumulative fraction per bin edge (markers) against the analytic CDF (line) |
//! | **Bin counts** | Raw sample count per bin, including the folded boundary bins |
//!
//! # Usage
//!
//! Call [`ComparisonDataset::export_html()`](crate::ComparisonDataset::export_html)
//! or [`generate_html_report()`] directly:
//!
//! ```no_run
//! use distcheck::prelude::*;
//!
//! let dataset = Harness::new(DistributionSpec::Uniform).unwrap().run().unwrap();
//! dataset.export_html("uniform.html").unwrap();
//! ```
//!
//! An internet connection is needed on first load to fetch `Plotly.js`
//! from a CDN.

use core::fmt::Write as _;
use std::path::Path;

use crate::dataset::ComparisonDataset;

/// Generate an HTML report with interactive Plotly.js charts.
///
/// This is also available as
/// [`ComparisonDataset::export_html()`](crate::ComparisonDataset::export_html).
///
/// # Errors
///
/// Return an I/O error if the file cannot be created or written.
pub fn generate_html_report(
    dataset: &ComparisonDataset,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    std::fs::write(path, build_html(dataset))
}

fn build_html(dataset: &ComparisonDataset) -> String {
    let mut html = String::with_capacity(8192);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Distribution Check</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         background: #f5f6fa; color: #2c3e50; padding: 24px; }}
  h1 {{ text-align: center; margin-bottom: 8px; font-size: 1.8em; }}
  .subtitle {{ text-align: center; color: #7f8c8d; margin-bottom: 24px; }}
  .chart {{ background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);
            margin-bottom: 24px; padding: 16px; }}
  .chart-title {{ font-size: 1.1em; font-weight: 600; margin-bottom: 8px; }}
</style>
</head>
<body>
<h1>Distribution Check</h1>
<p class="subtitle">{spec} &middot; {n} trials &middot; {bins} bins</p>
"#,
        spec = escape_html(&dataset.spec.to_string()),
        n = dataset.num_trials,
        bins = dataset.num_bins(),
    );

    html.push_str("<div class=\"chart\"><div class=\"chart-title\">Density</div><div id=\"density\"></div></div>\n");
    write_density_chart(&mut html, dataset);

    html.push_str("<div class=\"chart\"><div class=\"chart-title\">Cumulative</div><div id=\"cumulative\"></div></div>\n");
    write_cumulative_chart(&mut html, dataset);

    html.push_str("<div class=\"chart\"><div class=\"chart-title\">Bin Counts</div><div id=\"counts\"></div></div>\n");
    write_counts_chart(&mut html, dataset);

    html.push_str("</body>\n</html>\n");
    html
}

// ---------------------------------------------------------------------------
// Chart generators
// ---------------------------------------------------------------------------

fn write_density_chart(html: &mut String, dataset: &ComparisonDataset) {
    let xh = js_array(dataset.density.iter().map(|p| p.x));
    let h = js_array(dataset.density.iter().map(|p| p.value));
    let xf = js_array(dataset.curve.iter().map(|p| p.x));
    let f = js_array(dataset.curve.iter().map(|p| p.pdf));

    let _ = write!(
        html,
        r##"<script>
Plotly.newPlot("density", [
  {{ x: {xh}, y: {h}, type: "bar", name: "Histogram", width: {width},
     marker: {{ color: "#3498db", opacity: 0.6 }} }},
  {{ x: {xf}, y: {f}, mode: "lines", name: "True PDF", type: "scatter",
     line: {{ color: "#e74c3c", width: 2 }} }}
], {{ xaxis: {{ title: "x" }}, yaxis: {{ title: "f(x)" }}, bargap: 0,
     margin: {{ t: 10 }}, legend: {{ x: 1, xanchor: "right", y: 1 }} }},
   {{ responsive: true }});
</script>
"##,
        width = dataset.bin_width,
    );
}

fn write_cumulative_chart(html: &mut String, dataset: &ComparisonDataset) {
    let xh = js_array(dataset.cumulative.iter().map(|p| p.x));
    let h = js_array(dataset.cumulative.iter().map(|p| p.value));
    let xf = js_array(dataset.curve.iter().map(|p| p.x));
    let cdf = js_array(dataset.curve.iter().map(|p| p.cdf));

    let _ = write!(
        html,
        r##"<script>
Plotly.newPlot("cumulative", [
  {{ x: {xh}, y: {h}, mode: "markers", name: "Histogram", type: "scatter",
     marker: {{ color: "#3498db", size: 7, symbol: "x" }} }},
  {{ x: {xf}, y: {cdf}, mode: "lines", name: "True CDF", type: "scatter",
     line: {{ color: "#e74c3c", width: 2 }} }}
], {{ xaxis: {{ title: "x" }}, yaxis: {{ title: "F(x)", range: [0, 1.05] }},
     margin: {{ t: 10 }}, legend: {{ x: 1, xanchor: "right", y: 0 }} }},
   {{ responsive: true }});
</script>
"##,
    );
}

#[allow(clippy::cast_precision_loss)]
fn write_counts_chart(html: &mut String, dataset: &ComparisonDataset) {
    let centers = js_array(dataset.density.iter().map(|p| p.x));
    let counts = js_array(dataset.counts.iter().map(|&c| c as f64));

    let _ = write!(
        html,
        r##"<script>
Plotly.newPlot("counts", [
  {{ x: {centers}, y: {counts}, type: "bar", name: "Count", width: {width},
     marker: {{ color: "#95a5a6" }} }}
], {{ xaxis: {{ title: "Bin centre" }}, yaxis: {{ title: "Samples" }}, bargap: 0,
     margin: {{ t: 10 }} }},
   {{ responsive: true }});
</script>
"##,
        width = dataset.bin_width,
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render values as a JavaScript array literal; non-finite values become
/// `null` so Plotly leaves a gap.
fn js_array(values: impl Iterator<Item = f64>) -> String {
    let items: Vec<String> = values
        .map(|v| {
            if v.is_finite() {
                format!("{v:?}")
            } else {
                "null".to_string()
            }
        })
        .collect();
    format!("[{}]", items.join(", "))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_array_nulls_non_finite() {
        let s = js_array([1.0, f64::NAN, 0.25, f64::INFINITY].into_iter());
        assert_eq!(s, "[1.0, null, 0.25, null]");
        assert_eq!(js_array(core::iter::empty()), "[]");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
