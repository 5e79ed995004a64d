use core::fmt;

use super::ComparisonDataset;

impl ComparisonDataset {
    /// Write the dataset to a writer in CSV format.
    ///
    /// Columns: `series`, `x`, `value`, `pdf`, `cdf`. Rows of series
    /// `density` and `cumulative` fill `value`; rows of series `curve` fill
    /// `pdf` and `cdf`. Unused cells are empty.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use distcheck::{DistributionSpec, Harness};
    ///
    /// let dataset = Harness::builder()
    ///     .distribution(DistributionSpec::Uniform)
    ///     .num_trials(1_000)
    ///     .seed(1)
    ///     .build()
    ///     .unwrap()
    ///     .run()
    ///     .unwrap();
    ///
    /// let mut buf = Vec::new();
    /// dataset.to_csv(&mut buf).unwrap();
    /// let csv = String::from_utf8(buf).unwrap();
    /// assert!(csv.starts_with("series,x,value,pdf,cdf\n"));
    /// ```
    pub fn to_csv(&self, mut writer: impl std::io::Write) -> std::io::Result<()> {
        writeln!(writer, "series,x,value,pdf,cdf")?;
        for p in &self.density {
            writeln!(writer, "density,{},{},,", p.x, p.value)?;
        }
        for p in &self.cumulative {
            writeln!(writer, "cumulative,{},{},,", p.x, p.value)?;
        }
        for p in &self.curve {
            writeln!(writer, "curve,{},,{},{}", p.x, p.pdf, p.cdf)?;
        }
        Ok(())
    }

    /// Export the dataset to a CSV file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn export_csv(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.to_csv(&mut writer)?;
        std::io::Write::flush(&mut writer)
    }

    /// Write an Octave/MATLAB script that plots the histogram against the
    /// analytic curves.
    ///
    /// The script defines `xmin`, `xmax`, `num_bins`, the vectors `xh`/`h`
    /// (bin centres, empirical density), `xH`/`H` (right edges, empirical
    /// cumulative fraction) and `xf`/`f`/`F` (grid, analytic PDF and CDF),
    /// then opens one figure for the densities and one for the CDFs.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn to_octave(&self, mut writer: impl std::io::Write) -> std::io::Result<()> {
        writeln!(writer, "% auto-generated by distcheck: {}", self.spec)?;
        writeln!(writer, "% {} trials", self.num_trials)?;
        writeln!(writer)?;
        writeln!(writer, "clear all;")?;
        writeln!(writer, "close all;")?;
        writeln!(writer, "xmin = {};", sci(self.domain.xmin()))?;
        writeln!(writer, "xmax = {};", sci(self.domain.xmax()))?;
        writeln!(writer, "num_bins = {};", self.num_bins())?;
        writeln!(writer, "xspan = xmax - xmin;")?;

        for (i, (d, c)) in self.density.iter().zip(&self.cumulative).enumerate() {
            let n = i + 1;
            writeln!(
                writer,
                "xh({n:3}) = {}; h({n:3}) = {};",
                sci(d.x),
                sci(d.value)
            )?;
            writeln!(
                writer,
                "xH({n:3}) = {}; H({n:3}) = {};",
                sci(c.x),
                sci(c.value)
            )?;
        }

        for (i, p) in self.curve.iter().enumerate() {
            let n = i + 1;
            writeln!(
                writer,
                "xf({n:3}) = {}; f({n:3}) = {}; F({n:3}) = {};",
                sci(p.x),
                sci(p.pdf),
                sci(p.cdf)
            )?;
        }

        writeln!(writer, "figure;")?;
        writeln!(writer, "plot(xh,h,'x', xf,f,'-');")?;
        writeln!(writer, "xlabel('x');")?;
        writeln!(writer, "ylabel('f_x(x)');")?;
        writeln!(
            writer,
            "axis([(xmin-0.1*xspan) (xmax+0.1*xspan) 0 1.1*max([h f])]);"
        )?;
        writeln!(writer, "legend('histogram','true PDF','location','northeast');")?;

        writeln!(writer, "figure;")?;
        writeln!(writer, "plot(xH,H,'x', xf,F,'-');")?;
        writeln!(writer, "xlabel('x');")?;
        writeln!(writer, "ylabel('F_x(x)');")?;
        writeln!(writer, "legend('histogram','true CDF','location','southeast');")?;
        Ok(())
    }

    /// Export the Octave script to a file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn export_octave(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.to_octave(&mut writer)?;
        std::io::Write::flush(&mut writer)
    }

    /// Generate an HTML report with interactive Plotly.js charts.
    ///
    /// See [`generate_html_report`](crate::generate_html_report).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn export_html(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        crate::visualization::generate_html_report(self, path)
    }

    /// Return a short human-readable summary of the run.
    ///
    /// # Examples
    ///
    /// ```
    /// use distcheck::{DistributionSpec, Harness};
    ///
    /// let dataset = Harness::builder()
    ///     .distribution(DistributionSpec::Exponential { lambda: 3.0 })
    ///     .num_trials(500)
    ///     .seed(2)
    ///     .build()
    ///     .unwrap()
    ///     .run()
    ///     .unwrap();
    ///
    /// let summary = dataset.summary();
    /// assert!(summary.contains("exp(lambda=3)"));
    /// assert!(summary.contains("500 trials"));
    /// ```
    #[must_use]
    pub fn summary(&self) -> String {
        use fmt::Write;

        let mut s = format!(
            "{} | {} trials | {} bins over [{}, {}]",
            self.spec,
            self.num_trials,
            self.num_bins(),
            self.domain.xmin(),
            self.domain.xmax()
        );
        if let Some((i, &peak)) = self
            .counts
            .iter()
            .enumerate()
            .max_by_key(|&(_, count)| *count)
        {
            let _ = write!(
                s,
                "\nFullest bin: #{i} at x = {:.4} ({peak} samples, density {:.4})",
                self.density[i].x, self.density[i].value
            );
        }
        s
    }
}

impl fmt::Display for ComparisonDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Format like C's `%12.4e`: four decimals, a signed exponent of at least two
/// digits, right-aligned to width 12.
fn sci(value: f64) -> String {
    if value.is_nan() {
        return format!("{:>12}", "NaN");
    }
    if value.is_infinite() {
        return format!("{:>12}", if value > 0.0 { "Inf" } else { "-Inf" });
    }
    let raw = format!("{value:.4e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{:>12}",
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ComparisonCurve;
    use crate::distribution::DistributionSpec;
    use crate::domain::Domain;
    use crate::histogram::Histogram;

    fn dataset() -> ComparisonDataset {
        let domain = Domain::new(0.0, 1.0).unwrap();
        let mut hist = Histogram::new(domain, 2).unwrap();
        hist.extend([0.25, 0.75, 0.8]);
        let curve = ComparisonCurve::evaluate(&DistributionSpec::Uniform, domain, 3).unwrap();
        ComparisonDataset::assemble(DistributionSpec::Uniform, &hist, curve)
    }

    #[test]
    fn test_sci_matches_c_layout() {
        assert_eq!(sci(1.0), "  1.0000e+00");
        assert_eq!(sci(0.0), "  0.0000e+00");
        assert_eq!(sci(-4.0), " -4.0000e+00");
        assert_eq!(sci(2.333_333), "  2.3333e+00");
        assert_eq!(sci(0.0125), "  1.2500e-02");
        assert_eq!(sci(123_456.0), "  1.2346e+05");
        assert_eq!(sci(f64::NAN), "         NaN");
        assert_eq!(sci(f64::NEG_INFINITY), "        -Inf");
    }

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        dataset().to_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + 2 + 2 + 3);
        assert_eq!(lines[0], "series,x,value,pdf,cdf");
        assert!(lines[1].starts_with("density,0.25,"));
        assert_eq!(lines[3], "cumulative,0.5,0.3333333333333333,,");
        assert_eq!(lines[4], "cumulative,1,1,,");
        assert_eq!(lines[5], "curve,0,,1,0");
        assert_eq!(lines[7], "curve,1,,1,1");
    }

    #[test]
    fn test_octave_script_layout() {
        let mut buf = Vec::new();
        dataset().to_octave(&mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("xmin =   0.0000e+00;"));
        assert!(script.contains("xmax =   1.0000e+00;"));
        assert!(script.contains("num_bins = 2;"));
        assert!(script.contains("xh(  1) =   2.5000e-01; h(  1) =   6.6667e-01;"));
        assert!(script.contains("xH(  2) =   1.0000e+00; H(  2) =   1.0000e+00;"));
        assert!(script.contains("xf(  3) =   1.0000e+00; f(  3) =   1.0000e+00; F(  3) =   1.0000e+00;"));
        assert_eq!(script.matches("figure;").count(), 2);
        assert!(script.contains("plot(xh,h,'x', xf,f,'-');"));
        assert!(script.contains("plot(xH,H,'x', xf,F,'-');"));
    }

    #[test]
    fn test_summary_names_fullest_bin() {
        let ds = dataset();
        let s = ds.to_string();
        assert!(s.starts_with("uniform | 3 trials | 2 bins over [0, 1]"));
        assert!(s.contains("Fullest bin: #1"));
    }
}
