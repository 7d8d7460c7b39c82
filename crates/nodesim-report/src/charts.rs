//! ---
//! nsim_section: "04-reporting-visualisation"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Best-effort PNG chart rendering for simulation runs."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
//! Chart rendering is strictly best-effort: every failure is logged and
//! swallowed, and a build without the `charts` feature simply produces zero
//! artifacts. Nothing in here may fail a run.

use std::path::{Path, PathBuf};

use nodesim_engine::SimResult;

/// Render `signal.png` (ground truth vs reconstruction) and
/// `energy_breakdown.png` (per-category bars, total in the title) under
/// `out_dir`. Returns the paths actually written.
#[cfg(feature = "charts")]
pub fn save_charts(result: &SimResult, out_dir: &Path, title: &str) -> Vec<PathBuf> {
    use tracing::warn;

    if let Err(err) = std::fs::create_dir_all(out_dir) {
        warn!(dir = %out_dir.display(), %err, "skipping charts: cannot create output directory");
        return Vec::new();
    }

    let mut paths = Vec::new();

    let signal_path = out_dir.join("signal.png");
    match render::signal_chart(result, &signal_path, title) {
        Ok(()) => paths.push(signal_path),
        Err(err) => warn!(%err, "skipping signal chart"),
    }

    let energy_path = out_dir.join("energy_breakdown.png");
    match render::energy_chart(result, &energy_path, title) {
        Ok(()) => paths.push(energy_path),
        Err(err) => warn!(%err, "skipping energy chart"),
    }

    paths
}

/// Chart rendering is compiled out; reports zero artifacts.
#[cfg(not(feature = "charts"))]
pub fn save_charts(_result: &SimResult, _out_dir: &Path, _title: &str) -> Vec<PathBuf> {
    tracing::debug!("charts feature disabled; no chart artifacts produced");
    Vec::new()
}

#[cfg(feature = "charts")]
mod render {
    use std::path::Path;

    use anyhow::Result;
    use nodesim_engine::SimResult;
    use plotters::prelude::*;

    pub fn signal_chart(result: &SimResult, path: &Path, title: &str) -> Result<()> {
        let root = BitMapBackend::new(path, (960, 540)).into_drawing_area();
        root.fill(&WHITE)?;

        let t_max = result.t.last().copied().unwrap_or(0) as f64;
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &v in result.truth.iter().chain(result.reconstructed.iter()) {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
        let pad = ((y_max - y_min) * 0.1).max(0.5);

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{title} - signal"), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..t_max.max(1.0), (y_min - pad)..(y_max + pad))?;
        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Signal value")
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                result
                    .t
                    .iter()
                    .zip(&result.truth)
                    .map(|(&t, &v)| (t as f64, v)),
                &BLUE,
            ))?
            .label("ground truth")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLUE));
        chart
            .draw_series(LineSeries::new(
                result
                    .t
                    .iter()
                    .zip(&result.reconstructed)
                    .map(|(&t, &v)| (t as f64, v)),
                &RED,
            ))?
            .label("reconstructed (receiver view)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        root.present()?;
        Ok(())
    }

    pub fn energy_chart(result: &SimResult, path: &Path, title: &str) -> Result<()> {
        let root = BitMapBackend::new(path, (960, 540)).into_drawing_area();
        root.fill(&WHITE)?;

        let categories = result.energy_breakdown_mj.categories();
        let max = categories
            .iter()
            .map(|(_, v)| *v)
            .fold(0.0f64, f64::max)
            .max(1e-9);

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!(
                    "{title} - energy breakdown (total {:.1} mJ)",
                    result.energy_total_mj
                ),
                ("sans-serif", 24),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..categories.len() as f64, 0f64..max * 1.1)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(categories.len())
            .x_label_formatter(&|x| {
                categories
                    .get(*x as usize)
                    .map(|(name, _)| (*name).to_owned())
                    .unwrap_or_default()
            })
            .y_desc("Energy (mJ)")
            .draw()?;

        chart.draw_series(categories.iter().enumerate().map(|(i, (_, v))| {
            Rectangle::new(
                [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *v)],
                BLUE.mix(0.6).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodesim_engine::{simulate, EnergyModel, FixedSamplingPolicy, NodeConfig};

    fn sample_result() -> SimResult {
        let cfg = NodeConfig {
            duration_s: 30,
            seed: 3,
            ..NodeConfig::default()
        };
        let mut policy = FixedSamplingPolicy::new(5);
        simulate(&mut policy, &cfg, &EnergyModel::default()).unwrap()
    }

    #[cfg(feature = "charts")]
    #[test]
    fn renders_both_artifacts() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let paths = save_charts(&result, dir.path(), "fixed_5s");
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert!(path.exists(), "missing chart {}", path.display());
        }
    }

    #[cfg(not(feature = "charts"))]
    #[test]
    fn disabled_feature_produces_zero_artifacts() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        assert!(save_charts(&result, dir.path(), "fixed_5s").is_empty());
    }

    #[test]
    fn unwritable_directory_is_not_fatal() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("plots");
        std::fs::write(&blocker, b"x").unwrap();
        // A file in place of the directory: charts are skipped, never a panic.
        let paths = save_charts(&result, &blocker, "fixed_5s");
        assert!(paths.is_empty());
    }
}
