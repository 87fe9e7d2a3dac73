use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use crate::relativity::special::{length_contraction, lorentz_factor, time_dilation};
use crate::simulation::Run;

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub velocity_fraction: f64,
    pub gamma: f64,
    pub proper_time: f64,
    pub dilated_time: f64,
    pub proper_length: f64,
    pub contracted_length: f64,
}

impl DataPoint {
    pub fn at(velocity_fraction: f64, proper_time: f64, proper_length: f64) -> crate::error::Result<Self> {
        Ok(Self {
            velocity_fraction,
            gamma: lorentz_factor(velocity_fraction)?,
            proper_time,
            dilated_time: time_dilation(proper_time, velocity_fraction)?,
            proper_length,
            contracted_length: length_contraction(proper_length, velocity_fraction)?,
        })
    }
}

/// Samples `steps` speeds evenly over `[0, 1)`.
pub fn sweep(steps: usize, proper_time: f64, proper_length: f64) -> crate::error::Result<Vec<DataPoint>> {
    (0..steps)
        .map(|i| DataPoint::at(i as f64 / steps as f64, proper_time, proper_length))
        .collect()
}

pub fn export_csv(log: &[DataPoint], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "velocity_fraction",
        "gamma",
        "proper_time",
        "dilated_time",
        "proper_length",
        "contracted_length",
    ])?;
    for dp in log {
        writer.write_record([
            format!("{:.3}", dp.velocity_fraction),
            format!("{:.6}", dp.gamma),
            format!("{:.3}", dp.proper_time),
            format!("{:.3}", dp.dilated_time),
            format!("{:.3}", dp.proper_length),
            format!("{:.3}", dp.contracted_length),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = log.len(), "metrics written");
    Ok(())
}

/// Dumps every visible constituent position of a run, one row per point.
pub fn export_run_csv(run: &Run, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["time", "body", "label", "point", "x", "y"])?;
    for snapshot in &run.snapshots {
        for body in &snapshot.bodies {
            for (i, point) in body.points.iter().enumerate() {
                if let Some((x, y)) = point {
                    writer.write_record([
                        format!("{:.4}", snapshot.time),
                        body.id.to_string(),
                        body.label.clone(),
                        i.to_string(),
                        format!("{x:.6}"),
                        format!("{y:.6}"),
                    ])?;
                }
            }
        }
    }
    writer.flush()?;
    info!(path = %path.display(), frames = run.len(), "run written");
    Ok(())
}

type Curve = (&'static str, RGBColor, fn(&DataPoint) -> f64);

/// The plotted series: legend label, line colour, value against velocity.
fn curves() -> [Curve; 3] {
    [
        ("Time Dilation", BLUE, |d| d.dilated_time),
        ("Length Contraction", RED, |d| d.contracted_length),
        ("Lorentz Factor γ", GREEN, |d| d.gamma),
    ]
}

pub fn plot_results(log: &[DataPoint], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = log
        .iter()
        .flat_map(|d| [d.dilated_time, d.contracted_length, d.gamma])
        .fold(1.0, f64::max)
        .ceil();

    let mut chart = ChartBuilder::on(&root)
        .caption("Relativity Effects", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Velocity (fraction of c)")
        .draw()?;

    for (label, colour, value) in curves() {
        chart
            .draw_series(LineSeries::new(log.iter().map(|d| (d.velocity_fraction, value(d))), &colour))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &colour));
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;
    root.present()?;
    info!(path = %path.display(), "plot saved");

    Ok(())
}
