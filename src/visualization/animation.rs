use std::path::Path;

use anyhow::Context;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use super::scene::{FLASH_COLOUR, PlotLimits, Primitive, Rgb, primitives};
use crate::config::RenderConfig;
use crate::simulation::{Run, Snapshot};

pub(crate) fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// A run ready to be drawn frame by frame.
pub struct RelativisticAnimation {
    run: Run,
    limits: PlotLimits,
    title: String,
    flash_duration: f64,
}

impl RelativisticAnimation {
    pub fn new(run: Run, limits: PlotLimits, title: impl Into<String>) -> Self {
        Self {
            run,
            limits,
            title: title.into(),
            flash_duration: 0.5,
        }
    }

    pub fn with_flash_duration(mut self, duration: f64) -> Self {
        self.flash_duration = duration;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.run.len()
    }

    /// Writes every snapshot of the run as one frame of an animated GIF.
    pub fn save_gif(&self, path: &Path, config: &RenderConfig) -> anyhow::Result<()> {
        let root = BitMapBackend::gif(path, (config.width, config.height), config.frame_delay_ms)?
            .into_drawing_area();
        for snapshot in &self.run.snapshots {
            root.fill(&WHITE)?;
            self.draw(&root, snapshot)?;
            root.present()?;
        }
        info!(path = %path.display(), frames = self.frame_count(), "animation saved");
        Ok(())
    }

    /// Writes a single snapshot as a PNG still.
    pub fn save_frame(&self, index: usize, path: &Path, config: &RenderConfig) -> anyhow::Result<()> {
        let snapshot = self
            .run
            .snapshots
            .get(index)
            .with_context(|| format!("frame {index} out of range (run has {})", self.frame_count()))?;
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE)?;
        self.draw(&root, snapshot)?;
        root.present()?;
        info!(path = %path.display(), index, "frame saved");
        Ok(())
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, snapshot: &Snapshot) -> anyhow::Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let l = self.limits;
        let mut chart = ChartBuilder::on(root)
            .caption(
                format!("{}   t = {:.2}", self.title, snapshot.time),
                ("sans-serif", 20),
            )
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(l.x_min..l.x_max, l.y_min..l.y_max)?;

        chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

        for primitive in primitives(snapshot, self.flash_duration) {
            match primitive {
                Primitive::Segment { from, to, colour } => {
                    chart.draw_series(LineSeries::new(vec![from, to], rgb(colour).stroke_width(2)))?;
                }
                Primitive::Marker { at, colour } => {
                    chart.draw_series(std::iter::once(Circle::new(at, 3, rgb(colour).filled())))?;
                }
                Primitive::Flash { at, label, fade } => {
                    let colour = rgb(FLASH_COLOUR).mix(1.0 - fade);
                    chart.draw_series(std::iter::once(Circle::new(at, 8, colour.filled())))?;
                    chart.draw_series(std::iter::once(Text::new(label, at, ("sans-serif", 14))))?;
                }
            }
        }
        Ok(())
    }
}
