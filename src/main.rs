use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use relgraph::config::{ConfigLoader, RenderConfig};
use relgraph::metrics::{export_csv, export_run_csv, plot_results, sweep};
use relgraph::relativity::transforms::lorentz_transform;
use relgraph::relativity::{Event, Frame, Velocity};
use relgraph::scenarios::{ScenarioKind, View};
use relgraph::simulation::Simulation;
use relgraph::utils::{always, format_event, frame_slug, parse_frame};
use relgraph::visualization::{MinkowskiDiagram, PlotLimits, RelativisticAnimation};

const DEFAULT_LOG_FILTER: &str = "relgraph=info";

/// relgraph - special relativity, frame by frame
#[derive(Parser)]
#[command(name = "relgraph", about = "Visualise special relativity in natural units (c = 1)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run interactive TUI explorer
    Tui {
        #[arg(long, default_value = "realtime.csv")]
        csv: PathBuf,
        #[arg(long, default_value = "plot.png")]
        plot: PathBuf,
    },
    /// Lorentz-transform one event
    Transform {
        #[arg(long, allow_hyphen_values = true)]
        t: f64,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        vx: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        vy: f64,
    },
    /// Render a built-in scenario as animations and spacetime diagrams
    Scenario {
        #[arg(value_enum)]
        name: ScenarioKind,
        /// Extra observer velocity, "vx" or "vx,vy"
        #[arg(long, allow_hyphen_values = true)]
        frame: Option<String>,
        #[arg(long, default_value = "output")]
        out: PathBuf,
        #[arg(long, default_value_t = 0.1)]
        dt: f64,
        /// Also dump every sampled position to CSV
        #[arg(long)]
        csv: bool,
    },
    /// Render a scene described in a JSON file
    Scene { path: PathBuf },
    /// Print the physics behind a scenario
    Explain {
        #[arg(value_enum)]
        name: ScenarioKind,
    },
    /// Generate metrics and export to CSV
    Metrics {
        #[arg(long, default_value_t = 10.0)]
        proper_time: f64,
        #[arg(long, default_value_t = 100.0)]
        proper_length: f64,
        #[arg(long, default_value_t = 100)]
        steps: usize,
        #[arg(long, default_value = "metrics.csv")]
        csv: PathBuf,
        #[arg(long, default_value = "plot.png")]
        plot: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tui { csv, plot }) => relgraph::tui::start(&csv, &plot)?,
        Some(Commands::Transform { t, x, y, vx, vy }) => run_transform(Event::new(t, x, y), Velocity::new(vx, vy))?,
        Some(Commands::Scenario {
            name,
            frame,
            out,
            dt,
            csv,
        }) => {
            let config = RenderConfig {
                dt,
                output_dir: out,
                ..RenderConfig::default()
            };
            config.validate()?;
            let extra = frame.as_deref().map(parse_frame).transpose()?;
            run_scenario(name, extra, &config, csv)?
        }
        Some(Commands::Scene { path }) => run_scene(&path)?,
        Some(Commands::Explain { name }) => println!("{}", name.build()?.explanation),
        Some(Commands::Metrics {
            proper_time,
            proper_length,
            steps,
            csv,
            plot,
        }) => run_metrics(proper_time, proper_length, steps, &csv, &plot)?,
        None => relgraph::tui::start(Path::new("realtime.csv"), Path::new("plot.png"))?, // default
    }

    Ok(())
}

/// `RUST_LOG` when it is set and parses, `relgraph=info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn run_transform(event: Event, velocity: Velocity) -> Result<()> {
    let moved = lorentz_transform(&event, velocity)?;
    println!("event     {}", format_event(&event));
    println!("boosted   {}", format_event(&moved));
    println!("interval  {:.9} -> {:.9}", event.interval(), moved.interval());
    Ok(())
}

fn render_view(
    sim: &Simulation,
    view: &View,
    config: &RenderConfig,
    stem: &str,
    csv: bool,
) -> Result<()> {
    let run = sim.run(view.frame, config.dt, view.t_start, view.t_end, always)?;
    let slug = frame_slug(&view.frame);
    let dir = &config.output_dir;

    let animation = RelativisticAnimation::new(run.clone(), view.limits, &view.caption)
        .with_flash_duration(sim.flash_duration());
    animation.save_gif(&dir.join(format!("{stem}_{slug}.gif")), config)?;
    animation.save_frame(
        animation.frame_count().saturating_sub(1),
        &dir.join(format!("{stem}_{slug}_last.png")),
        config,
    )?;

    MinkowskiDiagram::new(
        &view.caption,
        view.frame,
        (view.limits.x_min, view.limits.x_max),
        (view.t_start, view.t_end),
    )?
    .comparing_with(Frame::LAB)
    .save_png(sim, &dir.join(format!("{stem}_{slug}_minkowski.png")), config)?;

    if csv {
        export_run_csv(&run, &dir.join(format!("{stem}_{slug}.csv")))?;
    }
    Ok(())
}

fn run_scenario(kind: ScenarioKind, extra: Option<Frame>, config: &RenderConfig, csv: bool) -> Result<()> {
    let scenario = kind.build()?;
    fs::create_dir_all(&config.output_dir)?;
    info!(scenario = kind.name(), views = scenario.views.len(), "rendering scenario");

    let mut views = scenario.views.clone();
    if let Some(frame) = extra {
        let base = &scenario.views[0];
        views.push(View {
            caption: format!("{}: custom frame", kind.name()),
            frame,
            ..base.clone()
        });
    }
    for view in &views {
        render_view(&scenario.simulation, view, config, kind.name(), csv)?;
    }
    println!("✅ {} written to {}", kind.name(), config.output_dir.display());
    Ok(())
}

fn run_scene(path: &Path) -> Result<()> {
    let scene = ConfigLoader::from_file(path)?;
    ConfigLoader::validate(&scene)?;
    let sim = scene.build_simulation()?;
    fs::create_dir_all(&scene.render.output_dir)?;
    info!(title = %scene.title, bodies = sim.bodies().len(), "rendering scene");

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene")
        .to_string();
    for (view_config, frame) in scene.views.iter().zip(scene.view_frames()?) {
        let limits = match view_config.limits {
            Some(limits) => limits,
            None => {
                let sample_run = sim.run(frame, scene.render.dt, scene.t_start, scene.t_end, always)?;
                PlotLimits::fit(&sample_run, 1.0).unwrap_or(PlotLimits::new(-10.0, 10.0, -10.0, 10.0)?)
            }
        };
        let view = View {
            caption: view_config.title.clone().unwrap_or_else(|| scene.title.clone()),
            frame,
            limits,
            t_start: scene.t_start,
            t_end: scene.t_end,
        };
        render_view(&sim, &view, &scene.render, &stem, false)?;
    }
    println!("✅ {} written to {}", scene.title, scene.render.output_dir.display());
    Ok(())
}

fn run_metrics(proper_time: f64, proper_length: f64, steps: usize, csv: &Path, plot: &Path) -> Result<()> {
    let log = sweep(steps, proper_time, proper_length)?;
    export_csv(&log, csv)?;
    println!("✅ Metrics written to {}", csv.display());
    plot_results(&log, plot)?;
    println!("✅ Plot saved to {}", plot.display());
    Ok(())
}
