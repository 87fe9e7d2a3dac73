use crossterm::event::{self, Event, KeyCode};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::Color,
    widgets::canvas::{Canvas, Circle, Line},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::metrics::{DataPoint, export_csv, plot_results};
use crate::relativity::Frame;
use crate::scenarios::{Scenario, ScenarioKind};
use crate::utils::format_frame;
use crate::visualization::scene::{FLASH_COLOUR, Primitive, Rgb, primitives};

const PROPER_TIME: f64 = 10.0;
const PROPER_LENGTH: f64 = 100.0;
const MAX_SPEED: f64 = 0.99;

fn colour(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

struct Explorer {
    kind_index: usize,
    scenario: Scenario,
    velocity_fraction: f64,
    time: f64,
    paused: bool,
    log: Vec<DataPoint>,
}

impl Explorer {
    fn new() -> anyhow::Result<Self> {
        Ok(Self {
            kind_index: 0,
            scenario: ScenarioKind::ALL[0].build()?,
            velocity_fraction: 0.0,
            time: 0.0,
            paused: false,
            log: Vec::new(),
        })
    }

    fn frame(&self) -> anyhow::Result<Frame> {
        Ok(Frame::moving_x(self.velocity_fraction)?)
    }

    fn view_time_range(&self) -> (f64, f64) {
        let view = &self.scenario.views[0];
        (view.t_start, view.t_end)
    }

    fn next_scenario(&mut self) -> anyhow::Result<()> {
        self.kind_index = (self.kind_index + 1) % ScenarioKind::ALL.len();
        self.scenario = ScenarioKind::ALL[self.kind_index].build()?;
        self.time = self.view_time_range().0;
        Ok(())
    }

    fn set_velocity(&mut self, v: f64) -> anyhow::Result<()> {
        self.velocity_fraction = (v * 100.0).round() / 100.0;
        self.velocity_fraction = self.velocity_fraction.clamp(-MAX_SPEED, MAX_SPEED);
        self.log.push(DataPoint::at(self.velocity_fraction.abs(), PROPER_TIME, PROPER_LENGTH)?);
        Ok(())
    }

    fn tick(&mut self, dt: f64) {
        if self.paused {
            return;
        }
        let (start, end) = self.view_time_range();
        self.time += dt;
        if self.time > end {
            self.time = start;
        }
    }
}

/// Interactive explorer: arrows change the observer's velocity, Tab switches
/// scenario, Space pauses, q quits and exports the session log.
pub fn start(csv_path: &Path, plot_path: &Path) -> anyhow::Result<()> {
    // Setup terminal
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = Explorer::new()?;
    let outcome = run_loop(&mut terminal, &mut app, || {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key.code));
            }
        }
        Ok(None)
    });

    // Restore the terminal before reporting any error from the loop.
    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    if !app.log.is_empty() {
        export_csv(&app.log, csv_path)?;
        println!("✅ Data exported to {}", csv_path.display());
        plot_results(&app.log, plot_path)?;
        println!("✅ Plot saved to {}", plot_path.display());
    }
    Ok(())
}

/// Draws and reacts to keys until `q`. `next_key` yields the pressed key, if any.
fn run_loop<B, K>(terminal: &mut Terminal<B>, app: &mut Explorer, mut next_key: K) -> anyhow::Result<()>
where
    B: Backend,
    K: FnMut() -> io::Result<Option<KeyCode>>,
{
    loop {
        let frame = app.frame()?;
        let snapshot = app.scenario.simulation.snapshot(frame, app.time)?;
        let limits = app.scenario.views[0].limits;
        let gamma = frame.gamma();

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(10),
                    Constraint::Length(3),
                ])
                .split(f.area());

            let header = format!(
                "Scenario: {}  |  Observer velocity: {}  |  γ = {:.4}",
                app.scenario.kind.name(),
                format_frame(&frame),
                gamma
            );
            let time_text = format!(
                "Observer time: {:.2}  |  Proper time {:.1} lasts {:.2}  |  Proper length {:.0} measures {:.2}",
                app.time,
                PROPER_TIME,
                PROPER_TIME * gamma,
                PROPER_LENGTH,
                PROPER_LENGTH / gamma
            );

            let prims = primitives(&snapshot, app.scenario.simulation.flash_duration());
            let canvas = Canvas::default()
                .block(Block::default().borders(Borders::ALL).title("Spacetime slice"))
                .x_bounds([limits.x_min, limits.x_max])
                .y_bounds([limits.y_min, limits.y_max])
                .paint(move |ctx| {
                    for p in &prims {
                        match p {
                            Primitive::Segment { from, to, colour: c } => {
                                ctx.draw(&Line::new(from.0, from.1, to.0, to.1, colour(*c)));
                            }
                            Primitive::Marker { at, colour: c } => {
                                ctx.draw(&Circle {
                                    x: at.0,
                                    y: at.1,
                                    radius: 0.1,
                                    color: colour(*c),
                                });
                            }
                            Primitive::Flash { at, label, .. } => {
                                ctx.draw(&Circle {
                                    x: at.0,
                                    y: at.1,
                                    radius: 0.3,
                                    color: colour(FLASH_COLOUR),
                                });
                                ctx.print(at.0, at.1, label.clone());
                            }
                        }
                    }
                });

            f.render_widget(
                Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
                chunks[0],
            );
            f.render_widget(
                Paragraph::new(time_text).block(Block::default().borders(Borders::ALL)),
                chunks[1],
            );
            f.render_widget(canvas, chunks[2]);
            f.render_widget(
                Paragraph::new("←/→ velocity  Tab scenario  Space pause  q quit")
                    .block(Block::default().borders(Borders::ALL)),
                chunks[3],
            );
        })?;

        if let Some(code) = next_key()? {
            match code {
                KeyCode::Right => app.set_velocity(app.velocity_fraction + 0.01)?,
                KeyCode::Left => app.set_velocity(app.velocity_fraction - 0.01)?,
                KeyCode::Tab => app.next_scenario()?,
                KeyCode::Char(' ') => app.paused = !app.paused,
                KeyCode::Char('q') => return Ok(()),
                _ => {}
            }
        }
        app.tick(0.05);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn test_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(100, 40)).unwrap()
    }

    #[test]
    fn velocity_is_clamped_below_light() {
        let mut app = Explorer::new().unwrap();
        for _ in 0..200 {
            app.set_velocity(app.velocity_fraction + 0.01).unwrap();
        }
        assert_eq!(app.velocity_fraction, MAX_SPEED);
        assert!(app.frame().is_ok());
        assert_eq!(app.log.len(), 200);
    }

    #[test]
    fn time_wraps_to_view_start() {
        let mut app = Explorer::new().unwrap();
        let (start, end) = app.view_time_range();
        app.time = end;
        app.tick(0.05);
        assert_eq!(app.time, start);
        app.paused = true;
        app.tick(0.05);
        assert_eq!(app.time, start);
    }

    #[test]
    fn loop_applies_keys_until_quit() {
        let mut terminal = test_terminal();
        let mut app = Explorer::new().unwrap();
        let mut keys = vec![KeyCode::Right, KeyCode::Right, KeyCode::Tab, KeyCode::Char('q')].into_iter();
        run_loop(&mut terminal, &mut app, || Ok(keys.next())).unwrap();
        assert_eq!(app.velocity_fraction, 0.02);
        assert_eq!(app.kind_index, 1);
        assert_eq!(app.log.len(), 2);
    }

    #[test]
    fn loop_hands_back_input_errors() {
        let mut terminal = test_terminal();
        let mut app = Explorer::new().unwrap();
        let mut calls = 0;
        let outcome = run_loop(&mut terminal, &mut app, || {
            calls += 1;
            if calls < 3 {
                Ok(Some(KeyCode::Left))
            } else {
                Err(io::Error::other("input closed"))
            }
        });
        let err = outcome.unwrap_err();
        assert!(err.to_string().contains("input closed"));
        assert_eq!(app.velocity_fraction, -0.02);
    }
}
