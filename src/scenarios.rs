//! Ready-made demonstrations: fixed bodies and events plus the frames worth
//! watching them from.

use clap::ValueEnum;

use crate::error::Result;
use crate::relativity::special::lorentz_factor;
use crate::relativity::{Event, Frame, Velocity};
use crate::simulation::{BodyId, BodySpec, Orientation, Simulation};
use crate::visualization::PlotLimits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    TimeDilation,
    LightClock,
    LengthContraction,
    TransverseLength,
    Simultaneity,
    PoleInBarn,
    TwinParadox,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 7] = [
        ScenarioKind::TimeDilation,
        ScenarioKind::LightClock,
        ScenarioKind::LengthContraction,
        ScenarioKind::TransverseLength,
        ScenarioKind::Simultaneity,
        ScenarioKind::PoleInBarn,
        ScenarioKind::TwinParadox,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::TimeDilation => "time-dilation",
            ScenarioKind::LightClock => "light-clock",
            ScenarioKind::LengthContraction => "length-contraction",
            ScenarioKind::TransverseLength => "transverse-length",
            ScenarioKind::Simultaneity => "simultaneity",
            ScenarioKind::PoleInBarn => "pole-in-barn",
            ScenarioKind::TwinParadox => "twin-paradox",
        }
    }

    pub fn build(&self) -> Result<Scenario> {
        match self {
            ScenarioKind::TimeDilation => time_dilation(),
            ScenarioKind::LightClock => light_clock(),
            ScenarioKind::LengthContraction => length_contraction(),
            ScenarioKind::TransverseLength => transverse_length(),
            ScenarioKind::Simultaneity => simultaneity(),
            ScenarioKind::PoleInBarn => pole_in_barn().map(|p| p.scenario),
            ScenarioKind::TwinParadox => twin_paradox().map(|t| t.scenario),
        }
    }
}

/// One observer of a scenario and what to show them.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub caption: String,
    pub frame: Frame,
    pub limits: PlotLimits,
    pub t_start: f64,
    pub t_end: f64,
}

impl View {
    fn new(caption: &str, frame: Frame, limits: [f64; 4], times: (f64, f64)) -> Result<Self> {
        Ok(Self {
            caption: caption.to_string(),
            frame,
            limits: PlotLimits::new(limits[0], limits[1], limits[2], limits[3])?,
            t_start: times.0,
            t_end: times.1,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub simulation: Simulation,
    pub views: Vec<View>,
    pub explanation: &'static str,
}

/// A train at 0.8 carrying a clock that sends out a light ring every 3 units
/// of its own time.
pub fn time_dilation() -> Result<Scenario> {
    let train_frame = Frame::moving_x(0.8)?;
    let mut sim = Simulation::new();
    sim.add(
        BodySpec::pulse(0.0, 0.0, 3.0, 5.0, 15.0)?
            .in_frame(train_frame)
            .labelled("clock"),
    )?;
    sim.add(
        BodySpec::train(-1.0, -1.0, 2.0, 2.0)
            .in_frame(train_frame)
            .labelled("train"),
    )?;
    let limits = [-20.0, 20.0, -5.0, 5.0];
    Ok(Scenario {
        kind: ScenarioKind::TimeDilation,
        simulation: sim,
        views: vec![
            View::new("Time dilation: train frame (clock ticks normally)", train_frame, limits, (0.0, 20.0))?,
            View::new("Time dilation: ground frame (clock runs slow)", Frame::LAB, limits, (0.0, 20.0))?,
        ],
        explanation: TIME_DILATION,
    })
}

/// A photon bouncing between mirrors 2 units apart inside a train at 0.8.
pub fn light_clock() -> Result<Scenario> {
    let train_frame = Frame::moving_x(0.8)?;
    let mut sim = Simulation::new();
    sim.add(
        BodySpec::light_clock(0.0, -1.0, 2.0, 12)?
            .in_frame(train_frame)
            .labelled("light clock"),
    )?;
    sim.add(
        BodySpec::train(-1.0, -1.0, 2.0, 2.0)
            .in_frame(train_frame)
            .labelled("train"),
    )?;
    Ok(Scenario {
        kind: ScenarioKind::LightClock,
        simulation: sim,
        views: vec![
            View::new("Light clock: train frame", train_frame, [-5.0, 5.0, -3.0, 3.0], (0.0, 12.0))?,
            View::new("Light clock: ground frame (time dilated)", Frame::LAB, [-2.0, 20.0, -3.0, 3.0], (0.0, 20.0))?,
        ],
        explanation: TIME_DILATION,
    })
}

/// Three rods of proper length 5 moving at 0.99, 0.5 and -0.5.
pub fn length_contraction() -> Result<Scenario> {
    let mut sim = Simulation::new();
    for (row, v) in [0.99, 0.5, -0.5].into_iter().enumerate() {
        sim.add(
            BodySpec::rod(0.0, row as f64, 5.0, Orientation::Horizontal)
                .in_frame(Frame::moving_x(v)?)
                .labelled(format!("rod at {v}c")),
        )?;
    }
    let limits = [-5.0, 10.0, -2.0, 3.0];
    Ok(Scenario {
        kind: ScenarioKind::LengthContraction,
        simulation: sim,
        views: vec![
            View::new("Length contraction: ground frame", Frame::LAB, limits, (0.0, 10.0))?,
            View::new("Length contraction: frame moving at 0.5c", Frame::moving_x(0.5)?, limits, (0.0, 10.0))?,
        ],
        explanation: LENGTH_CONTRACTION,
    })
}

/// Rods standing perpendicular to their motion keep their length.
pub fn transverse_length() -> Result<Scenario> {
    let mut sim = Simulation::new();
    sim.add(BodySpec::rod(0.0, 0.0, 5.0, Orientation::Vertical).labelled("resting rod"))?;
    sim.add(
        BodySpec::rod(1.0, 0.0, 5.0, Orientation::Vertical)
            .moving_x(0.5)
            .labelled("moving rod"),
    )?;
    Ok(Scenario {
        kind: ScenarioKind::TransverseLength,
        simulation: sim,
        views: vec![View::new(
            "No transverse length contraction",
            Frame::LAB,
            [-5.0, 10.0, -2.0, 7.0],
            (0.0, 10.0),
        )?],
        explanation: LENGTH_CONTRACTION,
    })
}

/// Two events at t = 1, x = 1 and x = 5, simultaneous in the ground frame.
pub fn simultaneity() -> Result<Scenario> {
    let mut sim = Simulation::new().with_flash_duration(1.0)?;
    sim.add_event(Event::new(1.0, 1.0, 0.0), Frame::LAB, "A");
    sim.add_event(Event::new(1.0, 5.0, 0.0), Frame::LAB, "B");
    sim.add(BodySpec::train(-1.0, -1.0, 7.0, 2.0).labelled("platform"))?;
    let limits = [-5.0, 10.0, -2.0, 2.0];
    let times = (-3.0, 10.0);
    Ok(Scenario {
        kind: ScenarioKind::Simultaneity,
        simulation: sim,
        views: vec![
            View::new("Simultaneity: ground frame (events simultaneous)", Frame::LAB, limits, times)?,
            View::new("Simultaneity: frame moving at 0.5c in x", Frame::moving_x(0.5)?, limits, times)?,
            View::new(
                "Simultaneity: frame moving diagonally",
                Frame::new(0.5, 0.5)?,
                [-5.0, 10.0, -5.0, 5.0],
                times,
            )?,
        ],
        explanation: SIMULTANEITY,
    })
}

pub struct PoleInBarn {
    pub scenario: Scenario,
    pub pole: BodyId,
    pub barn_floor: BodyId,
    pub near_door: BodyId,
    pub far_door: BodyId,
    pub pole_frame: Frame,
    /// Ground-frame time at which both doors shut.
    pub doors_close_at: f64,
}

/// A pole of proper length 6 carried at 0.85 through a barn of the same
/// proper length whose doors shut together, in the ground frame, while the
/// contracted pole is inside.
pub fn pole_in_barn() -> Result<PoleInBarn> {
    const SPEED: f64 = 0.85;
    const LENGTH: f64 = 6.0;
    const DOORS_CLOSE_AT: f64 = 13.5;
    const DOORS_SHUT_FOR: f64 = 1.0;

    let pole_frame = Frame::moving_x(SPEED)?;
    let contracted = LENGTH / lorentz_factor(SPEED)?;
    let mut sim = Simulation::new();

    let pole = sim.add(
        BodySpec::rod(-13.0, 0.0, LENGTH, Orientation::Horizontal)
            .moving_x(SPEED)
            .labelled("pole"),
    )?;
    sim.add(
        BodySpec::person(-13.0 + contracted / 2.0, -0.8, 0.8)
            .moving_x(SPEED)
            .labelled("runner"),
    )?;
    let barn_floor = sim.add(BodySpec::rod(-3.0, -1.0, LENGTH, Orientation::Horizontal).labelled("barn floor"))?;
    sim.add(BodySpec::rod(-3.0, 1.0, LENGTH, Orientation::Horizontal).labelled("barn roof"))?;
    let near_door = sim.add(
        BodySpec::rod(-3.0, -1.0, 2.0, Orientation::Vertical)
            .starting_at(DOORS_CLOSE_AT)
            .until(DOORS_CLOSE_AT + DOORS_SHUT_FOR)
            .labelled("near door"),
    )?;
    let far_door = sim.add(
        BodySpec::rod(3.0, -1.0, 2.0, Orientation::Vertical)
            .starting_at(DOORS_CLOSE_AT)
            .until(DOORS_CLOSE_AT + DOORS_SHUT_FOR)
            .labelled("far door"),
    )?;

    let scenario = Scenario {
        kind: ScenarioKind::PoleInBarn,
        simulation: sim,
        views: vec![
            View::new("Pole in barn: ground frame (pole fits)", Frame::LAB, [-15.0, 15.0, -5.0, 5.0], (0.0, 25.0))?,
            View::new(
                "Pole in barn: pole frame (doors not simultaneous)",
                pole_frame,
                [-40.0, 15.0, -5.0, 5.0],
                (-10.0, 40.0),
            )?,
        ],
        explanation: POLE_IN_BARN,
    };
    Ok(PoleInBarn {
        scenario,
        pole,
        barn_floor,
        near_door,
        far_door,
        pole_frame,
        doors_close_at: DOORS_CLOSE_AT,
    })
}

pub struct TwinParadox {
    pub scenario: Scenario,
    pub earth: BodyId,
    pub outbound: BodyId,
    pub inbound: BodyId,
    pub distance: f64,
    pub speed: f64,
    pub earth_signals: usize,
    pub traveller_signals: usize,
}

impl TwinParadox {
    /// Time the stay-at-home twin lives through.
    pub fn earth_age(&self) -> f64 {
        self.scenario.simulation.proper_time(self.earth).unwrap_or_default()
    }

    /// Time the travelling twin lives through, summed over both legs.
    pub fn traveller_age(&self) -> f64 {
        let sim = &self.scenario.simulation;
        sim.proper_time(self.outbound).unwrap_or_default() + sim.proper_time(self.inbound).unwrap_or_default()
    }
}

/// One twin stays home, the other flies to a star 8 units away at 0.8 and
/// back. Each sends a light signal toward the other once per unit of their
/// own time.
pub fn twin_paradox() -> Result<TwinParadox> {
    const DISTANCE: f64 = 8.0;
    const SPEED: f64 = 0.8;

    let gamma = lorentz_factor(SPEED)?;
    let turnaround = DISTANCE / SPEED;
    let trip = 2.0 * turnaround;
    let mut sim = Simulation::new();

    let earth = sim.add(BodySpec::point(0.0, 0.0).starting_at(0.0).until(trip).labelled("earth twin"))?;
    sim.add(BodySpec::point(DISTANCE, 0.0).labelled("star"))?;
    let outbound = sim.add(
        BodySpec::point(0.0, 0.0)
            .moving_x(SPEED)
            .starting_at(0.0)
            .until(turnaround)
            .labelled("traveller outbound"),
    )?;
    let inbound = sim.add(
        BodySpec::point(DISTANCE, 0.0)
            .moving_x(-SPEED)
            .starting_at(turnaround)
            .until(trip)
            .labelled("traveller inbound"),
    )?;

    // Earth ticks once per unit of ground time.
    let earth_signals = (trip + 1e-9).floor() as usize;
    for tick in 1..=earth_signals {
        let t = tick as f64;
        sim.add(
            BodySpec::light_signal(0.0, 0.0, Velocity::new(1.0, 0.0))?
                .starting_at(t)
                .until(t + DISTANCE)
                .labelled(format!("earth signal {tick}")),
        )?;
    }

    // The traveller ticks once per unit of proper time.
    let traveller_signals = (trip / gamma + 1e-9).floor() as usize;
    for tick in 1..=traveller_signals {
        let t = tick as f64 * gamma;
        let x = if t <= turnaround {
            SPEED * t
        } else {
            (DISTANCE - SPEED * (t - turnaround)).max(0.0)
        };
        sim.add(
            BodySpec::light_signal(x, 0.0, Velocity::new(-1.0, 0.0))?
                .starting_at(t)
                .until(t + x)
                .labelled(format!("traveller signal {tick}")),
        )?;
    }

    let scenario = Scenario {
        kind: ScenarioKind::TwinParadox,
        simulation: sim,
        views: vec![View::new(
            "Twin paradox: ground frame",
            Frame::LAB,
            [-1.0, DISTANCE + 1.0, -1.0, 1.0],
            (0.0, trip),
        )?],
        explanation: TWIN_PARADOX,
    };
    Ok(TwinParadox {
        scenario,
        earth,
        outbound,
        inbound,
        distance: DISTANCE,
        speed: SPEED,
        earth_signals,
        traveller_signals,
    })
}

const TIME_DILATION: &str = "\
Time dilation
=============
A clock moving at speed v ticks slower, as seen from the ground, by the
Lorentz factor gamma = 1/sqrt(1 - v^2). At 0.8c gamma = 5/3: the train's
clock sends a pulse every 3 units of its own time, but the ground sees one
every 5 units. In the train frame nothing is unusual.

A light clock makes the reason visible: in the train the photon goes
straight up and down, while from the ground it follows a longer diagonal
path at the same speed c, so each tick takes longer.";

const LENGTH_CONTRACTION: &str = "\
Length contraction
==================
A rod of proper length L moving at v along its length measures
L * sqrt(1 - v^2) in the frame it moves through. All rods here have the
same proper length; the one at 0.99c shrinks to about a seventh of it.
Switching to a frame moving at 0.5c changes which rods look short, since
only the rod's speed relative to the observer matters.

Lengths perpendicular to the motion are unchanged: vertical rods keep their
full length whatever their speed.";

const SIMULTANEITY: &str = "\
Relativity of simultaneity
==========================
The time coordinate transforms as t' = gamma (t - v x). Two events at the
same t but different x get different t' in a moving frame. For an observer
moving in +x the event at larger x happens first.

There is no universal 'now': which distant events count as simultaneous
depends on the observer. This is a property of spacetime geometry, not of
signal delays.";

const POLE_IN_BARN: &str = "\
Pole-in-barn paradox
====================
A pole and a barn share the same proper length. The pole is carried toward
the barn at 0.85c.

Ground frame: the pole is contracted to about 0.53 of its length, fits
inside the barn, and both doors can be shut at the same moment.

Pole frame: the barn is the contracted one and the pole cannot fit. But the
doors do not shut at the same moment here: the far door shuts and reopens
first, and the near door only shuts after the back of the pole is inside.

Both descriptions agree on every event; they disagree only on which events
are simultaneous.";

const TWIN_PARADOX: &str = "\
Twin paradox
============
One twin stays on Earth; the other flies to a star at 0.8c and returns.
Each sends a light signal once per year of their own time.

Earth's twin ages 20 years and sends 20 signals. The traveller ages only
12 years and sends 12. The situation is not symmetric: the traveller
changes inertial frame at the turnaround, while the Earth twin stays in
one frame throughout. Counting the signals shows who is older when they
meet again.";
