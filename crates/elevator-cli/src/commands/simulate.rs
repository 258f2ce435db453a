//! Headless ride over the real page layout, printed frame by frame

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::debug;

use elevator_core::engine::{Elevator, FrameQueue, Viewport};
use elevator_core::sound::Silent;
use elevator_core::ElevatorConfig;
use elevator_tui::viewport::PageViewport;

/// Page size the simulated terminal has
const SIM_WIDTH: u16 = 80;
const SIM_HEIGHT: u16 = 24;

/// Frames after which a ride is considered stuck
const MAX_FRAMES: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub frame: usize,
    pub time_ms: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub from: f64,
    pub to: f64,
    pub arrived: bool,
    pub samples: Vec<Sample>,
}

pub struct SimulateOptions {
    pub from: f64,
    pub fps: u32,
    pub json: bool,
    /// Pace output at the frame rate instead of printing at once
    pub realtime: bool,
}

pub async fn run(config: ElevatorConfig, options: SimulateOptions) -> Result<()> {
    if options.fps == 0 {
        bail!("--fps must be at least 1");
    }

    let trajectory = simulate(config, options.from, options.fps)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&trajectory)?);
        return Ok(());
    }

    println!("Riding from {:.1} to {:.1}\n", trajectory.from, trajectory.to);
    println!("{:>6}  {:>9}  {:>9}", "frame", "t (ms)", "offset");

    let mut interval = tokio::time::interval(frame_interval(options.fps));
    for sample in &trajectory.samples {
        if options.realtime {
            interval.tick().await;
        }
        println!("{:>6}  {:>9.1}  {:>9.1}", sample.frame, sample.time_ms, sample.offset);
    }

    match trajectory.samples.last() {
        Some(last) if trajectory.arrived => {
            println!("\nDing! Arrived after {:.0} ms ({} frames)", last.time_ms, trajectory.samples.len());
        }
        _ => println!("\nThe elevator never arrived"),
    }

    Ok(())
}

fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.clamp(1, 1000) as f64)
}

/// Ride once over the page, stepping at a fixed frame rate from t = 0
pub fn simulate(config: ElevatorConfig, from: f64, fps: u32) -> Result<Trajectory> {
    let frame_ms = 1000.0 / fps.max(1) as f64;

    let mut viewport = PageViewport::new(SIM_WIDTH, SIM_HEIGHT);
    viewport.scroll_to(from);

    let arrived = Rc::new(Cell::new(false));
    let arrived_hook = arrived.clone();
    let mut elevator = Elevator::new(
        config,
        viewport,
        FrameQueue::new(),
        Box::new(Silent),
        Box::new(Silent),
    )
    .with_on_end(move || arrived_hook.set(true));

    let start = elevator.viewport().scroll_offset();
    elevator.start();
    let to = elevator.destination().unwrap_or(start);
    debug!(from = start, to, fps, "Simulating ride");

    let mut samples = Vec::new();
    while elevator.scheduler_mut().pop_due().is_some() {
        let frame = samples.len();
        if frame >= MAX_FRAMES {
            bail!("ride did not finish within {} frames", MAX_FRAMES);
        }
        let time_ms = frame as f64 * frame_ms;
        elevator.step(time_ms);
        samples.push(Sample {
            frame,
            time_ms,
            offset: elevator.viewport().scroll_offset(),
        });
    }

    Ok(Trajectory {
        from: start,
        to,
        arrived: arrived.get(),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_ride_reaches_the_top() {
        let config = ElevatorConfig { duration_ms: Some(1000.0), ..Default::default() };
        let trajectory = simulate(config, 800.0, 10).unwrap();

        assert!(trajectory.arrived);
        assert_eq!(trajectory.from, 800.0);
        assert_eq!(trajectory.to, 0.0);
        // Frames at 0, 100, ..., 1000 ms
        assert_eq!(trajectory.samples.len(), 11);
        assert_eq!(trajectory.samples[0].offset, 800.0);
        assert_eq!(trajectory.samples[5].offset, 400.0);
        assert_eq!(trajectory.samples[10].offset, 0.0);
    }

    #[test]
    fn test_offsets_never_increase_on_the_way_up() {
        let trajectory = simulate(ElevatorConfig::default(), 1500.0, 60).unwrap();
        assert!(trajectory.arrived);
        for pair in trajectory.samples.windows(2) {
            assert!(pair[1].offset <= pair[0].offset);
        }
    }

    #[test]
    fn test_ride_already_at_destination() {
        let trajectory = simulate(ElevatorConfig::default(), 0.0, 60).unwrap();
        assert!(trajectory.arrived);
        assert_eq!(trajectory.samples.len(), 1);
    }

    #[test]
    fn test_ride_down_to_an_anchor() {
        let config = ElevatorConfig {
            target: Some("elevator".to_string()),
            duration_ms: Some(300.0),
            ..Default::default()
        };
        let trajectory = simulate(config, 0.0, 60).unwrap();
        assert!(trajectory.arrived);
        assert!(trajectory.to > 0.0);
        let last = trajectory.samples.last().unwrap();
        // The viewport clamps at the bottom of the page
        assert!(last.offset > 0.0 && last.offset <= trajectory.to);
    }

    #[test]
    fn test_trajectory_serializes() {
        let trajectory = simulate(ElevatorConfig::default(), 32.0, 60).unwrap();
        let json = serde_json::to_value(&trajectory).unwrap();
        assert_eq!(json["from"], 32.0);
        assert!(json["samples"].as_array().is_some_and(|s| !s.is_empty()));
    }
}
