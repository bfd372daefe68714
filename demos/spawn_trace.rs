//! Converts a difficulty file and prints which objects spawn and despawn while playing it.
//!
//! Usage:
//!   cargo run --example `spawn_trace` -- <`difficulty_path`> --bpm 120 --njs 16
//!
//! Example:
//!   `RUST_LOG=debug` cargo run --example `spawn_trace` -- `tests/files/current_expert.dat` --bpm 120

use std::{path::PathBuf, sync::Arc};

use beatmap_rs::{
    config::{DifficultySettings, PreviewConfig},
    convert::convert_auto,
    preview::{DifficultyPreview, PreviewFrame},
    spawn::{ObjectIndex, SpawnDelta},
};
use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "spawn_trace")]
#[command(about = "Traces spawn window changes of a beatmap difficulty", long_about = None)]
struct Args {
    /// Difficulty file path
    #[arg(value_name = "FILE")]
    difficulty_path: PathBuf,

    /// Base tempo of the song
    #[arg(long, default_value = "120", value_name = "BPM")]
    bpm: f64,

    /// Note jump speed
    #[arg(long, default_value = "16")]
    njs: f64,

    /// Spawn offset in beats
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    offset: f64,

    /// Beats advanced per tick
    #[arg(long, default_value = "0.25")]
    step: f64,

    /// Preview the mirrored difficulty
    #[arg(long)]
    mirrored: bool,
}

fn indices(list: &[ObjectIndex]) -> String {
    list.iter()
        .map(|i| i.value().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn print_delta(kind: &str, delta: &SpawnDelta) {
    if !delta.entered.is_empty() {
        println!("    + {kind} [{}]", indices(&delta.entered));
    }
    if !delta.exited.is_empty() {
        println!("    - {kind} [{}]", indices(&delta.exited));
    }
}

fn print_frame(frame: &PreviewFrame) {
    println!("beat {:>8.3} ({:>8.3}s)", frame.beat, frame.time);
    print_delta("notes", &frame.notes);
    print_delta("bombs", &frame.bombs);
    print_delta("walls", &frame.walls);
    print_delta("arcs", &frame.arcs);
    print_delta("chains", &frame.chains);
    if !frame.light_events.is_empty() {
        println!("    * lights [{}]", indices(&frame.light_events));
    }
    if !frame.boost_events.is_empty() {
        println!("    * boosts [{}]", indices(&frame.boost_events));
    }
    if !frame.rotation_events.is_empty() {
        println!("    * rotations [{}]", indices(&frame.rotation_events));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    if !(args.step.is_finite() && args.step > 0.0) {
        return Err(format!("step must be positive, got {}", args.step).into());
    }

    let payload = std::fs::read(&args.difficulty_path)?;
    let output = convert_auto(&payload)?;
    for warning in &output.warnings {
        eprintln!("warning: {warning}");
    }

    let config = PreviewConfig {
        mirrored: args.mirrored,
        ..PreviewConfig::default()
    };
    config.validate()?;
    let settings = DifficultySettings {
        base_bpm: args.bpm,
        note_jump_speed: args.njs,
        spawn_offset: args.offset,
    };
    let difficulty = Arc::new(output.difficulty);
    let last_beat = difficulty.last_beat();
    let mut preview = DifficultyPreview::new(difficulty, settings, &config);

    let jump = preview.jump_settings(0.0);
    println!(
        "hjd {:.3} beats, reaction time {:.3}s, jump distance {:.3}m",
        jump.half_jump_duration, jump.reaction_time, jump.jump_distance
    );

    let mut beat = 0.0;
    while beat <= last_beat + jump.half_jump_duration * 2.0 {
        let frame = preview.update(beat);
        if !frame.is_empty() {
            print_frame(&frame);
        }
        beat += args.step;
    }
    print_frame(&preview.reset());
    Ok(())
}
