//! radar-preview: drive the radar compositor against the sandbox world.
//!
//! Usage:
//!   radar-preview run --frames 300 --scenario drive --seed 7
//!   radar-preview run --config radar.toml --scenario plane
//!   radar-preview defaults > radar.toml

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use glam::{Vec2, Vec3};
use serde::Serialize;

use radar_camera::CameraState;
use radar_core::config::RadarSettings;
use radar_core::constants::VELOCITY_STEPS_PER_SEC;
use radar_core::enums::{TraceKind, VehicleClass};
use radar_core::sprites;
use radar_core::types::{Rect2, Rgba};
use radar_core::world::{RadarTrace, RadioStation, TerritoryZone, WorldQuery};
use radar_engine::{Compositor, CompositorConfig, FrameInput};
use radar_sandbox::{HeadlessDevice, SandboxConfig, SandboxWorld};

const SCREEN: Vec2 = Vec2::new(1920.0, 1080.0);
const FRAME_MS: u64 = 16;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "defaults" => cmd_defaults(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "radar-preview: headless radar compositor driver\n\
         \n\
         Commands:\n\
         \n\
         run       Render N frames against the sandbox and print a JSON summary\n\
         \n\
           --frames <N>        Frames to render (default: 120)\n\
           --scenario <name>   foot | drive | plane | heli (default: foot)\n\
           --config <path>     Radar settings TOML (default: built-in)\n\
           --seed <S>          Sandbox RNG seed (default: 42)\n\
         \n\
         defaults  Print the default radar settings as TOML\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(v) => v.parse().unwrap_or_else(|_| {
            eprintln!("Error: {flag} expects a number, got {v:?}");
            process::exit(1);
        }),
        None => default,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Scenario {
    Foot,
    Drive,
    Plane,
    Heli,
}

impl Scenario {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "foot" => Some(Scenario::Foot),
            "drive" => Some(Scenario::Drive),
            "plane" => Some(Scenario::Plane),
            "heli" => Some(Scenario::Heli),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    scenario: Scenario,
    seed: u64,
    frames: u32,
    rendered: u32,
    /// Commands per kind over every rendered frame.
    totals: BTreeMap<&'static str, usize>,
    /// Commands per kind in the last rendered frame.
    last_frame: BTreeMap<&'static str, usize>,
    blips: usize,
    camera: CameraState,
}

// --- Scenario setup ---

fn velocity_for_kmh(kmh: f32, heading: Vec2) -> Vec3 {
    (heading * kmh / (VELOCITY_STEPS_PER_SEC * 3.6)).extend(0.0)
}

fn populate(world: &mut SandboxWorld) {
    world.scatter_traces(40);

    let player = world.player_position();
    let zone = |min: Vec2, color: Rgba, ballas: u8, vagos: u8| TerritoryZone {
        rect: Rect2::new(min, min + Vec2::splat(200.0)),
        color,
        player_can_start_war: true,
        controlled_by_player: false,
        ballas_density: ballas,
        vagos_density: vagos,
    };
    let base = player.truncate();
    world.add_zone(zone(base + Vec2::new(100.0, 100.0), Rgba::rgb(200, 0, 200), 20, 5));
    world.add_zone(zone(base + Vec2::new(-300.0, 50.0), Rgba::rgb(255, 200, 0), 5, 20));
    world.set_gang_wars_active(true);
}

fn set_waypoint(world: &mut SandboxWorld, offset: Vec3) {
    let position = world.player_position() + offset;
    let trace = world.add_trace(RadarTrace {
        kind: TraceKind::Coord,
        sprite: sprites::WAYPOINT,
        position,
        ..Default::default()
    });
    world.set_gps_target(Some(trace));
}

fn board(world: &mut SandboxWorld, class: VehicleClass) {
    let vehicle = world.spawn_vehicle_in_front(class);
    if let Err(e) = world.enter_vehicle(vehicle) {
        eprintln!("Error: could not board {class:?}: {e}");
        process::exit(1);
    }
    world.set_radio(Some(RadioStation {
        id: 4,
        name: "Radio X".to_string(),
    }));
}

/// Per-frame world changes: ground vehicles accelerate from 50 to 120 km/h.
fn advance(world: &mut SandboxWorld, scenario: Scenario, frame: u32, frames: u32) {
    let kmh = match scenario {
        Scenario::Foot => None,
        Scenario::Drive => Some(50.0 + 70.0 * frame as f32 / frames.max(1) as f32),
        Scenario::Plane => Some(200.0),
        Scenario::Heli => Some(90.0),
    };
    if let Some(kmh) = kmh {
        let vehicle = world.player().ok().and_then(|p| p.vehicle);
        if let Some(v) = vehicle {
            let heading = v.basis.forward.truncate().try_normalize().unwrap_or(Vec2::Y);
            if let Err(e) = world.set_velocity(v.handle, velocity_for_kmh(kmh, heading)) {
                log::warn!("frame {frame}: could not drive vehicle: {e}");
            }
        }
    }
    world.step(FRAME_MS);
}

// --- Commands ---

fn cmd_run(args: &[String]) {
    let frames: u32 = parse_number(args, "--frames", 120);
    let seed: u64 = parse_number(args, "--seed", 42);
    let name = parse_value(args, "--scenario").unwrap_or("foot");
    let scenario = Scenario::parse(name).unwrap_or_else(|| {
        eprintln!("Error: unknown scenario {name:?}");
        process::exit(1);
    });
    let settings = match parse_value(args, "--config").map(PathBuf::from) {
        Some(path) => RadarSettings::load(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}: {e}", path.display());
            process::exit(1);
        }),
        None => RadarSettings::default(),
    };

    let mut world = SandboxWorld::new(SandboxConfig {
        seed,
        ..Default::default()
    });
    populate(&mut world);
    match scenario {
        Scenario::Foot => {}
        Scenario::Drive => {
            board(&mut world, VehicleClass::Automobile);
            set_waypoint(&mut world, Vec3::new(400.0, 900.0, 0.0));
        }
        Scenario::Plane => board(&mut world, VehicleClass::Plane),
        Scenario::Heli => board(&mut world, VehicleClass::Heli),
    }

    let mut device = HeadlessDevice::new();
    let mut compositor = Compositor::new(settings, CompositorConfig::default());
    compositor.initialize(&mut device);

    let mut totals: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut last_frame = BTreeMap::new();
    let mut rendered = 0;

    for frame in 0..frames {
        advance(&mut world, scenario, frame, frames);
        let input = FrameInput::new(SCREEN, world.time_ms());
        let Some(list) = compositor.render(&world, &mut device, input) else {
            continue;
        };
        rendered += 1;
        last_frame.clear();
        for command in list.iter() {
            *last_frame.entry(command.kind()).or_insert(0) += 1;
            *totals.entry(command.kind()).or_insert(0) += 1;
        }
    }
    log::info!("rendered {rendered} of {frames} frames");

    let summary = Summary {
        scenario,
        seed,
        frames,
        rendered,
        totals,
        last_frame,
        blips: compositor.blips().blips().len(),
        camera: *compositor.camera().state(),
    };
    compositor.shutdown(&mut device);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: could not encode summary: {e}");
            process::exit(1);
        }
    }
}

fn cmd_defaults() {
    match RadarSettings::default().to_toml_string() {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
