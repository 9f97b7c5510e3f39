use clap::{Parser, Subcommand, ValueEnum};
use glam::{Vec2, Vec3};
use sawrun_camera::{CameraFollow, FollowBranch, FollowConfig, hazard_caught_player};
use sawrun_common::{Action, Axis, Button, Key};
use sawrun_input::{ActionBindings, DeviceFrame, InputResolver};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sawrun-cli", about = "Headless driver for sawrun input and camera logic")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and default binding counts
    Info,
    /// List every action with its bound sources, in binding order
    Bindings,
    /// Resolve every action against a synthetic device frame
    Resolve {
        /// Keys held this frame
        #[arg(long = "key", value_enum)]
        keys: Vec<KeyArg>,
        /// Keys pressed this frame (also counted as held)
        #[arg(long = "pressed", value_enum)]
        pressed: Vec<KeyArg>,
        /// Hold the gamepad jump button
        #[arg(long)]
        jump: bool,
        /// Horizontal stick, -1 (left) to 1 (right)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        horizontal: f32,
        /// Vertical stick, -1 (down) to 1 (up)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        vertical: f32,
        /// X coordinate of a single touch
        #[arg(long)]
        touch_x: Option<f32>,
        #[arg(long, default_value = "1280")]
        screen_width: f32,
        /// Print the resolved frame as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a scripted descent with the hazard in pursuit
    Chase {
        /// Maximum frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Vertical stick held for the whole run
        #[arg(long, default_value = "-0.5", allow_hyphen_values = true)]
        stick: f32,
        /// Base player fall per frame
        #[arg(long, default_value = "1.0")]
        fall: f32,
        /// Extra fall per frame at full `down` strength
        #[arg(long, default_value = "1.0")]
        boost: f32,
        /// Hazard start height above the player
        #[arg(long, default_value = "60")]
        hazard_start: f32,
        /// Hazard fall per frame
        #[arg(long, default_value = "1.6")]
        hazard_speed: f32,
        #[arg(long)]
        leash: Option<f32>,
        #[arg(long)]
        lead: Option<f32>,
        #[arg(long)]
        margin: Option<f32>,
        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyArg {
    A,
    D,
    W,
    S,
    H,
}

impl From<KeyArg> for Key {
    fn from(k: KeyArg) -> Self {
        match k {
            KeyArg::A => Key::A,
            KeyArg::D => Key::D,
            KeyArg::W => Key::W,
            KeyArg::S => Key::S,
            KeyArg::H => Key::H,
        }
    }
}

#[derive(Serialize)]
struct ChaseFrame {
    frame: u32,
    player_y: f32,
    hazard_y: f32,
    camera_y: f32,
    takeover: bool,
    branch: FollowBranch,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("sawrun-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", sawrun_common::crate_info());
            println!("input: {}", sawrun_input::crate_info());
            println!("camera: {}", sawrun_camera::crate_info());
            let bindings = ActionBindings::with_defaults();
            for action in Action::ALL {
                println!("  {action}: {} sources", bindings.len_of(action));
            }
        }
        Commands::Bindings => {
            let bindings = ActionBindings::with_defaults();
            for action in bindings.actions() {
                println!("{action}:");
                for source in bindings.get(action)? {
                    println!("  {source:?}");
                }
            }
        }
        Commands::Resolve {
            keys,
            pressed,
            jump,
            horizontal,
            vertical,
            touch_x,
            screen_width,
            json,
        } => {
            let mut device = DeviceFrame::new(screen_width)
                .with_axis(Axis::Horizontal, horizontal)
                .with_axis(Axis::Vertical, vertical);
            for k in keys {
                device = device.hold_key(k.into());
            }
            for k in pressed {
                device = device.press_key(k.into());
            }
            if jump {
                device = device.hold_button(Button::A);
            }
            if let Some(x) = touch_x {
                device = device.with_touch(Vec2::new(x, 0.0));
            }

            let resolved = InputResolver::with_defaults().resolve_all(&device)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                for (action, state) in &resolved {
                    println!(
                        "{action:<12} active={:<5} strength={:.2}",
                        state.active, state.strength
                    );
                }
            }
        }
        Commands::Chase {
            frames,
            stick,
            fall,
            boost,
            hazard_start,
            hazard_speed,
            leash,
            lead,
            margin,
            json,
        } => {
            let defaults = FollowConfig::default();
            let config = FollowConfig {
                leash_length: leash.unwrap_or(defaults.leash_length),
                hazard_lead_distance: lead.unwrap_or(defaults.hazard_lead_distance),
                hazard_visibility_margin: margin.unwrap_or(defaults.hazard_visibility_margin),
                ..defaults
            };
            tracing::info!(?config, frames, "starting chase");

            let resolver = InputResolver::with_defaults();
            let device = DeviceFrame::new(1280.0).with_axis(Axis::Vertical, stick);
            let mut follow = CameraFollow::new(config);
            let mut player = Vec2::ZERO;
            let mut hazard = Vec2::new(0.0, hazard_start);
            let mut camera = Vec3::new(0.0, 0.0, config.depth);

            for frame in 0..frames {
                let down = resolver.resolve_float(Action::Down, &device)?;
                player.y -= fall + boost * down;
                hazard.y -= hazard_speed;

                let step = follow.step(player, hazard, camera);
                camera = step.position;

                let row = ChaseFrame {
                    frame,
                    player_y: player.y,
                    hazard_y: hazard.y,
                    camera_y: camera.y,
                    takeover: follow.hazard_takeover(),
                    branch: step.branch,
                };
                if json {
                    println!("{}", serde_json::to_string(&row)?);
                } else {
                    println!(
                        "frame {:>4}: player={:>8.1} hazard={:>8.1} camera={:>8.1} \
                         takeover={:<5} {:?}",
                        row.frame,
                        row.player_y,
                        row.hazard_y,
                        row.camera_y,
                        row.takeover,
                        row.branch
                    );
                }

                if hazard_caught_player(player, hazard) {
                    tracing::info!(frame, "hazard caught the player");
                    println!("caught at frame {frame}");
                    return Ok(());
                }
            }
            println!("escaped after {frames} frames");
        }
    }

    Ok(())
}
