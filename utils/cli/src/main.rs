use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::{CommandFactory, Parser, Subcommand};
use lumicast_animator::{core::RGB8, Animation, CancelToken, FrameSink, Outcome};
use lumicast_cli::{load_sequence, validate_run};
use lumicast_network::{Light, UdpTransport};

/// Lumicast animation player
///
/// Replays an image as a synchronized color animation on LIFX bulbs: pixel
/// rows correspond to lights and pixel columns correspond to frames.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Actual command
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a sequence image on the given lights
    Play {
        /// Path of the sequence image
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Ordered list of device IP addresses; the first light maps to the
        /// topmost pixel row of the sequence image
        #[arg(short, long, num_args = 1.., required = true, value_name = "IP")]
        lights: Vec<String>,
        /// Playback frame rate
        #[arg(long, default_value = "10", value_name = "FPS")]
        fps: u32,
        /// Replay the sequence this many additional times, then stop
        #[arg(long, value_name = "N")]
        repeat_count: Option<u32>,
        /// Keep replaying for this long, then stop
        #[arg(long, value_name = "SECONDS")]
        repeat_duration: Option<u64>,
        /// Smoothly adjust color and brightness when transitioning frames
        #[arg(long)]
        smooth_transitions: bool,
        /// Scales brightness so you don't need sunglasses while testing
        #[arg(long, default_value = "1.0", value_name = "FACTOR")]
        brightness_factor: f32,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

/// Prints playback progress through the logger.
struct ConsoleSink;

impl FrameSink for ConsoleSink {
    fn frame_started(&mut self, frame: usize, total: usize, _cycle: u32) {
        log::info!("Rendering frame {frame} / {total}");
    }

    fn light_color(&mut self, address: SocketAddr, color: RGB8) {
        log::info!(
            " - {}: R={:03}, G={:03}, B={:03}",
            address.ip(),
            color.r,
            color.g,
            color.b
        );
    }

    fn frame_rendered(&mut self, elapsed: Duration, remaining_cycles: Option<u32>) {
        match remaining_cycles {
            Some(remaining) => log::debug!(
                "Frame dispatched at {}ms, repeating {remaining} more time(s)",
                elapsed.as_millis()
            ),
            None => log::debug!("Frame dispatched at {}ms", elapsed.as_millis()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            path,
            lights,
            fps,
            repeat_count,
            repeat_duration,
            smooth_transitions,
            brightness_factor,
        } => {
            let sequence = load_sequence(&path)?;
            let config =
                match validate_run(&sequence, &lights, fps, repeat_count, repeat_duration) {
                    Ok(config) => config,
                    Err(errors) => {
                        eprintln!("Please correct the following error(s):");
                        for error in &errors {
                            eprintln!(" - {error}");
                        }
                        std::process::exit(1);
                    }
                };

            let light_count = config.lights.len();
            let lights = config
                .lights
                .into_iter()
                .enumerate()
                .map(|(row, ip)| Light::new(ip, row).with_brightness_factor(brightness_factor))
                .collect();
            let animation = Animation::new(sequence, lights, config.frame_rate)?
                .smooth_transitions(smooth_transitions)
                .repeat(config.repeat);

            let cancel = CancelToken::new();
            let trigger = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    trigger.cancel();
                }
            });

            log::info!(
                "Playing {} on {} light(s), press Ctrl-C to stop",
                path.display(),
                light_count
            );

            let transport = UdpTransport::bind().await?;
            let outcome = animation.run(&transport, &cancel, &mut ConsoleSink).await;
            match outcome {
                Outcome::Completed => log::info!("Animation finished"),
                Outcome::Cancelled => log::info!("Animation stopped"),
            }
        }

        Command::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }

    Ok(())
}
