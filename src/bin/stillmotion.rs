use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use stillmotion::assets::decode::load_dir;
use stillmotion::{
    BatchOptions, BatchRequest, FfmpegSink, FfmpegSinkOpts, FrameSink, JobRegistry, JobState,
    MotionKind, MotionScript, Quality,
};

#[derive(Parser, Debug)]
#[command(name = "stillmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available motion effects.
    Effects,
    /// List the available quality presets.
    Qualities,
    /// Convert a folder of images into per-image clips (requires `ffmpeg` on PATH).
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input directory containing still images.
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output directory for the produced clips.
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Motion effect token, repeatable up to three times for a sequence.
    #[arg(long = "motion", default_value = "subtle")]
    motion: Vec<String>,

    /// Clip duration in seconds.
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// Clip frame rate.
    #[arg(long, default_value_t = 10.0)]
    fps: f64,

    /// Quality preset: 4K, 1080p, 720p, 480p, 360p.
    #[arg(long, default_value = "1080p")]
    quality: String,

    /// Print the final job snapshot as JSON instead of a summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Effects => cmd_effects(),
        Command::Qualities => cmd_qualities(),
        Command::Convert(args) => cmd_convert(args),
    }
}

fn cmd_effects() -> anyhow::Result<()> {
    for kind in MotionKind::ALL {
        println!("{:<10} {}", kind.token(), kind.label());
    }
    Ok(())
}

fn cmd_qualities() -> anyhow::Result<()> {
    for quality in Quality::ALL {
        println!("{:<7} {}", quality.token(), quality.canvas());
    }
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let script = MotionScript::parse_tokens(&args.motion)?;
    let quality = Quality::parse(&args.quality).unwrap_or_else(|| {
        eprintln!("unknown quality '{}', using 1080p", args.quality);
        Quality::Hd1080
    });

    let entries = load_dir(&args.in_dir);
    eprintln!(
        "converting {} image(s) from {} at {} ({})",
        entries.len(),
        args.in_dir.display(),
        quality.canvas(),
        script.suffix()
    );

    let out_dir = args.out.clone();
    let suffix = script.suffix();
    let quality_token = quality.token();
    let open_sink = Box::new(
        move |name: &str| -> stillmotion::Result<(PathBuf, Box<dyn FrameSink>)> {
            let path = out_dir.join(format!("{name}_motion_{suffix}_{quality_token}.mp4"));
            let sink = FfmpegSink::new(FfmpegSinkOpts::new(path.clone()));
            Ok((path, Box::new(sink) as Box<dyn FrameSink>))
        },
    );

    let registry = JobRegistry::new();
    let id = registry.submit(BatchRequest {
        entries,
        options: BatchOptions {
            canvas: quality.canvas(),
            script,
            duration_secs: args.duration,
            fps: args.fps,
        },
        open_sink,
    })?;

    let snap = loop {
        let snap = registry.get(id)?;
        eprint!("\r[{}] {:5.1}%", id, snap.progress);
        std::io::stderr().flush().ok();
        if snap.state.is_terminal() {
            break snap;
        }
        std::thread::sleep(Duration::from_millis(200));
    };
    eprintln!();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        for output in &snap.outputs {
            println!(
                "wrote {} ({}, {} frames)",
                output.path.display(),
                output.resolution,
                output.frames
            );
        }
        for failure in &snap.failures {
            eprintln!("failed {}: {}", failure.name, failure.error);
        }
        println!(
            "created {} clip(s), {} failure(s)",
            snap.outputs.len(),
            snap.failures.len()
        );
    }

    if snap.state == JobState::Error {
        anyhow::bail!(
            snap.error
                .unwrap_or_else(|| "job failed without a message".to_owned())
        );
    }
    Ok(())
}
