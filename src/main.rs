// famicore - NES emulator binary
//
// Headless front end: loads an iNES ROM, runs the machine paced by the
// interval timer, and can dump the final frame as a PNG.

use clap::Parser;
use famicore::{Emulator, EmulatorConfig, FrameBuffer, IntervalTimer};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[clap(name = "famicore")]
#[clap(about = "A scanline-stepped NES emulator", long_about = None)]
struct Cli {
    #[clap(value_parser, help = "path to an iNES ROM file")]
    rom: PathBuf,

    #[clap(
        long,
        value_parser,
        help = "run this many frames and exit (default: run until interrupted)"
    )]
    frames: Option<u64>,

    #[clap(long, help = "save the final frame as a PNG before exiting")]
    screenshot: bool,
}

fn main() {
    env_logger::init();

    let args = Cli::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = EmulatorConfig::load_or_default();
    let fps = config.video.fps;

    let mut emulator = Emulator::with_config(config);
    emulator.load_rom_file(&args.rom)?;

    if let Some(header) = emulator.header() {
        log::info!(
            "loaded {}: PRG {} bytes, CHR {} bytes, mapper {}, {:?} mirroring",
            args.rom.display(),
            header.prg_size,
            header.chr_size,
            header.mapper_id,
            header.mirror_mode
        );
    }

    let mut frame = FrameBuffer::new();
    let mut timer = match args.frames {
        Some(frames) => IntervalTimer::new(fps).with_frame_limit(frames),
        None => IntervalTimer::new(fps),
    };

    emulator.run(&mut frame, &mut timer);

    if args.screenshot {
        let path = emulator.screenshot(&frame)?;
        println!("screenshot saved to {}", path.display());
    }

    Ok(())
}
