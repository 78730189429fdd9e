use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use log::LevelFilter;

use s3lvl::{DecodeOptions, Level, extract};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and unpack LVL level files", long_about = None)]
struct Args {
    /// Show decoding progress (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a level
    Info {
        /// Path to the level file
        file: PathBuf,
    },
    /// Write the embedded textures, images and sounds of a level to disk
    Extract {
        /// Path to the level file
        file: PathBuf,

        /// Output directory (defaults to ./out/<file stem>_lvl)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    match args.command {
        Command::Info { file } => info(&file),
        Command::Extract { file, out } => {
            let out_dir = out.unwrap_or_else(|| default_out_dir(&file));
            extract_level(&file, &out_dir);
        }
    }
}

fn info(path: &Path) {
    let level = open_level(path, DecodeOptions::default());
    let player = &level.player;

    println!("Level:         {}", level.name);
    println!("Sounds:        {}", level.sound_ids.len());
    println!("Images:        {}", level.image_ids.len());
    println!("Strings:       {}", level.strings.len());
    println!("Symbols:       {}", level.names.len());
    println!(
        "Sound groups:  {} ({} volumes)",
        level.sound_groups.len(),
        level.sound_group_volumes.len()
    );
    println!(
        "Player:        {} frames, {} reverse frames",
        player.frame_count(),
        player.reverse_frame_count()
    );
    println!(
        "Labels:        {} at, {} left, {} right",
        player.labels_at.len(),
        player.labels_left.len(),
        player.labels_right.len()
    );
    println!("Waypoints:     {}", player.waypoints.len());
    println!("Arcs:          {}", player.arcs.len());
}

fn extract_level(path: &Path, out_dir: &Path) {
    let options = DecodeOptions {
        retain_payloads: true,
    };
    let level = open_level(path, options);

    println!(
        "Extracting {} resources to {}",
        level.resources.len(),
        out_dir.display()
    );

    match extract::write_resources(&level, out_dir) {
        Ok(paths) => paths.iter().for_each(|p| println!("  {}", p.display())),
        Err(e) => {
            eprintln!("Unable to extract resources.\nError: {}", e);
            error_exit();
        }
    }
}

fn open_level(path: &Path, options: DecodeOptions) -> Level {
    println!("Opening level file {}", path.display());

    match Level::open(path, options) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Unable to process level file.\nError: {}", e);
            error_exit();
        }
    }
}

// ./out/intro_lvl
fn default_out_dir(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or(OsStr::new("unknown"));

    Path::new("./out").join(format!("{}_lvl", stem.display()))
}

fn error_exit() -> ! {
    eprintln!("\nUnable to continue.");
    std::process::exit(1);
}
