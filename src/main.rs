//! Player State CLI
//!
//! Inspect, edit or reset a `player.yml` save file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use glam::Vec3;

use player_state::{AppConfig, PersistError, Repository};

#[derive(Parser, Debug)]
#[command(name = "player-state")]
#[command(about = "Inspect and edit saved player state", long_about = None)]
struct Cli {
    /// Save directory containing player.yml (default: $PLAYER_STATE_DIR)
    #[arg(long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the state a session would resume with
    Show,
    /// Delete the save file
    Reset,
    /// Load, override some values, and save back
    Set {
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f32>,
        #[arg(long, allow_negative_numbers = true)]
        y: Option<f32>,
        #[arg(long, allow_negative_numbers = true)]
        z: Option<f32>,
        #[arg(long)]
        time: Option<f32>,
        #[arg(long)]
        fly: Option<bool>,
        #[arg(long)]
        grid_radius: Option<i32>,
        #[arg(long)]
        time_factor_index: Option<i32>,
    },
}

fn print_state(config: &AppConfig) {
    let p = config.player_position;
    println!("position:          ({}, {}, {})", p.x, p.y, p.z);
    match config.camera_rotation {
        Some(q) => println!("rotation:          ({}, {}, {}, {})", q.x, q.y, q.z, q.w),
        None => println!("rotation:          <none>"),
    }
    println!("time:              {}", config.time);
    println!("fly:               {}", config.fly_start);
    println!("grid radius:       {}", config.grid_radius);
    println!("time factor index: {}", config.time_factor_index);
}

fn run(cli: Cli) -> Result<bool, PersistError> {
    let mut config = match cli.dir {
        Some(dir) => AppConfig::with_save_dir(dir),
        None => AppConfig::from_env(),
    };
    let repo = Repository::new();

    match cli.command {
        Command::Show => {
            if let Some(path) = repo.file_path(&config) {
                println!("file:              {}", path.display());
            }
            repo.load(&mut config)?;
            print_state(&config);
            Ok(true)
        }
        Command::Reset => {
            if repo.clear(&config)? {
                println!("Save file removed");
            } else {
                println!("No save file to remove");
            }
            Ok(true)
        }
        Command::Set {
            x,
            y,
            z,
            time,
            fly,
            grid_radius,
            time_factor_index,
        } => {
            repo.load(&mut config)?;

            let p = config.player_position;
            config.player_position =
                Vec3::new(x.unwrap_or(p.x), y.unwrap_or(p.y), z.unwrap_or(p.z));
            if let Some(time) = time {
                config.time = time;
            }
            if let Some(fly) = fly {
                config.fly_start = fly;
            }
            if let Some(radius) = grid_radius {
                config.grid_radius = radius;
            }
            if let Some(index) = time_factor_index {
                config.time_factor_index = index;
            }

            let saved = repo.save(&config);
            if saved {
                print_state(&config);
            }
            Ok(saved)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{:?}", cli);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("Save failed (is a save directory configured?)");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
