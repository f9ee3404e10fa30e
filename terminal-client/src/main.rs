mod broadcaster;
mod config;
mod input;
mod render;
mod runner;
mod settings_editor;

use clap::Parser;
use common::config::Validate;
use common::games::snake::{BoardSize, GameMode, SettingsPatch};
use common::{log, logger};

#[derive(Parser)]
#[command(name = "snake_terminal", about = "Snake in the terminal")]
struct Args {
    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<String>,

    /// normal, no-walls, multiple-food or fast-mode
    #[arg(long)]
    mode: Option<GameMode>,

    /// Square board size in cells
    #[arg(long)]
    size: Option<u32>,

    /// Milliseconds per tick
    #[arg(long)]
    speed: Option<u32>,

    /// Fixed seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn settings_patch(&self) -> SettingsPatch {
        SettingsPatch {
            game_mode: self.mode,
            board_size: self.size.map(|size| BoardSize::new(size, size)),
            tick_interval_ms: self.speed,
            ..SettingsPatch::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = config::get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;
    config.snake.apply_patch(args.settings_patch());
    config.validate()?;

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_file_logger(prefix, &config.log_file)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log!(
        "Starting snake: mode {}, board {}x{}, seed {}",
        config.snake.game_mode.label(),
        config.snake.board_size.width,
        config.snake.board_size.height,
        seed
    );

    runner::run_game(config, config_manager, seed).await?;

    log!("Snake terminal shut down");
    Ok(())
}
