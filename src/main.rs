use colored::Colorize;
use log::info;

use stim_runner::config::{self, ExperimentConfig};
use stim_runner::display::console::ConsoleDisplay;
use stim_runner::experiment;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = if args.len() > 1 {
        match config::load_config(&args[1]) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        }
    } else {
        ExperimentConfig::default()
    };

    info!(
        "starting experiment with {} stimuli on board id {}",
        config.stimuli.len(),
        config.board.board_id
    );

    let mut display = ConsoleDisplay::new();
    match experiment::run(&config, &mut display) {
        Ok(()) => println!("{}", "Experiment finished.".green().bold()),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
