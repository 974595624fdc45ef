use hangman::cli::{CliInterface, parse_cli};
use hangman::game_loop;
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.tui);

    let source = cli.word_source();
    let mut rng = cli.rng();
    log::info!("Using word list from {}", source.describe());

    let scoreboard = if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to initialize the terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        };
        let scoreboard = game_loop(source.as_ref(), &mut rng, &mut interface);
        drop(interface);
        println!("{}", scoreboard.summary());
        scoreboard
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(source.as_ref(), &mut rng, &mut interface)
    };

    log::info!(
        "Session totals: {} played, {} won",
        scoreboard.played(),
        scoreboard.wins()
    );
    ExitCode::SUCCESS
}
