// File: services/psiconnect_app/src/main.rs
use psiconnect_app::{emit, execute, screens, AppState, Command, PROMPT};
use psiconnect_common::logging;
use psiconnect_config::load_config;
use std::io;
use std::process::ExitCode;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

/// Reads commands until `quit` or end of input; any terminal I/O error ends the loop.
async fn run(state: &mut AppState) -> io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let banner = format!(
        "{}\n\nDigite 'help' para ver os comandos.\n{}",
        screens::render(state),
        PROMPT
    );
    emit(&mut stdout, &banner).await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            emit(&mut stdout, PROMPT).await?;
            continue;
        }

        let result = match Command::from_str(&line) {
            Ok(command) => execute(state, command).await,
            Err(err) => Err(err),
        };
        let (text, quit) = match result {
            Ok(reply) => (reply.text, reply.quit),
            Err(err) => {
                warn!("Command '{}' rejected: {}", line.trim(), err);
                (format!("Erro: {}", err.user_message()), false)
            }
        };
        if quit {
            return emit(&mut stdout, &format!("{}\n", text)).await;
        }
        emit(&mut stdout, &format!("{}\n{}", text, PROMPT)).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {}", err);
            return ExitCode::FAILURE;
        }
    };
    logging::init_from_str(&config.logging.level);

    let mut state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!("PsiConnect terminal started");

    match run(&mut state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Terminal I/O failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
