use clap::Parser;
use is_terminal::IsTerminal;
use promptsync_cli::cli::Cli;
use promptsync_cli::commands;
use promptsync_cli::context::CliContext;
use promptsync_cli::error::handle_cli_result;
use promptsync_cli::logging::configure_logging;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let result = match CliContext::from_cli(&cli) {
        Ok(ctx) => {
            let result = commands::run(&ctx, &cli.command).await;
            ctx.dispose();
            result
        }
        Err(e) => Err(e),
    };

    process::exit(handle_cli_result(result));
}
