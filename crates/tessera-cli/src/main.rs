use anyhow::Result;
use clap::Parser;

mod args;
mod cmd;
mod io;
mod logging;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Cli::parse();
    output::init(cli.json);
    logging::init(cli.log.as_deref(), cli.json)?;

    match cmd::dispatch(cli).await {
        Ok(()) => Ok(()),
        Err(err) if output::is_json() => {
            output::print_error(&err)?;
            std::process::exit(1);
        }
        Err(err) => Err(err),
    }
}
