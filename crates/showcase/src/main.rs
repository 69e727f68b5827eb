use clap::Parser;
use showcase::cli::{self, Cli, Commands};
use showcase::config;
use showcase::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => runtime::run(config::load_or_default()),
        Commands::Send { command } => cli::send_command(&command.join(" ")),
        Commands::Init => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
