use crate::sys::server::{SOCKET_PATH, parse_command};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "showcase", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run the carousel host (default).
    Run,
    /// Send a control command to a running host, e.g. `send jump reviews 2`.
    Send {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Write the default config file and print its path.
    Init,
}

pub fn send_command(cmd: &str) -> anyhow::Result<()> {
    if parse_command(cmd).is_none() {
        anyhow::bail!("Unknown command '{}'", cmd);
    }

    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to showcase host at {}: {}. Is it running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
