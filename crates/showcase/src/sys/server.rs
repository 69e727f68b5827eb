use crate::config::CarouselName;
use crate::events::{AppEvent, Control};
use async_channel::Sender;
use carousel::Arrow;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub const SOCKET_PATH: &str = "/tmp/showcase.sock";

fn parse_switch(word: &str) -> Option<bool> {
    match word.to_ascii_lowercase().as_str() {
        "on" | "in" | "true" | "1" => Some(true),
        "off" | "out" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parses one line of the control protocol, e.g. `jump reviews 2` or
/// `swipe services -60 5`.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let control = |name: &str, c: Control| Some(AppEvent::Control(CarouselName::from(name), c));

    match words.as_slice() {
        ["show"] => Some(AppEvent::Show),
        ["reload"] => Some(AppEvent::ConfigReload),
        ["quit"] => Some(AppEvent::Quit),
        ["next", name] => control(*name, Control::Next),
        ["prev", name] => control(*name, Control::Prev),
        ["jump", name, index] => control(*name, Control::Jump(index.parse().ok()?)),
        ["arrow", name, arrow] => control(*name, Control::Arrow(arrow.parse::<Arrow>().ok()?)),
        ["hover", name, state] => control(*name, Control::Hover(parse_switch(state)?)),
        ["focus", name, state] => control(*name, Control::Focus(parse_switch(state)?)),
        ["swipe", name, dx, dy] => control(
            *name,
            Control::Swipe {
                dx: dx.parse().ok()?,
                dy: dy.parse().ok()?,
            },
        ),
        _ => None,
    }
}

async fn serve_connection(stream: UnixStream, tx: Sender<AppEvent>) {
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some(event) = parse_command(&line) else {
            log::warn!("Ignoring unknown command '{}'", line.trim());
            continue;
        };
        if tx.send(event).await.is_err() {
            break;
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening for commands on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(serve_connection(stream, tx.clone()));
            }
            Err(e) => log::error!("Failed to accept connection: {}", e),
        }
    }
}
