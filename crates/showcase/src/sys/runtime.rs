use crate::app::{App, Flow};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use carousel::ItemCache;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::time::{Instant, MissedTickBehavior};

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub fn start_background_services(tx: Sender<AppEvent>) {
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            crate::sys::server::run_server(tx).await;
        });
    }

    {
        let tx = tx.clone();
        tokio::spawn(async move {
            crate::config::run_async_watcher(tx).await;
        });
    }

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(AppEvent::Quit).await;
            }
            Err(e) => log::error!("Failed to listen for ctrl-c: {}", e),
        }
    });
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let (tx, rx) = async_channel::bounded(256);
        start_background_services(tx.clone());

        let app = App::new(config, Catalog::bundled(), ItemCache::new(), tx);
        run_frames(app, rx).await;
    });
    Ok(())
}

/// Events are only applied at frame boundaries, never as they arrive.
async fn run_frames(mut app: App, rx: Receiver<AppEvent>) {
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frames.tick().await;
        let now = Instant::now();

        while let Ok(event) = rx.try_recv() {
            if app.update(event, now) == Flow::Quit {
                log::info!("Shutting down");
                return;
            }
        }

        for line in app.frame(now) {
            println!("{line}");
        }
    }
}
