use async_channel::Sender;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(4200);

/// Periodically sends `message` on `tx` while mounted and not paused.
///
/// Fires are delivered as messages rather than run in place, so the receiver
/// applies them at its next frame boundary.
#[derive(Debug)]
pub struct AutoAdvanceTimer<M> {
    interval: Duration,
    tx: Sender<M>,
    message: M,
    handle: Option<JoinHandle<()>>,
    mounted: bool,
    paused: bool,
}

impl<M> AutoAdvanceTimer<M>
where
    M: Clone + Send + 'static,
{
    pub fn new(interval: Duration, tx: Sender<M>, message: M) -> Self {
        Self {
            interval,
            tx,
            message,
            handle: None,
            mounted: false,
            paused: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn mount(&mut self) {
        self.mounted = true;
        if !self.paused {
            self.schedule();
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.cancel();
        } else if self.mounted {
            self.schedule();
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.cancel();
    }

    fn schedule(&mut self) {
        if self.is_scheduled() || self.interval.is_zero() {
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(h) => h,
            Err(e) => {
                log::error!("Auto-advance needs a tokio runtime: {}", e);
                return;
            }
        };

        let (interval, tx, message) = (self.interval, self.tx.clone(), self.message.clone());
        self.handle = Some(runtime.spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if tx.send(message.clone()).await.is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl<M> Drop for AutoAdvanceTimer<M> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
