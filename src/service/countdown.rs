use std::iter;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::domain::TimerId;

#[derive(Debug)]
struct Armed {
    id: TimerId,
    task: JoinHandle<()>,
}

/// Periodic ticker backing the OTP countdown.
///
/// At most one ticking task exists per `Countdown`: arming always aborts the
/// previous task first, and dropping the service aborts whatever is running.
/// Ticks are buffered in a channel owned by the service and collected with
/// [`Countdown::drain`] from the UI loop.
#[derive(Debug)]
pub struct Countdown {
    period: Duration,
    sender: UnboundedSender<TimerId>,
    receiver: UnboundedReceiver<TimerId>,
    armed: Option<Armed>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            period,
            sender,
            receiver,
            armed: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, id: TimerId) {
        self.cancel();
        let sender = self.sender.clone();
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(id).is_err() {
                    break;
                }
            }
        });
        debug!("armed countdown {id:?} every {period:?}");
        self.armed = Some(Armed { id, task });
    }

    pub fn cancel(&mut self) -> Option<TimerId> {
        let armed = self.armed.take()?;
        armed.task.abort();
        debug!("cancelled countdown {:?}", armed.id);
        Some(armed.id)
    }

    /// Cancels only if `id` is the countdown currently armed.
    pub fn cancel_if(&mut self, id: TimerId) -> bool {
        if self.armed() == Some(id) {
            self.cancel();
            true
        } else {
            false
        }
    }

    pub fn armed(&self) -> Option<TimerId> {
        self.armed.as_ref().map(|armed| armed.id)
    }

    #[cfg(test)]
    pub(crate) fn abort_handle(&self) -> Option<tokio::task::AbortHandle> {
        self.armed.as_ref().map(|armed| armed.task.abort_handle())
    }

    pub fn drain(&mut self) -> Vec<TimerId> {
        iter::from_fn(|| self.receiver.try_recv().ok()).collect()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
