use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::host::ViewportHost;
use crate::scroll::timing::frame_interval;
use crate::scroll::{Animation, Easing, Effect, Millis, Msg, Position, Status, Subscription, Target};

/// Requests sent to a running [`ScrollDriver`]
#[derive(Debug, Clone)]
pub enum DriverCommand {
    ScrollTo { target: Target, to: Position },
    Configure(Configure),
}

/// Configuration changes, honored only while no scroll is running
#[derive(Debug, Clone)]
pub enum Configure {
    Delay(Millis),
    Duration(Millis),
    Easing(Easing),
}

impl Configure {
    fn apply(self, status: Status) -> Status {
        match self {
            Configure::Delay(ms) => status.with_delay(ms),
            Configure::Duration(ms) => status.with_duration(ms),
            Configure::Easing(easing) => status.with_easing(easing),
        }
    }
}

/// Notifications emitted by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    /// A viewport write completed
    Scrolled { target: Target, position: Position },
    /// An animation finished and its final write landed
    Settled { target: Target },
}

/// Cloneable handle for sending commands to a [`ScrollDriver`]
#[derive(Debug, Clone)]
pub struct ScrollHandle {
    tx: mpsc::UnboundedSender<DriverCommand>,
}

impl ScrollHandle {
    pub fn scroll_to(&self, target: Target, to: Position) -> crate::Result<()> {
        self.send(DriverCommand::ScrollTo { target, to })
    }

    pub fn configure(&self, change: Configure) -> crate::Result<()> {
        self.send(DriverCommand::Configure(change))
    }

    fn send(&self, command: DriverCommand) -> crate::Result<()> {
        self.tx
            .send(command)
            .map_err(|_| crate::Error::Other("scroll driver has stopped".to_string()))
    }
}

/// Measures real time between animation frames
struct FrameClock {
    interval: Interval,
    last: Instant,
}

impl FrameClock {
    fn start(period: Duration) -> Self {
        let now = Instant::now();
        let mut interval = time::interval_at(now + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, last: now }
    }

    async fn tick(&mut self) -> Millis {
        self.interval.tick().await;
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta.as_secs_f64() * 1000.0
    }
}

async fn next_frame(clock: &mut Option<FrameClock>) -> Millis {
    match clock {
        Some(clock) => clock.tick().await,
        None => std::future::pending().await,
    }
}

/// Runs one [`Status`] against a [`ViewportHost`]
///
/// Executes the controller's effects on the tokio runtime and feeds it frame
/// deltas while it is animating.
pub struct ScrollDriver<H: ViewportHost + 'static> {
    host: Arc<H>,
    status: Status,
    frame_period: Duration,
    command_rx: mpsc::UnboundedReceiver<DriverCommand>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    event_tx: Option<mpsc::UnboundedSender<DriverEvent>>,
    /// Writes issued but not yet acknowledged
    pending_writes: usize,
    /// Target of a finished animation waiting for its last write
    settling: Option<Target>,
}

impl<H: ViewportHost + 'static> ScrollDriver<H> {
    /// Create a driver and the handle used to control it
    pub fn new(host: Arc<H>, animation: Animation) -> (Self, ScrollHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let driver = Self {
            host,
            status: Status::new(animation),
            frame_period: frame_interval(60),
            command_rx,
            msg_tx,
            msg_rx,
            event_tx: None,
            pending_writes: 0,
            settling: None,
        };
        (driver, ScrollHandle { tx: command_tx })
    }

    /// Set the animation frame rate
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_period = frame_interval(fps);
        self
    }

    /// Set the event sender for scroll notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<DriverEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Process commands until the shutdown signal, returning the final status
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Status {
        info!(
            frame_ms = self.frame_period.as_millis() as u64,
            "Scroll driver started"
        );
        let mut frames: Option<FrameClock> = None;

        loop {
            // Re-evaluate the frame subscription after every transition
            match (self.status.subscriptions(), frames.is_some()) {
                (Subscription::FrameDeltas, false) => {
                    debug!("Subscribing to animation frames");
                    frames = Some(FrameClock::start(self.frame_period));
                }
                (Subscription::None, true) => {
                    debug!("Unsubscribing from animation frames");
                    frames = None;
                }
                _ => {}
            }

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Scroll driver received shutdown signal");
                        break;
                    }
                }

                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command);
                }

                Some(msg) = self.msg_rx.recv() => {
                    if msg == Msg::NoOp {
                        self.pending_writes = self.pending_writes.saturating_sub(1);
                    }
                    self.dispatch(msg);
                }

                delta = next_frame(&mut frames) => {
                    self.dispatch(Msg::FrameTick(delta));
                }
            }
        }

        self.status
    }

    fn handle_command(&mut self, command: DriverCommand) {
        match command {
            DriverCommand::ScrollTo { target, to } => {
                info!(surface = %target, x = to.x, y = to.y, "Scroll requested");
                let effect = self.status.scroll_to(target, to);
                self.execute(effect);
            }
            DriverCommand::Configure(change) => {
                if self.status.is_animating() {
                    debug!(?change, "Ignoring configuration change during animation");
                }
                let status = std::mem::take(&mut self.status);
                self.status = change.apply(status);
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let previous = self.status.target().cloned();
        let status = std::mem::take(&mut self.status);
        let (status, effect) = status.update(msg);
        self.status = status;
        self.execute(effect);

        if self.status.is_animating() {
            self.settling = None;
        } else if previous.is_some() {
            self.settling = previous;
        }

        if self.pending_writes == 0 {
            if let Some(target) = self.settling.take() {
                debug!(surface = %target, "Scroll settled");
                self.send_event(DriverEvent::Settled { target });
            }
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::ReadViewport { target, to } => {
                let host = Arc::clone(&self.host);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = host.read_viewport(&target).await;
                    let _ = tx.send(Msg::ViewportRead { target, to, result });
                });
            }
            Effect::SetViewport { target, position } => {
                self.pending_writes += 1;
                let host = Arc::clone(&self.host);
                let tx = self.msg_tx.clone();
                let events = self.event_tx.clone();
                tokio::spawn(async move {
                    match host.set_viewport(&target, position).await {
                        Ok(()) => {
                            if let Some(events) = events {
                                let _ = events.send(DriverEvent::Scrolled { target, position });
                            }
                        }
                        Err(e) => debug!(surface = %target, error = %e, "Viewport write failed"),
                    }
                    let _ = tx.send(Msg::NoOp);
                });
            }
            Effect::Defer { after, msg } => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    time::sleep(after).await;
                    let _ = tx.send(*msg);
                });
            }
        }
    }

    fn send_event(&self, event: DriverEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send driver event: receiver dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MemoryViewport;
    use crate::scroll::{Dimensions, EasingType, Viewport};
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    struct Harness {
        host: Arc<MemoryViewport>,
        handle: ScrollHandle,
        events: mpsc::UnboundedReceiver<DriverEvent>,
        shutdown: watch::Sender<bool>,
        task: JoinHandle<Status>,
    }

    fn spawn_driver(animation: Animation) -> Harness {
        spawn_driver_at(animation, 60)
    }

    fn spawn_driver_at(animation: Animation, fps: u32) -> Harness {
        let host = Arc::new(MemoryViewport::new().with_surface(
            Target::Window,
            Viewport::new(Position::new(0.0, 500.0), Dimensions::new(800.0, 2000.0)),
        ));
        let (event_tx, events) = mpsc::unbounded_channel();
        let (driver, handle) = ScrollDriver::new(Arc::clone(&host), animation);
        let driver = driver.with_frame_rate(fps).with_event_sender(event_tx);
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(driver.run(shutdown_rx));
        Harness {
            host,
            handle,
            events,
            shutdown,
            task,
        }
    }

    /// Collect writes until the scroll settles
    async fn until_settled(events: &mut mpsc::UnboundedReceiver<DriverEvent>) -> Vec<Position> {
        let mut writes = Vec::new();
        loop {
            match events.recv().await {
                Some(DriverEvent::Scrolled { position, .. }) => writes.push(position),
                Some(DriverEvent::Settled { .. }) | None => return writes,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scrolls_window_to_target() {
        let mut h = spawn_driver(Animation::default());
        h.handle
            .scroll_to(Target::Window, Position::new(0.0, 0.0))
            .unwrap();

        let writes = timeout(Duration::from_secs(5), until_settled(&mut h.events))
            .await
            .unwrap();

        assert!(writes.len() > 10);
        assert_eq!(writes.last(), Some(&Position::new(0.0, 0.0)));
        assert!(writes.windows(2).all(|w| w[1].y <= w[0].y));
        assert_eq!(h.host.offset(&Target::Window), Some(Position::new(0.0, 0.0)));

        h.shutdown.send(true).unwrap();
        let status = h.task.await.unwrap();
        assert!(!status.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_rate_above_clock_resolution_still_scrolls() {
        let mut h = spawn_driver_at(Animation::default().with_duration(100.0), 2000);
        h.handle
            .scroll_to(Target::Window, Position::new(0.0, 0.0))
            .unwrap();

        let writes = timeout(Duration::from_secs(5), until_settled(&mut h.events))
            .await
            .unwrap();
        assert_eq!(writes.last(), Some(&Position::new(0.0, 0.0)));

        h.shutdown.send(true).unwrap();
        let status = h.task.await.unwrap();
        assert!(!status.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_and_duration_are_honored() {
        let mut h = spawn_driver(Animation::default().with_delay(300.0));
        h.handle
            .configure(Configure::Duration(200.0))
            .unwrap();
        let started = Instant::now();
        h.handle
            .scroll_to(Target::Window, Position::new(0.0, 100.0))
            .unwrap();

        let first = timeout(Duration::from_secs(5), h.events.recv())
            .await
            .unwrap();
        assert!(matches!(first, Some(DriverEvent::Scrolled { .. })));
        assert!(started.elapsed() >= Duration::from_millis(300));

        until_settled(&mut h.events).await;
        let total = started.elapsed();
        assert!(total >= Duration::from_millis(500));
        assert!(total < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_element_is_silently_ignored() {
        let mut h = spawn_driver(Animation::default());
        h.handle
            .scroll_to(Target::element("missing"), Position::new(0.0, 10.0))
            .unwrap();

        time::sleep(Duration::from_secs(2)).await;
        assert!(h.events.try_recv().is_err());

        h.shutdown.send(true).unwrap();
        let status = h.task.await.unwrap();
        assert_eq!(status, Status::default());
        assert_eq!(h.host.offset(&Target::Window), Some(Position::new(0.0, 500.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_configure_ignored_while_animating() {
        let mut h = spawn_driver(Animation::default().with_easing(EasingType::Cubic));
        h.handle
            .scroll_to(Target::Window, Position::new(0.0, 1500.0))
            .unwrap();

        // Wait for the first frame so the animation is running
        timeout(Duration::from_secs(5), h.events.recv())
            .await
            .unwrap();
        h.handle
            .configure(Configure::Duration(10_000.0))
            .unwrap();
        until_settled(&mut h.events).await;

        h.shutdown.send(true).unwrap();
        let status = h.task.await.unwrap();
        assert_eq!(status.animation().duration(), 1000.0);
        assert_eq!(h.host.offset(&Target::Window), Some(Position::new(0.0, 1500.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_fails_after_shutdown() {
        let h = spawn_driver(Animation::default());
        h.shutdown.send(true).unwrap();
        h.task.await.unwrap();
        assert!(h
            .handle
            .scroll_to(Target::Window, Position::default())
            .is_err());
    }
}
