use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{timeout, Instant};
use tracing::info;

use smoothscroll_core::config::validate_fps;
use smoothscroll_core::driver::DriverEvent;
use smoothscroll_core::scroll::timing::millis_to_duration;
use smoothscroll_core::{
    AnimationConfig, AppConfig, Dimensions, MemoryViewport, Position, ScrollDriver, Target,
    Viewport,
};

use crate::SimulateArgs;

/// Slack on top of delay + duration before giving up on a scroll
const GRACE_MS: f64 = 500.0;

#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: usize,
    elapsed_ms: f64,
    target: &'a Target,
    x: f64,
    y: f64,
}

/// How long to wait for a scroll to settle, saturating for huge timings
fn scroll_budget(animation: &AnimationConfig) -> Duration {
    millis_to_duration(animation.delay_ms.max(0.0) + animation.duration_ms + GRACE_MS)
}

pub async fn run(config: &AppConfig, args: SimulateArgs) -> Result<()> {
    let animation_config = AnimationConfig {
        delay_ms: args.delay.unwrap_or(config.animation.delay_ms),
        duration_ms: args.duration.unwrap_or(config.animation.duration_ms),
        easing: args.easing.unwrap_or(config.animation.easing),
    };
    animation_config.validate()?;
    let fps = args.fps.unwrap_or(config.ui.animation_fps);
    validate_fps(fps)?;

    let viewport = Viewport::new(
        Position::new(0.0, args.from),
        Dimensions::new(args.scene_width, args.scene_height),
    );
    let registered = match &args.element {
        Some(name) => Target::element(name.as_str()),
        None => Target::Window,
    };
    let target = if args.missing {
        Target::element("missing")
    } else {
        registered.clone()
    };

    let host = Arc::new(MemoryViewport::new().with_surface(registered, viewport));
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let (driver, handle) = ScrollDriver::new(Arc::clone(&host), animation_config.to_animation());
    let driver = driver.with_frame_rate(fps).with_event_sender(event_tx);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(driver.run(shutdown_rx));

    info!(
        surface = %target,
        from = args.from,
        to = args.to,
        duration_ms = animation_config.duration_ms,
        easing = %animation_config.easing,
        "Simulating scroll"
    );
    let started = Instant::now();
    handle.scroll_to(target.clone(), Position::new(0.0, args.to))?;

    let budget = scroll_budget(&animation_config);
    let mut frame = 0;
    let settled = loop {
        let remaining = budget.saturating_sub(started.elapsed());
        match timeout(remaining, events.recv()).await {
            Ok(Some(DriverEvent::Scrolled { target, position })) => {
                frame += 1;
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                if args.json {
                    let record = FrameRecord {
                        frame,
                        elapsed_ms,
                        target: &target,
                        x: position.x,
                        y: position.y,
                    };
                    println!("{}", serde_json::to_string(&record).context("encoding frame")?);
                } else {
                    println!(
                        "frame {:>4}  {:>8.1}ms  {}  x={:>8.2}  y={:>8.2}",
                        frame, elapsed_ms, target, position.x, position.y
                    );
                }
            }
            Ok(Some(DriverEvent::Settled { .. })) => break true,
            Ok(None) | Err(_) => break false,
        }
    };

    shutdown_tx.send(true).ok();
    task.await.context("scroll driver task failed")?;

    if settled {
        if !args.json {
            let offset = host.offset(&target).unwrap_or_default();
            println!(
                "settled after {} frames at x={} y={}",
                frame, offset.x, offset.y
            );
        }
    } else {
        println!("no scroll happened: {} could not be read", target);
    }

    Ok(())
}
