//! Wires every periodic dashboard task onto the scheduler.
//!
//! All callbacks are cheap and fire-and-forget: anything that needs the
//! network or the state lock spawns and returns, so a slow `/motor` response
//! is superseded by the next tick rather than piling up. A stale response
//! that resolves late still applies its update; there is deliberately no
//! sequencing guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use bordo_core::backend::BackendClient;
use bordo_core::config::Config;
use bordo_core::mapper;
use bordo_core::scheduler::Scheduler;
use bordo_core::state::{ChannelId, Dashboard, Overlay};

// Demo ramp cadence and per-tick steps, one timer per ring so the three
// gauges sweep at visibly different rates.
const SIM_RAMPS: [(&str, ChannelId, u64, f64); 3] = [
    ("sim-temp", ChannelId::EngineTemp, 50, 0.5),
    ("sim-rpm", ChannelId::EngineRpm, 70, 66.0),
    ("sim-fuel", ChannelId::Fuel, 90, 1.25),
];

/// Locally simulated fuel burn per motor tick. The fuel channel never comes
/// from the backend; this placeholder drains it slowly instead.
const FUEL_BURN_PER_TICK: f64 = 0.01;

const MUSIC_REVEAL: Duration = Duration::from_secs(5);
const VIDEO_REVEAL: Duration = Duration::from_secs(3);

pub fn start(
    scheduler: &Scheduler,
    dashboard: Arc<Dashboard>,
    client: BackendClient,
    backend_up: Arc<AtomicBool>,
    config: &Config,
) {
    if config.backend.simulate {
        for (id, channel, period_ms, step) in SIM_RAMPS {
            let dash = Arc::clone(&dashboard);
            scheduler.schedule(id, Duration::from_millis(period_ms), move || {
                let dash = Arc::clone(&dash);
                tokio::spawn(async move {
                    if let Err(e) = dash.ramp_channel(channel, step).await {
                        warn!("ramp on {channel:?} failed: {e}");
                    }
                });
                Ok(())
            });
        }
    } else {
        // Fuel has no backend source and the drain only decrements, so a
        // zeroed gauge would never move. Start the placeholder from a full
        // tank.
        let dash = Arc::clone(&dashboard);
        tokio::spawn(async move {
            let max = dash.snapshot().await.channel(ChannelId::Fuel).max;
            if let Err(e) = dash.update_channel(ChannelId::Fuel, max).await {
                warn!("fuel seed rejected: {e}");
            }
        });

        let dash = Arc::clone(&dashboard);
        let poll_client = client.clone();
        let up = Arc::clone(&backend_up);
        scheduler.schedule(
            "motor-poll",
            Duration::from_millis(config.polling.motor_ms),
            move || {
                spawn_motor_refresh(Arc::clone(&dash), poll_client.clone(), Arc::clone(&up));
                Ok(())
            },
        );
    }

    // Fake spectrum frames — only while sound is "transmitting".
    let dash = Arc::clone(&dashboard);
    scheduler.schedule(
        "spectrum",
        Duration::from_millis(config.polling.spectrum_ms),
        move || {
            let dash = Arc::clone(&dash);
            tokio::spawn(async move {
                if dash.snapshot().await.overlays.music {
                    dash.scramble_spectrum().await;
                }
            });
            Ok(())
        },
    );

    // Playback clock, one second per tick.
    let dash = Arc::clone(&dashboard);
    scheduler.schedule("clock", Duration::from_secs(1), move || {
        let dash = Arc::clone(&dash);
        tokio::spawn(async move {
            dash.advance_clock().await;
        });
        Ok(())
    });

    // GPS random walk.
    let dash = Arc::clone(&dashboard);
    scheduler.schedule(
        "gps",
        Duration::from_millis(config.polling.gps_ms),
        move || {
            let dash = Arc::clone(&dash);
            tokio::spawn(async move {
                dash.drift_position().await;
            });
            Ok(())
        },
    );

    // Startup reveals: camera placeholder after 3 s, music player after 5 s.
    let dash = Arc::clone(&dashboard);
    scheduler.schedule_once("music-reveal", MUSIC_REVEAL, move || {
        tokio::spawn(async move {
            dash.set_overlay(Overlay::Music, true).await;
        });
        Ok(())
    });
    let dash = Arc::clone(&dashboard);
    scheduler.schedule_once("video-reveal", VIDEO_REVEAL, move || {
        tokio::spawn(async move {
            dash.set_overlay(Overlay::Video, true).await;
        });
        Ok(())
    });
}

/// Fire-and-forget `/motor` refresh: coolant temperature onto ring 1, the
/// crank-angle RPM proxy onto ring 2, and a placeholder fuel burn on ring 3.
/// A failed fetch skips the tick; last committed values stay on screen.
pub fn spawn_motor_refresh(
    dashboard: Arc<Dashboard>,
    client: BackendClient,
    backend_up: Arc<AtomicBool>,
) {
    tokio::spawn(async move {
        match client.motor().await {
            Ok(motor) => {
                backend_up.store(true, Ordering::Relaxed);
                if let Err(e) = dashboard
                    .update_channel(ChannelId::EngineTemp, motor.coolant_temp_c)
                    .await
                {
                    warn!("temp update rejected: {e}");
                }
                let rpm_max = dashboard.snapshot().await.channel(ChannelId::EngineRpm).max;
                let rpm = mapper::rpm_from_crank_angle(motor.crank_angle_deg, rpm_max);
                if let Err(e) = dashboard.update_channel(ChannelId::EngineRpm, rpm).await {
                    warn!("rpm update rejected: {e}");
                }
                if let Err(e) = dashboard.consume_fuel(FUEL_BURN_PER_TICK).await {
                    warn!("fuel update rejected: {e}");
                }
            }
            Err(e) => {
                backend_up.store(false, Ordering::Relaxed);
                debug!("motor poll skipped: {e}");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // Paused clock: no timer fires, so the poll tasks never touch the
    // (unreachable) client address; only the immediate spawns run.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn live_mode_starts_fuel_at_full_tank() {
        let config = Config::default();
        assert!(!config.backend.simulate);
        let dashboard = Arc::new(Dashboard::new(&config));
        let scheduler = Scheduler::new();
        let client = BackendClient::new("http://127.0.0.1:9");
        let up = Arc::new(AtomicBool::new(false));

        start(&scheduler, Arc::clone(&dashboard), client, up, &config);
        settle().await;

        let fuel = dashboard.snapshot().await.channel(ChannelId::Fuel).clone();
        assert_eq!(fuel.reading.value, fuel.max);
        scheduler.cancel_all();
    }

    #[tokio::test(start_paused = true)]
    async fn simulate_mode_keeps_channels_zeroed_at_start() {
        let mut config = Config::default();
        config.backend.simulate = true;
        let dashboard = Arc::new(Dashboard::new(&config));
        let scheduler = Scheduler::new();
        let client = BackendClient::new("http://127.0.0.1:9");
        let up = Arc::new(AtomicBool::new(true));

        start(&scheduler, Arc::clone(&dashboard), client, up, &config);
        settle().await;

        // Ramps sweep from zero; no seeding happens in simulate mode.
        for ch in &dashboard.snapshot().await.channels {
            assert_eq!(ch.reading.value, 0.0);
        }
        scheduler.cancel_all();
    }
}
