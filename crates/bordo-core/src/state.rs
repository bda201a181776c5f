//! Dashboard — single source of truth for every visual channel.
//!
//! All mutation follows one pattern: take the write lock, commit, bump `rev`,
//! then emit a `StateEvent` on the broadcast channel. Renderers subscribe and
//! re-fetch a snapshot on each event; they never mutate state themselves.

use std::sync::Arc;

use chrono::{DateTime, Local};
use rand::Rng;
use tokio::sync::{broadcast, RwLock};

use crate::config::Config;
use crate::mapper::{self, InvalidRange, Reading};

/// Ring face radius used by both front-end geometries (arc = 2π·36 at full).
pub const RING_RADIUS: f64 = 36.0;
pub const RING_CIRCUMFERENCE: f64 = 2.0 * std::f64::consts::PI * RING_RADIUS;

/// Maximum magnitude of one GPS random-walk step, per axis, in degrees.
pub const GPS_DRIFT_MAX_DEG: f64 = 0.0005;

/// Number of bars in the fake frequency display.
pub const SPECTRUM_BARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    EngineTemp,
    EngineRpm,
    Fuel,
}

/// One bounded numeric readout rendered as a ring.
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: ChannelId,
    pub reading: Reading,
    pub max: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Video,
    Music,
    Menu,
    Voice,
}

/// Visibility flags for the transient surfaces. Session-scoped only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlays {
    pub video: bool,
    pub music: bool,
    pub menu: bool,
    pub voice: bool,
}

impl Overlays {
    fn flag_mut(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::Video => &mut self.video,
            Overlay::Music => &mut self.music,
            Overlay::Menu => &mut self.menu,
            Overlay::Voice => &mut self.voice,
        }
    }
}

/// Simulated now-playing clock. Advances by one second per tick and wraps
/// to zero once it has shown the full duration. No pause, no seek.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    pub played_secs: u32,
    pub duration_secs: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
}

/// Full dashboard snapshot handed to renderers. `rev` is a monotonically
/// increasing commit counter.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub rev: u64,
    pub channels: Vec<Channel>,
    pub overlays: Overlays,
    pub clock: PlaybackClock,
    pub position: Coordinate,
    pub fix_at: DateTime<Local>,
    /// Frequency-bar heights in 0..=1. Cosmetic; not a real FFT.
    pub spectrum: Vec<f32>,
    pub current_track: TrackInfo,
    pub next_track: TrackInfo,
}

/// Fixed position of each channel in `DashboardState::channels`.
fn channel_index(id: ChannelId) -> usize {
    match id {
        ChannelId::EngineTemp => 0,
        ChannelId::EngineRpm => 1,
        ChannelId::Fuel => 2,
    }
}

impl DashboardState {
    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[channel_index(id)]
    }
}

/// Notification that a mutator committed; receivers fetch a fresh snapshot.
#[derive(Debug, Clone, Copy)]
pub enum StateEvent {
    Updated,
}

pub struct Dashboard {
    state: Arc<RwLock<DashboardState>>,
    events: broadcast::Sender<StateEvent>,
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        let channels = vec![
            Channel {
                id: ChannelId::EngineTemp,
                reading: Reading::default(),
                max: 120.0,
                unit: "°C",
            },
            Channel {
                id: ChannelId::EngineRpm,
                reading: Reading::default(),
                max: 8000.0,
                unit: "",
            },
            Channel {
                id: ChannelId::Fuel,
                reading: Reading::default(),
                max: 100.0,
                unit: "%",
            },
        ];

        let state = DashboardState {
            rev: 1,
            channels,
            overlays: Overlays::default(),
            clock: PlaybackClock {
                played_secs: 0,
                duration_secs: config.music.duration_secs,
            },
            position: Coordinate {
                latitude: config.gps.start_latitude,
                longitude: config.gps.start_longitude,
            },
            fix_at: Local::now(),
            spectrum: vec![0.0; SPECTRUM_BARS],
            current_track: TrackInfo {
                title: config.music.title.clone(),
                artist: config.music.artist.clone(),
            },
            next_track: TrackInfo {
                title: config.music.next_title.clone(),
                artist: config.music.next_artist.clone(),
            },
        };

        let (events, _) = broadcast::channel(1024);
        Self {
            state: Arc::new(RwLock::new(state)),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Store a raw sensor sample on a channel. Sensor-proxy semantics: the
    /// sample is clamped to the channel range, never wrapped.
    pub async fn update_channel(&self, id: ChannelId, raw: f64) -> Result<(), InvalidRange> {
        {
            let mut state = self.state.write().await;
            let channel = &mut state.channels[channel_index(id)];
            channel.reading = mapper::map(raw, channel.max, RING_CIRCUMFERENCE)?;
            state.rev += 1;
        }
        self.notify();
        Ok(())
    }

    /// Advance a simulated ramp: `current + step`, wrapping to zero once the
    /// channel has reached its max. Demo semantics, distinct from the clamp
    /// applied to real sensor proxies.
    pub async fn ramp_channel(&self, id: ChannelId, step: f64) -> Result<(), InvalidRange> {
        {
            let mut state = self.state.write().await;
            let channel = &mut state.channels[channel_index(id)];
            let next = if channel.reading.value >= channel.max {
                0.0
            } else {
                channel.reading.value + step
            };
            channel.reading = mapper::map(next, channel.max, RING_CIRCUMFERENCE)?;
            state.rev += 1;
        }
        self.notify();
        Ok(())
    }

    /// Client-side fuel decrement, floored at zero. The fuel channel is
    /// never sourced from the backend — an intentional placeholder until a
    /// real fuel sensor exists.
    pub async fn consume_fuel(&self, step: f64) -> Result<(), InvalidRange> {
        let current = {
            let state = self.state.read().await;
            state.channel(ChannelId::Fuel).reading.value
        };
        self.update_channel(ChannelId::Fuel, (current - step).max(0.0))
            .await
    }

    pub async fn set_overlay(&self, overlay: Overlay, visible: bool) {
        {
            let mut state = self.state.write().await;
            *state.overlays.flag_mut(overlay) = visible;
            state.rev += 1;
        }
        self.notify();
    }

    pub async fn toggle_overlay(&self, overlay: Overlay) -> bool {
        let now_visible;
        {
            let mut state = self.state.write().await;
            let flag = state.overlays.flag_mut(overlay);
            *flag = !*flag;
            now_visible = *flag;
            state.rev += 1;
        }
        self.notify();
        now_visible
    }

    /// One second of playback. Wraps to 0 after the clock has displayed the
    /// full duration (`played` reaches `duration`, then the next tick resets).
    pub async fn advance_clock(&self) {
        {
            let mut state = self.state.write().await;
            let clock = &mut state.clock;
            if clock.played_secs >= clock.duration_secs {
                clock.played_secs = 0;
            } else {
                clock.played_secs += 1;
            }
            state.rev += 1;
        }
        self.notify();
    }

    /// Bounded random walk — not a real position fix.
    pub async fn drift_position(&self) {
        let (dlat, dlon) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(-GPS_DRIFT_MAX_DEG..=GPS_DRIFT_MAX_DEG),
                rng.gen_range(-GPS_DRIFT_MAX_DEG..=GPS_DRIFT_MAX_DEG),
            )
        };
        {
            let mut state = self.state.write().await;
            state.position.latitude += dlat;
            state.position.longitude += dlon;
            state.fix_at = Local::now();
            state.rev += 1;
        }
        self.notify();
    }

    /// New random bar heights for the fake visualizer frame.
    pub async fn scramble_spectrum(&self) {
        let bars: Vec<f32> = {
            let mut rng = rand::thread_rng();
            (0..SPECTRUM_BARS).map(|_| rng.gen_range(0.0..1.0)).collect()
        };
        {
            let mut state = self.state.write().await;
            state.spectrum = bars;
            state.rev += 1;
        }
        self.notify();
    }

    fn notify(&self) {
        // No receivers yet is fine (startup ordering); nothing else can fail.
        let _ = self.events.send(StateEvent::Updated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::ColorTier;

    fn dashboard() -> Dashboard {
        Dashboard::new(&Config::default())
    }

    #[tokio::test]
    async fn channels_start_zeroed() {
        let dash = dashboard();
        let snap = dash.snapshot().await;
        assert_eq!(snap.channels.len(), 3);
        for ch in &snap.channels {
            assert_eq!(ch.reading.value, 0.0);
            assert_eq!(ch.reading.tier, ColorTier::Cool);
        }
        assert_eq!(snap.channel(ChannelId::EngineTemp).max, 120.0);
        assert_eq!(snap.channel(ChannelId::EngineRpm).max, 8000.0);
    }

    #[tokio::test]
    async fn update_clamps_and_notifies() {
        let dash = dashboard();
        let mut rx = dash.subscribe();

        dash.update_channel(ChannelId::EngineTemp, 500.0).await.unwrap();
        assert!(matches!(rx.recv().await, Ok(StateEvent::Updated)));

        let snap = dash.snapshot().await;
        let temp = snap.channel(ChannelId::EngineTemp);
        assert_eq!(temp.reading.value, 120.0);
        assert_eq!(temp.reading.tier, ColorTier::Critical);
    }

    #[tokio::test]
    async fn ramp_wraps_to_zero_at_max() {
        let dash = dashboard();
        dash.update_channel(ChannelId::EngineRpm, 8000.0).await.unwrap();
        dash.ramp_channel(ChannelId::EngineRpm, 100.0).await.unwrap();
        let snap = dash.snapshot().await;
        assert_eq!(snap.channel(ChannelId::EngineRpm).reading.value, 0.0);
    }

    #[tokio::test]
    async fn fuel_floors_at_zero() {
        let dash = dashboard();
        dash.update_channel(ChannelId::Fuel, 0.005).await.unwrap();
        dash.consume_fuel(0.01).await.unwrap();
        let snap = dash.snapshot().await;
        assert_eq!(snap.channel(ChannelId::Fuel).reading.value, 0.0);
    }

    #[tokio::test]
    async fn clock_wraps_to_exactly_zero() {
        let mut config = Config::default();
        config.music.duration_secs = 5;
        let dash = Dashboard::new(&config);

        for _ in 0..5 {
            dash.advance_clock().await;
        }
        assert_eq!(dash.snapshot().await.clock.played_secs, 5);
        dash.advance_clock().await;
        assert_eq!(dash.snapshot().await.clock.played_secs, 0);
    }

    #[tokio::test]
    async fn drift_stays_within_step_bound() {
        let dash = dashboard();
        let mut prev = dash.snapshot().await.position;
        for _ in 0..50 {
            dash.drift_position().await;
            let pos = dash.snapshot().await.position;
            assert!((pos.latitude - prev.latitude).abs() <= GPS_DRIFT_MAX_DEG + 1e-12);
            assert!((pos.longitude - prev.longitude).abs() <= GPS_DRIFT_MAX_DEG + 1e-12);
            prev = pos;
        }
    }

    #[tokio::test]
    async fn overlay_toggle_flips_flag() {
        let dash = dashboard();
        assert!(dash.toggle_overlay(Overlay::Menu).await);
        assert!(dash.snapshot().await.overlays.menu);
        assert!(!dash.toggle_overlay(Overlay::Menu).await);
        assert!(!dash.snapshot().await.overlays.menu);
    }

    #[tokio::test]
    async fn every_mutation_bumps_rev() {
        let dash = dashboard();
        let r0 = dash.snapshot().await.rev;
        dash.scramble_spectrum().await;
        dash.advance_clock().await;
        dash.set_overlay(Overlay::Voice, true).await;
        assert_eq!(dash.snapshot().await.rev, r0 + 3);
    }
}
