//! Frame-by-frame playback over a timeline of instants.

use bon::bon;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::time::Duration;

/// Delay between two frames at speed 1.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(1000);

/// Playback position and state over an ordered list of instants.
///
/// Does not own a timer. Call [`Playback::tick`] every [`Playback::interval`], or let
/// [`Playback::play_through`] do it.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    timestamps: Vec<DateTime<Utc>>,
    current_index: usize,
    playing: bool,
    speed: f64,
    base_interval: Duration,
    interval: Duration,
}

#[bon]
impl Playback {
    /// Paused at the first frame, speed 1, one frame per second.
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Self {
        Self::with_timestamps(timestamps).call()
    }

    /// Starts a builder with custom interval and speed.
    ///
    /// ```
    /// use pm10_timeline::Playback;
    /// use std::time::Duration;
    ///
    /// let playback = Playback::with_timestamps(Vec::new())
    ///     .base_interval(Duration::from_millis(500))
    ///     .speed(2.0)
    ///     .call();
    /// assert_eq!(playback.interval(), Duration::from_millis(250));
    /// ```
    #[builder(start_fn = with_timestamps)]
    #[doc(hidden)]
    pub fn build_with_timestamps(
        #[builder(start_fn)] timestamps: Vec<DateTime<Utc>>,
        #[builder(default = DEFAULT_FRAME_INTERVAL)] base_interval: Duration,
        #[builder(default = 1.0)] speed: f64,
    ) -> Self {
        let mut playback = Self {
            timestamps,
            current_index: 0,
            playing: false,
            speed: 1.0,
            base_interval,
            interval: base_interval,
        };
        playback.set_speed(speed);
        playback
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamps.get(self.current_index).copied()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets the speed multiplier. Returns `false` and keeps the old speed when
    /// `speed` is not a positive finite number, or when the resulting frame interval
    /// cannot be represented as a [`Duration`].
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !(speed.is_finite() && speed > 0.0) {
            warn!("Ignoring invalid playback speed {}", speed);
            return false;
        }
        match Duration::try_from_secs_f64(self.base_interval.as_secs_f64() / speed) {
            Ok(interval) => {
                self.speed = speed;
                self.interval = interval;
                true
            }
            Err(e) => {
                warn!("Ignoring playback speed {}: {}", speed, e);
                false
            }
        }
    }

    /// Time between two frames at the current speed.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_timestamps(&mut self, timestamps: Vec<DateTime<Utc>>) {
        self.timestamps = timestamps;
        self.current_index = 0;
        self.playing = false;
    }

    /// Starts playing. From the last frame playback restarts at the first one.
    pub fn play(&mut self) {
        if self.timestamps.is_empty() {
            return;
        }
        if self.current_index + 1 >= self.timestamps.len() {
            self.current_index = 0;
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jumps to `index`, clamped to the timeline.
    pub fn go_to(&mut self, index: usize) {
        self.current_index = index.min(self.timestamps.len().saturating_sub(1));
    }

    /// Advances one frame while playing. At the last frame playback stops instead.
    ///
    /// Returns whether the position changed.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.current_index + 1 >= self.timestamps.len() {
            self.playing = false;
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Plays from the current position to the end, sleeping one interval per frame.
    ///
    /// `on_frame` sees every frame shown after the starting one. Returns once
    /// playback stops at the last frame.
    pub async fn play_through<F>(&mut self, mut on_frame: F)
    where
        F: FnMut(usize, DateTime<Utc>),
    {
        self.play();
        while self.playing {
            tokio::time::sleep(self.interval()).await;
            if self.tick() {
                if let Some(ts) = self.current_timestamp() {
                    on_frame(self.current_index, ts);
                }
            }
        }
        debug!("Playback finished at frame {}", self.current_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn timeline(n: i64) -> Vec<DateTime<Utc>> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| t0 + TimeDelta::hours(i)).collect()
    }

    #[test]
    fn test_tick_stops_at_last_frame() {
        let mut playback = Playback::new(timeline(3));
        playback.play();

        assert!(playback.tick());
        assert!(playback.tick());
        assert_eq!(playback.current_index(), 2);
        assert!(!playback.tick());
        assert!(!playback.is_playing());
        assert_eq!(playback.current_index(), 2);
    }

    #[test]
    fn test_play_at_end_restarts() {
        let mut playback = Playback::new(timeline(3));
        playback.go_to(2);

        playback.play();

        assert_eq!(playback.current_index(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_go_to_clamps() {
        let mut playback = Playback::new(timeline(4));
        playback.go_to(100);
        assert_eq!(playback.current_index(), 3);
        assert_eq!(playback.current_timestamp(), Some(timeline(4)[3]));
        playback.go_to(0);
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn test_empty_timeline() {
        let mut playback = Playback::new(Vec::new());
        playback.play();
        playback.go_to(5);

        assert!(!playback.is_playing());
        assert_eq!(playback.current_timestamp(), None);
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn test_toggle_and_tick_while_paused() {
        let mut playback = Playback::new(timeline(3));
        playback.toggle();
        assert!(playback.is_playing());
        playback.toggle();
        assert!(!playback.is_playing());
        assert!(!playback.tick());
        assert_eq!(playback.current_index(), 0);
    }

    #[test]
    fn test_speed_scales_interval() {
        let mut playback = Playback::new(timeline(2));
        assert_eq!(playback.interval(), Duration::from_millis(1000));

        assert!(playback.set_speed(4.0));
        assert_eq!(playback.interval(), Duration::from_millis(250));

        assert!(!playback.set_speed(0.0));
        assert!(!playback.set_speed(f64::NAN));
        assert_eq!(playback.speed(), 4.0);
    }

    #[test]
    fn test_speed_with_unrepresentable_interval_is_rejected() {
        let mut playback = Playback::new(timeline(2));
        assert!(playback.set_speed(2.0));

        assert!(!playback.set_speed(1e-30));
        assert_eq!(playback.speed(), 2.0);
        assert_eq!(playback.interval(), Duration::from_millis(500));

        let built = Playback::with_timestamps(timeline(2)).speed(1e-30).call();
        assert_eq!(built.speed(), 1.0);
        assert_eq!(built.interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_set_timestamps_resets() {
        let mut playback = Playback::new(timeline(5));
        playback.go_to(3);
        playback.play();

        playback.set_timestamps(timeline(2));

        assert_eq!(playback.current_index(), 0);
        assert!(!playback.is_playing());
    }

    #[tokio::test]
    async fn test_play_through_visits_every_frame() {
        let mut playback = Playback::with_timestamps(timeline(4))
            .base_interval(Duration::from_millis(1))
            .call();
        let mut seen = Vec::new();

        playback.play_through(|idx, _| seen.push(idx)).await;

        assert_eq!(seen, vec![1, 2, 3]);
        assert!(!playback.is_playing());
    }
}
