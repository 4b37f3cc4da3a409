//! The focus/break session timer.
//!
//! `SessionTimer` is a small state machine over [`TimerState`] with a
//! separately tracked [`SessionType`], so "paused during a break" is
//! representable. It never blocks: the owner drives it by calling
//! [`SessionTimer::poll`] from its event loop.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use super::notify::{NotificationSink, SoundSink};
use super::settings::{next_option, PomodoroSettings, SettingsStore, BREAK_OPTIONS, FOCUS_OPTIONS};
use super::state::{SessionType, TimerState};
use super::task::TaskStore;
use super::ticker::Ticker;
use crate::error::DoingError;

/// Format seconds as zero-padded `MM:SS`.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// A point-in-time view of the timer and task, for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub state_label: &'static str,
    pub session: SessionType,
    pub remaining_seconds: u32,
    pub formatted_time: String,
    pub is_running: bool,
    pub settings: PomodoroSettings,
    pub task: String,
    pub display_task: String,
}

/// Pomodoro session timer.
pub struct SessionTimer {
    state: TimerState,
    current_session: SessionType,
    remaining_seconds: u32,
    settings: SettingsStore,
    ticker: Ticker,
    notifier: Box<dyn NotificationSink>,
    sound: Box<dyn SoundSink>,
}

impl SessionTimer {
    /// Create an idle timer loaded with the focus duration.
    pub fn new(
        settings: SettingsStore,
        notifier: Box<dyn NotificationSink>,
        sound: Box<dyn SoundSink>,
    ) -> Self {
        let remaining_seconds = settings.settings().focus_seconds();

        Self {
            state: TimerState::Idle,
            current_session: SessionType::Focus,
            remaining_seconds,
            settings,
            ticker: Ticker::default(),
            notifier,
            sound,
        }
    }

    /// Start or resume the current session. No-op while running.
    pub fn start(&mut self) {
        if matches!(self.state, TimerState::Idle | TimerState::Paused) {
            self.state = self.current_session.running_state();
            self.start_ticking();
            debug!(session = %self.current_session, remaining = self.remaining_seconds, "Started");
        }
    }

    /// Pause a running session, keeping its countdown. No-op otherwise.
    pub fn pause(&mut self) {
        if self.is_running() {
            self.state = TimerState::Paused;
            self.ticker.stop();
            debug!(session = %self.current_session, remaining = self.remaining_seconds, "Paused");
        }
    }

    /// Pause if running, otherwise start.
    pub fn toggle_play_pause(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and return to an idle focus session.
    pub fn reset(&mut self) {
        self.ticker.stop();
        self.current_session = SessionType::Focus;
        self.state = TimerState::Idle;
        self.remaining_seconds = self.settings.settings().focus_seconds();
        debug!("Reset");
    }

    /// Jump to the other session type and start it immediately.
    pub fn skip(&mut self) {
        self.ticker.stop();
        self.switch_session();
        self.start_ticking();
        debug!(session = %self.current_session, "Skipped");
    }

    /// Advance the countdown by one second.
    ///
    /// When the countdown is already at zero this fires completion instead:
    /// the alert and notification go out and the next session starts.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// One tick observed at `now`; a completion re-arms the ticker from `now`.
    fn tick_at(&mut self, now: Instant) {
        if !self.is_running() {
            return;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        } else {
            self.complete(now);
        }
    }

    /// Run every tick due at `now`. Returns how many ran.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while self.ticker.take_due(now) {
            self.tick_at(now);
            fired += 1;
        }
        fired
    }

    fn complete(&mut self, now: Instant) {
        self.ticker.stop();

        let ended = self.current_session;
        if self.settings.settings().sound_enabled {
            self.sound.play_alert();
        }
        let (title, body) = ended.completion_message();
        self.notifier.notify(title, body);

        // Completion always rolls straight into the next session
        self.switch_session();
        self.ticker.start(now);
        info!(ended = %ended, next = %self.current_session, "Session complete");
    }

    fn switch_session(&mut self) {
        self.current_session = self.current_session.opposite();
        self.state = self.current_session.running_state();
        self.remaining_seconds = self.duration_of(self.current_session);
    }

    fn start_ticking(&mut self) {
        self.ticker.start(Instant::now());
    }

    fn duration_of(&self, session: SessionType) -> u32 {
        match session {
            SessionType::Focus => self.settings.settings().focus_seconds(),
            SessionType::Break => self.settings.settings().break_seconds(),
        }
    }

    /// Change the focus duration. An idle timer picks it up immediately.
    ///
    /// # Errors
    ///
    /// Returns `DoingError::InvalidDuration` if `minutes` is not an allowed
    /// focus option.
    pub fn update_focus_duration(&mut self, minutes: u32) -> Result<(), DoingError> {
        self.settings.set_focus_duration(minutes)?;
        if self.state == TimerState::Idle {
            self.remaining_seconds = self.settings.settings().focus_seconds();
        }
        Ok(())
    }

    /// Change the break duration. Only future breaks are affected.
    ///
    /// # Errors
    ///
    /// Returns `DoingError::InvalidDuration` if `minutes` is not an allowed
    /// break option.
    pub fn update_break_duration(&mut self, minutes: u32) -> Result<(), DoingError> {
        self.settings.set_break_duration(minutes)
    }

    /// Step the focus duration to the next allowed option, wrapping around.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::update_focus_duration`].
    pub fn cycle_focus_duration(&mut self) -> Result<u32, DoingError> {
        let next = next_option(&FOCUS_OPTIONS, self.settings().focus_duration_minutes);
        self.update_focus_duration(next)?;
        Ok(next)
    }

    /// Step the break duration to the next allowed option, wrapping around.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::update_break_duration`].
    pub fn cycle_break_duration(&mut self) -> Result<u32, DoingError> {
        let next = next_option(&BREAK_OPTIONS, self.settings().break_duration_minutes);
        self.update_break_duration(next)?;
        Ok(next)
    }

    /// Flip the sound flag. Returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        self.settings.toggle_sound()
    }

    /// Set the sound flag.
    pub fn set_sound(&mut self, enabled: bool) {
        self.settings.set_sound(enabled);
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// The session that is running, or that `start` would resume.
    #[must_use]
    pub const fn current_session(&self) -> SessionType {
        self.current_session
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_mmss(self.remaining_seconds)
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Whether a tick schedule is active.
    #[must_use]
    pub const fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Time until the next tick is due, or `None` when not ticking.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    #[must_use]
    pub const fn settings(&self) -> &PomodoroSettings {
        self.settings.settings()
    }

    /// Capture the timer together with `task` for rendering.
    #[must_use]
    pub fn snapshot(&self, task: &TaskStore) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            state_label: self.state.label(),
            session: self.current_session,
            remaining_seconds: self.remaining_seconds,
            formatted_time: self.formatted_time(),
            is_running: self.is_running(),
            settings: *self.settings(),
            task: task.task().to_string(),
            display_task: task.display_task().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::pomodoro::notify::{MockNotificationSink, MockSoundSink};
    use crate::storage::MemoryStore;

    fn timer_with(notifier: MockNotificationSink, sound: MockSoundSink) -> SessionTimer {
        let settings = SettingsStore::new(Rc::new(MemoryStore::new()));
        SessionTimer::new(settings, Box::new(notifier), Box::new(sound))
    }

    /// A timer whose sinks must never be called.
    fn quiet_timer() -> SessionTimer {
        let mut notifier = MockNotificationSink::new();
        notifier.expect_notify().never();
        let mut sound = MockSoundSink::new();
        sound.expect_play_alert().never();
        timer_with(notifier, sound)
    }

    fn tick_n(timer: &mut SessionTimer, n: u32) {
        for _ in 0..n {
            timer.tick();
        }
    }

    #[test]
    fn test_initial_state() {
        let timer = quiet_timer();

        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.current_session(), SessionType::Focus);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert_eq!(timer.formatted_time(), "25:00");
        assert!(!timer.is_running());
        assert!(!timer.is_ticking());
    }

    #[test]
    fn test_start_then_pause_before_tick() {
        let mut timer = quiet_timer();

        timer.start();
        assert_eq!(timer.state(), TimerState::Focus);
        assert_eq!(timer.remaining_seconds(), 1500);
        assert!(timer.is_ticking());

        timer.pause();
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining_seconds(), 1500);
        assert!(!timer.is_ticking());
    }

    #[test]
    fn test_tick_counts_down() {
        let mut timer = quiet_timer();
        timer.start();
        tick_n(&mut timer, 65);

        assert_eq!(timer.remaining_seconds(), 1500 - 65);
        assert_eq!(timer.formatted_time(), "23:55");
    }

    #[test]
    fn test_tick_is_ignored_when_not_running() {
        let mut timer = quiet_timer();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 1500);

        timer.start();
        timer.tick();
        timer.pause();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 1499);
    }

    #[test]
    fn test_start_and_pause_are_no_ops_in_wrong_state() {
        let mut timer = quiet_timer();

        timer.pause();
        assert_eq!(timer.state(), TimerState::Idle);

        timer.start();
        timer.tick();
        timer.start();
        assert_eq!(timer.state(), TimerState::Focus);
        assert_eq!(timer.remaining_seconds(), 1499);
    }

    #[test]
    fn test_toggle_play_pause() {
        let mut timer = quiet_timer();

        timer.toggle_play_pause();
        assert_eq!(timer.state(), TimerState::Focus);
        timer.toggle_play_pause();
        assert_eq!(timer.state(), TimerState::Paused);
        timer.toggle_play_pause();
        assert_eq!(timer.state(), TimerState::Focus);
    }

    #[test]
    fn test_pause_during_break_resumes_break() {
        let mut timer = quiet_timer();

        timer.skip();
        tick_n(&mut timer, 10);
        timer.pause();
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.current_session(), SessionType::Break);

        timer.start();
        assert_eq!(timer.state(), TimerState::Break);
        assert_eq!(timer.remaining_seconds(), 300 - 10);
    }

    #[test]
    fn test_focus_completion() {
        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_notify()
            .withf(|title, body| title == "Focus Complete!" && body == "Time for a break.")
            .times(1)
            .return_const(());
        let mut sound = MockSoundSink::new();
        sound.expect_play_alert().times(1).return_const(());

        let mut timer = timer_with(notifier, sound);
        timer.update_focus_duration(5).unwrap();
        timer.start();

        tick_n(&mut timer, 299);
        assert_eq!(timer.remaining_seconds(), 1);

        // Down to zero: still focus, nothing fired yet
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 0);
        assert_eq!(timer.state(), TimerState::Focus);
        assert_eq!(timer.formatted_time(), "00:00");

        // The tick that observes zero completes the session
        timer.tick();
        assert_eq!(timer.state(), TimerState::Break);
        assert_eq!(timer.current_session(), SessionType::Break);
        assert_eq!(timer.remaining_seconds(), 5 * 60);
        assert!(timer.is_ticking());
    }

    #[test]
    fn test_break_completion() {
        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_notify()
            .withf(|title, body| title == "Break Over!" && body == "Ready to focus again?")
            .times(1)
            .return_const(());
        let mut sound = MockSoundSink::new();
        sound.expect_play_alert().times(1).return_const(());

        let mut timer = timer_with(notifier, sound);
        timer.update_break_duration(3).unwrap();
        timer.skip();

        tick_n(&mut timer, 181);
        assert_eq!(timer.state(), TimerState::Focus);
        assert_eq!(timer.remaining_seconds(), 1500);
        assert!(timer.is_running());
    }

    #[test]
    fn test_completion_without_sound() {
        let mut notifier = MockNotificationSink::new();
        notifier.expect_notify().times(1).return_const(());
        let mut sound = MockSoundSink::new();
        sound.expect_play_alert().never();

        let mut timer = timer_with(notifier, sound);
        assert!(!timer.toggle_sound());
        timer.update_focus_duration(5).unwrap();
        timer.start();

        tick_n(&mut timer, 301);
        assert_eq!(timer.state(), TimerState::Break);
    }

    #[test]
    fn test_skip_alternates_sessions() {
        let mut timer = quiet_timer();
        timer.start();
        tick_n(&mut timer, 42);

        timer.skip();
        assert_eq!(timer.state(), TimerState::Break);
        assert_eq!(timer.remaining_seconds(), 300);
        assert!(timer.is_ticking());

        timer.skip();
        assert_eq!(timer.state(), TimerState::Focus);
        assert_eq!(timer.remaining_seconds(), 1500);
        assert!(timer.is_ticking());
    }

    #[test]
    fn test_skip_from_idle_and_paused_runs() {
        let mut timer = quiet_timer();

        timer.skip();
        assert_eq!(timer.state(), TimerState::Break);

        timer.pause();
        timer.skip();
        assert_eq!(timer.state(), TimerState::Focus);
        assert!(timer.is_ticking());
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut timer = quiet_timer();

        let setups: [fn(&mut SessionTimer); 4] = [
            |t| t.start(),
            |t| t.skip(),
            |t| {
                t.skip();
                t.pause();
            },
            |t| {
                t.start();
                t.tick();
                t.pause();
            },
        ];

        for setup in setups {
            setup(&mut timer);
            tick_n(&mut timer, 7);
            timer.reset();

            assert_eq!(timer.state(), TimerState::Idle);
            assert_eq!(timer.current_session(), SessionType::Focus);
            assert_eq!(timer.remaining_seconds(), 1500);
            assert!(!timer.is_ticking());
        }
    }

    #[test]
    fn test_focus_change_while_idle_applies_now() {
        let mut timer = quiet_timer();
        timer.update_focus_duration(45).unwrap();
        assert_eq!(timer.remaining_seconds(), 45 * 60);
    }

    #[test]
    fn test_duration_change_while_running_waits_for_next_session() {
        let mut timer = quiet_timer();
        timer.start();
        timer.tick();

        timer.update_focus_duration(10).unwrap();
        assert_eq!(timer.remaining_seconds(), 1499);

        timer.skip();
        timer.update_break_duration(15).unwrap();
        assert_eq!(timer.remaining_seconds(), 300);

        timer.pause();
        timer.update_focus_duration(15).unwrap();
        assert_eq!(timer.remaining_seconds(), 300);

        timer.skip();
        assert_eq!(timer.remaining_seconds(), 15 * 60);
        timer.skip();
        assert_eq!(timer.remaining_seconds(), 15 * 60);
    }

    #[test]
    fn test_invalid_duration_leaves_timer_untouched() {
        let mut timer = quiet_timer();

        assert!(timer.update_focus_duration(7).is_err());
        assert!(timer.update_break_duration(7).is_err());
        assert_eq!(timer.remaining_seconds(), 1500);
        assert_eq!(timer.settings().focus_duration_minutes, 25);
        assert_eq!(timer.settings().break_duration_minutes, 5);
    }

    #[test]
    fn test_cycle_durations() {
        let mut timer = quiet_timer();

        assert_eq!(timer.cycle_focus_duration().unwrap(), 30);
        assert_eq!(timer.cycle_focus_duration().unwrap(), 45);
        assert_eq!(timer.cycle_focus_duration().unwrap(), 5);
        assert_eq!(timer.remaining_seconds(), 300);

        assert_eq!(timer.cycle_break_duration().unwrap(), 10);
        assert_eq!(timer.cycle_break_duration().unwrap(), 15);
        assert_eq!(timer.cycle_break_duration().unwrap(), 3);
    }

    #[test]
    fn test_settings_persist_through_timer() {
        let shared = Rc::new(MemoryStore::new());
        {
            let mut timer = SessionTimer::new(
                SettingsStore::new(shared.clone()),
                Box::new(MockNotificationSink::new()),
                Box::new(MockSoundSink::new()),
            );
            timer.update_focus_duration(20).unwrap();
            timer.update_break_duration(10).unwrap();
            timer.toggle_sound();
        }

        let timer = SessionTimer::new(
            SettingsStore::new(shared),
            Box::new(MockNotificationSink::new()),
            Box::new(MockSoundSink::new()),
        );
        assert_eq!(timer.remaining_seconds(), 20 * 60);
        assert_eq!(timer.settings().break_duration_minutes, 10);
        assert!(!timer.settings().sound_enabled);
    }

    #[test]
    fn test_poll_runs_due_ticks() {
        let mut timer = quiet_timer();

        assert_eq!(timer.poll(Instant::now() + Duration::from_secs(5)), 0);

        timer.start();
        let later = Instant::now() + Duration::from_millis(2500);
        assert_eq!(timer.poll(later), 2);
        assert_eq!(timer.remaining_seconds(), 1498);
        assert_eq!(timer.poll(later), 0);
    }

    #[test]
    fn test_start_twice_keeps_one_tick_stream() {
        let mut timer = quiet_timer();

        timer.start();
        timer.start();
        let later = Instant::now() + Duration::from_millis(1500);
        assert_eq!(timer.poll(later), 1);
        assert_eq!(timer.remaining_seconds(), 1499);
    }

    #[test]
    fn test_poll_stops_draining_at_completion() {
        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_notify()
            .withf(|title, _| title == "Focus Complete!")
            .times(1)
            .return_const(());
        let mut sound = MockSoundSink::new();
        sound.expect_play_alert().times(1).return_const(());

        let mut timer = timer_with(notifier, sound);
        timer.start();

        // Two hours of overdue ticks: the focus session ends and the break
        // is scheduled from the polled instant, not the wall clock.
        let later = Instant::now() + Duration::from_secs(2 * 60 * 60);
        assert_eq!(timer.poll(later), 25 * 60 + 1);
        assert_eq!(timer.state(), TimerState::Break);
        assert_eq!(timer.remaining_seconds(), 5 * 60);
        assert_eq!(timer.poll(later), 0);
        assert_eq!(
            timer.time_until_next_tick(later),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_snapshot_json_keys_are_camel_case() {
        let timer = quiet_timer();
        let task = TaskStore::new(Rc::new(MemoryStore::new()));
        let value = serde_json::to_value(timer.snapshot(&task)).unwrap();

        assert_eq!(value["formattedTime"], "25:00");
        assert_eq!(value["stateLabel"], "Ready");
        assert_eq!(value["displayTask"], "What are you doing?");
        assert_eq!(value["remainingSeconds"], 1500);
        assert_eq!(value["settings"]["focusDurationMinutes"], 25);
        assert!(value.get("formatted_time").is_none());
    }

    #[test]
    fn test_paused_timer_does_not_poll() {
        let mut timer = quiet_timer();
        timer.start();
        timer.pause();

        assert_eq!(timer.poll(Instant::now() + Duration::from_secs(10)), 0);
        assert_eq!(timer.time_until_next_tick(Instant::now()), None);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(65), "01:05");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(45 * 60), "45:00");
    }

    #[test]
    fn test_snapshot() {
        let shared = Rc::new(MemoryStore::new());
        let mut task = TaskStore::new(shared);
        let mut timer = quiet_timer();
        timer.start();

        let snapshot = timer.snapshot(&task);
        assert_eq!(snapshot.state, TimerState::Focus);
        assert_eq!(snapshot.state_label, "Focus Time");
        assert_eq!(snapshot.formatted_time, "25:00");
        assert!(snapshot.is_running);
        assert_eq!(snapshot.task, "");
        assert_eq!(snapshot.display_task, "What are you doing?");

        task.set("Writing tests");
        assert_eq!(timer.snapshot(&task).display_task, "Writing tests");
    }
}
