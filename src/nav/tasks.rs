use crate::nav::screen::Screen;
use crate::settings::TimerSettings;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PharmacyStatus {
    Preparing,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    AutoSave(SaveStatus),
    PharmacyReady,
    RedirectDue(Screen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScreenTasks {
    Idle,
    SessionClock,
    AutoSave {
        next_save: Instant,
        flash_until: Option<Instant>,
        status: SaveStatus,
    },
    Success {
        pharmacy_ready_at: Option<Instant>,
        pharmacy: PharmacyStatus,
        redirect_at: Option<Instant>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mounted {
    screen: Screen,
    mounted_at: Instant,
    tasks: ScreenTasks,
}

/// Timers owned by the screen currently on display.
///
/// Mounting a screen starts its timers; unmounting cancels all of them, so a
/// late tick can never fire an event for a screen the user already left.
#[derive(Debug, Clone)]
pub struct TaskScheduler {
    timers: TimerSettings,
    mounted: Option<Mounted>,
}

impl TaskScheduler {
    pub fn new(timers: TimerSettings) -> Self {
        Self {
            timers,
            mounted: None,
        }
    }

    pub fn mounted_screen(&self) -> Option<Screen> {
        self.mounted.as_ref().map(|m| m.screen)
    }

    pub fn mount(&mut self, screen: Screen, now: Instant) {
        self.unmount();
        let secs = Duration::from_secs;
        let tasks = match screen {
            Screen::ConsultationSession => ScreenTasks::SessionClock,
            Screen::Consultation => ScreenTasks::AutoSave {
                next_save: now + secs(self.timers.autosave_interval_secs.max(1)),
                flash_until: None,
                status: SaveStatus::Saved,
            },
            Screen::Success => ScreenTasks::Success {
                pharmacy_ready_at: Some(now + secs(self.timers.pharmacy_ready_secs)),
                pharmacy: PharmacyStatus::Preparing,
                redirect_at: Some(now + secs(self.timers.redirect_countdown_secs)),
            },
            _ => ScreenTasks::Idle,
        };
        if tasks != ScreenTasks::Idle {
            tracing::debug!(?screen, "screen timers started");
        }
        self.mounted = Some(Mounted {
            screen,
            mounted_at: now,
            tasks,
        });
    }

    pub fn unmount(&mut self) -> Option<Screen> {
        let mounted = self.mounted.take()?;
        if mounted.tasks != ScreenTasks::Idle {
            tracing::debug!(screen = ?mounted.screen, "screen timers cancelled");
        }
        Some(mounted.screen)
    }

    pub fn tick(&mut self, now: Instant) -> Vec<TaskEvent> {
        let mut events = Vec::new();
        let interval = Duration::from_secs(self.timers.autosave_interval_secs.max(1));
        let flash = Duration::from_secs(self.timers.autosave_flash_secs);
        let Some(mounted) = self.mounted.as_mut() else {
            return events;
        };

        match &mut mounted.tasks {
            ScreenTasks::Idle | ScreenTasks::SessionClock => {}
            ScreenTasks::AutoSave {
                next_save,
                flash_until,
                status,
            } => {
                if flash_until.is_some_and(|until| now >= until) {
                    *flash_until = None;
                    *status = SaveStatus::Saved;
                    events.push(TaskEvent::AutoSave(SaveStatus::Saved));
                }
                if now >= *next_save {
                    while *next_save <= now {
                        *next_save += interval;
                    }
                    *status = SaveStatus::Saving;
                    *flash_until = Some(now + flash);
                    events.push(TaskEvent::AutoSave(SaveStatus::Saving));
                }
            }
            ScreenTasks::Success {
                pharmacy_ready_at,
                pharmacy,
                redirect_at,
            } => {
                if pharmacy_ready_at.is_some_and(|at| now >= at) {
                    *pharmacy_ready_at = None;
                    *pharmacy = PharmacyStatus::Ready;
                    events.push(TaskEvent::PharmacyReady);
                }
                if redirect_at.is_some_and(|at| now >= at) {
                    *redirect_at = None;
                    events.push(TaskEvent::RedirectDue(Screen::Dashboard));
                }
            }
        }
        events
    }

    pub fn save_status(&self) -> Option<SaveStatus> {
        match self.mounted.as_ref()?.tasks {
            ScreenTasks::AutoSave { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn pharmacy_status(&self) -> Option<PharmacyStatus> {
        match self.mounted.as_ref()?.tasks {
            ScreenTasks::Success { pharmacy, .. } => Some(pharmacy),
            _ => None,
        }
    }

    /// Whole seconds left before the success screen sends the user back to the queue.
    pub fn redirect_remaining(&self, now: Instant) -> Option<u64> {
        match self.mounted.as_ref()?.tasks {
            ScreenTasks::Success {
                redirect_at: Some(at),
                ..
            } => {
                let left = at.saturating_duration_since(now);
                Some(left.as_secs() + u64::from(left.subsec_nanos() > 0))
            }
            _ => None,
        }
    }

    pub fn cancel_redirect(&mut self) -> bool {
        match self.mounted.as_mut().map(|m| &mut m.tasks) {
            Some(ScreenTasks::Success { redirect_at, .. }) => redirect_at.take().is_some(),
            _ => false,
        }
    }

    pub fn session_elapsed(&self, now: Instant) -> Option<Duration> {
        let mounted = self.mounted.as_ref()?;
        match mounted.tasks {
            ScreenTasks::SessionClock => Some(now.saturating_duration_since(mounted.mounted_at)),
            _ => None,
        }
    }
}

pub fn format_hms(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> TaskScheduler {
        TaskScheduler::new(TimerSettings::default())
    }

    #[test]
    fn autosave_flashes_saving_then_saved() {
        let mut tasks = scheduler();
        let t0 = Instant::now();
        tasks.mount(Screen::Consultation, t0);
        assert!(tasks.tick(t0 + Duration::from_secs(9)).is_empty());
        assert_eq!(
            tasks.tick(t0 + Duration::from_secs(10)),
            vec![TaskEvent::AutoSave(SaveStatus::Saving)]
        );
        assert_eq!(tasks.save_status(), Some(SaveStatus::Saving));
        assert_eq!(
            tasks.tick(t0 + Duration::from_secs(11)),
            vec![TaskEvent::AutoSave(SaveStatus::Saved)]
        );
        assert_eq!(
            tasks.tick(t0 + Duration::from_secs(20)),
            vec![TaskEvent::AutoSave(SaveStatus::Saving)]
        );
    }

    #[test]
    fn success_screen_reports_pharmacy_and_redirect() {
        let mut tasks = scheduler();
        let t0 = Instant::now();
        tasks.mount(Screen::Success, t0);
        assert_eq!(tasks.pharmacy_status(), Some(PharmacyStatus::Preparing));
        assert_eq!(tasks.redirect_remaining(t0), Some(15));
        assert_eq!(
            tasks.tick(t0 + Duration::from_secs(5)),
            vec![TaskEvent::PharmacyReady]
        );
        assert_eq!(
            tasks.tick(t0 + Duration::from_secs(15)),
            vec![TaskEvent::RedirectDue(Screen::Dashboard)]
        );
        assert!(tasks.tick(t0 + Duration::from_secs(30)).is_empty());
    }

    #[test]
    fn cancelled_redirect_never_fires() {
        let mut tasks = scheduler();
        let t0 = Instant::now();
        tasks.mount(Screen::Success, t0);
        assert!(tasks.cancel_redirect());
        assert!(!tasks.cancel_redirect());
        let events = tasks.tick(t0 + Duration::from_secs(60));
        assert_eq!(events, vec![TaskEvent::PharmacyReady]);
    }

    #[test]
    fn unmount_cancels_pending_timers() {
        let mut tasks = scheduler();
        let t0 = Instant::now();
        tasks.mount(Screen::Success, t0);
        assert_eq!(tasks.unmount(), Some(Screen::Success));
        assert!(tasks.tick(t0 + Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn session_clock_formats_as_hms() {
        let mut tasks = scheduler();
        let t0 = Instant::now();
        tasks.mount(Screen::ConsultationSession, t0);
        let elapsed = tasks
            .session_elapsed(t0 + Duration::from_secs(3723))
            .expect("session clock running");
        assert_eq!(format_hms(elapsed), "01:02:03");
    }
}
