//! Start/end time-of-day windows

use chrono::NaiveTime;

/// Result of checking a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCheck {
    Valid,
    /// One or both ends are not set yet
    Incomplete,
    /// Start does not strictly precede end
    TimeError,
}

/// A start/end pair on a single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl TimeWindow {
    pub fn new(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        Self { start, end }
    }

    pub fn check(&self) -> WindowCheck {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start < end => WindowCheck::Valid,
            (Some(_), Some(_)) => WindowCheck::TimeError,
            _ => WindowCheck::Incomplete,
        }
    }

    pub fn has_time_error(&self) -> bool {
        self.check() == WindowCheck::TimeError
    }

    /// Both ends, only when the window is valid
    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start < end => Some((start, end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    #[test]
    fn test_start_after_end_is_time_error() {
        let window = TimeWindow::new(t(10, 0), t(9, 0));
        assert_eq!(window.check(), WindowCheck::TimeError);
        assert!(window.has_time_error());
        assert_eq!(window.bounds(), None);
    }

    #[test]
    fn test_start_before_end_is_valid() {
        let window = TimeWindow::new(t(9, 0), t(10, 0));
        assert_eq!(window.check(), WindowCheck::Valid);
        assert_eq!(window.bounds(), Some((t(9, 0).unwrap(), t(10, 0).unwrap())));
    }

    #[test]
    fn test_equal_times_are_rejected() {
        assert!(TimeWindow::new(t(9, 0), t(9, 0)).has_time_error());
    }

    #[test]
    fn test_missing_end_is_incomplete() {
        let window = TimeWindow::new(t(9, 0), None);
        assert_eq!(window.check(), WindowCheck::Incomplete);
        assert!(!window.has_time_error());
    }
}
