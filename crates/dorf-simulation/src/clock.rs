use crate::error::{SimError, SimResult};

/// Tracks the simulated day and the harvest cadence.
///
/// A fresh clock starts on the last committed day. [`SimClock::advance`]
/// moves it to the day being simulated; the world's counter is only updated
/// once that day has fully run.
#[derive(Debug, Clone)]
pub struct SimClock {
    day: u64,
    harvest_interval: u64,
}

impl SimClock {
    /// Create a clock positioned at `day`.
    pub fn new(day: u64, harvest_interval: u64) -> Self {
        Self {
            day,
            harvest_interval: harvest_interval.max(1),
        }
    }

    /// Advance the clock by one day. Returns the new day number.
    pub fn advance(&mut self) -> SimResult<u64> {
        self.day = self.day.checked_add(1).ok_or(SimError::Overflow("day"))?;
        Ok(self.day)
    }

    /// Return the current day number.
    pub fn day(&self) -> u64 {
        self.day
    }

    /// Whether the current day brings in a harvest.
    pub fn is_harvest_day(&self) -> bool {
        self.day > 0 && self.day % self.harvest_interval == 0
    }

    /// Days from the current day to the next harvest after it.
    pub fn days_until_harvest(&self) -> u64 {
        self.harvest_interval - self.day % self.harvest_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new(0, 7);
        assert_eq!(clock.day(), 0);
        assert!(!clock.is_harvest_day());
    }

    #[test]
    fn clock_advance_increments() {
        let mut clock = SimClock::new(0, 7);
        clock.advance().unwrap();
        clock.advance().unwrap();
        assert_eq!(clock.advance().unwrap(), 3);
        assert_eq!(clock.day(), 3);
    }

    #[test]
    fn harvest_every_interval() {
        let mut clock = SimClock::new(0, 3);
        let harvests: Vec<u64> = (0..9)
            .filter_map(|_| {
                let day = clock.advance().unwrap();
                clock.is_harvest_day().then_some(day)
            })
            .collect();
        assert_eq!(harvests, [3, 6, 9]);
    }

    #[test]
    fn days_until_harvest_counts_down() {
        assert_eq!(SimClock::new(0, 7).days_until_harvest(), 7);
        assert_eq!(SimClock::new(5, 7).days_until_harvest(), 2);
        assert_eq!(SimClock::new(7, 7).days_until_harvest(), 7);
    }

    #[test]
    fn zero_interval_treated_as_daily() {
        let clock = SimClock::new(4, 0);
        assert!(clock.is_harvest_day());
    }

    #[test]
    fn advance_overflow_is_reported() {
        let mut clock = SimClock::new(u64::MAX, 7);
        assert_eq!(clock.advance(), Err(SimError::Overflow("day")));
        assert_eq!(clock.day(), u64::MAX);
    }
}
