use core::{fmt::Display, str::FromStr, time::Duration};

/// Animation frame rate in frames per second.
#[derive(PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord, Hash)]
pub struct FrameRate(pub u32);

impl FrameRate {
    /// Milliseconds between two consecutive frames.
    ///
    /// # Panics
    ///
    /// Panics on a zero frame rate; the scheduler rejects those up front.
    #[must_use]
    pub fn period_ms(self) -> u32 {
        1000 / self.0
    }

    /// Target elapsed time for completing `frames` frames overall.
    ///
    /// Deadlines are derived from the total frame count rather than from the
    /// previous deadline, so integer rounding never accumulates into drift.
    #[must_use]
    pub fn deadline(self, frames: u64) -> Duration {
        Duration::from_millis(frames * 1000 / u64::from(self.0))
    }
}

impl FromStr for FrameRate {
    type Err = <u32 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u32::from_str(s).map(Self)
    }
}

impl From<u32> for FrameRate {
    fn from(inner: u32) -> Self {
        Self(inner)
    }
}

impl Display for FrameRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::FrameRate;
    use core::time::Duration;

    #[test]
    fn count_based_deadlines() {
        let rate = FrameRate(10);
        assert_eq!(rate.period_ms(), 100);
        assert_eq!(rate.deadline(1), Duration::from_millis(100));
        assert_eq!(rate.deadline(25), Duration::from_millis(2500));

        // 3 fps does not divide 1000 evenly; the count-based form still
        // lands exactly on whole seconds every third frame.
        assert_eq!(FrameRate(3).deadline(3), Duration::from_millis(1000));
    }
}
