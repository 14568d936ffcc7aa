use core::time::Duration;

/// A monotonic time source used to bound SDO exchanges.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed point.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
mod linux {
    use std::time::{Duration, Instant};

    use super::Clock;

    pub struct StdClock {
        origin: Instant,
    }

    impl StdClock {
        pub fn new() -> Self {
            StdClock { origin: Instant::now() }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for StdClock {
        fn now(&self) -> Duration {
            self.origin.elapsed()
        }
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
pub use linux::StdClock;
