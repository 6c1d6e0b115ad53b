// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time sources used to evaluate token expiration.
//!
//! The IAM token service reports expiration as seconds since the Unix epoch,
//! so clocks in this module report the same unit.

/// A source for the current time, in seconds since the Unix epoch.
///
/// Applications rarely need to implement this trait. It exists so expiry
/// decisions can be tested without waiting for wall-clock time to pass.
pub trait Clock: std::fmt::Debug + Send + Sync {
    /// Returns the current time as seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// The default [Clock], backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        time::OffsetDateTime::now_utc().unix_timestamp()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// A clock that only moves when told to. Clones share the same time.
    #[derive(Clone, Debug)]
    pub(crate) struct FakeClock(Arc<AtomicI64>);

    impl FakeClock {
        pub(crate) fn new(now: i64) -> Self {
            Self(Arc::new(AtomicI64::new(now)))
        }

        pub(crate) fn advance(&self, seconds: i64) {
            self.0.fetch_add(seconds, Ordering::SeqCst);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn system_clock_is_after_2024() {
        // 2024-01-01T00:00:00Z
        assert!(SystemClock.now() > 1_704_067_200);
    }

    #[test]
    fn fake_clock_advances() {
        let clock = FakeClock::new(1_000);
        let clone = clock.clone();
        assert_eq!(clock.now(), 1_000);
        clone.advance(60);
        assert_eq!(clock.now(), 1_060);
    }
}
