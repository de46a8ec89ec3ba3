use std::fmt;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MEGASECOND: i64 = 1_000_000_000;
const SECONDS_PER_MEGASECOND: i64 = 1_000_000;
const MICROS_PER_MILLI: i64 = 1_000;

/// A UTC timestamp stored as signed milliseconds since the Unix epoch.
///
/// The raw millisecond count is what travels on the wire and is kept
/// losslessly; [`parts`](Self::parts) gives the
/// mega-seconds / seconds / microseconds split used by consumers that
/// think in that triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtcDateTime(i64);

/// A timestamp split into whole mega-seconds, remaining seconds, and
/// remaining microseconds.
///
/// `secs` is always in `0..1_000_000` and `micro_secs` in
/// `0..1_000_000` (with millisecond resolution, so a multiple of 1000).
/// Negative timestamps push the sign into `mega_secs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimestampParts {
  pub mega_secs: i64,
  pub secs: i64,
  pub micro_secs: i64,
}

impl UtcDateTime {
  #[must_use]
  pub fn from_millis(millis: i64) -> Self {
    Self(millis)
  }

  #[must_use]
  pub fn millis(self) -> i64 {
    self.0
  }

  #[must_use]
  pub fn parts(self) -> TimestampParts {
    let ms = self.0;
    TimestampParts {
      mega_secs: ms.div_euclid(MILLIS_PER_MEGASECOND),
      secs: ms.div_euclid(MILLIS_PER_SECOND).rem_euclid(SECONDS_PER_MEGASECOND),
      micro_secs: ms.rem_euclid(MILLIS_PER_SECOND) * MICROS_PER_MILLI,
    }
  }

  /// Rebuild a timestamp from its parts. Sub-millisecond microseconds
  /// are truncated.
  ///
  /// Returns `None` if the total does not fit an `i64` millisecond count.
  #[must_use]
  pub fn from_parts(parts: TimestampParts) -> Option<Self> {
    let millis = i128::from(parts.mega_secs) * i128::from(MILLIS_PER_MEGASECOND)
      + i128::from(parts.secs) * i128::from(MILLIS_PER_SECOND)
      + i128::from(parts.micro_secs / MICROS_PER_MILLI);
    i64::try_from(millis).ok().map(Self)
  }
}

impl fmt::Display for UtcDateTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Date({})", self.0)
  }
}
