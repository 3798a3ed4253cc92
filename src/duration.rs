use std::fmt;

const SECONDS_PER_HOUR: f64 = 3600.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// An hour estimate that may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hours {
    Known(f64),
    Unknown,
}

impl Hours {
    pub fn known(self) -> Option<f64> {
        match self {
            Hours::Known(hours) => Some(hours),
            Hours::Unknown => None,
        }
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hours::Known(hours) => write!(f, "{:.1} hours", hours),
            Hours::Unknown => f.write_str("No Data"),
        }
    }
}

/// Completion estimate in hours, quantized to the nearest half hour.
///
/// Zero and missing values are `Unknown`. Ties round away from zero
/// (`f64::round`), so 1.25h (4500s) becomes 1.5h.
pub fn format_half_hourly(seconds: Option<u64>) -> Hours {
    match seconds {
        None | Some(0) => Hours::Unknown,
        Some(secs) => {
            let halves = (secs as f64 / SECONDS_PER_HOUR * 2.0).round();
            Hours::Known(halves / 2.0)
        }
    }
}

/// Played time in hours, rounded to one decimal place (ties away from zero).
pub fn format_tenth_hourly(minutes: u64) -> f64 {
    (minutes as f64 / MINUTES_PER_HOUR * 10.0).round() / 10.0
}
