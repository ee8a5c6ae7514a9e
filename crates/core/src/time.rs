use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::{Error, Result};

/// Civil date-time layouts accepted once the trailing UTC marker is gone.
const FORMATS: [&str; 5] = [
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%d %H:%M",
	"%Y%m%dT%H%M%S",
];

/// Parse a timestamp taken from the listing into the given civil timezone.
///
/// The site writes local Central time but tags it with a trailing `Z`, so the
/// marker is dropped and the remaining wall-clock value is attached to `tz`
/// instead of being read as UTC.
///
/// # Errors
///
/// Returns [`Error::DateParse`] when the string is not a civil date-time.
pub fn normalize(raw: &str, tz: Tz) -> Result<DateTime<Tz>> {
	let naive = parse_naive(raw).ok_or_else(|| Error::DateParse {
		raw: raw.to_string(),
	})?;

	localize(naive, tz).ok_or_else(|| Error::DateParse {
		raw: raw.to_string(),
	})
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
	let s = raw.trim().trim_end_matches(['Z', 'z']);

	FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
		.or_else(|| {
			NaiveDate::parse_from_str(s, "%Y-%m-%d")
				.ok()
				.and_then(|date| date.and_hms_opt(0, 0, 0))
		})
}

/// Attach `tz` to a wall-clock time. A time inside the autumn fold resolves to
/// standard time, one inside the spring gap is moved forward an hour.
fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
	match tz.from_local_datetime(&naive) {
		LocalResult::Single(dt) => Some(dt),
		LocalResult::Ambiguous(_, standard) => Some(standard),
		LocalResult::None => tz
			.from_local_datetime(&(naive + chrono::Duration::hours(1)))
			.latest(),
	}
}
