use chrono_tz::Tz;
use std::{env, time::Duration};

// Runtime settings read from the environment (a `.env` file is loaded first).

const DEFAULT_BOOKING_API_URL: &str = "https://conference-scheduler.onrender.com";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub fn booking_api_url() -> String {
    env::var("BOOKING_API_URL").unwrap_or_else(|_| DEFAULT_BOOKING_API_URL.to_string())
}

pub fn booking_request_timeout() -> Duration {
    let millis = env::var("BOOKING_REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
    Duration::from_millis(millis)
}

// Zone used for "today" and for the booking instants. Unset means the
// machine's own zone.
pub fn booking_timezone() -> Option<Tz> {
    let name = env::var("BOOKING_TIMEZONE").ok()?;
    parse_timezone(&name)
}

fn parse_timezone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(error) => {
            tracing::warn!(timezone = %name, %error, "unknown BOOKING_TIMEZONE; using system zone");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_zone_name_is_known_then_it_parses() {
        assert_eq!(parse_timezone("Europe/Berlin"), Some(chrono_tz::Europe::Berlin));
        assert_eq!(parse_timezone(" UTC "), Some(chrono_tz::UTC));
    }

    #[test]
    fn when_zone_name_is_unknown_or_blank_then_system_zone_is_used() {
        assert_eq!(parse_timezone("Mars/Olympus_Mons"), None);
        assert_eq!(parse_timezone(""), None);
    }
}
