use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::domain::{Clock, LocalZone};
use crate::domain::datetime::resolve_local;

// Wall clock backed by the operating system.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// The machine's configured time zone.
pub struct SystemZone;

impl LocalZone for SystemZone {
    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        resolve_local(&Local, local)
    }

    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&Local).naive_local()
    }
}

// An explicit IANA zone, e.g. from configuration.
pub struct NamedZone(pub Tz);

impl LocalZone for NamedZone {
    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        resolve_local(&self.0, local)
    }

    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.0).naive_local()
    }
}
