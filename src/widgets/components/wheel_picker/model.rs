use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::core::config::ColumnKind;
use crate::core::error::PickerError;
use crate::widgets::shared::calendar::{self, Date, add_days};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// A settled column value on its way into the model.
///
/// `hour_mode` rides along because the hour commit needs to know whether
/// the column speaks 12- or 24-hour values; other kinds ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCommit {
    pub kind: ColumnKind,
    pub value: String,
    pub hour_mode: u8,
}

impl ColumnCommit {
    pub fn new(kind: ColumnKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            hour_mode: 24,
        }
    }

    pub fn with_hour_mode(mut self, mode: u8) -> Self {
        self.hour_mode = mode;
        self
    }
}

/// The one shared wall-clock value behind all four columns.
///
/// Always a valid calendar date-time; the 12-hour hour and the meridiem are
/// derived on demand, never stored. Mutated only through commits and the
/// sync engine's minute-rounding write-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeModel {
    date: Date,
    hour: u8,
    minute: u8,
}

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2}):(\d{2})$")
            .expect("field pattern should compile")
    })
}

impl DateTimeModel {
    pub fn new(date: Date, hour: u8, minute: u8) -> Result<Self, PickerError> {
        if hour > 23 || minute > 59 {
            return Err(PickerError::ParseDateTime {
                text: format!("{}:{}", hour, minute),
            });
        }
        Ok(Self { date, hour, minute })
    }

    /// The current moment, the fallback for an unreadable host field.
    pub fn now() -> Self {
        let (hour, minute) = calendar::now_hm();
        Self {
            date: calendar::today(),
            hour,
            minute,
        }
    }

    /// Strict read of the host field format `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(text: &str) -> Result<Self, PickerError> {
        let parse_err = || PickerError::ParseDateTime {
            text: text.to_string(),
        };
        let caps = field_pattern().captures(text).ok_or_else(parse_err)?;
        let field = |idx: usize| -> i32 {
            caps.get(idx)
                .map(|m| m.as_str().parse().unwrap_or(-1))
                .unwrap_or(-1)
        };
        let date = Date::from_parts(field(1), field(2) as u8, field(3) as u8)
            .map_err(|_| parse_err())?;
        let (hour, minute, second) = (field(4), field(5), field(6));
        if !(0..24).contains(&hour) || !(0..60).contains(&minute) || !(0..60).contains(&second) {
            return Err(parse_err());
        }
        Ok(Self {
            date,
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Canonical host field text; seconds are always `00`.
    pub fn serialize(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:00",
            self.date.year, self.date.month, self.date.day, self.hour, self.minute
        )
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The hour as a 12-hour column shows it. Hours above twelve fold
    /// down; twelve itself stays (the AM-side boundary quirk), and zero
    /// has no 1-based item to land on.
    pub fn display_hour(&self) -> u8 {
        if self.hour > 12 {
            self.hour - 12
        } else {
            self.hour
        }
    }

    /// PM strictly above twelve; noon itself reads as AM here while the
    /// meridiem toggle treats it as PM-side. The mismatch is deliberate;
    /// see the boundary tests.
    pub fn meridiem(&self) -> Meridiem {
        if self.hour > 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }

    /// Applies one settled column value. Malformed values are logged and
    /// dropped; the model never leaves the valid range.
    pub fn apply_commit(&mut self, commit: &ColumnCommit) {
        match commit.kind {
            ColumnKind::Date => self.commit_date(&commit.value),
            ColumnKind::Hour => self.commit_hour(&commit.value, commit.hour_mode),
            ColumnKind::Minute => self.commit_minute(&commit.value),
            ColumnKind::Meridiem => self.commit_meridiem(&commit.value),
        }
    }

    fn commit_date(&mut self, value: &str) {
        match Date::from_iso(value) {
            Ok(date) => self.date = date,
            Err(err) => warn!(value, %err, "ignoring malformed date commit"),
        }
    }

    fn commit_hour(&mut self, value: &str, mode: u8) {
        let Ok(hour) = value.parse::<i32>() else {
            warn!(value, "ignoring malformed hour commit");
            return;
        };
        if mode == 24 {
            self.set_hour_raw(hour);
        } else if self.hour <= 12 {
            // AM side, boundary at exactly twelve included.
            self.set_hour_raw(hour);
        } else {
            self.set_hour_raw(hour + 12);
        }
    }

    fn commit_minute(&mut self, value: &str) {
        match value.parse::<u8>() {
            Ok(minute) if minute < 60 => self.minute = minute,
            _ => warn!(value, "ignoring malformed minute commit"),
        }
    }

    fn commit_meridiem(&mut self, value: &str) {
        match value {
            "AM" => {
                if self.hour >= 12 {
                    self.set_hour_raw(self.hour as i32 - 12);
                }
            }
            "PM" => {
                if self.hour < 12 {
                    self.set_hour_raw(self.hour as i32 + 12);
                }
            }
            _ => warn!(value, "ignoring malformed meridiem commit"),
        }
    }

    /// Normalizes an unbounded hour, carrying whole days into the date
    /// (hour 24 rolls to midnight of the next day).
    fn set_hour_raw(&mut self, raw: i32) {
        let days = raw.div_euclid(24);
        self.hour = raw.rem_euclid(24) as u8;
        if days != 0 {
            self.date = add_days(self.date, days);
        }
    }

    pub(super) fn set_minute_raw(&mut self, minute: u8) {
        self.minute = minute.min(59);
    }

    pub(super) fn advance_hours(&mut self, delta: i32) {
        self.set_hour_raw(self.hour as i32 + delta);
    }
}
