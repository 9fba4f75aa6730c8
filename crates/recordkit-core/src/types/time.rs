use super::{DATETIME_LAYOUT, DATE_LAYOUT};
use crate::{field_value::parse_timestamp, schema::Kind, Error, FieldValue, Result, Value};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A nullable timestamp.
///
/// Serializes to `"YYYY-MM-DD HH:MM:SS"` or `null`. Deserializes from either
/// a date (`YYYY-MM-DD`) or a date and time; any other string leaves it
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(Option<NaiveDateTime>);

impl Time {
    pub fn new(value: NaiveDateTime) -> Time {
        Time(Some(value))
    }

    pub fn null() -> Time {
        Time(None)
    }

    pub fn now() -> Time {
        Time(Some(chrono::Local::now().naive_local()))
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<NaiveDateTime> {
        self.0
    }

    /// The date part, or an empty string.
    pub fn date(&self) -> String {
        self.format(DATE_LAYOUT)
    }

    /// The date and time, or an empty string.
    pub fn date_time(&self) -> String {
        self.format(DATETIME_LAYOUT)
    }

    fn format(&self, layout: &str) -> String {
        self.0
            .map(|ts| ts.format(layout).to_string())
            .unwrap_or_default()
    }

    /// Parse the JSON text form, ignoring surrounding quotes.
    pub fn parse(text: &str) -> Result<Time> {
        let text = text.replace('"', "");
        let text = text.trim();

        match layout_of(text) {
            Some(Layout::Date) => {
                let date = NaiveDate::parse_from_str(text, DATE_LAYOUT)?;
                Ok(Time::new(date.and_time(NaiveTime::MIN)))
            }
            Some(Layout::DateTime) => Ok(Time::new(NaiveDateTime::parse_from_str(
                text,
                DATETIME_LAYOUT,
            )?)),
            None => Ok(Time::null()),
        }
    }
}

enum Layout {
    Date,
    DateTime,
}

/// Match `\d{4}-\d{1,2}-\d{1,2}` optionally followed by ` \d{2}:\d{2}:\d{2}`.
fn layout_of(text: &str) -> Option<Layout> {
    fn digits(s: &str, min: usize, max: usize) -> bool {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    }

    let (date, time) = match text.split_once(' ') {
        Some((date, time)) => (date, Some(time)),
        None => (text, None),
    };

    let date: Vec<&str> = date.split('-').collect();
    if date.len() != 3 || !digits(date[0], 4, 4) || !digits(date[1], 1, 2) || !digits(date[2], 1, 2)
    {
        return None;
    }

    match time {
        None => Some(Layout::Date),
        Some(time) => {
            let time: Vec<&str> = time.split(':').collect();
            (time.len() == 3 && time.iter().all(|part| digits(part, 2, 2)))
                .then_some(Layout::DateTime)
        }
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.date_time())
    }
}

impl From<NaiveDateTime> for Time {
    fn from(value: NaiveDateTime) -> Self {
        Time::new(value)
    }
}

impl From<Option<NaiveDateTime>> for Time {
    fn from(value: Option<NaiveDateTime>) -> Self {
        Time(value)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Some(_) => serializer.serialize_str(&self.date_time()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => Time::parse(&text).map_err(serde::de::Error::custom),
            None => Ok(Time::null()),
        }
    }
}

impl FieldValue for Time {
    fn kind() -> Kind {
        Kind::Timestamp
    }

    fn to_value(&self) -> Result<Value> {
        Ok(self.0.map(Value::Timestamp).unwrap_or(Value::Null))
    }

    fn load(&mut self, value: Value) -> Result<()> {
        self.0 = match value {
            Value::Null => None,
            Value::Timestamp(ts) => Some(ts),
            Value::String(text) => Some(parse_timestamp(&text)?),
            value => return Err(Error::type_conversion(value, "Time")),
        };
        Ok(())
    }
}
