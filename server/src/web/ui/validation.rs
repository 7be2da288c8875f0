use crate::web::ui::form_values::{
    FormValueRepresentation, ValidateFromFormInput, ValidationDataForFormValue,
};
use chrono::TimeZone;
use lazy_static::lazy_static;
use std::fmt::Debug;

/// Two-letter codes of the US states (and DC), as offered in the state select inputs
pub const US_STATES: [&str; 51] = [
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN",
    "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ",
    "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA",
    "WI", "WV", "WY",
];

pub const GENRES: [&str; 19] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Maximum number of characters of short text columns (names, cities, addresses)
pub const MAX_SHORT_TEXT_LENGTH: usize = 120;
/// Maximum number of characters of long text columns (links, descriptions)
pub const MAX_LONG_TEXT_LENGTH: usize = 500;

fn check_length(value: &str, max_length: usize) -> Result<(), String> {
    if value.chars().count() > max_length {
        Err(format!("Must not be longer than {} characters", max_length))
    } else {
        Ok(())
    }
}

/// Non-empty single line text, limited to [MAX_SHORT_TEXT_LENGTH] characters
#[derive(Default, Debug)]
pub struct NonEmptyString(pub String);

impl NonEmptyString {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for NonEmptyString {
    fn into_form_value_string(self) -> String {
        self.0
    }
}
impl ValidateFromFormInput for NonEmptyString {
    fn from_form_value(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("Must not be empty".to_owned());
        }
        check_length(value, MAX_SHORT_TEXT_LENGTH)?;
        Ok(NonEmptyString(value.to_owned()))
    }
}

#[derive(Default, Debug, PartialEq)]
pub struct Int32FromList(pub i32);

impl Int32FromList {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FormValueRepresentation for Int32FromList {
    fn into_form_value_string(self) -> String {
        self.0.to_string()
    }
}

impl ValidationDataForFormValue<Int32FromList> for &Vec<i32> {
    fn validate_form_value(self, value: &'_ str) -> Result<Int32FromList, String> {
        let id: i32 = value.parse().map_err(|e| format!("Not an id: {}", e))?;
        if self.contains(&id) {
            Ok(Int32FromList(id))
        } else {
            Err("Unknown id".to_owned())
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct UsState(pub String);

impl UsState {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for UsState {
    fn into_form_value_string(self) -> String {
        self.0
    }
}

impl ValidateFromFormInput for UsState {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        let value = value.trim().to_uppercase();
        if US_STATES.contains(&value.as_str()) {
            Ok(Self(value))
        } else {
            Err("Not a US state code".to_owned())
        }
    }
}

/// US phone number in the format XXX-XXX-XXXX
#[derive(Debug, PartialEq)]
pub struct PhoneNumber(pub String);

impl PhoneNumber {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for PhoneNumber {
    fn into_form_value_string(self) -> String {
        self.0
    }
}

impl ValidateFromFormInput for PhoneNumber {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        lazy_static! {
            static ref RE: regex::Regex = regex::Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();
        }
        let value = value.trim();
        if RE.is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err("Not a phone number of the form XXX-XXX-XXXX".to_owned())
        }
    }
}

/// Comma-separated, non-empty list of known music genres
#[derive(Debug, PartialEq)]
pub struct GenreList(pub Vec<String>);

impl GenreList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl FormValueRepresentation for GenreList {
    fn into_form_value_string(self) -> String {
        self.0.join(", ")
    }
}

impl ValidateFromFormInput for GenreList {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        let mut genres: Vec<String> = Vec::new();
        for name in value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let genre = GENRES
                .iter()
                .find(|g| g.eq_ignore_ascii_case(name))
                .ok_or_else(|| format!("Unknown genre '{}'", name))?;
            if !genres.iter().any(|g| g == genre) {
                genres.push(genre.to_string());
            }
        }
        if genres.is_empty() {
            return Err("At least one genre is required".to_owned());
        }
        Ok(Self(genres))
    }
}

/// An absolute http(s) URL, stored as entered
#[derive(Debug, PartialEq)]
pub struct HttpUrl(pub String);

impl HttpUrl {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for HttpUrl {
    fn into_form_value_string(self) -> String {
        self.0
    }
}

impl ValidateFromFormInput for HttpUrl {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        let value = value.trim();
        check_length(value, MAX_LONG_TEXT_LENGTH)?;
        let url = url::Url::parse(value).map_err(|e| format!("Not a valid URL: {}", e))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(value.to_owned())),
            _ => Err("URL must start with http:// or https://".to_owned()),
        }
    }
}

/// Free text, like the seeking descriptions, limited to [MAX_LONG_TEXT_LENGTH] characters
#[derive(Debug, PartialEq)]
pub struct Description(pub String);

impl Description {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FormValueRepresentation for Description {
    fn into_form_value_string(self) -> String {
        self.0
    }
}

impl ValidateFromFormInput for Description {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        let value = value.trim();
        check_length(value, MAX_LONG_TEXT_LENGTH)?;
        Ok(Self(value.to_owned()))
    }
}

/// Point in time entered via an HTML `datetime-local` input, interpreted in a given time zone
#[derive(Debug, PartialEq)]
pub struct DateTimeLocal(pub chrono::DateTime<chrono_tz::Tz>);

impl DateTimeLocal {
    pub fn to_utc(&self) -> chrono::DateTime<chrono::Utc> {
        self.0.with_timezone(&chrono::Utc)
    }
}

impl FormValueRepresentation for DateTimeLocal {
    fn into_form_value_string(self) -> String {
        self.0.naive_local().format("%Y-%m-%dT%H:%M").to_string()
    }
}

impl ValidationDataForFormValue<DateTimeLocal> for &chrono_tz::Tz {
    fn validate_form_value(self, value: &'_ str) -> Result<DateTimeLocal, String> {
        // See https://developer.mozilla.org/en-US/docs/Web/HTML/Guides/Date_and_time_formats#local_date_and_time_strings
        let naive = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
            .map_err(|e| format!("Could not parse as ISO-formatted datetime value: {e}"))?;
        self.from_local_datetime(&naive)
            .earliest()
            .map(DateTimeLocal)
            .ok_or_else(|| format!("{} does not exist in time zone {}", naive, self.name()))
    }
}

#[derive(Debug, PartialEq)]
pub struct MaybeEmpty<T>(pub Option<T>);

impl<T> MaybeEmpty<T> {
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for MaybeEmpty<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: FormValueRepresentation> FormValueRepresentation for MaybeEmpty<T> {
    fn into_form_value_string(self) -> String {
        match self.0 {
            None => "".to_owned(),
            Some(t) => t.into_form_value_string(),
        }
    }
}

impl<T: ValidateFromFormInput> ValidateFromFormInput for MaybeEmpty<T> {
    fn from_form_value(value: &'_ str) -> Result<Self, String> {
        if value.trim().is_empty() {
            Ok(Self(None))
        } else {
            Ok(Self(Some(T::from_form_value(value)?)))
        }
    }
}
