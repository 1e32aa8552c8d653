use chrono::NaiveTime;
use serde::Deserialize;

use crate::error::FieldErrors;
use crate::models::training::{Level, TrainingData, DAY_NAMES};

/// Raw class form fields as submitted by the admin panel. Validated
/// locally before any row is touched; violations are reported per field
/// and nothing is written.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: i16,
    pub max_participants: i32,
    pub level: String,
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Validates the form and converts it into a [`TrainingData`] ready for
/// the database. All violations are collected so the form can mark every
/// offending field at once.
pub fn validate(form: &TrainingForm) -> Result<TrainingData, FieldErrors> {
    let mut errors = FieldErrors::default();

    if form.title.trim().is_empty() {
        errors.insert("title", "Title is required");
    }

    let start = if form.start_time.is_empty() {
        errors.insert("startTime", "Start time is required");
        None
    } else {
        let parsed = parse_time(&form.start_time);
        if parsed.is_none() {
            errors.insert("startTime", "Start time must be in HH:MM format");
        }
        parsed
    };

    let end = if form.end_time.is_empty() {
        errors.insert("endTime", "End time is required");
        None
    } else {
        let parsed = parse_time(&form.end_time);
        match parsed {
            None => errors.insert("endTime", "End time must be in HH:MM format"),
            Some(end) => {
                if let Some(start) = start {
                    if start >= end {
                        errors.insert("endTime", "End time must be after start time");
                    }
                }
            }
        }
        parsed
    };

    if !(0..DAY_NAMES.len() as i16).contains(&form.day_of_week) {
        errors.insert("dayOfWeek", "Day must be between Sunday and Friday");
    }

    if form.max_participants <= 0 {
        errors.insert("maxParticipants", "Max participants must be greater than 0");
    }

    let level = Level::parse(&form.level);
    if level.is_none() {
        errors.insert("level", "Unknown level");
    }

    match (start, end, level, errors.is_empty()) {
        // Times are re-emitted from the parsed values, never taken from the
        // raw input: "%H:%M" accepts unpadded hours like "9:00", but the
        // stored strings must stay zero-padded so the schema's text
        // comparison and the schedule's ORDER BY stay correct.
        (Some(start), Some(end), Some(level), true) => Ok(TrainingData {
            title: form.title.trim().to_string(),
            description: form.description.clone(),
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            day_of_week: form.day_of_week,
            max_participants: form.max_participants,
            level,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> TrainingForm {
        TrainingForm {
            title: "Fundamentals Class".to_string(),
            description: "Basics for everyone".to_string(),
            start_time: "08:00".to_string(),
            end_time: "09:00".to_string(),
            day_of_week: 1,
            max_participants: 20,
            level: "All Levels".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let data = validate(&valid_form()).unwrap();
        assert_eq!(data.title, "Fundamentals Class");
        assert_eq!(data.level, Level::AllLevels);
    }

    #[test]
    fn test_end_before_start_flags_end_time() {
        let mut form = valid_form();
        form.start_time = "09:00".to_string();
        form.end_time = "08:00".to_string();

        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.0.get("endTime").map(String::as_str),
            Some("End time must be after start time")
        );
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn test_equal_start_and_end_rejected() {
        let mut form = valid_form();
        form.end_time = form.start_time.clone();

        let errors = validate(&form).unwrap_err();
        assert!(errors.0.contains_key("endTime"));
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut form = valid_form();
        form.title = "   ".to_string();

        let errors = validate(&form).unwrap_err();
        assert!(errors.0.contains_key("title"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut form = valid_form();
        form.max_participants = 0;

        let errors = validate(&form).unwrap_err();
        assert!(errors.0.contains_key("maxParticipants"));
    }

    #[test]
    fn test_unpadded_times_are_normalized() {
        let mut form = valid_form();
        form.start_time = "9:00".to_string();
        form.end_time = "10:00".to_string();

        let data = validate(&form).unwrap();
        assert_eq!(data.start_time, "09:00");
        assert_eq!(data.end_time, "10:00");
        // Stored times must order correctly as text.
        assert!(data.start_time < data.end_time);
    }

    #[test]
    fn test_unpadded_end_before_start_still_rejected() {
        let mut form = valid_form();
        form.start_time = "9:00".to_string();
        form.end_time = "8:30".to_string();

        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.0.get("endTime").map(String::as_str),
            Some("End time must be after start time")
        );
    }

    #[test]
    fn test_malformed_time_rejected() {
        let mut form = valid_form();
        form.start_time = "8am".to_string();

        let errors = validate(&form).unwrap_err();
        assert!(errors.0.contains_key("startTime"));
    }

    #[test]
    fn test_saturday_rejected() {
        let mut form = valid_form();
        form.day_of_week = 6;

        let errors = validate(&form).unwrap_err();
        assert!(errors.0.contains_key("dayOfWeek"));
    }

    #[test]
    fn test_multiple_violations_collected() {
        let mut form = valid_form();
        form.title = String::new();
        form.max_participants = -5;
        form.level = "Expert".to_string();

        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.0.len(), 3);
    }
}
