use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A competition or workshop. Events are fixed sample content, not stored
/// rows; the list is identical across calls and has no lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: NaiveDate,
    pub price: u32,
    pub max_participants: u32,
    pub description: String,
    pub participants: Vec<EventParticipant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Competition,
    Workshop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventParticipant {
    pub id: String,
    pub name: String,
    pub belt: String,
}

fn participant(id: &str, name: &str, belt: &str) -> EventParticipant {
    EventParticipant {
        id: id.to_string(),
        name: name.to_string(),
        belt: belt.to_string(),
    }
}

/// The fixed events list shown on the events tab.
pub fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: "1".to_string(),
            title: "Summer BJJ Competition".to_string(),
            event_type: EventType::Competition,
            date: NaiveDate::from_ymd_opt(2024, 7, 15).expect("valid fixture date"),
            price: 50,
            max_participants: 100,
            description: "Annual summer BJJ competition for all belt levels.".to_string(),
            participants: vec![
                participant("1", "David Cohen", "Blue Belt"),
                participant("2", "Sarah Levy", "Purple Belt"),
                participant("3", "Yossi Levi", "Brown Belt"),
            ],
        },
        Event {
            id: "2".to_string(),
            title: "Guard Passing Workshop".to_string(),
            event_type: EventType::Workshop,
            date: NaiveDate::from_ymd_opt(2024, 4, 20).expect("valid fixture date"),
            price: 75,
            max_participants: 30,
            description: "Intensive workshop focusing on advanced guard passing techniques."
                .to_string(),
            participants: vec![participant("2", "Sarah Levy", "Purple Belt")],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_events_within_capacity() {
        for event in sample_events() {
            assert!(event.participants.len() as u32 <= event.max_participants);
        }
    }

    #[test]
    fn test_sample_events_have_unique_ids() {
        let events = sample_events();
        let mut ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), events.len());
    }

    #[test]
    fn test_event_type_serializes_as_plain_label() {
        let json = serde_json::to_string(&EventType::Competition).unwrap();
        assert_eq!(json, "\"Competition\"");
        let json = serde_json::to_string(&EventType::Workshop).unwrap();
        assert_eq!(json, "\"Workshop\"");
    }
}
