use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::registration::ParticipantRow;
use crate::models::{Registration, Training};

/// A training together with its resolved roster, in the shape the
/// schedule view renders.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledClass {
    #[serde(flatten)]
    pub training: Training,
    pub participants: Vec<ParticipantRow>,
}

/// Fetches the full schedule: every training in (day, start time) order
/// with its participant roster. Two queries total; the roster join is
/// batched across all classes rather than issued per class.
pub async fn list_classes(pool: &PgPool) -> Result<Vec<ScheduledClass>, sqlx::Error> {
    let trainings = Training::list_all(pool).await?;
    let participants = Registration::list_participants(pool).await?;

    Ok(attach_participants(trainings, participants))
}

/// Groups the joined participant rows under their trainings. Rows whose
/// training is not in the list are dropped.
pub fn attach_participants(
    trainings: Vec<Training>,
    participants: Vec<ParticipantRow>,
) -> Vec<ScheduledClass> {
    let mut by_training: HashMap<Uuid, Vec<ParticipantRow>> = HashMap::new();
    for row in participants {
        by_training.entry(row.training_id).or_default().push(row);
    }

    trainings
        .into_iter()
        .map(|training| {
            let participants = by_training.remove(&training.id).unwrap_or_default();
            ScheduledClass {
                training,
                participants,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn training(title: &str) -> Training {
        Training {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            start_time: "08:00".to_string(),
            end_time: "09:00".to_string(),
            day_of_week: 1,
            max_participants: 20,
            level: "All Levels".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn row(training_id: Uuid, name: &str) -> ParticipantRow {
        ParticipantRow {
            training_id,
            name: name.to_string(),
            belt: "Blue".to_string(),
        }
    }

    #[test]
    fn test_participants_grouped_under_their_class() {
        let a = training("Fundamentals");
        let b = training("Advanced No-Gi");
        let rows = vec![
            row(a.id, "David Cohen"),
            row(b.id, "Sarah Levy"),
            row(a.id, "Yossi Levi"),
        ];

        let classes = attach_participants(vec![a, b], rows);

        assert_eq!(classes[0].participants.len(), 2);
        assert_eq!(classes[0].participants[0].name, "David Cohen");
        assert_eq!(classes[1].participants.len(), 1);
        assert_eq!(classes[1].participants[0].name, "Sarah Levy");
    }

    #[test]
    fn test_class_without_registrations_gets_empty_roster() {
        let a = training("Fundamentals");
        let classes = attach_participants(vec![a], vec![]);

        assert!(classes[0].participants.is_empty());
    }

    #[test]
    fn test_rows_for_unknown_class_are_dropped() {
        let a = training("Fundamentals");
        let rows = vec![row(Uuid::new_v4(), "Ghost")];

        let classes = attach_participants(vec![a], rows);

        assert!(classes[0].participants.is_empty());
    }
}
