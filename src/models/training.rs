use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

/// Day names for the academy's six-day week. `day_of_week` indexes into
/// this array; there are no Saturday classes.
pub const DAY_NAMES: [&str; 6] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Beginner,
        Level::Intermediate,
        Level::Advanced,
        Level::AllLevels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::AllLevels => "All Levels",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

/// A recurring weekly class slot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: i16,
    pub max_participants: i32,
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for both create and update; the admin form always submits
/// every field.
#[derive(Debug, Clone)]
pub struct TrainingData {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: i16,
    pub max_participants: i32,
    pub level: Level,
}

impl Training {
    /// Creates a new training
    pub async fn create(pool: &PgPool, data: TrainingData) -> Result<Self, sqlx::Error> {
        let training = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO trainings (title, description, start_time, end_time, day_of_week, max_participants, level)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.start_time)
        .bind(&data.end_time)
        .bind(data.day_of_week)
        .bind(data.max_participants)
        .bind(data.level.as_str())
        .fetch_one(pool)
        .await?;

        Ok(training)
    }

    /// Finds a training and locks its row for the rest of the transaction.
    /// Registration toggles lock the class row so the capacity check and
    /// the registration insert cannot interleave with a concurrent toggle.
    pub async fn lock_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let training = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM trainings WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(training)
    }

    /// Lists all trainings in schedule order
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let trainings = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM trainings
            ORDER BY day_of_week ASC, start_time ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(trainings)
    }

    /// Updates every editable field of a training. Returns None if the id
    /// does not exist.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: TrainingData,
    ) -> Result<Option<Self>, sqlx::Error> {
        let training = sqlx::query_as::<_, Self>(
            r#"
            UPDATE trainings
            SET title = $2,
                description = $3,
                start_time = $4,
                end_time = $5,
                day_of_week = $6,
                max_participants = $7,
                level = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.start_time)
        .bind(&data.end_time)
        .bind(data.day_of_week)
        .bind(data.max_participants)
        .bind(data.level.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(training)
    }

    /// Deletes a training together with its registrations in one
    /// transaction. Either both disappear or neither does; no orphaned
    /// registrations and no half-deleted class. Returns false if the id
    /// did not exist.
    pub async fn delete_cascading(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM registrations WHERE training_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            DELETE FROM trainings WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse_roundtrip() {
        for level in Level::ALL {
            assert_eq!(Level::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_level_parse_rejects_unknown() {
        assert_eq!(Level::parse("Expert"), None);
        assert_eq!(Level::parse("all levels"), None);
    }

    #[test]
    fn test_day_names_cover_six_day_week() {
        assert_eq!(DAY_NAMES.len(), 6);
        assert_eq!(DAY_NAMES[0], "Sunday");
        assert_eq!(DAY_NAMES[5], "Friday");
    }
}
