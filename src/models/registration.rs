use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

/// One profile's intent to attend one class. At most one row per
/// (training, profile) pair; the table carries a UNIQUE constraint to match.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub training_id: Uuid,
    pub profile_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A registration resolved to the participant's display data, as shown in
/// class rosters.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    #[serde(skip)]
    pub training_id: Uuid,
    pub name: String,
    pub belt: String,
}

impl Registration {
    /// Finds the registration for a (training, profile) pair, if any
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        training_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let registration = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM registrations
            WHERE training_id = $1 AND profile_id = $2
            "#,
        )
        .bind(training_id)
        .bind(profile_id)
        .fetch_optional(executor)
        .await?;

        Ok(registration)
    }

    /// Counts active registrations for a training
    pub async fn count_for_training<'e>(
        executor: impl PgExecutor<'e>,
        training_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM registrations WHERE training_id = $1
            "#,
        )
        .bind(training_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    /// Inserts a registration row
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        training_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let registration = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO registrations (training_id, profile_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(training_id)
        .bind(profile_id)
        .fetch_one(executor)
        .await?;

        Ok(registration)
    }

    /// Deletes the registration for a (training, profile) pair
    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        training_id: Uuid,
        profile_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            DELETE FROM registrations
            WHERE training_id = $1 AND profile_id = $2
            "#,
        )
        .bind(training_id)
        .bind(profile_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Training ids the given profile is registered for
    pub async fn training_ids_for_profile(
        pool: &PgPool,
        profile_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT training_id FROM registrations WHERE profile_id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Every registration across all trainings, resolved to participant
    /// name and belt in one batched join. The schedule view groups these
    /// per training instead of issuing a query per class.
    pub async fn list_participants(pool: &PgPool) -> Result<Vec<ParticipantRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            r#"
            SELECT r.training_id, p.name, p.belt
            FROM registrations r
            JOIN profiles p ON p.id = r.profile_id
            ORDER BY r.created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
