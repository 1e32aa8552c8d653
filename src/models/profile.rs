use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

/// Belt ranks in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Belt {
    White,
    Blue,
    Purple,
    Brown,
    Black,
}

impl Belt {
    pub const ALL: [Belt; 5] = [
        Belt::White,
        Belt::Blue,
        Belt::Purple,
        Belt::Brown,
        Belt::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Belt::White => "White",
            Belt::Blue => "Blue",
            Belt::Purple => "Purple",
            Belt::Brown => "Brown",
            Belt::Black => "Black",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == s)
    }
}

/// The application-visible identity record, distinct from the raw account.
/// Keyed by the account's id: one profile per completed sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub belt: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateProfileData {
    pub account_id: Uuid,
    pub name: String,
    pub belt: Belt,
    pub is_admin: bool,
}

impl Profile {
    /// Creates the profile row for a freshly created account. Takes an
    /// executor so it can share the sign-up transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateProfileData,
    ) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO profiles (id, name, belt, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.account_id)
        .bind(&data.name)
        .bind(data.belt.as_str())
        .bind(data.is_admin)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by its account id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM profiles WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belt_parse_roundtrip() {
        for belt in Belt::ALL {
            assert_eq!(Belt::parse(belt.as_str()), Some(belt));
        }
    }

    #[test]
    fn test_belt_parse_rejects_unknown() {
        assert_eq!(Belt::parse("Red"), None);
        assert_eq!(Belt::parse("white"), None);
        assert_eq!(Belt::parse(""), None);
    }
}
