use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Registration, Training};

/// Outcome of a registration toggle, returned to the client so it can
/// update its counters before the next full schedule fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResult {
    pub registered: bool,
    pub participant_count: i64,
    pub max_participants: i32,
}

/// True when a class with the given registration count has no open slot
/// left.
pub fn at_capacity(participant_count: i64, max_participants: i32) -> bool {
    participant_count >= i64::from(max_participants)
}

/// What a toggle does to the caller's registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Register,
    Cancel,
}

/// Decides the toggle outcome from the current state. Cancelling is
/// always allowed, even for a class already at its ceiling; registering
/// requires an open slot.
pub fn decide_toggle(
    currently_registered: bool,
    participant_count: i64,
    max_participants: i32,
) -> Result<ToggleAction> {
    if currently_registered {
        return Ok(ToggleAction::Cancel);
    }
    if at_capacity(participant_count, max_participants) {
        return Err(AppError::CapacityExceeded);
    }
    Ok(ToggleAction::Register)
}

/// Registers the profile for the class, or cancels the existing
/// registration if one is present. The whole toggle runs in one
/// transaction with the training row locked, so the capacity check and
/// the insert cannot interleave with a concurrent toggle for the same
/// class: the ceiling holds even when two people race for the last slot.
pub async fn toggle_registration(
    pool: &PgPool,
    training_id: Uuid,
    profile_id: Uuid,
) -> Result<ToggleResult> {
    let mut tx = pool.begin().await.map_err(AppError::Database)?;

    let training = Training::lock_by_id(&mut *tx, training_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

    let existing = Registration::find(&mut *tx, training_id, profile_id).await?;
    let count = Registration::count_for_training(&mut *tx, training_id).await?;

    // Transaction dropped by the error path rolls back; nothing is written
    // for a full class.
    let action = decide_toggle(existing.is_some(), count, training.max_participants)?;

    let registered = match action {
        ToggleAction::Cancel => {
            Registration::delete(&mut *tx, training_id, profile_id).await?;
            tracing::info!(%training_id, %profile_id, "Registration cancelled");
            false
        }
        ToggleAction::Register => {
            Registration::insert(&mut *tx, training_id, profile_id).await?;
            tracing::info!(%training_id, %profile_id, "Registration created");
            true
        }
    };

    let participant_count = Registration::count_for_training(&mut *tx, training_id).await?;

    tx.commit().await.map_err(AppError::Database)?;

    Ok(ToggleResult {
        registered,
        participant_count,
        max_participants: training.max_participants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_class_has_no_slot() {
        // Fundamentals, capacity 1: one registration fills it.
        assert!(at_capacity(1, 1));
    }

    #[test]
    fn test_empty_class_has_a_slot() {
        assert!(!at_capacity(0, 1));
    }

    #[test]
    fn test_overfull_class_stays_closed() {
        assert!(at_capacity(25, 20));
    }

    #[test]
    fn test_last_slot_is_open() {
        assert!(!at_capacity(19, 20));
    }

    #[test]
    fn test_double_toggle_returns_to_initial_state() {
        // Unregistered member toggles twice: register, then cancel.
        let first = decide_toggle(false, 0, 20).unwrap();
        assert_eq!(first, ToggleAction::Register);

        let second = decide_toggle(true, 1, 20).unwrap();
        assert_eq!(second, ToggleAction::Cancel);
    }

    #[test]
    fn test_full_class_rejects_new_registration() {
        let err = decide_toggle(false, 1, 1).unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded));
    }

    #[test]
    fn test_registered_member_can_cancel_full_class() {
        assert_eq!(decide_toggle(true, 1, 1).unwrap(), ToggleAction::Cancel);
    }

    #[test]
    fn test_last_slot_race_resolves_in_order() {
        // Fundamentals, capacity 1: A takes the slot, B is turned away,
        // A cancels, B gets in.
        assert_eq!(decide_toggle(false, 0, 1).unwrap(), ToggleAction::Register);
        assert!(matches!(
            decide_toggle(false, 1, 1).unwrap_err(),
            AppError::CapacityExceeded
        ));
        assert_eq!(decide_toggle(true, 1, 1).unwrap(), ToggleAction::Cancel);
        assert_eq!(decide_toggle(false, 0, 1).unwrap(), ToggleAction::Register);
    }
}
