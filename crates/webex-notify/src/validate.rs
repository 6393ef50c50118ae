//! Structural and semantic preconditions on incoming events.
//!
//! Rules run in a fixed order and short-circuit on the first failure, so the
//! reported reason always names the earliest problem.

use thiserror::Error;

use crate::event::{Check, Entity, Event};

/// Why an event was rejected before rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("timestamp is missing or must be greater than zero")]
    MissingTimestamp,
    #[error("entity is missing from event")]
    MissingEntity,
    #[error("check is missing from event")]
    MissingCheck,
    #[error("{0}")]
    InvalidEntity(String),
    #[error("{0}")]
    InvalidCheck(String),
}

/// An event that passed validation, with the entity and check proven present.
///
/// Downstream stages take this view instead of re-unwrapping the event's
/// options.
#[derive(Debug, Clone, Copy)]
pub struct ValidEvent<'a> {
    pub timestamp: i64,
    pub entity: &'a Entity,
    pub check: &'a Check,
}

/// Checks an incoming event against the handler's preconditions.
///
/// # Errors
///
/// Returns the first failed rule: positive timestamp, entity present, check
/// present, entity identity valid, check valid.
pub fn validate_event(event: &Event) -> Result<ValidEvent<'_>, ValidationError> {
    if event.timestamp <= 0 {
        return Err(ValidationError::MissingTimestamp);
    }
    let entity = event.entity.as_ref().ok_or(ValidationError::MissingEntity)?;
    let check = event.check.as_ref().ok_or(ValidationError::MissingCheck)?;
    validate_entity(entity).map_err(ValidationError::InvalidEntity)?;
    validate_check(check).map_err(ValidationError::InvalidCheck)?;
    Ok(ValidEvent {
        timestamp: event.timestamp,
        entity,
        check,
    })
}

fn validate_entity(entity: &Entity) -> Result<(), String> {
    if entity.name.is_empty() {
        return Err("entity name must not be empty".to_string());
    }
    if entity.class.is_empty() {
        return Err("entity class must not be empty".to_string());
    }
    Ok(())
}

fn validate_check(check: &Check) -> Result<(), String> {
    if check.name.is_empty() {
        return Err("check name must not be empty".to_string());
    }
    if check.interval < 1 {
        return Err("check interval must be greater than or equal to 1".to_string());
    }
    Ok(())
}
