//! Event-to-message pipeline for the Webex Teams handler.
//!
//! A monitoring pipeline hands the handler one event (entity + check result)
//! per invocation. This crate validates the event, maps the check status to
//! its display form, normalizes the execution history, renders the Webex
//! message payload (markdown summary + Adaptive Card), and delivers it to
//! the messages API.

pub mod card;
pub mod client;
pub mod error;
pub mod event;
pub mod history;
pub mod presentation;
pub mod validate;

#[cfg(test)]
mod tests;

pub use card::{render_message, MessagePayload};
pub use client::{DeliveryReport, WebexClient};
pub use error::{HandlerError, Result};
pub use event::{Check, CheckHistory, Entity, Event};
pub use validate::{validate_event, ValidEvent, ValidationError};
