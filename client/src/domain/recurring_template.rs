//! Recurring item templates.
//!
//! A template belongs to one todo list and is materialised into fresh todo
//! items on the server; the client only reads and edits the template record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::todo::TodoName;

/// Recurrence interval in calendar-and-clock components.
///
/// Components are independent and optional on the wire; at least one must be
/// present for the interval to be meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecurrenceInterval {
    /// Whole months between occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<i32>,
    /// Whole days between occurrences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i32>,
    /// Sub-day remainder in microseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microseconds: Option<i64>,
}

impl RecurrenceInterval {
    /// Whether every component is absent or zero.
    pub fn is_zero(&self) -> bool {
        self.months.unwrap_or(0) == 0
            && self.days.unwrap_or(0) == 0
            && self.microseconds.unwrap_or(0) == 0
    }

    /// Interval of whole days.
    pub fn days(days: i32) -> Self {
        Self {
            days: Some(days),
            ..Self::default()
        }
    }

    /// Interval of whole months.
    pub fn months(months: i32) -> Self {
        Self {
            months: Some(months),
            ..Self::default()
        }
    }
}

/// A recurring template record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTemplate {
    /// Owning todo list.
    pub todo_name: TodoName,
    /// Server-assigned identifier.
    pub template_id: Uuid,
    /// Title stamped onto generated items.
    pub title: String,
    /// Gap between generated items.
    pub recurrence_interval: RecurrenceInterval,
    /// First date an item may be generated for.
    pub start_date: NaiveDate,
    /// Last date an item may be generated for, if bounded.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Most recent date the server generated an item for.
    #[serde(default)]
    pub last_generated_date: Option<NaiveDate>,
    /// Whether the server still materialises items from this template.
    pub is_active: bool,
    /// Server-assigned creation time.
    pub create_time: DateTime<Utc>,
    /// Server-assigned last update time.
    pub update_time: DateTime<Utc>,
}

/// The template list response for one todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTemplateList {
    /// One record per template.
    pub templates: Vec<RecurringTemplate>,
}

/// Fields accepted when creating a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecurringTemplate {
    /// Title stamped onto generated items; must not be blank.
    pub title: String,
    /// Gap between generated items; must not be zero.
    pub recurrence_interval: RecurrenceInterval,
    /// First date an item may be generated for; server defaults to today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last date an item may be generated for, if bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Fields accepted when updating a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRecurringTemplate {
    /// Replacement title; must not be blank.
    pub title: String,
    /// Replacement interval; must not be zero.
    pub recurrence_interval: RecurrenceInterval,
    /// Replacement start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Replacement end date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Whether the template keeps generating items.
    pub is_active: bool,
}
