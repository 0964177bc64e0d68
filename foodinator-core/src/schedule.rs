//! Day-by-day schedule derived from the plan's slots.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::plan::PlanState;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub index: usize,
    pub instance_id: Option<Uuid>,
    pub meal_id: Option<String>,
    pub is_cooked: bool,
    pub date: NaiveDate,
    /// Short label such as "Mon, Jan 5".
    pub date_label: String,
}

/// One entry per slot: slot `i` is scheduled on `start_date + i` days.
pub fn derive_schedule_view(plan: &PlanState) -> Vec<ScheduleEntry> {
    plan.meal_slots()
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let date = slot_date(plan.start_date(), index);
            ScheduleEntry {
                index,
                instance_id: slot.instance_id,
                meal_id: slot.meal_id.clone(),
                is_cooked: slot
                    .instance_id
                    .is_some_and(|id| plan.is_instance_cooked(&id)),
                date,
                date_label: format_day_label(date),
            }
        })
        .collect()
}

fn slot_date(start_date: NaiveDate, index: usize) -> NaiveDate {
    i64::try_from(index)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|d| start_date.checked_add_signed(d))
        .unwrap_or(start_date)
}

/// Weekday, month and day, e.g. "Mon, Jan 5".
pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Weekday and full date, e.g. "Mon, Jan 5, 2026".
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
