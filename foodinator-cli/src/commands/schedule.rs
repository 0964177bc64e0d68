use chrono::NaiveDate;
use clap::{Args, Subcommand};
use foodinator_core::{derive_schedule_view, format_full_date, ScheduleEntry};

use super::{check_mark, OutputFormat};
use crate::planner::Planner;

#[derive(Args)]
pub struct ScheduleCommand {
    #[command(subcommand)]
    pub command: ScheduleSubcommand,
}

#[derive(Subcommand)]
pub enum ScheduleSubcommand {
    /// Show the plan day by day
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Toggle whether the meal in a slot has been cooked
    Cook {
        /// Slot number as shown by `schedule show`
        index: usize,
    },

    /// Set the date of the first slot
    Start {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Move the whole schedule by whole weeks
    Shift {
        /// Number of weeks (negative moves back)
        #[arg(long, short, default_value = "1", allow_hyphen_values = true)]
        weeks: i64,
    },
}

impl ScheduleCommand {
    pub fn run(&self, planner: &mut Planner) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ScheduleSubcommand::Show { format } => {
                let entries = derive_schedule_view(&planner.state.plan);
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                    }
                    OutputFormat::Text => {
                        let title = format!(
                            "Schedule from {}",
                            format_full_date(planner.state.plan.start_date())
                        );
                        println!("{}", title);
                        println!("{}", "=".repeat(title.len()));
                        for entry in &entries {
                            println!("{}", format_entry(planner, entry));
                        }
                    }
                }
                Ok(())
            }

            ScheduleSubcommand::Cook { index } => {
                let cooked = planner
                    .state
                    .plan
                    .toggle_meal_cooked(*index)
                    .ok_or_else(|| format!("Slot {} is empty or does not exist", index))?;
                planner.save()?;

                let meal_id = planner
                    .state
                    .plan
                    .meal_slots()
                    .get(*index)
                    .and_then(|slot| slot.meal_id.clone())
                    .unwrap_or_default();
                let state = if cooked { "cooked" } else { "not cooked" };
                println!("Marked {} as {}", planner.meal_name(&meal_id), state);
                Ok(())
            }

            ScheduleSubcommand::Start { date } => {
                let date = parse_date(date)?;
                planner.state.plan.update_start_date(date);
                planner.save()?;
                println!("Schedule now starts {}", format_full_date(date));
                Ok(())
            }

            ScheduleSubcommand::Shift { weeks } => {
                let before = planner.state.plan.start_date();
                let date = planner.state.plan.shift_start_date(weeks_to_days(*weeks)?);
                if date == before && *weeks != 0 {
                    return Err(format!("Cannot shift the schedule by {} weeks", weeks).into());
                }
                planner.save()?;
                println!("Schedule now starts {}", format_full_date(date));
                Ok(())
            }
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected format: YYYY-MM-DD", s))
}

fn weeks_to_days(weeks: i64) -> Result<i64, String> {
    weeks
        .checked_mul(7)
        .ok_or_else(|| format!("Cannot shift the schedule by {} weeks", weeks))
}

fn format_entry(planner: &Planner, entry: &ScheduleEntry) -> String {
    match &entry.meal_id {
        Some(meal_id) => format!(
            "{:>2}. {:<12} {} {}",
            entry.index,
            entry.date_label,
            check_mark(entry.is_cooked),
            planner.meal_name(meal_id)
        ),
        None => format!("{:>2}. {:<12}     -", entry.index, entry.date_label),
    }
}
