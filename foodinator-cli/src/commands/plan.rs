use clap::{Args, Subcommand};
use foodinator_core::PlanSummary;
use std::io::{self, Write};

use super::OutputFormat;
use crate::planner::Planner;

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show selected meals and remaining slots
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a meal to the plan
    Add {
        /// Meal ID
        id: String,

        /// Number of slots to fill
        #[arg(long, short, default_value = "1")]
        qty: usize,
    },

    /// Set how many times a meal appears in the plan (0 removes it)
    Quantity {
        /// Meal ID
        id: String,

        /// New quantity
        quantity: usize,
    },

    /// Remove every instance of a meal
    Remove {
        /// Meal ID
        id: String,
    },

    /// Empty all meal slots
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl PlanCommand {
    pub fn run(&self, planner: &mut Planner) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PlanSubcommand::Show { format } => {
                let summary = planner.state.plan.summary();
                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "selectedMeals": summary.selected_meals,
                            "usedSlots": summary.used_slots,
                            "totalSlots": summary.total_slots,
                            "remainingSlots": summary.remaining_slots(),
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => print!("{}", render_summary(planner, &summary)),
                }
                Ok(())
            }

            PlanSubcommand::Add { id, qty } => {
                let name = planner.require_meal(id)?.name.clone();
                planner.state.plan.add_meal(id, *qty)?;
                planner.save()?;

                println!("Added {}x {}", qty, name);
                println!("{}", planner.state.plan.summary().remaining_message());
                Ok(())
            }

            PlanSubcommand::Quantity { id, quantity } => {
                let name = planner.require_meal(id)?.name.clone();
                planner.state.plan.update_meal_quantity(id, *quantity)?;
                planner.save()?;

                if *quantity == 0 {
                    println!("Removed {} from the plan", name);
                } else {
                    println!("{} now planned {}x", name, quantity);
                }
                println!("{}", planner.state.plan.summary().remaining_message());
                Ok(())
            }

            PlanSubcommand::Remove { id } => {
                let removed = planner.state.plan.remove_meal(id);
                if removed == 0 {
                    println!("'{}' is not in the plan.", id);
                    return Ok(());
                }
                planner.save()?;

                println!("Removed {}x {}", removed, planner.meal_name(id));
                Ok(())
            }

            PlanSubcommand::Reset { force } => {
                let used = planner.state.plan.used_slots();
                if used == 0 {
                    println!("Plan is already empty.");
                    return Ok(());
                }

                if !force {
                    print!("Clear all {} planned meals? [y/N] ", used);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Reset cancelled.");
                        return Ok(());
                    }
                }

                planner.state.plan.reset_plan();
                planner.save()?;
                println!("Plan cleared.");
                Ok(())
            }
        }
    }
}

fn render_summary(planner: &Planner, summary: &PlanSummary) -> String {
    let mut out = String::new();
    let title = format!(
        "Weekly Plan ({}/{} slots)",
        summary.used_slots, summary.total_slots
    );
    out.push_str(&format!("{}\n{}\n", title, "=".repeat(title.len())));

    if summary.selected_meals.is_empty() {
        out.push_str("No meals selected.\n");
    }
    for selected in &summary.selected_meals {
        out.push_str(&format!(
            "  {}x {:<28} (max {})\n",
            selected.quantity,
            planner.meal_name(&selected.meal_id),
            summary.available_slots_for(selected)
        ));
    }

    out.push('\n');
    out.push_str(&summary.remaining_message());
    out.push('\n');
    out
}
