//! Grocery list derived from the current plan.

use clap::{Args, Subcommand};
use foodinator_core::{derive_grocery_view, GroceryItem, GrocerySort, GroceryView, NOTES_MAX_CHARS};

use super::{check_mark, OutputFormat};
use crate::planner::Planner;

#[derive(Args)]
pub struct GroceryCommand {
    #[command(subcommand)]
    pub command: GrocerySubcommand,
}

#[derive(Subcommand)]
pub enum GrocerySubcommand {
    /// List what to buy for the planned meals
    List {
        /// Ordering: meal, name or portions
        #[arg(long, short, default_value = "meal")]
        sort: GrocerySort,

        /// Leave out items already checked off
        #[arg(long)]
        hide_checked: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check or uncheck an ingredient
    Toggle {
        /// Ingredient ID
        id: String,
    },

    /// Uncheck all items
    ClearChecked,

    /// Show or replace the shopping notes
    Notes {
        /// New notes text (omit to print the current notes)
        text: Option<String>,
    },
}

impl GroceryCommand {
    pub fn run(&self, planner: &mut Planner) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GrocerySubcommand::List {
                sort,
                hide_checked,
                format,
            } => {
                let view = derive_grocery_view(&planner.state.plan, &planner.catalog);
                let show_checked = !hide_checked;

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "items": view.sorted_items(&planner.catalog, *sort, show_checked),
                            "groups": view.visible_groups(show_checked)
                                .iter()
                                .map(|(meal_id, items)| serde_json::json!({
                                    "mealId": meal_id,
                                    "items": items,
                                }))
                                .collect::<Vec<_>>(),
                            "seasoningStaples": view.visible_staples(show_checked),
                            "isEmpty": view.is_empty,
                            "notes": planner.state.plan.notes(),
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", render_list(planner, &view, *sort, show_checked));
                    }
                }
                Ok(())
            }

            GrocerySubcommand::Toggle { id } => {
                let name = planner.require_ingredient(id)?.name.clone();
                let checked = planner.state.plan.toggle_item_checked(id);
                planner.save()?;

                println!("{} {}", check_mark(checked), name);
                Ok(())
            }

            GrocerySubcommand::ClearChecked => {
                let cleared = planner.state.plan.clear_checked_items();
                if cleared > 0 {
                    planner.save()?;
                }
                println!("Unchecked {} items", cleared);
                Ok(())
            }

            GrocerySubcommand::Notes { text } => {
                match text {
                    None => {
                        let notes = planner.state.plan.notes();
                        if notes.is_empty() {
                            println!("No notes.");
                        } else {
                            println!("{}", notes);
                        }
                    }
                    Some(text) => {
                        let clamped = planner.state.plan.update_notes(text.as_str());
                        planner.save()?;
                        if clamped {
                            println!("Notes truncated to {} characters.", NOTES_MAX_CHARS);
                        } else {
                            println!("Notes saved.");
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn format_item(planner: &Planner, item: &GroceryItem) -> String {
    format!(
        "{} {:<28} x{}",
        check_mark(item.checked),
        planner.ingredient_name(&item.ingredient_id),
        item.portions
    )
}

fn render_list(
    planner: &Planner,
    view: &GroceryView,
    sort: GrocerySort,
    show_checked: bool,
) -> String {
    let mut out = String::new();
    let (checked, total) = view.checked_count();
    let title = format!("Grocery List ({}/{} checked)", checked, total);
    out.push_str(&format!("{}\n{}\n", title, "=".repeat(title.len())));

    if view.is_empty {
        out.push_str("No meals planned yet.\n");
        return out;
    }

    match sort {
        GrocerySort::Meal => {
            for (meal_id, items) in view.visible_groups(show_checked) {
                out.push_str(&format!("\n{}:\n", planner.meal_name(meal_id)));
                for item in items {
                    out.push_str(&format!("  {}\n", format_item(planner, item)));
                }
            }
        }
        _ => {
            out.push('\n');
            for item in view.sorted_items(&planner.catalog, sort, show_checked) {
                out.push_str(&format!("  {}\n", format_item(planner, item)));
            }
        }
    }

    let staples = view.visible_staples(show_checked);
    if !staples.is_empty() {
        out.push_str("\nSeasoning staples:\n");
        for item in staples {
            out.push_str(&format!(
                "  {} {}\n",
                check_mark(item.checked),
                planner.ingredient_name(&item.ingredient_id)
            ));
        }
    }

    let notes = planner.state.plan.notes();
    if !notes.is_empty() {
        out.push_str(&format!("\nNotes:\n{}\n", notes));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_planner;

    #[test]
    fn test_render_list_empty_plan() {
        let (planner, _temp) = test_planner();
        let view = derive_grocery_view(&planner.state.plan, &planner.catalog);
        let text = render_list(&planner, &view, GrocerySort::Meal, true);

        assert!(text.starts_with("Grocery List (0/0 checked)\n"));
        assert!(text.contains("No meals planned yet."));
    }

    #[test]
    fn test_render_list_groups_by_meal() {
        let (mut planner, _temp) = test_planner();
        planner.state.plan.add_meal("burgers", 2).unwrap();
        planner.state.plan.update_notes("get paper towels");

        let view = derive_grocery_view(&planner.state.plan, &planner.catalog);
        let text = render_list(&planner, &view, GrocerySort::Meal, true);

        assert!(text.contains("\nBurgers:\n"));
        assert!(text.contains("[ ] Burger buns"));
        assert!(text.contains("x2"));
        assert!(text.contains("Seasoning staples:"));
        assert!(text.ends_with("Notes:\nget paper towels\n"));
    }

    #[test]
    fn test_render_list_hides_checked() {
        let (mut planner, _temp) = test_planner();
        planner.state.plan.add_meal("burgers", 1).unwrap();
        planner.state.plan.toggle_item_checked("burger-buns");

        let view = derive_grocery_view(&planner.state.plan, &planner.catalog);
        let shown = render_list(&planner, &view, GrocerySort::Name, true);
        let hidden = render_list(&planner, &view, GrocerySort::Name, false);

        assert!(shown.contains("[x] Burger buns"));
        assert!(!hidden.contains("Burger buns"));
    }

    #[test]
    fn test_format_item() {
        let (planner, _temp) = test_planner();
        let item = GroceryItem {
            ingredient_id: "eggs".to_string(),
            portions: 3,
            checked: true,
        };
        let line = format_item(&planner, &item);
        assert!(line.starts_with("[x] Eggs"));
        assert!(line.ends_with("x3"));
    }
}
