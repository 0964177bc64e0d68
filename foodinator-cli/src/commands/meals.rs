//! Browse and search the meal catalog.
//!
//! Filters passed to `meals list` are remembered in the planner state, so a
//! later plain `meals list` shows the same selection until `--clear`.

use clap::{Args, Subcommand};
use foodinator_core::{filter_catalog, Meal, SearchState, TagCategory};

use super::OutputFormat;
use crate::planner::Planner;

#[derive(Args)]
pub struct MealsCommand {
    #[command(subcommand)]
    pub command: MealsSubcommand,
}

#[derive(Subcommand)]
pub enum MealsSubcommand {
    /// List meals matching the active filters
    List {
        /// Match meal names; also suggests ingredients with matching names
        #[arg(long, short)]
        search: Option<String>,

        /// Require an ingredient (repeatable)
        #[arg(long, short)]
        ingredient: Vec<String>,

        /// Require a tag (repeatable)
        #[arg(long, short)]
        tag: Vec<String>,

        /// Forget previously remembered filters first
        #[arg(long)]
        clear: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a meal's recipe card
    Show {
        /// Meal ID
        id: String,
    },

    /// List available tags by category
    Tags,
}

impl MealsCommand {
    pub fn run(&self, planner: &mut Planner) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MealsSubcommand::List {
                search,
                ingredient,
                tag,
                clear,
                format,
            } => {
                let changed = apply_filters(planner, *clear, search.as_deref(), ingredient, tag)?;
                if changed {
                    planner.save()?;
                }

                let result = filter_catalog(&planner.catalog, &planner.state.search);

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "search": planner.state.search,
                            "meals": result.candidate_meals,
                            "ingredientSuggestions": result.ingredient_suggestions,
                            "noResults": result.no_results,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Text => {
                        let filters = describe_filters(planner, &planner.state.search);
                        if !filters.is_empty() {
                            println!("Filters: {}\n", filters.join(", "));
                        }

                        if result.no_results {
                            println!("No meals match the current filters.");
                            println!("Try removing a filter or use --clear.");
                        } else {
                            for meal in &result.candidate_meals {
                                println!("{}", format_meal_line(planner, meal));
                            }
                        }

                        if !result.ingredient_suggestions.is_empty() {
                            let names: Vec<String> = result
                                .ingredient_suggestions
                                .iter()
                                .map(|i| format!("{} ({})", i.name, i.id))
                                .collect();
                            println!("\nMatching ingredients: {}", names.join(", "));
                        }
                    }
                }
                Ok(())
            }

            MealsSubcommand::Show { id } => {
                let details = planner
                    .catalog
                    .meal_details(id)
                    .ok_or_else(|| format!("Meal not found: {}", id))?;
                print!("{}", details);

                let planned = planner.state.plan.meal_quantity(id);
                if planned > 0 {
                    println!("\nIn plan: {}", planned);
                }
                Ok(())
            }

            MealsSubcommand::Tags => {
                for category in TagCategory::ALL {
                    let selected = planner
                        .state
                        .search
                        .selected_tag_in_category(&planner.catalog, category);
                    let mode = if category.is_single_select() {
                        "pick one"
                    } else {
                        "any"
                    };
                    println!("{} ({}):", category.label(), mode);

                    for tag in planner.catalog.get_tags_by_category(category) {
                        let marker = if planner.state.search.is_tag_selected(&tag.id) {
                            "*"
                        } else {
                            " "
                        };
                        println!("  {} {:<16} {}", marker, tag.id, tag.name);
                    }
                    if let Some(id) = selected.filter(|_| category.is_single_select()) {
                        println!("  (active: {})", id);
                    }
                    println!();
                }
                Ok(())
            }
        }
    }
}

/// Fold command-line filters into the remembered search. Returns whether
/// anything changed.
fn apply_filters(
    planner: &mut Planner,
    clear: bool,
    search: Option<&str>,
    ingredients: &[String],
    tags: &[String],
) -> Result<bool, String> {
    let before = planner.state.search.clone();

    if clear {
        planner.state.search = SearchState::new();
    }
    if let Some(term) = search {
        planner.state.search.set_search_term(term);
    }
    for id in ingredients {
        planner.require_ingredient(id)?;
        planner.state.search.add_ingredient(id);
    }
    for id in tags {
        if !planner.state.search.add_tag(&planner.catalog, id) {
            return Err(format!("Tag not found: {}", id));
        }
    }

    Ok(planner.state.search != before)
}

fn describe_filters(planner: &Planner, search: &SearchState) -> Vec<String> {
    let mut parts = Vec::new();
    if !search.normalized_term().is_empty() {
        parts.push(format!("\"{}\"", search.search_term.trim()));
    }
    for id in &search.selected_ingredients {
        parts.push(format!("with {}", planner.ingredient_name(id)));
    }
    for id in &search.selected_tags {
        let name = planner
            .catalog
            .get_tag_by_id(id)
            .map(|t| t.name.as_str())
            .unwrap_or(id.as_str());
        parts.push(format!("#{}", name));
    }
    parts
}

fn format_meal_line(planner: &Planner, meal: &Meal) -> String {
    let planned = planner.state.plan.meal_quantity(&meal.id);
    let suffix = if planned > 0 {
        format!("  [in plan: {}]", planned)
    } else {
        String::new()
    };
    format!("{:<32} {}{}", meal.id, meal.name, suffix)
}
