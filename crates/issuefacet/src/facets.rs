use crate::prelude::{println, *};
use colored::Colorize;
use issuefacet_core::facets::{default_facets, FacetDataType, FacetDefinition};

#[derive(Debug, clap::Args, Clone)]
pub struct FacetsOptions {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Values a facet accepts, as shown in the listing
fn format_accepted_values(facet: &FacetDefinition) -> String {
    if !facet.fixed_values.is_empty() {
        return facet
            .fixed_values
            .iter()
            .filter_map(|v| v.value.to_query_value())
            .collect::<Vec<_>>()
            .join(", ");
    }

    if !facet.options.is_empty() {
        return facet
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }

    match facet.data_type {
        FacetDataType::Date => "YYYY-MM-DD".to_string(),
        _ => "any text".to_string(),
    }
}

pub fn format_facets_table(facets: &[FacetDefinition]) -> String {
    let mut table = new_table();
    table.set_titles(prettytable::row![
        "Name", "Label", "Type", "Icon", "Readonly", "Values"
    ]);

    for facet in facets {
        table.add_row(prettytable::row![
            &facet.name,
            &facet.label,
            facet.data_type.as_str(),
            &facet.icon,
            if facet.readonly { "yes" } else { "no" },
            format_accepted_values(facet)
        ]);
    }

    table.to_string()
}

pub fn run(options: FacetsOptions) -> Result<()> {
    let facets = default_facets();

    if options.json {
        let json = serde_json::to_string_pretty(&facets)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{json}");
        return Ok(());
    }

    println!("\n{}", "AVAILABLE FACETS".bright_cyan().bold());
    println!("{}", format_facets_table(&facets));

    Ok(())
}
