use std::path::Path;

use tablero_core::error::TableroError;
use tablero_core::layout::builtin;
use tablero_core::layout::schema::{CanvasLayout, TableSpec, TeamField};

pub fn list() -> Result<(), TableroError> {
    println!("Available predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<4} {} (v{}){}",
            name, layout.name, layout.version, default_marker
        );
        if let Some(ref desc) = layout.description {
            println!("       {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), TableroError> {
    let layout = builtin::load_preset(preset)?;
    describe(&layout);
    Ok(())
}

fn describe(layout: &CanvasLayout) {
    println!("{} (version {})\n", layout.name, layout.version);

    if let Some(ref desc) = layout.description {
        println!("{}\n", desc);
    }

    println!("Top section headings:");
    for title in &layout.top_titles {
        let marker = if *title == layout.team_title {
            "  (team block)"
        } else {
            ""
        };
        println!("  {}{}", title, marker);
    }
    println!();

    println!("Mid section headings:");
    for title in &layout.mid_titles {
        println!("  {}", title);
    }
    println!();

    print_table_spec(&layout.cost_table);
    print_table_spec(&layout.finance_table);

    println!("Team labels:");
    for field in TeamField::ALL {
        let label = layout.team.get(field);
        println!("  {:<24} <- {}", label.display, label.names.join(" | "));
    }
    println!("  Unrecognised lines under \"{}\"\n", layout.team.extra_heading);

    println!("Address label: {}", layout.address_label);
    println!("Placeholder:   {}", layout.placeholder);
    println!(
        "Value scan:    up to {} cells right of a table label",
        layout.neighbor_scan
    );
}

fn print_table_spec(spec: &TableSpec) {
    let header = match spec.header.as_deref() {
        Some(h) => format!(" after \"{}\"", h),
        None => String::new(),
    };
    println!("Table \"{}\" in {}{}:", spec.title, spec.section, header);
    println!("  {}\n", spec.labels.join(", "));
}

pub fn validate(file: &Path) -> Result<(), TableroError> {
    let layout = tablero_core::layout::load_layout(file)?;

    println!("Layout '{}' (v{}) is valid.", layout.name, layout.version);
    println!("  Top headings: {}", layout.top_titles.join(", "));
    println!("  Mid headings: {}", layout.mid_titles.join(", "));

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for label in &layout.cost_table.labels {
        if layout.finance_table.labels.contains(label)
            && layout.cost_table.section == layout.finance_table.section
        {
            warnings.push(format!(
                "label '{}' appears in both tables of column '{}'",
                label, layout.cost_table.section
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
