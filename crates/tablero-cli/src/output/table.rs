use tablero_core::layout::schema::CanvasLayout;
use tablero_core::model::{CanvasDocument, MiniTable};
use tablero_core::notes::AnnotationStore;
use tablero_core::portfolio::{ProgressPoint, Project};
use tablero_core::suggest::{Annotation, CanvasAnalysis};

pub fn print_canvas(doc: &CanvasDocument, layout: &CanvasLayout) {
    println!("=== {} ===\n", doc.title);

    if !doc.address.is_empty() {
        if doc.has_long_address(layout.long_address_threshold) {
            let short: String = doc
                .address
                .chars()
                .take(layout.long_address_threshold)
                .collect();
            println!("  {}: {}...", layout.address_label, short.trim_end());
        } else {
            println!("  {}: {}", layout.address_label, doc.address);
        }
    }
    for (label, value) in [
        (layout.team.director.display.as_str(), &doc.responsible_director),
        (layout.team.functional_lead.display.as_str(), &doc.functional_lead),
    ] {
        if !value.is_empty() {
            println!("  {}: {}", label, value);
        }
    }
    if !doc.financial_ratio_display.is_empty() {
        println!("  {}", doc.financial_ratio_display);
    }
    println!();

    // Declared order, not map order
    for title in &layout.top_titles {
        if let Some(text) = doc.top.get(title) {
            print_section(title, text);
        }
    }

    for title in &layout.mid_titles {
        let Some(text) = doc.mid.get(title) else {
            continue;
        };
        print_section(title, text);
        if *title == layout.cost_table.section {
            if let Some(ref table) = doc.cost_table {
                print_mini_table(table);
            }
        }
        if *title == layout.finance_table.section {
            if let Some(ref table) = doc.finance_table {
                print_mini_table(table);
            }
        }
    }
}

fn print_section(title: &str, text: &str) {
    println!("  {}", title);
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        println!("    {}", line);
    }
    println!();
}

fn print_mini_table(table: &MiniTable) {
    let width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(8);

    println!("    {}:", table.title);
    for row in &table.rows {
        println!("      {:<width$}  {}", row.label, row.value, width = width);
    }
    println!();
}

pub fn print_annotation(annotation: &Annotation) {
    if let Some(ref error) = annotation.error {
        println!("  Analysis: {}\n", error);
    }
    if let Some(ref analysis) = annotation.analysis {
        print_analysis(analysis);
    }
}

fn print_analysis(analysis: &CanvasAnalysis) {
    let one_pager = &analysis.executive_one_pager;
    println!(
        "=== {} ===\n",
        one_pager.title.as_deref().unwrap_or("Executive summary")
    );

    if let Some(ref value) = one_pager.value_statement {
        println!("  {}\n", value);
    }
    print_list("Summary", &one_pager.summary_bullets);
    print_list("In scope", &one_pager.scope_in);
    print_list("Out of scope", &one_pager.scope_out);

    if !one_pager.kpis.is_empty() {
        println!("  KPIs:");
        for kpi in &one_pager.kpis {
            println!("    {} = {}  (source: {})", kpi.name, kpi.formula, kpi.source);
        }
        println!();
    }

    if !one_pager.risks.is_empty() {
        println!("  Risks:");
        for risk in &one_pager.risks {
            println!("    {} -> {}", risk.risk, risk.mitigation);
        }
        println!();
    }
    print_list("Next steps", &one_pager.next_steps);

    if !analysis.section_suggestions.is_empty() {
        println!("  Suggestions by section:");
        for (section, text) in &analysis.section_suggestions {
            println!("    {}: {}", section, text);
        }
        println!();
    }

    let diagnostic = &analysis.technical_report.diagnostic;
    print_list("Missing", &diagnostic.missing);
    print_list("Inconsistencies", &diagnostic.inconsistencies);
    print_list("Assumptions", &diagnostic.assumptions);
    print_list(
        "Architecture notes",
        &analysis.technical_report.architecture_notes,
    );
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {}:", heading);
    for item in items {
        println!("    - {}", item);
    }
    println!();
}

pub fn print_notes(notes: &AnnotationStore) {
    if notes.is_empty() {
        return;
    }
    println!("=== Notes ({}) ===\n", notes.len());
    for (section, text) in notes.iter() {
        println!("  {}", section);
        println!("    {}\n", text);
    }
}

pub fn print_board(projects: &[&Project]) {
    if projects.is_empty() {
        println!("No projects match.");
        return;
    }

    let max_name = projects
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(10);

    for p in projects {
        let sheet = p.sheet_title().unwrap_or_default();
        println!(
            "  {:<width$}  {:>5}%  {:<8} {:<6} {:<20} {}",
            p.name,
            p.progress_pct().round_dp(1).to_string(),
            p.status().label(),
            p.year.as_deref().unwrap_or("-"),
            p.sponsor.as_deref().unwrap_or("-"),
            sheet,
            width = max_name
        );
    }
    println!("\n{} project(s)", projects.len());
}

pub fn print_progress(series: &[ProgressPoint]) {
    if series.is_empty() {
        println!("No projects in range.");
        return;
    }

    let max_name = series
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(10);

    for point in series {
        let bar_len = point
            .value
            .round()
            .to_string()
            .parse::<usize>()
            .unwrap_or(0)
            / 5;
        println!(
            "  {:<width$}  {:>5}%  {:<20}  {}",
            point.name,
            point.value.round_dp(1).to_string(),
            "#".repeat(bar_len),
            point.band.color(),
            width = max_name
        );
    }
}
