//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use strata_core::analysis::model::{Competitor, Factor, KsfItem, MatrixKind, SwotBucket, SwotItem};
use strata_core::scoring::{self, AnalysisSummary};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 10;
const TEXT_WIDTH: usize = 34;

/// First eight characters of an id, enough to address it from the CLI.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Two-decimal rendering used for every score and weight.
pub fn fmt2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Print the IFE or EFE table with its totals.
pub fn print_matrix(kind: MatrixKind, factors: &[Factor]) {
    println!("{}", kind.title().cyan().bold());

    if factors.is_empty() {
        println!("{}", "No factors yet.".dimmed());
        return;
    }

    println!(
        "{} {} {:>8} {:>8} {:>8}",
        pad_right("ID", ID_WIDTH),
        pad_right("Description", TEXT_WIDTH),
        "Weight",
        "Rating",
        "Score"
    );
    println!("{}", "─".repeat(ID_WIDTH + TEXT_WIDTH + 29));

    for factor in factors {
        println!(
            "{} {} {:>8} {:>8} {:>8}",
            pad_right(&short_id(&factor.id), ID_WIDTH).dimmed(),
            pad_right(&describe(&factor.description, scoring::UNNAMED_FACTOR), TEXT_WIDTH),
            fmt2(factor.weight),
            factor.rating,
            fmt2(scoring::factor_score(factor))
        );
    }

    let weights = scoring::weight_total(factors);
    println!("{}", "─".repeat(ID_WIDTH + TEXT_WIDTH + 29));
    println!(
        "{} {} {:>8} {:>8} {:>8}",
        pad_right("", ID_WIDTH),
        pad_right("Total", TEXT_WIDTH).bold(),
        weight_marker(weights),
        "",
        fmt2(scoring::matrix_total(factors)).bold()
    );
}

/// Weights are expected to sum to 1.0; anything else is shown in yellow.
fn weight_marker(total: f64) -> ColoredString {
    let text = format!("{:>8}", fmt2(total));
    if (total - 1.0).abs() < 1e-9 {
        text.green()
    } else {
        text.yellow()
    }
}

/// Print one SWOT bucket, or all four.
pub fn print_swot(buckets: &[(SwotBucket, &[SwotItem])]) {
    for (i, (bucket, items)) in buckets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", bucket.label().cyan().bold(), format!("({})", items.len()).dimmed());

        if items.is_empty() {
            println!("  {}", "(empty)".dimmed());
            continue;
        }
        for item in items.iter() {
            let text = if item.description.is_empty() {
                "(no description)".dimmed().to_string()
            } else {
                item.description.clone()
            };
            println!("  {} {}", short_id(&item.id).dimmed(), text);
        }
    }
}

/// Print the KSF table with the overall score.
pub fn print_ksf(items: &[KsfItem]) {
    println!("{}", "Key Success Factors".cyan().bold());

    if items.is_empty() {
        println!("{}", "No key success factors yet.".dimmed());
        return;
    }

    println!(
        "{} {} {} {:>7} {:>7} {:>7}",
        pad_right("ID", ID_WIDTH),
        pad_right("Description", 24),
        pad_right("Target / Measure", 24),
        "Weight",
        "Perf",
        "Score"
    );
    println!("{}", "─".repeat(ID_WIDTH + 73));

    for item in items {
        let target = match (item.target.is_empty(), item.measure.is_empty()) {
            (true, true) => String::new(),
            (false, true) => item.target.clone(),
            (true, false) => item.measure.clone(),
            (false, false) => format!("{} / {}", item.target, item.measure),
        };
        println!(
            "{} {} {} {:>7} {:>7} {:>7}",
            pad_right(&short_id(&item.id), ID_WIDTH).dimmed(),
            pad_right(&describe(&item.description, scoring::UNNAMED_KSF), 24),
            pad_right(&truncate_visual(&target, 24), 24),
            fmt2(item.weight),
            fmt2(item.performance),
            fmt2(scoring::ksf_item_score(item))
        );
    }

    println!("{}", "─".repeat(ID_WIDTH + 73));
    println!(
        "{}: {}",
        "KSF score".bold(),
        fmt2(scoring::ksf_score(items)).green().bold()
    );
}

/// Print the Competitive Profile Matrix: one row per competitor, one
/// column per KSF, and the weighted score.
pub fn print_cpm(competitors: &[Competitor], ksf: &[KsfItem]) {
    println!("{}", "Competitive Profile Matrix".cyan().bold());

    if competitors.is_empty() {
        println!("{}", "No competitors yet.".dimmed());
        return;
    }

    let mut header = format!("{} {}", pad_right("ID", ID_WIDTH), pad_right("Competitor", 20));
    for item in ksf {
        header.push(' ');
        header.push_str(&pad_left(&describe(&item.description, scoring::UNNAMED_KSF), 10, 10));
    }
    header.push_str(&format!(" {:>8}", "Score"));
    println!("{}", header);
    println!("{}", "─".repeat(ID_WIDTH + 30 + ksf.len() * 11));

    for competitor in competitors {
        let mut row = format!(
            "{} {}",
            pad_right(&short_id(&competitor.id), ID_WIDTH).dimmed(),
            pad_right(&truncate_visual(&competitor.name, 20), 20)
        );
        for item in ksf {
            let rating = competitor.ratings.get(&item.id).copied().unwrap_or(0.0);
            row.push(' ');
            row.push_str(&pad_left(&fmt2(rating), 10, 10));
        }
        row.push_str(&format!(
            " {:>8}",
            fmt2(scoring::competitor_score(competitor, ksf)).bold()
        ));
        println!("{}", row);
    }

    if ksf.is_empty() {
        println!("{}", "Add key success factors to rate competitors against.".dimmed());
    }
}

/// Print every derived number of the analysis.
pub fn print_summary(summary: &AnalysisSummary, active_file: Option<&str>) {
    println!("{}", "Strategic Analysis Report".cyan().bold());
    println!();

    println!("{}", "SWOT".bold());
    for (label, count) in summary.swot.labels.iter().zip(summary.swot.counts.iter()) {
        println!("  {} {}", pad_right(label, 16), count);
    }
    println!();

    println!("{}", "Matrices".bold());
    println!(
        "  {} {}  {}",
        pad_right("IFE total", 16),
        fmt2(summary.ife_total).green().bold(),
        format!("(weights {})", fmt2(summary.ife_weight_total)).dimmed()
    );
    println!(
        "  {} {}  {}",
        pad_right("EFE total", 16),
        fmt2(summary.efe_total).green().bold(),
        format!("(weights {})", fmt2(summary.efe_weight_total)).dimmed()
    );
    println!("  {} {}", pad_right("KSF score", 16), fmt2(summary.ksf_score).green().bold());
    println!();

    println!("{}", "Competitors".bold());
    if summary.competitors.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for competitor in &summary.competitors {
        println!(
            "  {} {}",
            pad_right(&truncate_visual(&competitor.name, 24), 24),
            fmt2(competitor.score)
        );
    }

    if let Some(name) = active_file {
        println!();
        println!("{}: {}", "Active file".bold(), name.cyan());
    }
}

fn describe(description: &str, placeholder: &str) -> String {
    if description.is_empty() {
        placeholder.to_string()
    } else {
        truncate_visual(description, TEXT_WIDTH)
    }
}

/// Pad a string to a target visual width (accounts for wide unicode chars).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Right-align `s` in `width` columns after truncating it to `max_width`.
fn pad_left(s: &str, width: usize, max_width: usize) -> String {
    let s = truncate_visual(s, max_width);
    let visual = UnicodeWidthStr::width(s.as_str());
    if visual >= width {
        s
    } else {
        format!("{}{}", " ".repeat(width - visual), s)
    }
}

/// Truncate by visual width, appending ".." when shortened.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(2);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("..");
    out
}
