//! Renderers for a [`Presentation`].
//!
//! Both frontends share the same presentation; they only pick a renderer.
//! `plain` is for scripts and pipes, `styled` for the interactive session.

use console::{measure_text_width, pad_str, style, Alignment, Style};
use whatsurname_core::{ConfidenceBand, Presentation, Profile, ProfileRow, RowHint};

fn label_width(profile: &Profile) -> usize {
    profile
        .rows()
        .map(|row| measure_text_width(row.label))
        .max()
        .unwrap_or(0)
}

/// Render without any escape codes.
pub fn plain(presentation: &Presentation) -> String {
    let mut out = String::new();

    match presentation {
        Presentation::Profile(profile) => {
            let width = label_width(profile);
            out.push_str(&format!("{}:\n", profile.title()));
            for row in profile.rows() {
                let value = match row.hint {
                    RowHint::Confidence(band) => format!("{} ({})", row.value, band.as_str()),
                    _ => row.value.clone(),
                };
                out.push_str(&format!(
                    "  {}: {}\n",
                    pad_str(row.label, width, Alignment::Right, None),
                    value
                ));
            }
            out.push_str("\nReasoning:\n");
            out.push_str(&profile.reasoning);
            out.push('\n');
        }
        Presentation::Failure { kind, message } => {
            out.push_str(&format!("Error ({}): {}\n", kind, message));
        }
    }

    out
}

fn band_style(band: ConfidenceBand) -> Style {
    match band {
        ConfidenceBand::High => Style::new().green(),
        ConfidenceBand::Medium => Style::new().yellow(),
        ConfidenceBand::Low => Style::new().red(),
    }
}

fn styled_row(row: &ProfileRow, width: usize) -> String {
    let label = style(pad_str(row.label, width, Alignment::Right, None)).cyan();
    let value = match row.hint {
        RowHint::Plain => style(row.value.clone()).white().to_string(),
        RowHint::Strong => style(row.value.clone()).bold().to_string(),
        RowHint::Confidence(band) => band_style(band).apply_to(&row.value).to_string(),
    };
    format!("  {}  {}\n", label, value)
}

/// Render with colors for a terminal. The reasoning trace is only included
/// when `show_reasoning` is set.
pub fn styled(presentation: &Presentation, show_reasoning: bool) -> String {
    let mut out = String::new();

    match presentation {
        Presentation::Profile(profile) => {
            let width = label_width(profile);
            out.push_str(&format!(
                "{} {}\n\n",
                style("Analysis for").bold(),
                style(&profile.name).bold().yellow()
            ));
            for row in &profile.identity {
                out.push_str(&styled_row(row, width));
            }
            out.push_str(&format!("  {}\n", style("─".repeat(width + 2)).dim()));
            for row in &profile.details {
                out.push_str(&styled_row(row, width));
            }

            if show_reasoning {
                out.push_str(&format!("\n{}\n", style("Reasoning Chain").green().bold()));
                out.push_str(&format!("{}\n", style(&profile.reasoning).italic().dim()));
            }
        }
        Presentation::Failure { kind, message } => {
            out.push_str(&format!(
                "{} {}: {}\n",
                style("Error").red().bold(),
                style(format!("({})", kind)).red(),
                message
            ));
        }
    }

    out
}
