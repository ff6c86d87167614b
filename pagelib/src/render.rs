use crate::config::Algorithm;
use crate::playback::changed_slot;
use crate::simulator::{Outcome, SimulationResult};

const REFERENCE_LABEL: &str = "Reference";

/// Renders the frame grid with the first `revealed` steps visible
///
/// The reference sequence is always shown in full along the top. Frames are drawn from the
/// highest slot down to slot 0, with the outcome of each revealed step underneath. The
/// highlighted slot of the latest revealed step is wrapped in brackets
///
/// # Arguments
///
/// * `result`: A finished simulation
/// * `revealed`: The number of steps to show, clamped to the number of steps
///
/// returns: String
pub fn render_timeline(result: &SimulationResult, revealed: usize) -> String {
    let revealed = revealed.min(result.len());
    let frame_count = result.frame_count();
    // Leave room for the brackets around a highlighted page
    let cell_width = result
        .steps
        .iter()
        .map(|s| s.reference.to_string().len())
        .max()
        .unwrap_or(1)
        + 3;
    let label_width = REFERENCE_LABEL
        .len()
        .max(frame_label(frame_count.saturating_sub(1)).len());
    let highlight = revealed
        .checked_sub(1)
        .and_then(|latest| changed_slot(result, latest).map(|slot| (latest, slot)));

    let mut lines = Vec::with_capacity(frame_count + 2);
    lines.push(row(
        REFERENCE_LABEL,
        label_width,
        cell_width,
        result.steps.iter().map(|s| s.reference.to_string()),
    ));
    for frame in (0..frame_count).rev() {
        let cells = result.steps.iter().enumerate().map(|(index, step)| {
            if index >= revealed {
                return String::new();
            }
            match step.frames[frame] {
                Some(page) if highlight == Some((index, frame)) => format!("[{page}]"),
                Some(page) => page.to_string(),
                None => String::new(),
            }
        });
        lines.push(row(&frame_label(frame), label_width, cell_width, cells));
    }
    lines.push(row(
        "",
        label_width,
        cell_width,
        result.steps.iter().take(revealed).map(|step| match step.outcome {
            Outcome::Hit => "H".to_string(),
            Outcome::Fault => "F".to_string(),
        }),
    ));
    lines.join("\n")
}

/// One line of counters for the first `revealed` steps
pub fn render_summary(result: &SimulationResult, revealed: usize) -> String {
    let revealed = revealed.min(result.len());
    let hits = result.steps[..revealed].iter().filter(|s| s.is_hit()).count();
    format!(
        "Step {revealed}/{}  Hits {hits}  Faults {}",
        result.len(),
        revealed - hits
    )
}

/// A table comparing the totals of several runs over the same references
pub fn render_comparison(results: &[(Algorithm, SimulationResult)]) -> String {
    let mut lines = vec![format!("{:<10}{:>8}{:>8}{:>11}", "Algorithm", "Hits", "Faults", "Hit ratio")];
    for (algorithm, result) in results {
        lines.push(format!(
            "{:<10}{:>8}{:>8}{:>10.2}%",
            algorithm.to_string(),
            result.hits,
            result.faults,
            result.hit_ratio() * 100.0
        ));
    }
    lines.join("\n")
}

fn frame_label(frame: usize) -> String {
    format!("Frame {frame}")
}

fn row<I: Iterator<Item = String>>(label: &str, label_width: usize, cell_width: usize, cells: I) -> String {
    let mut line = format!("{label:<label_width$}");
    for cell in cells {
        line.push_str(&format!("{cell:>cell_width$}"));
    }
    line.trim_end().to_string()
}
