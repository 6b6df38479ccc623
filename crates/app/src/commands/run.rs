//! anamark run command - replay a UI script against a labeling session.

use std::path::Path;

use anamark_config::AnamarkConfig;
use anamark_ipc::{SessionToUi, parse_script};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use labeling::LabelingSession;
use serde::Serialize;
use tracing::info;

use crate::bridge::SessionBridge;
use crate::{Cli, output};

#[derive(Serialize)]
struct RunSummary {
    messages: usize,
    failures: usize,
    class_labels: usize,
    problem_areas: usize,
}

pub fn run(input: &Path, script: &Path, config: &AnamarkConfig, cli: &Cli) -> Result<()> {
    let source =
        std::fs::read_to_string(script).with_context(|| format!("Failed to read script {:?}", script))?;
    let messages = parse_script(&source).with_context(|| format!("Invalid script {:?}", script))?;

    let session = LabelingSession::from_config(config).context("Invalid class color in config")?;
    let base_dir = script.parent().unwrap_or(Path::new("."));
    let mut bridge = SessionBridge::new(session, base_dir);

    // The mesh path is relative to the working directory, script paths to the script
    let input = std::path::absolute(input).with_context(|| format!("Invalid mesh path {:?}", input))?;
    bridge.load_mesh(&input);
    let mut failures = report(bridge.take_outbox(), cli);
    if !bridge.session().is_loaded() {
        bail!("Failed to load mesh from {:?}", input);
    }

    info!("Replaying {} messages from {:?}", messages.len(), script);
    let total = messages.len();
    for message in messages {
        bridge.handle(message);
        failures += report(bridge.take_outbox(), cli);
    }

    let counts = bridge.session().counts();
    let summary = RunSummary {
        messages: total,
        failures,
        class_labels: counts.classes,
        problem_areas: counts.problem_areas,
    };
    output::print_line(
        &summary,
        || {
            format!(
                "{} {} messages, {} class labels, {} problem areas",
                "Replayed".green().bold(),
                summary.messages,
                summary.class_labels,
                summary.problem_areas
            )
        },
        cli.format,
        cli.quiet,
    );

    if failures > 0 {
        bail!("{} of {} script messages failed", failures, total);
    }
    Ok(())
}

/// Print outgoing messages; returns how many were failures
fn report(messages: Vec<SessionToUi>, cli: &Cli) -> usize {
    let mut failures = 0;
    for message in &messages {
        if matches!(message, SessionToUi::LoadFailed { .. } | SessionToUi::Error { .. }) {
            failures += 1;
        }
        output::print_line(message, || describe(message), cli.format, cli.quiet);
    }
    failures
}

fn describe(message: &SessionToUi) -> String {
    match message {
        SessionToUi::MeshLoaded {
            vertex_count,
            face_count,
        } => format!("{} {} vertices, {} faces", "Loaded".cyan(), vertex_count, face_count),
        SessionToUi::LoadFailed { message } => format!("{}: {}", "Load failed".red(), message),
        SessionToUi::MeshClosed => "Mesh closed".cyan().to_string(),
        SessionToUi::ModeChanged { mode } => format!("{} {:?}", "Mode".cyan(), mode),
        SessionToUi::Cleared { mode } => format!("{} {:?} labels", "Cleared".cyan(), mode),
        SessionToUi::CountsChanged(counts) => format!(
            "{} {} class labels, {} problem areas",
            "Counts".cyan(),
            counts.classes,
            counts.problem_areas
        ),
        SessionToUi::ClassesChanged { classes } => {
            let names: Vec<&str> = classes.iter().map(|class| class.name.as_str()).collect();
            format!("{} [{}]", "Classes".cyan(), names.join(", "))
        }
        SessionToUi::Exported { path } => format!("{} {}", "Exported".green(), path),
        SessionToUi::Error { message } => format!("{}: {}", "Error".red(), message),
    }
}
