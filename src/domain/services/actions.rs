#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;
use tokio::time;

use super::AnalysisService;
use super::Extractor;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::AnalysisTicket;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;

/// `shadow-work-<theme>.png`, with the theme reduced to lowercase ascii
/// words joined by hyphens.
pub fn image_file_name(theme: &str) -> String {
    let slug = theme
        .to_lowercase()
        .split(|c: char| return !c.is_ascii_alphanumeric())
        .filter(|word| return !word.is_empty())
        .collect::<Vec<&str>>()
        .join("-");

    if slug.is_empty() {
        return "shadow-work.png".to_string();
    }

    return format!("shadow-work-{slug}.png");
}

pub async fn save_image(
    dir: &path::Path,
    image_url: &str,
    theme: &str,
) -> Result<path::PathBuf> {
    let Some(bytes) = Extractor::image_bytes(image_url) else {
        bail!("Image is not an inline PNG");
    };

    if !dir.exists() {
        fs::create_dir_all(dir).await?;
    }

    let file_path = dir.join(image_file_name(theme));
    fs::write(&file_path, bytes).await?;

    return Ok(file_path);
}

async fn run_analysis(
    backend: Arc<BackendBox>,
    analysis: Arc<AnalysisService>,
    ticket: AnalysisTicket,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = analysis.run(&backend, &ticket.answers).await;
    tx.send(Event::AnalysisResponse(ticket.generation, res))?;

    return Ok(());
}

async fn hold_transition(
    generation: u64,
    delay: time::Duration,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    time::sleep(delay).await;
    tx.send(Event::QuestionReady(generation))?;

    return Ok(());
}

async fn export_image(
    image_url: String,
    theme: String,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let dir = path::PathBuf::from(Config::get(ConfigKey::ImageDir));

    match save_image(&dir, &image_url, &theme).await {
        Ok(file_path) => {
            tracing::info!(path = ?file_path, "saved image");
            tx.send(Event::Notice(format!(
                "Saved image to {}",
                file_path.to_string_lossy()
            )))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, dir = ?dir, "failed to save image");
            tx.send(Event::Notice(format!("Could not save image: {err}")))?;
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Owns the backend for the lifetime of the app. Health checks it once,
    /// then serves actions from the UI until the channel closes.
    pub async fn start(
        backend: Arc<BackendBox>,
        analysis: Arc<AnalysisService>,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        if let Err(err) = backend.health_check().await {
            tracing::warn!(
                error = ?err,
                backend = %backend.name(),
                "backend health check failed"
            );
            tx.send(Event::BackendUnavailable(err.to_string()))?;
        }

        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            match action {
                Action::AnalysisRequest(ticket) => {
                    tracing::debug!(generation = ticket.generation, "analysis requested");
                    tokio::spawn(run_analysis(
                        backend.clone(),
                        analysis.clone(),
                        ticket,
                        worker_tx,
                    ));
                }
                Action::QuestionTransition(generation, delay) => {
                    tokio::spawn(hold_transition(generation, delay, worker_tx));
                }
                Action::SaveImage(image_url, theme) => {
                    tokio::spawn(export_image(image_url, theme, worker_tx));
                }
            }
        }

        return Ok(());
    }
}
