#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;

use super::Extractor;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::analysis_prompt;
use crate::domain::models::image_prompt;
use crate::domain::models::AnalysisError;
use crate::domain::models::AnalysisResult;
use crate::domain::models::BackendBox;
use crate::domain::models::ImageRequest;
use crate::domain::models::TextRequest;
use crate::domain::models::SYSTEM_INSTRUCTION;

fn remote_err(err: anyhow::Error) -> AnalysisError {
    return AnalysisError::RemoteCallFailed(format!("{err:#}"));
}

/// Runs the two model round trips for a finished questionnaire: text analysis
/// first, then the image for the extracted theme.
pub struct AnalysisService {
    analysis_model: String,
    image_model: String,
}

impl Default for AnalysisService {
    fn default() -> AnalysisService {
        return AnalysisService::new(
            &Config::get(ConfigKey::AnalysisModel),
            &Config::get(ConfigKey::ImageModel),
        );
    }
}

impl AnalysisService {
    pub fn new(analysis_model: &str, image_model: &str) -> AnalysisService {
        return AnalysisService {
            analysis_model: analysis_model.to_string(),
            image_model: image_model.to_string(),
        };
    }

    async fn try_run(
        &self,
        backend: &BackendBox,
        answers: &[String],
    ) -> Result<AnalysisResult, AnalysisError> {
        let text = backend
            .generate_text(TextRequest {
                model: self.analysis_model.to_string(),
                prompt: analysis_prompt(answers),
                system_instruction: SYSTEM_INSTRUCTION.to_string(),
            })
            .await
            .map_err(remote_err)?;

        let fields = Extractor::extract(&text)?;
        tracing::debug!(
            theme = fields.theme,
            points = fields.assessment.len(),
            "analysis extracted"
        );

        let parts = backend
            .generate_image(ImageRequest {
                model: self.image_model.to_string(),
                prompt: image_prompt(&fields.theme),
            })
            .await
            .map_err(remote_err)?;

        let image_url = Extractor::extract_image(&parts)?;

        return Ok(AnalysisResult::new(fields, image_url));
    }

    /// Either a complete result or a single `RemoteCallFailed`. The specific
    /// cause is logged, never returned half populated.
    pub async fn run(
        &self,
        backend: &BackendBox,
        answers: &[String],
    ) -> Result<AnalysisResult, AnalysisError> {
        match self.try_run(backend, answers).await {
            Ok(result) => {
                return Ok(result);
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    kind = ?err,
                    backend = %backend.name(),
                    "analysis operation failed"
                );

                if let AnalysisError::RemoteCallFailed(_) = err {
                    return Err(err);
                }
                return Err(AnalysisError::RemoteCallFailed(err.to_string()));
            }
        }
    }
}
