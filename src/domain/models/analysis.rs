use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub percentage: f64,
}

/// Structured record pulled out of the analysis model's free text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFields {
    pub assessment: Vec<ChartDataPoint>,
    pub theme: String,
    pub visual_description: String,
    pub vibe_check: String,
    pub deep_dive: Vec<String>,
    pub reality_check: String,
    pub healing_roadmap: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub chart_data: Vec<ChartDataPoint>,
    pub image_url: String,
    pub visual_description: String,
    pub theme: String,
    pub vibe_check: String,
    pub deep_dive: Vec<String>,
    pub reality_check: String,
    pub healing_roadmap: Vec<String>,
}

impl AnalysisResult {
    pub fn new(fields: AnalysisFields, image_url: String) -> AnalysisResult {
        return AnalysisResult {
            chart_data: fields.assessment,
            image_url,
            visual_description: fields.visual_description,
            theme: fields.theme,
            vibe_check: fields.vibe_check,
            deep_dive: fields.deep_dive,
            reality_check: fields.reality_check,
            healing_roadmap: fields.healing_roadmap,
        };
    }
}

/// Handed out once per entry into the analyzing phase. The generation ties an
/// outcome back to the session run that requested it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub answers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no JSON object found in model response")]
    NoJsonFound,

    #[error("model response contained malformed JSON: {0}")]
    MalformedJson(String),

    #[error("model response JSON does not match the analysis schema: {0}")]
    SchemaMismatch(String),

    #[error("image response carried no inline image data")]
    ImageMissing,

    #[error("could not get analysis from the model: {0}")]
    RemoteCallFailed(String),
}
