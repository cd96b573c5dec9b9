#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;

use base64::engine::general_purpose::STANDARD as b64;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Map;
use serde_json::Value;

use crate::domain::models::AnalysisError;
use crate::domain::models::AnalysisFields;
use crate::domain::models::ChartDataPoint;
use crate::domain::models::ResponsePart;

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?s)```(?:json|JSON)[ \t]*\r?\n(.*?)```").unwrap());

static LINE_MARKERS: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?m)^[ \t]*(?:#+|-)[ \t]*").unwrap());

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

const DEFAULT_NAME: &str = "Unknown";
const DEFAULT_THEME: &str = "Journey";
const DEFAULT_VISUAL_DESCRIPTION: &str = "A visual representation of your inner world.";
const DEFAULT_VIBE_CHECK: &str = "You're doing great.";
const DEFAULT_REALITY_CHECK: &str = "Stay true to yourself.";
const DEFAULT_DEEP_DIVE: &str = "Exploring your shadow...";
const DEFAULT_HEALING_ROADMAP: &str = "Take a deep breath.";

/// Every `{...}` span that closes back to depth zero, in order of appearance.
/// Braces inside JSON strings are skipped. When an opening brace never
/// closes, scanning resumes right after it.
fn object_spans(text: &str) -> Vec<&str> {
    let mut spans: Vec<&str> = vec![];
    let mut depth: usize = 0;
    let mut start: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if depth == 0 {
            if ch == '{' {
                depth = 1;
                start = idx;
                in_string = false;
                escaped = false;
            }
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&text[start..=idx]);
                }
            }
            _ => (),
        }
    }

    if depth > 0 {
        spans.extend(object_spans(&text[start + 1..]));
    }

    return spans;
}

fn text_field(object: &Map<String, Value>, key: &str, default: &str) -> String {
    let raw = object
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| return !text.is_empty())
        .unwrap_or(default);

    return Extractor::sanitize(raw);
}

fn list_field(object: &Map<String, Value>, key: &str, default: &str) -> Vec<String> {
    let Some(items) = object.get(key).and_then(Value::as_array) else {
        return vec![default.to_string()];
    };

    return items
        .iter()
        .filter_map(Value::as_str)
        .map(Extractor::sanitize)
        .filter(|item| return !item.is_empty())
        .collect();
}

fn chart_point(entry: &Value) -> ChartDataPoint {
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| return !name.is_empty())
        .unwrap_or(DEFAULT_NAME);

    return ChartDataPoint {
        name: Extractor::sanitize(name),
        percentage: entry
            .get("percentage")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
    };
}

pub struct Extractor {}

impl Extractor {
    /// Strips leftover markdown from model text: `**` emphasis, leading `#`
    /// headers, leading `-` list markers and backticks. Runs until the text
    /// stops changing so the result is stable under a second pass.
    pub fn sanitize(text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let without_ticks = current.replace('`', "");
            let without_emphasis = without_ticks.replace("**", "");
            let next = LINE_MARKERS
                .replace_all(&without_emphasis, "")
                .trim()
                .to_string();

            if next == current {
                return next;
            }
            current = next;
        }
    }

    /// Finds the analysis JSON in free model text. A ```json fenced block wins
    /// over bare objects; otherwise the first balanced object that parses is
    /// used.
    pub fn locate_json(text: &str) -> Result<Value, AnalysisError> {
        if let Some(captures) = FENCED_JSON.captures(text) {
            let body = captures
                .get(1)
                .map(|body| return body.as_str().trim())
                .unwrap_or_default();

            return serde_json::from_str::<Value>(body)
                .map_err(|err| return AnalysisError::MalformedJson(err.to_string()));
        }

        let spans = object_spans(text);
        if spans.is_empty() {
            return Err(AnalysisError::NoJsonFound);
        }

        let mut first_err: Option<String> = None;
        for span in spans {
            match serde_json::from_str::<Value>(span) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if first_err.is_none() {
                        first_err = Some(err.to_string());
                    }
                }
            }
        }

        return Err(AnalysisError::MalformedJson(first_err.unwrap_or_default()));
    }

    pub fn extract(text: &str) -> Result<AnalysisFields, AnalysisError> {
        let value = Extractor::locate_json(text)?;
        let object = value.as_object().ok_or_else(|| {
            return AnalysisError::SchemaMismatch("top level value is not an object".to_string());
        })?;

        let assessment = object
            .get("assessment")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                return AnalysisError::SchemaMismatch("missing assessment array".to_string());
            })?;

        let theme = object
            .get("theme")
            .and_then(Value::as_str)
            .filter(|theme| return !theme.is_empty())
            .ok_or_else(|| return AnalysisError::SchemaMismatch("missing theme".to_string()))?;

        let mut theme = Extractor::sanitize(theme);
        if theme.is_empty() {
            theme = DEFAULT_THEME.to_string();
        }

        return Ok(AnalysisFields {
            assessment: assessment.iter().map(chart_point).collect(),
            theme,
            visual_description: text_field(
                object,
                "visualDescription",
                DEFAULT_VISUAL_DESCRIPTION,
            ),
            vibe_check: text_field(object, "vibeCheck", DEFAULT_VIBE_CHECK),
            deep_dive: list_field(object, "deepDive", DEFAULT_DEEP_DIVE),
            reality_check: text_field(object, "realityCheck", DEFAULT_REALITY_CHECK),
            healing_roadmap: list_field(object, "healingRoadmap", DEFAULT_HEALING_ROADMAP),
        });
    }

    /// Wraps the first decodable inline payload as a PNG data URI.
    pub fn extract_image(parts: &[ResponsePart]) -> Result<String, AnalysisError> {
        return parts
            .iter()
            .filter_map(|part| return part.inline_data.as_ref())
            .find(|inline| return !inline.data.is_empty() && b64.decode(&inline.data).is_ok())
            .map(|inline| return format!("{DATA_URI_PREFIX}{}", inline.data))
            .ok_or(AnalysisError::ImageMissing);
    }

    pub fn image_bytes(image_url: &str) -> Option<Vec<u8>> {
        let payload = image_url.strip_prefix(DATA_URI_PREFIX)?;
        return b64.decode(payload).ok();
    }
}
