use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::analysis_response_fixture;

use super::AnalysisService;
use crate::domain::models::AnalysisError;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::ImageRequest;
use crate::domain::models::ResponsePart;
use crate::domain::models::TextRequest;

#[derive(Default)]
struct Calls {
    text: Vec<TextRequest>,
    image: Vec<ImageRequest>,
}

struct FakeBackend {
    text: Option<String>,
    parts: Option<Vec<ResponsePart>>,
    calls: Arc<Mutex<Calls>>,
}

/// Returns the boxed fake alongside a handle on the requests it receives.
fn fake(text: Option<&str>, parts: Option<Vec<ResponsePart>>) -> (BackendBox, Arc<Mutex<Calls>>) {
    let calls = Arc::new(Mutex::new(Calls::default()));
    let backend = FakeBackend {
        text: text.map(|text| return text.to_string()),
        parts,
        calls: calls.clone(),
    };

    return (Box::new(backend), calls);
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn generate_text(&self, request: TextRequest) -> Result<String> {
        self.calls.lock().unwrap().text.push(request);
        if let Some(text) = &self.text {
            return Ok(text.to_string());
        }

        bail!("text model unavailable");
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<Vec<ResponsePart>> {
        self.calls.lock().unwrap().image.push(request);
        if let Some(parts) = &self.parts {
            return Ok(parts.clone());
        }

        bail!("image model unavailable");
    }
}

fn answers() -> Vec<String> {
    return vec!["Impatience".to_string(), "My sister's wedding".to_string()];
}

#[tokio::test]
async fn it_combines_analysis_and_image() -> Result<()> {
    let (backend, calls) = fake(
        Some(analysis_response_fixture()),
        Some(vec![
            ResponsePart::text("Enjoy"),
            ResponsePart::inline("image/png", "iVBORw0KGgo="),
        ]),
    );

    let service = AnalysisService::new("models/text", "models/image");
    let result = service.run(&backend, &answers()).await?;

    assert_eq!(result.theme, "Blooming in Concrete");
    assert_eq!(result.chart_data.len(), 5);
    assert_eq!(result.image_url, "data:image/png;base64,iVBORw0KGgo=");
    assert_eq!(result.healing_roadmap.len(), 3);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.text.len(), 1);
    assert_eq!(calls.image.len(), 1);
    assert_eq!(calls.text[0].model, "models/text");
    assert!(calls.text[0]
        .prompt
        .contains("Q1: Impatience\nQ2: My sister's wedding"));
    assert!(calls.text[0].system_instruction.contains("Kai"));
    assert_eq!(calls.image[0].model, "models/image");
    assert!(calls.image[0].prompt.contains("'Blooming in Concrete'"));

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_remote_failures() {
    let (backend, calls) = fake(None, None);

    let res = AnalysisService::new("a", "b")
        .run(&backend, &answers())
        .await;

    assert!(matches!(res, Err(AnalysisError::RemoteCallFailed(_))));
    assert_eq!(calls.lock().unwrap().text.len(), 1);
    assert_eq!(calls.lock().unwrap().image.len(), 0);
}

#[tokio::test]
async fn it_never_requests_an_image_when_extraction_fails() {
    let (backend, calls) = fake(
        Some("I couldn't come up with anything, sorry."),
        Some(vec![ResponsePart::inline("image/png", "iVBORw0KGgo=")]),
    );

    let res = AnalysisService::new("a", "b")
        .run(&backend, &answers())
        .await;

    match &res {
        Err(AnalysisError::RemoteCallFailed(reason)) => {
            assert!(reason.contains("no JSON object found"));
        }
        _ => panic!("expected RemoteCallFailed, got {res:?}"),
    }
    assert_eq!(calls.lock().unwrap().image.len(), 0);
}

#[tokio::test]
async fn it_returns_no_partial_result_when_the_image_is_missing() {
    let (backend, calls) = fake(
        Some(analysis_response_fixture()),
        Some(vec![ResponsePart::text("No image for you")]),
    );

    let res = AnalysisService::new("a", "b")
        .run(&backend, &answers())
        .await;

    match &res {
        Err(AnalysisError::RemoteCallFailed(reason)) => {
            assert!(reason.contains("inline image data"));
        }
        _ => panic!("expected RemoteCallFailed, got {res:?}"),
    }
    assert_eq!(calls.lock().unwrap().text.len(), 1);
    assert_eq!(calls.lock().unwrap().image.len(), 1);
}

#[tokio::test]
async fn it_surfaces_image_call_failures() {
    let (backend, _calls) = fake(Some(analysis_response_fixture()), None);

    let res = AnalysisService::new("a", "b")
        .run(&backend, &answers())
        .await;

    assert!(matches!(res, Err(AnalysisError::RemoteCallFailed(_))));
}
