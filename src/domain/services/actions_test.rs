use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::analysis_response_fixture;
use tokio::sync::mpsc;

use super::image_file_name;
use super::save_image;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::AnalysisTicket;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::models::ImageRequest;
use crate::domain::models::ResponsePart;
use crate::domain::models::TextRequest;
use crate::domain::services::AnalysisService;

struct StaticBackend {
    healthy: bool,
}

#[async_trait]
impl Backend for StaticBackend {
    fn name(&self) -> BackendName {
        return BackendName::Proxy;
    }

    async fn health_check(&self) -> Result<()> {
        if self.healthy {
            return Ok(());
        }
        bail!("Proxy is not reachable");
    }

    async fn generate_text(&self, _request: TextRequest) -> Result<String> {
        return Ok(analysis_response_fixture().to_string());
    }

    async fn generate_image(&self, _request: ImageRequest) -> Result<Vec<ResponsePart>> {
        return Ok(vec![ResponsePart::inline("image/png", "iVBORw0KGgo=")]);
    }
}

fn start(
    healthy: bool,
) -> (
    mpsc::UnboundedSender<Action>,
    mpsc::UnboundedReceiver<Event>,
) {
    let backend: Arc<BackendBox> = Arc::new(Box::new(StaticBackend { healthy }));
    let analysis = Arc::new(AnalysisService::new("text", "image"));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        return ActionsService::start(backend, analysis, event_tx, &mut action_rx).await;
    });

    return (action_tx, event_rx);
}

#[test]
fn it_slugs_image_file_names() {
    assert_eq!(
        image_file_name("Blooming in Concrete!"),
        "shadow-work-blooming-in-concrete.png"
    );
    assert_eq!(image_file_name("  ** "), "shadow-work.png");
}

#[tokio::test]
async fn it_saves_inline_images() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("shadow-work-test-{}", std::process::id()));
    let file_path = save_image(&dir, "data:image/png;base64,aGVsbG8=", "Bloom").await?;

    assert_eq!(file_path, dir.join("shadow-work-bloom.png"));
    assert_eq!(tokio::fs::read(&file_path).await?, b"hello".to_vec());

    tokio::fs::remove_dir_all(&dir).await?;
    return Ok(());
}

#[tokio::test]
async fn it_refuses_non_inline_images() {
    let dir = std::env::temp_dir();
    let res = save_image(&dir, "https://example.com/a.png", "Bloom").await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_reports_an_unhealthy_backend() -> Result<()> {
    let (_tx, mut rx) = start(false);

    match rx.recv().await {
        Some(Event::BackendUnavailable(reason)) => {
            assert_eq!(reason, "Proxy is not reachable");
        }
        _ => bail!("Wrong event"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_answers_analysis_requests_with_their_generation() -> Result<()> {
    let (tx, mut rx) = start(true);
    tx.send(Action::AnalysisRequest(AnalysisTicket {
        generation: 7,
        answers: vec!["Impatience".to_string()],
    }))?;

    match rx.recv().await {
        Some(Event::AnalysisResponse(generation, Ok(result))) => {
            assert_eq!(generation, 7);
            assert_eq!(result.theme, "Blooming in Concrete");
            assert_eq!(result.image_url, "data:image/png;base64,iVBORw0KGgo=");
        }
        _ => bail!("Wrong event"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_releases_question_transitions() -> Result<()> {
    let (tx, mut rx) = start(true);
    tx.send(Action::QuestionTransition(3, Duration::from_millis(5)))?;

    match rx.recv().await {
        Some(Event::QuestionReady(generation)) => {
            assert_eq!(generation, 3);
        }
        _ => bail!("Wrong event"),
    }

    return Ok(());
}
