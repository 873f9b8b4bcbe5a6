//! Request orchestration: one generate click from validation to rendered view.

pub mod session;
pub mod trigger;
pub mod view;

use crate::{
    error::{Result, TitanError},
    gemini::GenerationService,
    logger,
    models::{
        outcome_from_content, outcome_from_images, GenerationForm, GenerationOutcome,
        GenerationRequest,
    },
    storage::Credential,
};
use std::sync::Arc;
use uuid::Uuid;

pub use session::{Session, CREDENTIAL_SAVED};
pub use trigger::{TriggerControl, TriggerGuard};
pub use view::{
    ContentRenderer, ContentView, NullRenderer, RenderedImage, TerminalRenderer, FAILURE_MESSAGE,
    IMAGE_ALT, LOADING_MESSAGE,
};

pub struct Studio {
    session: Session,
    service: Arc<dyn GenerationService>,
    renderer: Arc<dyn ContentRenderer>,
    trigger: TriggerControl,
    content: ContentView,
}

impl Studio {
    pub fn new(session: Session, service: Arc<dyn GenerationService>) -> Self {
        Self {
            session,
            service,
            renderer: Arc::new(NullRenderer),
            trigger: TriggerControl::new(),
            content: ContentView::Empty,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn ContentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// A handle on the generate control, shared with whoever draws it.
    pub fn trigger(&self) -> TriggerControl {
        self.trigger.clone()
    }

    pub fn content(&self) -> &ContentView {
        &self.content
    }

    fn show(&mut self, view: ContentView) {
        self.renderer.render(&view);
        self.content = view;
    }

    /// Runs one generate click. Always leaves the trigger enabled again.
    /// A click on a disabled trigger changes nothing.
    pub async fn generate(&mut self, form: &GenerationForm) -> &ContentView {
        let Some(guard) = self.trigger.disable() else {
            log::warn!("Generate ignored: {}", TitanError::Busy);
            return &self.content;
        };

        let request_id = Uuid::new_v4().to_string();
        let outcome = match self.validate(form) {
            Ok(credential) => {
                self.show(ContentView::loading());
                self.run(&credential, form, &request_id).await
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(image) => {
                log::info!("[req:{}] Image ready ({})", request_id, image.mime_type);
                self.show(ContentView::Rendered(RenderedImage::new(image.data_uri())));
            }
            Err(e) if e.is_precondition() => {
                self.show(ContentView::rejected(e.to_string()));
            }
            Err(e) => {
                log::error!("[req:{}] Image generation failed: {}", request_id, e);
                self.show(ContentView::failed(e.to_string()));
            }
        }

        drop(guard);
        &self.content
    }

    /// Clears the content area. Only a rendered image can be deleted.
    pub fn delete(&mut self) -> bool {
        if !self.content.has_delete_control() {
            return false;
        }
        self.show(ContentView::Empty);
        true
    }

    fn validate(&self, form: &GenerationForm) -> Result<Credential> {
        let credential = self
            .session
            .credential()
            .cloned()
            .ok_or(TitanError::MissingCredential)?;
        if form.prompt.is_empty() {
            return Err(TitanError::EmptyPrompt);
        }
        Ok(credential)
    }

    async fn run(
        &self,
        credential: &Credential,
        form: &GenerationForm,
        request_id: &str,
    ) -> GenerationOutcome {
        let reference = match &form.reference_photo {
            Some(photo) => Some(photo.load().await?),
            None => None,
        };
        let request = GenerationRequest::build(form, reference);
        log::info!(
            "[req:{}] Generating ({}): {}",
            request_id,
            request.mode(),
            request.prompt()
        );

        let _timer = logger::timer("image generation");
        match &request {
            GenerationRequest::Edit(edit) => {
                let response = self
                    .service
                    .generate_from_image_and_text(credential, edit)
                    .await?;
                outcome_from_content(response)
            }
            GenerationRequest::TextToImage(text) => {
                let response = self.service.generate_from_text(credential, text).await?;
                outcome_from_images(response)
            }
        }
    }
}
