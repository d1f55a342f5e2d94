#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

pub mod error;
mod internal;
pub mod message;
pub mod model;
pub mod request;
pub mod response;
pub mod streaming;

// Re-export main types
pub use error::{CloudflareRequestError, ErrorKind};
pub use message::{Message, Role};
pub use model::{
    ImageClassificationModel, ImageToTextModel, ObjectDetectionModel, SpeechRecognitionModel,
    SummarizationModel, TextGenerationModel, TextToImageModel, TranslationLanguage,
    TranslationModel,
};
pub use request::{
    ImageClassificationRequest, ImageToTextRequest, ObjectDetectionRequest,
    SpeechRecognitionRequest, SummarizationRequest, TextGenerationRequest, TextToImageRequest,
    TranslationRequest,
};
pub use response::{
    ApiResponse, BoundingBox, ClassificationLabel, DetectedObject, ImageClassificationResponse,
    ImageResponse, ImageToTextOutput, ImageToTextResponse, ObjectDetectionResponse,
    RecognizedWord, SpeechRecognitionOutput, SpeechRecognitionResponse, SummarizationOutput,
    SummarizationResponse, TextGenerationChunk, TextGenerationOutput, TextGenerationResponse,
    TranslationOutput, TranslationResponse,
};

use bon::Builder;
use core::fmt;
use futures_util::stream::BoxStream;
#[cfg(feature = "leaky-bucket")]
use leaky_bucket::RateLimiter;
#[cfg(feature = "leaky-bucket")]
use std::sync::Arc;

use crate::internal::RequestBuilder;

const BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Upstream limit on binary image/audio inputs
const MAX_PAYLOAD_BYTES: usize = 6 * 1048576;
/// Upstream limit on a single message's content
const MAX_PROMPT_CHARS: usize = 4096;
/// Upstream limit on generated tokens
const MAX_TOKENS: u32 = 256;
/// Upstream limit on diffusion steps
const MAX_STEPS: u32 = 20;

#[derive(Clone, Default, Builder)]
pub struct CloudflareAi {
    #[builder(into)]
    pub(crate) api_key: String,
    #[builder(into)]
    pub(crate) account_id: String,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[cfg(feature = "leaky-bucket")]
    pub(crate) leaky_bucket: Option<Arc<RateLimiter>>,
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    /// Optional AI Gateway prefix; replaces the accounts run path when set
    #[builder(into)]
    pub(crate) gateway_url: Option<String>,
}

impl CloudflareAi {
    /// Create a new client with the provided API key and account identifier.
    pub fn new(api_key: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            account_id: account_id.into(),
            client: reqwest::Client::new(),
            #[cfg(feature = "leaky-bucket")]
            leaky_bucket: None,
            base_url: BASE_URL.to_string(),
            gateway_url: None,
        }
    }

    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("CLOUDFLARE_API_KEY")?;
        let account_id = std::env::var("CLOUDFLARE_ACCOUNT_ID")?;
        Ok(Self::builder()
            .api_key(api_key)
            .account_id(account_id)
            .build())
    }

    /// Create request helper for internal use
    fn request_helper(&self) -> RequestBuilder {
        RequestBuilder::new(
            self.client.clone(),
            &self.base_url,
            self.gateway_url.as_deref(),
            &self.api_key,
            &self.account_id,
        )
    }
}

impl CloudflareAi {
    /// Generate text from a chat-style conversation.
    ///
    /// Family of generative text models, such as large language models, that
    /// can be adapted for a variety of natural language tasks.
    pub async fn text_generation(
        &self,
        request: &TextGenerationRequest,
    ) -> Result<TextGenerationResponse, CloudflareRequestError> {
        validate_text_generation(request)?;

        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_json(&request.model.to_string(), request)
            .await
    }

    /// Stream a text generation response token by token.
    ///
    /// The `stream` flag is forced on; events arrive until the server signals
    /// the end of the stream.
    pub fn stream_text_generation(
        &self,
        request: &TextGenerationRequest,
    ) -> BoxStream<'static, Result<TextGenerationChunk, CloudflareRequestError>> {
        use async_stream::try_stream;
        use futures_util::StreamExt;

        let helper = self.request_helper();
        let mut request_data = request.clone();
        request_data.stream = Some(true);
        let validation = validate_text_generation(&request_data);

        #[cfg(feature = "leaky-bucket")]
        let rate_limiter = self.leaky_bucket.clone();

        Box::pin(try_stream! {
            validation?;

            #[cfg(feature = "leaky-bucket")]
            if let Some(ref limiter) = rate_limiter {
                limiter.acquire_one().await;
            }

            let model = request_data.model.to_string();
            let mut stream = helper.stream(&model, &request_data);

            while let Some(result) = stream.next().await {
                yield result?;
            }
        })
    }

    /// Translate text from one supported language to another.
    pub async fn translation(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, CloudflareRequestError> {
        if request.source_lang == request.target_lang {
            return Err(CloudflareRequestError::invalid_request(
                "Source and target languages cannot be the same.",
            ));
        }

        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_json(&request.model.to_string(), request)
            .await
    }

    /// Classify an image, assigning it labels with confidence scores.
    pub async fn image_classification(
        &self,
        request: &ImageClassificationRequest,
    ) -> Result<ImageClassificationResponse, CloudflareRequestError> {
        validate_payload_size(request.image.len(), "Image file")?;

        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_binary(&request.model.to_string(), "image/*", request.image.clone())
            .await
    }

    /// Detect objects in an image, returning labels with bounding boxes.
    pub async fn object_detection(
        &self,
        request: &ObjectDetectionRequest,
    ) -> Result<ObjectDetectionResponse, CloudflareRequestError> {
        validate_payload_size(request.image.len(), "Image file")?;

        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_binary(&request.model.to_string(), "image/*", request.image.clone())
            .await
    }

    /// Convert a speech signal, typically an audio input, to text.
    pub async fn speech_recognition(
        &self,
        request: &SpeechRecognitionRequest,
    ) -> Result<SpeechRecognitionResponse, CloudflareRequestError> {
        validate_payload_size(request.audio.len(), "Audio file")?;

        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_binary(&request.model.to_string(), "audio/*", request.audio.clone())
            .await
    }

    /// Summarize a longer text into a shorter one.
    pub async fn summarization(
        &self,
        request: &SummarizationRequest,
    ) -> Result<SummarizationResponse, CloudflareRequestError> {
        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_json(&request.model.to_string(), request)
            .await
    }

    /// Generate a caption describing the contents of an image.
    pub async fn image_to_text(
        &self,
        request: &ImageToTextRequest,
    ) -> Result<ImageToTextResponse, CloudflareRequestError> {
        validate_payload_size(request.image.len(), "Image file")?;

        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_binary(&request.model.to_string(), "image/*", request.image.clone())
            .await
    }

    /// Generate an image from a text prompt; returns the raw image bytes.
    pub async fn text_to_image(
        &self,
        request: &TextToImageRequest,
    ) -> Result<ImageResponse, CloudflareRequestError> {
        if let Some(steps) = request.steps {
            if steps > MAX_STEPS {
                return Err(CloudflareRequestError::invalid_request(
                    "Steps cannot exceed 20.",
                ));
            }
        }

        #[cfg(feature = "leaky-bucket")]
        if let Some(ref limiter) = self.leaky_bucket {
            limiter.acquire_one().await;
        }

        self.request_helper()
            .request_image(&request.model.to_string(), request)
            .await
    }
}

/// Reject oversized binary inputs before any network I/O
fn validate_payload_size(len: usize, what: &str) -> Result<(), CloudflareRequestError> {
    if len > MAX_PAYLOAD_BYTES {
        return Err(CloudflareRequestError::invalid_request(format!(
            "{what} size cannot exceed 6MB."
        )));
    }
    Ok(())
}

/// Reject out-of-range generation parameters before any network I/O
fn validate_text_generation(
    request: &TextGenerationRequest,
) -> Result<(), CloudflareRequestError> {
    for message in &request.messages {
        if message.content.chars().count() > MAX_PROMPT_CHARS {
            return Err(CloudflareRequestError::invalid_request(
                "Prompt length cannot exceed 4096 characters.",
            ));
        }
    }

    if let Some(max_tokens) = request.max_tokens {
        if max_tokens > MAX_TOKENS {
            return Err(CloudflareRequestError::invalid_request(
                "Max tokens cannot exceed 256.",
            ));
        }
    }

    Ok(())
}

impl fmt::Debug for CloudflareAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareAi")
            .field("api_key", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("gateway_url", &self.gateway_url)
            .finish_non_exhaustive()
    }
}
