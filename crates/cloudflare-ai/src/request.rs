use bon::Builder;
use serde::Serialize;

use crate::{
    message::Message,
    model::{
        ImageClassificationModel, ImageToTextModel, ObjectDetectionModel, SpeechRecognitionModel,
        SummarizationModel, TextGenerationModel, TextToImageModel, TranslationLanguage,
        TranslationModel,
    },
};

/// Request for chat-style text generation.
///
/// The model identifier rides in the request URL, not the JSON body, so it is
/// excluded from serialization.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct TextGenerationRequest {
    #[builder(field)]
    pub messages: Vec<Message>,
    #[serde(skip)]
    pub model: TextGenerationModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl<S: text_generation_request_builder::State> TextGenerationRequestBuilder<S> {
    pub fn messages(mut self, messages: impl IntoIterator<Item = impl Into<Message>>) -> Self {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.messages.push(message.into());
        self
    }
}

impl TextGenerationRequest {
    pub fn push_message(&mut self, message: impl Into<Message>) {
        self.messages.push(message.into());
    }
}

/// Request for text translation between two supported languages
#[derive(Debug, Clone, Serialize, Builder)]
pub struct TranslationRequest {
    #[serde(skip)]
    pub model: TranslationModel,
    #[builder(into)]
    pub text: String,
    pub source_lang: TranslationLanguage,
    pub target_lang: TranslationLanguage,
}

/// Request for image classification; the image bytes are the request body
#[derive(Debug, Clone, Builder)]
pub struct ImageClassificationRequest {
    pub model: ImageClassificationModel,
    #[builder(into)]
    pub image: Vec<u8>,
}

/// Request for object detection; the image bytes are the request body
#[derive(Debug, Clone, Builder)]
pub struct ObjectDetectionRequest {
    pub model: ObjectDetectionModel,
    #[builder(into)]
    pub image: Vec<u8>,
}

/// Request for speech recognition; the audio bytes are the request body
#[derive(Debug, Clone, Builder)]
pub struct SpeechRecognitionRequest {
    pub model: SpeechRecognitionModel,
    #[builder(into)]
    pub audio: Vec<u8>,
}

/// Request for text summarization
#[derive(Debug, Clone, Serialize, Builder)]
pub struct SummarizationRequest {
    #[serde(skip)]
    pub model: SummarizationModel,
    #[builder(into)]
    pub input_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// Request for image captioning; the image bytes are the request body
#[derive(Debug, Clone, Builder)]
pub struct ImageToTextRequest {
    pub model: ImageToTextModel,
    #[builder(into)]
    pub image: Vec<u8>,
}

/// Request for text-to-image generation
#[derive(Debug, Clone, Serialize, Builder)]
pub struct TextToImageRequest {
    #[serde(skip)]
    pub model: TextToImageModel,
    #[builder(into)]
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
}
