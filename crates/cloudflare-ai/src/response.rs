use bytes::Bytes;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Cloudflare wraps every JSON result in a `{result, success, errors}` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

/// A decoded JSON result together with the HTTP status the transport reported
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub result: T,
}

/// Raw image bytes together with the HTTP status the transport reported.
///
/// The payload is the binary image exactly as returned by the model; it is
/// never decoded as text.
#[derive(Debug, Clone)]
pub struct ImageResponse {
    pub status: StatusCode,
    pub bytes: Bytes,
}

impl ImageResponse {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Result payload of a non-streamed text generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationOutput {
    pub response: String,
}

/// One streamed text generation event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationChunk {
    #[serde(default)]
    pub response: String,
}

/// Result payload of a translation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOutput {
    pub translated_text: String,
}

/// One label/confidence pair from an image classification call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationLabel {
    pub label: String,
    pub score: f32,
}

/// Pixel-coordinate bounding box of a detected object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

/// One detection from an object detection call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub score: f32,
    #[serde(rename = "box")]
    pub bounding_box: BoundingBox,
}

/// A word with timing information from a speech recognition call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Result payload of a speech recognition call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRecognitionOutput {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<RecognizedWord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vtt: Option<String>,
}

/// Result payload of a summarization call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizationOutput {
    pub summary: String,
}

/// Result payload of an image captioning call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageToTextOutput {
    pub description: String,
}

pub type TextGenerationResponse = ApiResponse<TextGenerationOutput>;
pub type TranslationResponse = ApiResponse<TranslationOutput>;
pub type ImageClassificationResponse = ApiResponse<Vec<ClassificationLabel>>;
pub type ObjectDetectionResponse = ApiResponse<Vec<DetectedObject>>;
pub type SpeechRecognitionResponse = ApiResponse<SpeechRecognitionOutput>;
pub type SummarizationResponse = ApiResponse<SummarizationOutput>;
pub type ImageToTextResponse = ApiResponse<ImageToTextOutput>;
