use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Text generation model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum TextGenerationModel {
    // Cloudflare-hosted models
    #[strum(to_string = "@cf/meta/llama-2-7b-chat-fp16")]
    Llama2_7bChatFp16,
    #[strum(to_string = "@cf/meta/llama-2-7b-chat-int8")]
    Llama2_7bChatInt8,
    #[strum(to_string = "@cf/mistral/mistral-7b-instruct-v0.1")]
    Mistral7bInstruct,
    #[strum(to_string = "@cf/deepseek-ai/deepseek-math-7b-instruct")]
    DeepseekMath7bInstruct,
    #[strum(to_string = "@cf/openchat/openchat-3.5-0106")]
    OpenChat3_5,
    #[strum(to_string = "@cf/microsoft/phi-2")]
    Phi2,
    #[strum(to_string = "@cf/tinyllama/tinyllama-1.1b-chat-v1.0")]
    TinyLlama1_1bChat,
    #[strum(to_string = "@cf/thebloke/discolm-german-7b-v1-awq")]
    DiscolmGerman7bAwq,
    #[strum(to_string = "@cf/qwen/qwen1.5-0.5b-chat")]
    Qwen1_5_0_5bChat,
    #[strum(to_string = "@cf/qwen/qwen1.5-1.8b-chat")]
    Qwen1_5_1_8bChat,
    #[strum(to_string = "@cf/qwen/qwen1.5-7b-chat-awq")]
    Qwen1_5_7bChatAwq,
    #[strum(to_string = "@cf/qwen/qwen1.5-14b-chat-awq")]
    Qwen1_5_14bChatAwq,
    #[strum(to_string = "@cf/tiiuae/falcon-7b-instruct")]
    Falcon7bInstruct,
    #[strum(to_string = "@cf/defog/sqlcoder-7b-2")]
    SqlCoder7b2,

    // HuggingFace-hosted models
    #[strum(to_string = "@hf/thebloke/codellama-7b-instruct-awq")]
    CodeLlama7bInstructAwq,
    #[strum(to_string = "@hf/thebloke/llama-2-13b-chat-awq")]
    Llama2_13bChatAwq,
    #[strum(to_string = "@hf/thebloke/zephyr-7b-beta-awq")]
    Zephyr7bBetaAwq,
    #[strum(to_string = "@hf/thebloke/mistral-7b-instruct-v0.1-awq")]
    Mistral7bInstructAwq,
    #[strum(to_string = "@hf/thebloke/openhermes-2.5-mistral-7b-awq")]
    OpenHermesMistral7bAwq,
    #[strum(to_string = "@hf/thebloke/neural-chat-7b-v3-1-awq")]
    NeuralChat7bAwq,
    #[strum(to_string = "@hf/thebloke/llamaguard-7b-awq")]
    LlamaGuard7bAwq,
    #[strum(to_string = "@hf/thebloke/deepseek-coder-6.7b-base-awq")]
    DeepseekCoder6_7bBaseAwq,
    #[strum(to_string = "@hf/thebloke/deepseek-coder-6.7b-instruct-awq")]
    DeepseekCoder6_7bInstructAwq,
}

/// Translation model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum TranslationModel {
    #[strum(to_string = "@cf/meta/m2m100-1.2b")]
    M2m100_1_2b,
}

/// Image classification model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ImageClassificationModel {
    #[strum(to_string = "@cf/microsoft/resnet-50")]
    Resnet50,
}

/// Object detection model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ObjectDetectionModel {
    #[strum(to_string = "@cf/facebook/detr-resnet-50")]
    DetrResnet50,
}

/// Speech recognition model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum SpeechRecognitionModel {
    #[strum(to_string = "@cf/openai/whisper")]
    Whisper,
}

/// Summarization model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum SummarizationModel {
    #[strum(to_string = "@cf/facebook/bart-large-cnn")]
    BartLargeCnn,
}

/// Image-to-text model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ImageToTextModel {
    #[strum(to_string = "@cf/unum/uform-gen2-qwen-500m")]
    UformGen2Qwen500m,
}

/// Text-to-image model enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum TextToImageModel {
    #[strum(to_string = "@cf/stabilityai/stable-diffusion-xl-base-1.0")]
    StableDiffusionXlBase,
    #[strum(to_string = "@cf/lykon/dreamshaper-8-lcm")]
    Dreamshaper8Lcm,
    #[strum(to_string = "@cf/runwayml/stable-diffusion-v1-5-inpainting")]
    StableDiffusion1_5Inpainting,
    #[strum(to_string = "@cf/runwayml/stable-diffusion-v1-5-img2img")]
    StableDiffusion1_5Img2Img,
    #[strum(to_string = "@cf/bytedance/stable-diffusion-xl-lightning")]
    StableDiffusionXlLightning,
}

/// Languages supported by the translation models
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TranslationLanguage {
    English,
    Chinese,
    French,
    Spanish,
    Arabic,
    Russian,
    German,
    Japanese,
    Portuguese,
    Hindi,
}

macro_rules! model_catalog {
    ($($ty:ty),* $(,)?) => {
        $(impl $ty {
            /// All model identifier strings in this family
            pub fn models() -> Vec<String> {
                Self::iter().map(|m| m.to_string()).collect()
            }
        })*
    };
}

model_catalog!(
    TextGenerationModel,
    TranslationModel,
    ImageClassificationModel,
    ObjectDetectionModel,
    SpeechRecognitionModel,
    SummarizationModel,
    ImageToTextModel,
    TextToImageModel,
);

impl TranslationLanguage {
    /// All supported language names
    pub fn languages() -> Vec<String> {
        Self::iter().map(|l| l.to_string()).collect()
    }
}
