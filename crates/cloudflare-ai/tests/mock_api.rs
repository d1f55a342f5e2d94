use cloudflare_ai::{
    CloudflareAi, CloudflareRequestError, ImageClassificationModel, ImageClassificationRequest,
    Message, TextGenerationModel, TextGenerationRequest, TextToImageModel, TextToImageRequest,
    TranslationLanguage, TranslationModel, TranslationRequest,
};
use futures_util::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CloudflareAi {
    CloudflareAi::builder()
        .api_key("test-key")
        .account_id("acct-123")
        .base_url(server.uri())
        .build()
}

#[tokio::test]
async fn test_text_generation_success_reports_transport_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/accounts/acct-123/ai/run/@cf/meta/llama-2-7b-chat-fp16",
        ))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"response": "4"},
            "success": true,
            "errors": [],
            "messages": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TextGenerationRequest::builder()
        .model(TextGenerationModel::Llama2_7bChatFp16)
        .message(Message::system("You are a calculator."))
        .message(Message::user("What is 2+2?"))
        .max_tokens(10)
        .build();

    let response = client.text_generation(&request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.result.response, "4");
}

#[tokio::test]
async fn test_translation_body_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/acct-123/ai/run/@cf/meta/m2m100-1.2b"))
        .and(body_json(json!({
            "text": "Hello",
            "source_lang": "english",
            "target_lang": "french"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"translated_text": "Bonjour"},
            "success": true,
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TranslationRequest::builder()
        .model(TranslationModel::M2m100_1_2b)
        .text("Hello")
        .source_lang(TranslationLanguage::English)
        .target_lang(TranslationLanguage::French)
        .build();

    let response = client.translation(&request).await.unwrap();
    assert_eq!(response.result.translated_text, "Bonjour");
}

#[tokio::test]
async fn test_image_classification_binary_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/acct-123/ai/run/@cf/microsoft/resnet-50"))
        .and(header("content-type", "image/*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"label": "TABBY", "score": 0.62},
                {"label": "TIGER CAT", "score": 0.31}
            ],
            "success": true,
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ImageClassificationRequest::builder()
        .model(ImageClassificationModel::Resnet50)
        .image(vec![0x89, 0x50, 0x4e, 0x47])
        .build();

    let response = client.image_classification(&request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.result[0].label, "TABBY");
}

#[tokio::test]
async fn test_text_to_image_returns_raw_bytes() {
    let server = MockServer::start().await;
    let png: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0xff, 0x00];

    Mock::given(method("POST"))
        .and(path(
            "/accounts/acct-123/ai/run/@cf/stabilityai/stable-diffusion-xl-base-1.0",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TextToImageRequest::builder()
        .model(TextToImageModel::StableDiffusionXlBase)
        .prompt("a lighthouse at dusk")
        .steps(20)
        .build();

    let response = client.text_to_image(&request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
    // Raw image bytes, never decoded as text
    assert_eq!(response.as_bytes(), png);
}

#[tokio::test]
async fn test_gateway_url_replaces_accounts_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gateway/@cf/lykon/dreamshaper-8-lcm"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3], "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let client = CloudflareAi::builder()
        .api_key("test-key")
        .account_id("acct-123")
        .gateway_url(format!("{}/gateway", server.uri()))
        .build();

    let request = TextToImageRequest::builder()
        .model(TextToImageModel::Dreamshaper8Lcm)
        .prompt("anything")
        .build();

    let response = client.text_to_image(&request).await.unwrap();
    assert_eq!(response.into_bytes().to_vec(), vec![1u8, 2, 3]);
}

#[tokio::test]
async fn test_invalid_credentials_surface_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "result": null,
            "success": false,
            "errors": [{"code": 10000, "message": "Authentication error"}],
            "messages": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TextGenerationRequest::builder()
        .model(TextGenerationModel::Phi2)
        .message(Message::user("hi"))
        .build();

    let err = client.text_generation(&request).await.unwrap_err();
    match err {
        CloudflareRequestError::Authentication(message) => {
            assert_eq!(message, "Authentication error");
        }
        other => panic!("Expected Authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remote_rejection_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "result": null,
            "success": false,
            "errors": [{"code": 5006, "message": "unsupported input"}],
            "messages": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TranslationRequest::builder()
        .model(TranslationModel::M2m100_1_2b)
        .text("Hello")
        .source_lang(TranslationLanguage::English)
        .target_lang(TranslationLanguage::Hindi)
        .build();

    let err = client.translation(&request).await.unwrap_err();
    match err {
        CloudflareRequestError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(5006));
            assert_eq!(message, "unsupported input");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_envelope_failure_on_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": null,
            "success": false,
            "errors": [{"code": 3001, "message": "capacity temporarily exceeded"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TextGenerationRequest::builder()
        .model(TextGenerationModel::Phi2)
        .message(Message::user("hi"))
        .build();

    let err = client.text_generation(&request).await.unwrap_err();
    assert!(matches!(
        err,
        CloudflareRequestError::Api {
            status: 200,
            code: Some(3001),
            ..
        }
    ));
}

#[tokio::test]
async fn test_stream_text_generation_collects_chunks() {
    let server = MockServer::start().await;
    let sse = "data: {\"response\":\"Hel\"}\n\ndata: {\"response\":\"lo\"}\n\ndata: [DONE]\n\n";

    Mock::given(method("POST"))
        .and(path("/accounts/acct-123/ai/run/@cf/microsoft/phi-2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sse.as_bytes().to_vec(), "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TextGenerationRequest::builder()
        .model(TextGenerationModel::Phi2)
        .message(Message::user("say hello"))
        .build();

    let mut stream = client.stream_text_generation(&request);
    let mut collected = String::new();
    while let Some(chunk) = stream.next().await {
        collected.push_str(&chunk.unwrap().response);
    }

    assert_eq!(collected, "Hello");
}

#[tokio::test]
async fn test_stream_surfaces_remote_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "success": false,
            "errors": [{"code": 10013, "message": "rate limited"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = TextGenerationRequest::builder()
        .model(TextGenerationModel::Phi2)
        .message(Message::user("hi"))
        .build();

    let mut stream = client.stream_text_generation(&request);
    let first = stream.next().await.unwrap();
    assert!(matches!(first, Err(CloudflareRequestError::RateLimit)));
}
