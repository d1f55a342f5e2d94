use async_stream::try_stream;
use futures_util::stream::{self, BoxStream};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::{CloudflareRequestError, parse_error_response},
    response::{ApiEnvelope, ApiResponse, ImageResponse},
    streaming::SseParser,
};

/// Centralized request builder holding the credentials and routing config.
///
/// One instance is created per call; everything is owned so streaming bodies
/// can move into a `'static` future.
pub(crate) struct RequestBuilder {
    client: reqwest::Client,
    base_url: String,
    gateway_url: Option<String>,
    api_key: String,
    account_id: String,
}

impl RequestBuilder {
    pub(crate) fn new(
        client: reqwest::Client,
        base_url: &str,
        gateway_url: Option<&str>,
        api_key: &str,
        account_id: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            gateway_url: gateway_url.map(str::to_string),
            api_key: api_key.to_string(),
            account_id: account_id.to_string(),
        }
    }

    /// Build the inference URL for a model, checking credentials first.
    ///
    /// Requests go to `<base>/accounts/<account>/ai/run/<model>`, or to
    /// `<gateway>/<model>` when an AI Gateway is configured.
    pub(crate) fn run_url(&self, model: &str) -> Result<String, CloudflareRequestError> {
        if self.api_key.is_empty() {
            return Err(CloudflareRequestError::MissingCredentials("API key"));
        }
        if self.account_id.is_empty() {
            return Err(CloudflareRequestError::MissingCredentials(
                "account identifier",
            ));
        }

        Ok(match self.gateway_url.as_deref() {
            Some(gateway) => format!("{}/{}", gateway.trim_end_matches('/'), model),
            None => format!(
                "{}/accounts/{}/ai/run/{}",
                self.base_url.trim_end_matches('/'),
                self.account_id,
                model
            ),
        })
    }

    fn post_json(&self, model: &str) -> Result<reqwest::RequestBuilder, CloudflareRequestError> {
        Ok(self
            .client
            .post(self.run_url(model)?)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json"))
    }

    /// POST a JSON body and decode the enveloped JSON result
    pub(crate) async fn request_json<T, B>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, CloudflareRequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let res = self.post_json(model)?.json(body).send().await?;
        handle_envelope(res).await
    }

    /// POST raw bytes (image/audio input) and decode the enveloped JSON result
    pub(crate) async fn request_binary<T>(
        &self,
        model: &str,
        content_type: &'static str,
        payload: Vec<u8>,
    ) -> Result<ApiResponse<T>, CloudflareRequestError>
    where
        T: DeserializeOwned,
    {
        let res = self
            .client
            .post(self.run_url(model)?)
            .bearer_auth(&self.api_key)
            .header("content-type", content_type)
            .body(payload)
            .send()
            .await?;
        handle_envelope(res).await
    }

    /// POST a JSON body and return the raw binary response (generated images)
    pub(crate) async fn request_image<B>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<ImageResponse, CloudflareRequestError>
    where
        B: Serialize + ?Sized,
    {
        let res = self.post_json(model)?.json(body).send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;

        if status.is_success() {
            Ok(ImageResponse { status, bytes })
        } else {
            Err(parse_error_response(status, bytes))
        }
    }

    /// POST a JSON body and yield SSE events until the server signals `[DONE]`
    pub(crate) fn stream<T, B>(
        self,
        model: &str,
        body: &B,
    ) -> BoxStream<'static, Result<T, CloudflareRequestError>>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize + ?Sized,
    {
        let body = match serde_json::to_value(body) {
            Ok(value) => value,
            Err(e) => {
                return Box::pin(stream::once(async move {
                    Err(CloudflareRequestError::SerdeError(e))
                }));
            }
        };
        let url = match self.run_url(model) {
            Ok(url) => url,
            Err(e) => return Box::pin(stream::once(async move { Err(e) })),
        };
        let client = self.client;
        let api_key = self.api_key;

        Box::pin(try_stream! {
            let response = client
                .post(&url)
                .bearer_auth(&api_key)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await?;
            let status = response.status();

            if !status.is_success() {
                let bytes = response.bytes().await?;
                Err(parse_error_response(status, bytes))?;
            } else {
                let mut parser = SseParser::new(response);

                while let Some(event) = parser.next_event().await? {
                    yield event;
                }
            }
        })
    }
}

/// Decode a `{result, success, errors}` envelope, surfacing the reported status
async fn handle_envelope<T: DeserializeOwned>(
    res: reqwest::Response,
) -> Result<ApiResponse<T>, CloudflareRequestError> {
    let status = res.status();
    let bytes = res.bytes().await?;

    if !status.is_success() {
        return Err(parse_error_response(status, bytes));
    }

    let envelope: ApiEnvelope<T> = match serde_json::from_slice(&bytes) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(CloudflareRequestError::UnexpectedResponse(format!(
                "HTTP {} but failed to decode JSON: {}; body: {}",
                status.as_u16(),
                e,
                String::from_utf8_lossy(&bytes)
            )));
        }
    };

    if !envelope.success {
        let (code, message) = envelope
            .errors
            .into_iter()
            .next()
            .map(|e| (e.code, e.message))
            .unwrap_or((None, "API reported failure without detail".to_string()));
        return Err(CloudflareRequestError::Api {
            status: status.as_u16(),
            code,
            message,
        });
    }

    match envelope.result {
        Some(result) => Ok(ApiResponse { status, result }),
        None => Err(CloudflareRequestError::UnexpectedResponse(
            "successful response carried no result".to_string(),
        )),
    }
}
