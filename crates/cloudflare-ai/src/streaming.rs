use futures_util::StreamExt;
use serde::Deserialize;

use crate::error::CloudflareRequestError;

/// Server-Sent Events parser for streamed text generation responses.
///
/// Workers AI streams one JSON object per `data:` line and terminates the
/// stream with `data: [DONE]`.
pub struct SseParser {
    byte_stream: std::pin::Pin<
        Box<dyn futures_util::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send>,
    >,
    buffer: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseParser {
    pub fn new(response: reqwest::Response) -> Self {
        Self {
            byte_stream: Box::pin(response.bytes_stream()),
            buffer: Vec::new(),
            data_lines: Vec::new(),
        }
    }

    /// Get the next parsed event from the stream
    pub async fn next_event<T: for<'de> Deserialize<'de>>(
        &mut self,
    ) -> Result<Option<T>, CloudflareRequestError> {
        loop {
            if let Some(event) = self.parse_buffered_event::<T>()? {
                return Ok(Some(event));
            }

            if let Some(chunk_result) = self.byte_stream.next().await {
                let chunk = chunk_result?;
                self.buffer.extend_from_slice(&chunk);
            } else {
                // Stream ended, flush whatever is left
                if !self.buffer.is_empty() {
                    let line = take_utf8(&mut self.buffer)?;
                    if let Some(event) = self.process_line::<T>(&line)? {
                        return Ok(Some(event));
                    }
                }
                return self.finalize_event();
            }
        }
    }

    /// Consume complete lines from the buffer until one yields an event
    fn parse_buffered_event<T: for<'de> Deserialize<'de>>(
        &mut self,
    ) -> Result<Option<T>, CloudflareRequestError> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line_bytes = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let line = String::from_utf8(line_bytes)
                .map_err(|e| CloudflareRequestError::InvalidEventData(e.to_string()))?;

            if let Some(event) = self.process_line::<T>(&line)? {
                return Ok(Some(event));
            }
        }

        Ok(None)
    }

    fn process_line<T: for<'de> Deserialize<'de>>(
        &mut self,
        line: &str,
    ) -> Result<Option<T>, CloudflareRequestError> {
        let trimmed = line.trim_end_matches(['\n', '\r']).trim_end();

        // A blank line ends the current event
        if trimmed.is_empty() {
            return self.finalize_event();
        }

        // SSE comment
        if trimmed.starts_with(':') {
            return Ok(None);
        }

        if let Some(rest) = trimmed.strip_prefix("data:") {
            let data = rest.trim_start();

            if data == "[DONE]" {
                self.data_lines.clear();
                return Ok(None);
            }

            if !data.is_empty() {
                self.data_lines.push(data.to_string());
            }

            return Ok(None);
        }

        // Ignore other SSE fields (event, id, retry)
        Ok(None)
    }

    fn finalize_event<T: for<'de> Deserialize<'de>>(
        &mut self,
    ) -> Result<Option<T>, CloudflareRequestError> {
        if self.data_lines.is_empty() {
            return Ok(None);
        }

        let payload = self.data_lines.join("\n");
        self.data_lines.clear();

        if payload.is_empty() || payload == "[DONE]" {
            return Ok(None);
        }

        let event: T = serde_json::from_str(&payload).map_err(|e| {
            CloudflareRequestError::InvalidEventData(format!("JSON parse error: {e}"))
        })?;

        Ok(Some(event))
    }
}

fn take_utf8(buffer: &mut Vec<u8>) -> Result<String, CloudflareRequestError> {
    String::from_utf8(std::mem::take(buffer))
        .map_err(|e| CloudflareRequestError::InvalidEventData(e.to_string()))
}

/// Parse all SSE events contained in a string chunk
pub fn parse_sse_events<T: for<'de> Deserialize<'de>>(
    chunk: &str,
) -> Result<Vec<T>, CloudflareRequestError> {
    let mut events = Vec::new();
    let mut data_lines = Vec::new();

    for line in chunk.lines() {
        let line = line.trim_end_matches('\r');

        if line.is_empty() {
            if let Some(event) = finalize_data_lines::<T>(&mut data_lines)? {
                events.push(event);
            }
            continue;
        }

        if line.starts_with(':') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("data:") {
            let data = rest.trim_start();

            if data == "[DONE]" {
                data_lines.clear();
                continue;
            }

            if !data.is_empty() {
                data_lines.push(data.to_string());
            }
        }
    }

    if let Some(event) = finalize_data_lines::<T>(&mut data_lines)? {
        events.push(event);
    }

    Ok(events)
}

fn finalize_data_lines<T: for<'de> Deserialize<'de>>(
    data_lines: &mut Vec<String>,
) -> Result<Option<T>, CloudflareRequestError> {
    if data_lines.is_empty() {
        return Ok(None);
    }

    let payload = data_lines.join("\n");
    data_lines.clear();

    if payload.is_empty() || payload == "[DONE]" {
        return Ok(None);
    }

    let event: T = serde_json::from_str(&payload)
        .map_err(|e| CloudflareRequestError::InvalidEventData(format!("JSON parse error: {e}")))?;

    Ok(Some(event))
}
