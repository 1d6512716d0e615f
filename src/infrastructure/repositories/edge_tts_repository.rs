use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use sha2::{Digest, Sha256};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use uuid::Uuid;

use super::tts_repository::StreamingTtsRepository;
use crate::domain::speech::Voice;

const TRUSTED_CLIENT_TOKEN: &str = "6A5AA1D4EAFF4E9FB37E23D68491D6F4";
const SEC_MS_GEC_VERSION: &str = "1-130.0.2849.68";
const WIN_EPOCH: u64 = 11644473600;

const VOICE_LIST_URL: &str =
    "https://speech.platform.bing.com/consumer/speech/synthesize/readaloud/voices/list";
const SYNTHESIS_URL: &str =
    "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.0.0";

/// The endpoint authenticates with a clock-derived token: the current time
/// in Windows ticks, floored to 5 minutes, hashed together with the
/// trusted client token.
fn generate_sec_ms_gec() -> Result<String, String> {
    let since_the_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| e.to_string())?;

    let mut ticks = since_the_epoch.as_secs();
    ticks += WIN_EPOCH;
    ticks -= ticks % 300;
    let ticks_100ns = ticks as u128 * 10_000_000;

    let mut hasher = Sha256::new();
    hasher.update(format!("{}{}", ticks_100ns, TRUSTED_CLIENT_TOKEN));
    Ok(hex::encode(hasher.finalize()).to_uppercase())
}

/// Edge read-aloud implementation of the streaming fallback provider.
///
/// Synthesis speaks the whole utterance with one voice over a websocket,
/// collecting the streamed audio frames into a single buffer. The voice
/// catalog comes from the companion list endpoint.
pub struct EdgeTtsRepository {
    client: reqwest::Client,
}

impl EdgeTtsRepository {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for EdgeTtsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamingTtsRepository for EdgeTtsRepository {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        let url = format!(
            "{}?TrustedClientToken={}&Sec-MS-GEC={}&Sec-MS-GEC-Version={}",
            SYNTHESIS_URL,
            TRUSTED_CLIENT_TOKEN,
            generate_sec_ms_gec()?,
            SEC_MS_GEC_VERSION
        );

        tracing::info!(voice = %voice, text_length = text.len(), "Connecting to Edge synthesis endpoint");

        let (mut ws_stream, _) = connect_async(url).await.map_err(|e| e.to_string())?;

        ws_stream
            .send(Message::Text(
                "Content-Type:application/json; charset=utf-8\r\n\
                 Path:speech.config\r\n\r\n\
                 {\"context\":{\"synthesis\":{\"audio\":{\"outputFormat\":\"audio-24khz-48kbitrate-mono-mp3\"}}}}"
                    .to_string(),
            ))
            .await
            .map_err(|e| e.to_string())?;

        let ssml = format!(
            "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
             <voice name='{voice}'>{text}</voice></speak>"
        );

        ws_stream
            .send(Message::Text(format!(
                "X-RequestId:{}\r\n\
                 Content-Type:application/ssml+xml\r\n\
                 Path:ssml\r\n\r\n\
                 {}",
                Uuid::new_v4().simple(),
                ssml
            )))
            .await
            .map_err(|e| e.to_string())?;

        // Audio frames carry a big-endian header-length prefix followed by
        // text headers and the raw payload. Frames are appended to one
        // growable buffer until the service signals the end of the turn.
        let mut audio_data: Vec<u8> = Vec::new();

        while let Some(msg) = ws_stream.next().await {
            match msg.map_err(|e| e.to_string())? {
                Message::Text(text) if text.contains("Path:turn.end") => break,
                Message::Binary(data) if data.len() >= 2 => {
                    let header_len = u16::from_be_bytes([data[0], data[1]]) as usize;
                    if data.len() >= header_len + 2 {
                        let headers = String::from_utf8_lossy(&data[2..2 + header_len]);
                        if headers.contains("Path:audio")
                            && headers.contains("Content-Type:audio/mpeg")
                        {
                            audio_data.extend_from_slice(&data[2 + header_len..]);
                        }
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(audio_size = audio_data.len(), "Edge audio stream collected");

        Ok(audio_data)
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, String> {
        let url = format!(
            "{}?trustedclienttoken={}&Sec-MS-GEC={}&Sec-MS-GEC-Version={}",
            VOICE_LIST_URL,
            TRUSTED_CLIENT_TOKEN,
            generate_sec_ms_gec()?,
            SEC_MS_GEC_VERSION
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        response.json::<Vec<Voice>>().await.map_err(|e| e.to_string())
    }
}
