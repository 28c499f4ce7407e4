use super::SpeechSynthesizer;
use crate::config::{Config, GOOGLE_TTS_URL};
use crate::error::{TutorError, upstream_error};
use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;
use url::Url;

const ELEVENLABS_MODEL: &str = "eleven_multilingual_v2";
const ELEVENLABS_FORMAT: &str = "mp3_44100_128";
/// Google Translate's TTS endpoint rejects longer `q` values.
const GOOGLE_TTS_MAX_CHARS: usize = 100;

#[derive(Clone)]
pub struct ElevenLabsSpeech {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    voice_id: String,
}

#[derive(Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsSpeech {
    pub fn new(cfg: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: cfg.elevenlabs_base_url.clone(),
            api_key: cfg.elevenlabs_api_key.clone(),
            voice_id: cfg.voice_id.clone(),
        }
    }

    fn endpoint(&self) -> Result<Url, TutorError> {
        let mut url = self
            .base_url
            .join(&format!("text-to-speech/{}", self.voice_id))?;
        url.query_pairs_mut()
            .append_pair("output_format", ELEVENLABS_FORMAT);
        Ok(url)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSpeech {
    async fn synthesize(&self, text: &str, out: &Path) -> Result<PathBuf, TutorError> {
        let resp = self
            .client
            .post(self.endpoint()?)
            .header("xi-api-key", &self.api_key)
            .json(&ElevenLabsRequest {
                text,
                model_id: ELEVENLABS_MODEL,
            })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(upstream_error(resp).await);
        }

        let mut file = File::create(out).await?;
        let mut stream = resp.bytes_stream();
        let mut written = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len();
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        info!(path = %out.display(), bytes = written, voice = %self.voice_id, "narration synthesized");
        Ok(out.to_path_buf())
    }
}

/// Keyless fallback using the Google Translate speech endpoint.
#[derive(Clone)]
pub struct GoogleTranslateSpeech {
    client: reqwest::Client,
    language: String,
}

impl GoogleTranslateSpeech {
    pub fn new(cfg: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            language: cfg.audio_language.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateSpeech {
    async fn synthesize(&self, text: &str, out: &Path) -> Result<PathBuf, TutorError> {
        let chunks = speech_chunks(text, GOOGLE_TTS_MAX_CHARS);
        if chunks.is_empty() {
            return Err(TutorError::InvalidInput("nothing to narrate".to_string()));
        }

        let mut file = File::create(out).await?;
        let total = chunks.len().to_string();
        for (idx, chunk) in chunks.iter().enumerate() {
            let resp = self
                .client
                .get(GOOGLE_TTS_URL)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", self.language.as_str()),
                    ("client", "tw-ob"),
                    ("total", total.as_str()),
                    ("idx", idx.to_string().as_str()),
                    ("textlen", chunk.chars().count().to_string().as_str()),
                ])
                .send()
                .await?;
            if !resp.status().is_success() {
                return Err(upstream_error(resp).await);
            }
            // MP3 frames concatenate cleanly, so each chunk is appended as-is.
            file.write_all(&resp.bytes().await?).await?;
        }
        file.flush().await?;
        info!(path = %out.display(), chunks = chunks.len(), lang = %self.language, "narration synthesized");
        Ok(out.to_path_buf())
    }
}

/// Split `text` on whitespace into pieces of at most `max_chars` characters.
/// Words longer than the limit are cut.
pub fn speech_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            chunks.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current.is_empty() { word.len() } else { word.len() + 1 };
        if current_len + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
