use crate::error::TutorError;
use crate::service::password::HashAlgorithm;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1/";
pub const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1/";
pub const GOOGLE_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Which text-to-speech backend narrates the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    ElevenLabs,
    Google,
}

/// Manim render quality, passed as `-q<flag>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    Low,
    Medium,
    High,
    Production,
}

impl VideoQuality {
    pub fn flag(self) -> &'static str {
        match self {
            VideoQuality::Low => "-ql",
            VideoQuality::Medium => "-qm",
            VideoQuality::High => "-qh",
            VideoQuality::Production => "-qk",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    pub proxy: Option<Url>,
    pub app_title: String,

    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Url,

    pub openrouter_api_key: String,
    pub openrouter_base_url: Url,
    pub openrouter_referer: String,
    pub enhance_model: String,
    pub final_model: String,
    pub requests_per_minute: u32,

    pub tts_provider: TtsProvider,
    pub elevenlabs_api_key: String,
    pub elevenlabs_base_url: Url,
    pub voice_id: String,
    pub audio_language: String,

    pub video_quality: VideoQuality,
    pub video_fps: u32,
    pub video_resolution: u32,
    pub video_class_name: String,
    pub work_dir: PathBuf,
    pub media_dir: PathBuf,
    pub manim_bin: String,
    pub ffmpeg_bin: String,
    pub tesseract_bin: String,

    pub hash_algorithm: HashAlgorithm,
    pub session_ttl_secs: u64,
    /// Base64-encoded key (at least 64 bytes) for the private session cookie.
    /// A random key is generated when unset, which logs everybody out on restart.
    pub cookie_secret: Option<String>,
    pub insecure_cookie: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite://math_tutor.db".to_string(),
            loglevel: "info".to_string(),
            proxy: None,
            app_title: "AI Math Tutor".to_string(),

            gemini_api_key: String::new(),
            gemini_model: "gemini-1.5-flash-latest".to_string(),
            gemini_base_url: Url::parse(GEMINI_BASE_URL).expect("static url"),

            openrouter_api_key: String::new(),
            openrouter_base_url: Url::parse(OPENROUTER_BASE_URL).expect("static url"),
            openrouter_referer: "https://math-tutor-app.com".to_string(),
            enhance_model: "deepseek/deepseek-r1-zero:free".to_string(),
            final_model: "openai/gpt-4o-mini".to_string(),
            requests_per_minute: 30,

            tts_provider: TtsProvider::ElevenLabs,
            elevenlabs_api_key: String::new(),
            elevenlabs_base_url: Url::parse(ELEVENLABS_BASE_URL).expect("static url"),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            audio_language: "en".to_string(),

            video_quality: VideoQuality::Low,
            video_fps: 15,
            video_resolution: 480,
            video_class_name: "MathExplanation".to_string(),
            work_dir: PathBuf::from("."),
            media_dir: PathBuf::from("media"),
            manim_bin: "manim".to_string(),
            ffmpeg_bin: "ffmpeg".to_string(),
            tesseract_bin: "tesseract".to_string(),

            hash_algorithm: HashAlgorithm::Sha256,
            session_ttl_secs: 24 * 60 * 60,
            cookie_secret: None,
            insecure_cookie: false,
        }
    }
}

impl Config {
    /// Defaults overlaid with `TUTOR_*` environment variables.
    pub fn from_env() -> Result<Self, TutorError> {
        Self::figment().extract().map_err(|e| TutorError::Config(Box::new(e)))
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("TUTOR_"))
    }

    /// Reject a configuration that cannot reach the services it needs.
    pub fn validate(&self) -> Result<(), TutorError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(TutorError::MissingConfig("TUTOR_GEMINI_API_KEY"));
        }
        if self.openrouter_api_key.trim().is_empty() {
            return Err(TutorError::MissingConfig("TUTOR_OPENROUTER_API_KEY"));
        }
        if self.tts_provider == TtsProvider::ElevenLabs && self.elevenlabs_api_key.trim().is_empty()
        {
            return Err(TutorError::MissingConfig("TUTOR_ELEVENLABS_API_KEY"));
        }
        if self.requests_per_minute == 0 {
            return Err(TutorError::InvalidInput(
                "requests_per_minute must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory manim writes the rendered clip of `stem` into.
    pub fn video_output_dir(&self, stem: &str) -> PathBuf {
        self.work_dir
            .join(&self.media_dir)
            .join("videos")
            .join(stem)
            .join(format!("{}p{}", self.video_resolution, self.video_fps))
    }
}
