use crate::api::{ChatCompleter, SpeechSynthesizer, TextGenerator};
use crate::config::Config;
use crate::error::TutorError;
use crate::extract::ScriptSections;
use crate::media::{ManimRenderer, VideoComposer};
use crate::service::prompts;
use crate::types::LearnerContext;
use crate::types::openrouter::ChatCompletion;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

const STAGE_MAX_TOKENS: u32 = 4000;
const STAGE_TEMPERATURE: f32 = 0.3;

/// Everything the four solve stages produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveOutcome {
    pub solution: String,
    pub script: String,
    pub narration: String,
    pub narration_found: bool,
}

/// Solve, draft an animation, enhance it twice and split off the narration.
/// Stages run strictly in order; the first failure ends the run.
#[derive(Clone)]
pub struct SolvePipeline {
    generator: Arc<dyn TextGenerator>,
    chat: Arc<dyn ChatCompleter>,
    enhance_model: String,
    final_model: String,
}

impl SolvePipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        chat: Arc<dyn ChatCompleter>,
        cfg: &Config,
    ) -> Self {
        Self {
            generator,
            chat,
            enhance_model: cfg.enhance_model.clone(),
            final_model: cfg.final_model.clone(),
        }
    }

    /// Stage 1 on its own, shared with the handwritten solver.
    pub async fn solve(&self, ctx: &LearnerContext, problem: &str) -> Result<String, TutorError> {
        self.generator
            .generate(&prompts::solve(ctx.skill_level, &ctx.topic, problem))
            .await
    }

    pub async fn run(&self, ctx: &LearnerContext, problem: &str) -> Result<SolveOutcome, TutorError> {
        let problem = problem.trim();
        if problem.is_empty() {
            return Err(TutorError::InvalidInput("problem must not be empty".to_string()));
        }
        let started = Instant::now();

        let solution = self.solve(ctx, problem).await?;
        info!(stage = "solve", chars = solution.len(), "stage complete");

        let draft = self.generator.generate(&prompts::animation_draft(problem)).await?;
        info!(stage = "draft", chars = draft.len(), "stage complete");

        let request = self.stage(
            &self.enhance_model,
            prompts::ENHANCE_SYSTEM.to_string(),
            prompts::enhance(&draft),
        );
        let enhanced = self.chat.complete(&request).await?;
        info!(stage = "enhance", model = %self.enhance_model, chars = enhanced.len(), "stage complete");

        let request = self.stage(
            &self.final_model,
            prompts::narrate_system(),
            prompts::narrate(&enhanced),
        );
        let narrated = self.chat.complete(&request).await?;
        let sections = ScriptSections::from_generated(&narrated);
        if !sections.narration_found {
            warn!(model = %self.final_model, "final stage returned no voiceover section");
        }
        info!(
            stage = "narrate",
            model = %self.final_model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "solve pipeline finished"
        );

        Ok(SolveOutcome {
            solution,
            script: sections.script,
            narration: sections.narration,
            narration_found: sections.narration_found,
        })
    }

    fn stage(&self, model: &str, system: String, user: String) -> ChatCompletion {
        ChatCompletion {
            model: model.to_string(),
            system,
            user,
            max_tokens: STAGE_MAX_TOKENS,
            temperature: STAGE_TEMPERATURE,
        }
    }
}

/// Paths of the three files one video explanation leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoArtifacts {
    pub video: PathBuf,
    pub audio: PathBuf,
    pub final_video: PathBuf,
}

/// Render, narrate and merge.
#[derive(Clone)]
pub struct VideoPipeline {
    cfg: Arc<Config>,
    renderer: ManimRenderer,
    speech: Arc<dyn SpeechSynthesizer>,
    composer: VideoComposer,
}

impl VideoPipeline {
    pub fn new(cfg: Arc<Config>, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            renderer: ManimRenderer::new(cfg.clone()),
            composer: VideoComposer::new(cfg.ffmpeg_bin.clone()),
            speech,
            cfg,
        }
    }

    pub async fn run(&self, script: &str, narration: &str) -> Result<VideoArtifacts, TutorError> {
        let stamp = chrono::Utc::now().timestamp();

        let video = self.renderer.render(script, stamp).await?;
        info!(stage = "render", path = %video.display(), "stage complete");

        let audio_path = self.cfg.work_dir.join(format!("explanation_audio_{stamp}.mp3"));
        let audio = self.speech.synthesize(narration, &audio_path).await?;
        info!(stage = "speech", path = %audio.display(), "stage complete");

        let out = self.cfg.work_dir.join(format!("final_explanation_{stamp}.mp4"));
        let final_video = self.composer.merge(&video, &audio, &out).await?;
        info!(stage = "merge", path = %final_video.display(), "video explanation ready");

        Ok(VideoArtifacts {
            video,
            audio,
            final_video,
        })
    }
}
