use crate::config::Config;
use crate::error::TutorError;
use crate::extract::clean_animation_script;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::process::Command;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ManimRenderer {
    cfg: Arc<Config>,
}

impl ManimRenderer {
    pub fn new(cfg: Arc<Config>) -> Self {
        Self { cfg }
    }

    /// Write the cleaned scene to `{class}_{stamp}.py`, render it and return
    /// the newest clip manim produced for it.
    pub async fn render(&self, script: &str, stamp: i64) -> Result<PathBuf, TutorError> {
        let class = &self.cfg.video_class_name;
        let stem = format!("{class}_{stamp}");
        let file_name = format!("{stem}.py");
        let script_path = self.cfg.work_dir.join(&file_name);

        tokio::fs::write(&script_path, clean_animation_script(script)).await?;
        info!(path = %script_path.display(), "scene written; rendering");

        let output = Command::new(&self.cfg.manim_bin)
            .arg(self.cfg.video_quality.flag())
            .arg("--media_dir")
            .arg(&self.cfg.media_dir)
            .arg(&file_name)
            .arg(class)
            .current_dir(&self.cfg.work_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| TutorError::subprocess("manim", e.to_string()))?;

        // A failed exit can still leave a usable clip; the output directory decides.
        if !output.status.success() {
            warn!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "manim exited with failure"
            );
        }

        latest_video(&self.cfg.video_output_dir(&stem)).await
    }
}

/// Most recently modified `.mp4` in `dir`.
pub async fn latest_video(dir: &Path) -> Result<PathBuf, TutorError> {
    if !tokio::fs::try_exists(dir).await? {
        return Err(TutorError::VideoDirMissing(dir.to_path_buf()));
    }

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("mp4") {
            continue;
        }
        let modified = entry.metadata().await?.modified()?;
        if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| TutorError::VideoNotFound(dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;

    #[tokio::test]
    async fn missing_directory_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("media/videos/MathExplanation_1/480p15");
        assert!(matches!(
            latest_video(&dir).await,
            Err(TutorError::VideoDirMissing(p)) if p == dir
        ));
    }

    #[tokio::test]
    async fn directory_without_clips_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        assert!(matches!(
            latest_video(tmp.path()).await,
            Err(TutorError::VideoNotFound(_))
        ));
    }

    #[tokio::test]
    async fn newest_clip_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let old = tmp.path().join("partial.mp4");
        let new = tmp.path().join("MathExplanation.mp4");
        File::create(&old)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(60))
            .unwrap();
        File::create(&new).unwrap();

        assert_eq!(latest_video(tmp.path()).await.unwrap(), new);
    }
}
