use crate::error::TutorError;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

/// Muxes narration onto a rendered clip with ffmpeg.
#[derive(Clone)]
pub struct VideoComposer {
    ffmpeg_bin: String,
}

impl VideoComposer {
    pub fn new(ffmpeg_bin: impl Into<String>) -> Self {
        Self {
            ffmpeg_bin: ffmpeg_bin.into(),
        }
    }

    /// H.264 video with the audio cut to whichever input ends first.
    pub async fn merge(&self, video: &Path, audio: &Path, out: &Path) -> Result<PathBuf, TutorError> {
        for input in [video, audio] {
            if !tokio::fs::try_exists(input).await? {
                return Err(TutorError::MediaMissing(input.to_path_buf()));
            }
        }

        let output = Command::new(&self.ffmpeg_bin)
            .args(merge_args(video, audio, out))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| TutorError::subprocess("ffmpeg", e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail = stderr.lines().last().unwrap_or_default().to_string();
            return Err(TutorError::subprocess("ffmpeg", tail));
        }

        info!(path = %out.display(), "narrated video written");
        Ok(out.to_path_buf())
    }
}

fn merge_args(video: &Path, audio: &Path, out: &Path) -> Vec<std::ffi::OsString> {
    let mut args: Vec<std::ffi::OsString> = Vec::with_capacity(16);
    args.push("-y".into());
    args.push("-i".into());
    args.push(video.into());
    args.push("-i".into());
    args.push(audio.into());
    for flag in ["-map", "0:v:0", "-map", "1:a:0", "-c:v", "libx264", "-c:a", "aac", "-shortest"] {
        args.push(flag.into());
    }
    args.push(out.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_audio_is_rejected_before_spawning() {
        let tmp = tempfile::tempdir().unwrap();
        let video = tmp.path().join("clip.mp4");
        std::fs::write(&video, b"not really a video").unwrap();
        let audio = tmp.path().join("explanation_audio.mp3");

        let composer = VideoComposer::new("ffmpeg-that-does-not-exist");
        let err = composer
            .merge(&video, &audio, &tmp.path().join("final.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, TutorError::MediaMissing(p) if p == audio));
    }

    #[test]
    fn merge_trims_to_shortest_stream() {
        let args = merge_args(Path::new("v.mp4"), Path::new("a.mp3"), Path::new("o.mp4"));
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args.first().map(String::as_str), Some("-y"));
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "-c:v" && w[1] == "libx264"));
        assert_eq!(args.last().map(String::as_str), Some("o.mp4"));
    }
}
