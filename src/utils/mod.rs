use std::time::Duration;

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// External tool availability
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub name: String,
    pub purpose: &'static str,
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.version.is_some()
    }
}

/// Probe yt-dlp, ffmpeg and whisper
pub async fn check_dependencies(yt_dlp: &str, ffmpeg: &str, whisper: &str) -> Vec<ToolStatus> {
    let probes = [
        (yt_dlp, "--version", "channel listing and downloads"),
        (ffmpeg, "-version", "audio extraction"),
        (whisper, "--help", "transcription"),
    ];

    let mut statuses = Vec::with_capacity(probes.len());
    for (command, flag, purpose) in probes {
        statuses.push(ToolStatus {
            name: command.to_string(),
            purpose,
            version: probe_command(command, flag).await,
        });
    }
    statuses
}

/// Run `command flag` and return the first output line if it succeeds
async fn probe_command(command: &str, flag: &str) -> Option<String> {
    use tokio::process::Command;

    let output = Command::new(command).arg(flag).output().await.ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        Some("installed".to_string())
    } else {
        Some(first_line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m 1s");
        assert_eq!(format_duration(Duration::from_millis(999)), "0s");
    }

    #[tokio::test]
    async fn test_missing_tool_reported_unavailable() {
        let statuses = check_dependencies(
            "/nonexistent/yt-dlp",
            "/nonexistent/ffmpeg",
            "/nonexistent/whisper",
        )
        .await;

        assert_eq!(statuses.len(), 3);
        assert!(statuses.iter().all(|status| !status.is_available()));
        assert_eq!(statuses[1].purpose, "audio extraction");
    }
}
