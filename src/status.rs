use std::fs;
use log::info;
use thiserror::Error;
use crate::config::StatusParameters;

/// Replaces the text between the start and end marker of the status document
///
/// The markers themselves and everything outside them are left untouched, the new
/// content is put in a fenced code block.
///
/// # Arguments
///
/// * 'config' - status document path and markers
/// * 'content' - the report text to put between the markers
pub fn update_status(config: &StatusParameters, content: &str) -> Result<(), StatusError> {
    let document = fs::read_to_string(&config.path)
        .map_err(|e| StatusError::ReadError(format!("{}: {}", config.path, e)))?;

    let updated = replace_span(&document, &config.start_marker, &config.end_marker, content)?;

    fs::write(&config.path, updated)
        .map_err(|e| StatusError::WriteError(format!("{}: {}", config.path, e)))?;

    info!("Status written to {}", config.path);

    Ok(())
}

fn replace_span(document: &str, start_marker: &str, end_marker: &str, content: &str) -> Result<String, StatusError> {
    let span_start = document.find(start_marker)
        .ok_or_else(|| StatusError::MarkerNotFound(start_marker.to_string()))?
        + start_marker.len();
    let span_end = document[span_start..].find(end_marker)
        .ok_or_else(|| StatusError::MarkerNotFound(end_marker.to_string()))?
        + span_start;

    Ok(format!("{}\n\n```\n{}\n```\n\n{}", &document[..span_start], content, &document[span_end..]))
}

/// Error depicting errors that occur while rewriting the status document
///
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("ReadError: {0}")]
    ReadError(String),
    #[error("WriteError: {0}")]
    WriteError(String),
    #[error("MarkerNotFound: {0:?}")]
    MarkerNotFound(String),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use super::*;

    const START: &str = "## Current Status";
    const END: &str = "## Configuration";

    const README: &str = "# Sunny weekend\n\nIntro.\n\n## Current Status\n\n```\nold report\n```\n\n## Configuration\n\nSettings.\n";

    #[test]
    fn replaces_only_the_marked_span() {
        let updated = replace_span(README, START, END, "2024-06-12 - 未来7日内无晴好周末").unwrap();

        assert_eq!(updated, "# Sunny weekend\n\nIntro.\n\n## Current Status\n\n```\n2024-06-12 - 未来7日内无晴好周末\n```\n\n## Configuration\n\nSettings.\n");
    }

    #[test]
    fn rewriting_twice_is_stable() {
        let once = replace_span(README, START, END, "report").unwrap();
        let twice = replace_span(&once, START, END, "report").unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn end_marker_before_start_is_not_found() {
        let document = "## Configuration\n\n## Current Status\n";

        assert!(matches!(replace_span(document, START, END, "x"), Err(StatusError::MarkerNotFound(m)) if m == END));
    }

    #[test]
    fn missing_start_marker_is_an_error() {
        assert!(matches!(replace_span("# Title\n## Configuration\n", START, END, "x"), Err(StatusError::MarkerNotFound(m)) if m == START));
    }

    #[test]
    fn updates_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, README).unwrap();
        let config = StatusParameters {
            path: path.to_str().unwrap().to_string(),
            start_marker: START.into(),
            end_marker: END.into(),
        };

        update_status(&config, "new report").unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("```\nnew report\n```"));
        assert!(!written.contains("old report"));
        assert!(written.starts_with("# Sunny weekend"));
        assert!(written.ends_with("## Configuration\n\nSettings.\n"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let config = StatusParameters {
            path: "/nonexistent/README.md".into(),
            start_marker: START.into(),
            end_marker: END.into(),
        };

        assert!(matches!(update_status(&config, "x"), Err(StatusError::ReadError(_))));
    }
}
