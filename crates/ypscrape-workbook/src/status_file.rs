/// Contents of the `status.txt` artifact an operator or wrapper script polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusArtifact {
    Complete,
    Error {
        message: String,
        /// Extra diagnostic lines (error chain, stop reason).
        detail: Vec<String>,
    },
}

impl StatusArtifact {
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            StatusArtifact::Complete => "Complete".to_owned(),
            StatusArtifact::Error { message, detail } => {
                let mut out = format!("Error: {message}\n");
                for line in detail {
                    out.push_str(line);
                    out.push('\n');
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_renders_bare_word() {
        assert_eq!(StatusArtifact::Complete.render(), "Complete");
    }

    #[test]
    fn error_renders_message_then_detail_lines() {
        let artifact = StatusArtifact::Error {
            message: "page 2 failed".to_owned(),
            detail: vec!["caused by: timeout".to_owned()],
        };
        assert_eq!(artifact.render(), "Error: page 2 failed\ncaused by: timeout\n");
    }
}
