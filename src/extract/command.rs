use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::extract::{ExtractionError, SourceDocument, TextExtractor};

/// Extracts text by piping the document through an external program
///
/// The program receives the raw document on stdin and must print the text
/// on stdout, e.g. `pdftotext - -`.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a whitespace separated command line
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }
}

impl TextExtractor for CommandExtractor {
    fn extract_text(&self, doc: &SourceDocument<'_>) -> Result<String, ExtractionError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        // stdin is written on its own thread while stdout drains
        let writer = child.stdin.take().map(|mut stdin| {
            let input = doc.content.to_vec();
            thread::spawn(move || stdin.write_all(&input))
        });
        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
                _ => {}
            }
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Failed {
                name: doc.name.to_string(),
                reason: format!("{} exited with {:?}: {}", self.program, output.status.code(), stderr.trim()),
            });
        }
        String::from_utf8(output.stdout).map_err(|e| ExtractionError::Unreadable {
            name: doc.name.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn doc(content: &[u8]) -> SourceDocument<'_> {
        SourceDocument { name: "x.pdf", url: "", content }
    }

    #[test]
    fn pipes_through_program() {
        let cat = CommandExtractor::from_command_line("cat").unwrap();
        assert_eq!(cat.extract_text(&doc(b"hello world")).unwrap(), "hello world");
    }

    #[test]
    fn non_zero_exit_is_failure() {
        let fail = CommandExtractor::new("sh", ["-c", "cat >/dev/null; echo broken >&2; exit 3"]);
        let err = fail.extract_text(&doc(b"data")).unwrap_err();
        assert!(matches!(err, ExtractionError::Failed { ref reason, .. } if reason.contains("broken")));
    }

    #[test]
    fn empty_command_line() {
        assert!(CommandExtractor::from_command_line("   ").is_none());
    }
}
