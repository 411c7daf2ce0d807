//! Turning command line arguments and standard input into a prompt.

use std::io::{Read, Write};

use serde::Serialize;
use tracing::debug;

use crate::errors::LlmError;

/// Argument that stands for the content of standard input.
pub const STDIN_MARKER: &str = "-";
/// Printed before reading from a terminal.
pub const INTERACTIVE_NOTICE: &str = "Reading from stdin...\n^C to cancel, ^D to send\n";

/// One unit of a request. Serialized the way the API expects a part,
/// e.g. `{"text": "hello"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptPart {
    Text(String),
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        PromptPart::Text(text.into())
    }
}

/// Ordered parts sent together as one request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSequence(Vec<PromptPart>);

impl PromptSequence {
    pub fn parts(&self) -> &[PromptPart] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<PromptPart>> for PromptSequence {
    type Error = LlmError;

    fn try_from(parts: Vec<PromptPart>) -> Result<Self, Self::Error> {
        if parts.is_empty() {
            return Err(LlmError::EmptyPrompt);
        }
        Ok(Self(parts))
    }
}

/// Builds a [`PromptSequence`] from positional arguments.
///
/// Standard input is read at most once. Every `-` after the first gets the
/// same content again rather than an exhausted stream.
pub struct InputAssembler<R, W> {
    stdin: R,
    interactive: bool,
    diagnostics: W,
    cached: Option<String>,
}

impl<R: Read, W: Write> InputAssembler<R, W> {
    /// `interactive` says whether `stdin` is a terminal; if so a short notice
    /// is written to `diagnostics` before blocking on it.
    pub fn new(stdin: R, interactive: bool, diagnostics: W) -> Self {
        Self {
            stdin,
            interactive,
            diagnostics,
            cached: None,
        }
    }

    pub fn assemble<I, S>(&mut self, args: I) -> Result<PromptSequence, LlmError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts = Vec::new();
        for arg in args {
            let arg = arg.into();
            if arg == STDIN_MARKER {
                parts.push(PromptPart::Text(self.read_stdin()?));
            } else {
                parts.push(PromptPart::Text(arg));
            }
        }

        if parts.is_empty() {
            parts.push(PromptPart::Text(self.read_stdin()?));
        }

        debug!(part_count = parts.len(), "assembled prompt");
        PromptSequence::try_from(parts)
    }

    fn read_stdin(&mut self) -> Result<String, LlmError> {
        if let Some(cached) = &self.cached {
            debug!("replaying cached stdin");
            return Ok(cached.clone());
        }

        if self.interactive {
            self.diagnostics.write_all(INTERACTIVE_NOTICE.as_bytes())?;
            self.diagnostics.flush()?;
        }

        let mut buf = Vec::new();
        self.stdin
            .read_to_end(&mut buf)
            .map_err(LlmError::StdinRead)?;
        let text = String::from_utf8_lossy(&buf).to_string();
        debug!(bytes = buf.len(), "read stdin");
        self.cached = Some(text.clone());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use super::{InputAssembler, PromptPart, PromptSequence, INTERACTIVE_NOTICE};
    use crate::errors::LlmError;

    fn texts(seq: &PromptSequence) -> Vec<&str> {
        seq.parts()
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => text.as_str(),
            })
            .collect()
    }

    /// A reader that counts how many times it is drained to the end.
    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        eofs: usize,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.inner.read(buf)?;
            if n == 0 {
                self.eofs += 1;
            }
            Ok(n)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin went away"))
        }
    }

    #[test]
    fn arguments_become_parts_in_order() {
        let mut stderr = Vec::new();
        let mut assembler = InputAssembler::new(Cursor::new("unused"), true, &mut stderr);
        let seq = assembler.assemble(["hello", "world", "again"]).unwrap();
        assert_eq!(texts(&seq), ["hello", "world", "again"]);
        drop(assembler);
        assert!(stderr.is_empty(), "stdin should not be touched");
    }

    #[test]
    fn no_arguments_reads_stdin_once() {
        let reader = CountingReader {
            inner: Cursor::new(b"explain recursion".to_vec()),
            eofs: 0,
        };
        let mut assembler = InputAssembler::new(reader, false, io::sink());
        let seq = assembler.assemble(Vec::<String>::new()).unwrap();
        assert_eq!(texts(&seq), ["explain recursion"]);
        assert_eq!(assembler.stdin.eofs, 1);
    }

    #[test]
    fn empty_stdin_still_yields_one_part() {
        let mut assembler = InputAssembler::new(io::empty(), false, io::sink());
        let seq = assembler.assemble(Vec::<String>::new()).unwrap();
        assert_eq!(texts(&seq), [""]);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn dash_substitutes_stdin() {
        let mut assembler = InputAssembler::new(Cursor::new("piped text"), false, io::sink());
        let seq = assembler.assemble(["-"]).unwrap();
        assert_eq!(texts(&seq), ["piped text"]);
    }

    #[test]
    fn dash_keeps_its_position_among_arguments() {
        let mut assembler = InputAssembler::new(Cursor::new("body"), false, io::sink());
        let seq = assembler.assemble(["summarize:", "-", "briefly"]).unwrap();
        assert_eq!(texts(&seq), ["summarize:", "body", "briefly"]);
    }

    #[test]
    fn repeated_dash_replays_the_same_stdin() {
        let reader = CountingReader {
            inner: Cursor::new(b"once".to_vec()),
            eofs: 0,
        };
        let mut assembler = InputAssembler::new(reader, false, io::sink());
        let seq = assembler.assemble(["-", "and", "-"]).unwrap();
        assert_eq!(texts(&seq), ["once", "and", "once"]);
        assert_eq!(assembler.stdin.eofs, 1);
    }

    #[test]
    fn interactive_notice_is_written_before_reading() {
        let mut stderr = Vec::new();
        InputAssembler::new(Cursor::new("hi"), true, &mut stderr)
            .assemble(Vec::<String>::new())
            .unwrap();
        assert_eq!(String::from_utf8(stderr).unwrap(), INTERACTIVE_NOTICE);
    }

    #[test]
    fn piped_stdin_gets_no_notice() {
        let mut stderr = Vec::new();
        InputAssembler::new(Cursor::new("hi"), false, &mut stderr)
            .assemble(["-"])
            .unwrap();
        assert!(stderr.is_empty());
    }

    #[test]
    fn notice_is_written_once_for_repeated_dash() {
        let mut stderr = Vec::new();
        InputAssembler::new(Cursor::new("hi"), true, &mut stderr)
            .assemble(["-", "-"])
            .unwrap();
        assert_eq!(String::from_utf8(stderr).unwrap(), INTERACTIVE_NOTICE);
    }

    #[test]
    fn stdin_failure_is_reported() {
        let err = InputAssembler::new(FailingReader, false, io::sink())
            .assemble(["-"])
            .unwrap_err();
        match err {
            LlmError::StdinRead(source) => assert_eq!(source.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = PromptSequence::try_from(Vec::new()).unwrap_err();
        assert!(matches!(err, LlmError::EmptyPrompt));
    }

    #[test]
    fn text_part_serializes_as_api_part() {
        let json = serde_json::to_value(PromptPart::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hi" }));
    }
}
