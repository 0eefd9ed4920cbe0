use crate::error::OpenError;
use std::io::Write;

/// Host hook that opens a URI in a new browsing context (or hands it to the OS).
/// Fire-and-forget: success means the link was handed off, not that a message was sent.
pub trait LinkOpener {
    fn open(&mut self, uri: &str) -> Result<(), OpenError>;
}

/// Keeps every opened URI. Can be told to refuse, e.g. a blocked pop-up.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    opened: Vec<String>,
    refuse: Option<String>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            opened: Vec::new(),
            refuse: Some(reason.into()),
        }
    }

    pub fn set_refuse(&mut self, reason: Option<String>) {
        self.refuse = reason;
    }

    pub fn opened(&self) -> &[String] {
        &self.opened
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, uri: &str) -> Result<(), OpenError> {
        if let Some(reason) = &self.refuse {
            return Err(OpenError::new(reason.clone()));
        }
        self.opened.push(uri.to_string());
        Ok(())
    }
}

/// Writes the link to a sink, one per line. Used by the CLI.
pub struct StdoutOpener<W: Write> {
    out: W,
}

impl<W: Write> StdoutOpener<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> LinkOpener for StdoutOpener<W> {
    fn open(&mut self, uri: &str) -> Result<(), OpenError> {
        writeln!(self.out, "open {uri}").map_err(|err| OpenError::new(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_opener_collects_links() {
        let mut opener = RecordingOpener::new();
        opener.open("mailto:a@b.co").expect("open");
        assert_eq!(opener.opened(), ["mailto:a@b.co".to_string()]);

        opener.set_refuse(Some("popup blocked".to_string()));
        let err = opener.open("mailto:c@d.co").expect_err("refused");
        assert_eq!(err.reason, "popup blocked");
        assert_eq!(opener.opened().len(), 1);
    }

    #[test]
    fn stdout_opener_writes_line() {
        let mut buffer = Vec::new();
        StdoutOpener::new(&mut buffer)
            .open("tel:+911234567890")
            .expect("write");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "open tel:+911234567890\n");
    }
}
