//! Fenced code block tracking.
//!
//! Directive-looking text inside a fenced code block is sample code, not an
//! invocation, so the scanner needs to know when it is inside one.

/// Open fence: marker byte and run length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fence {
    marker: u8,
    len: usize,
}

/// Tracks fenced code block state across lines.
///
/// Fences use three or more backticks or tildes. A closing fence must use the
/// same marker, be at least as long as the opening one, and carry nothing but
/// trailing whitespace.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let Some(run) = marker_run(trimmed) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let closes = run.marker == open.marker
                    && run.len >= open.len
                    && trimmed[run.len..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some(run);
                true
            }
        }
    }
}

/// Leading run of at least three backticks or tildes.
///
/// A backtick fence's info string cannot contain backticks; such a line is a
/// code span, not a fence.
fn marker_run(trimmed: &str) -> Option<Fence> {
    let marker = *trimmed.as_bytes().first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }
    let len = trimmed.bytes().take_while(|&b| b == marker).count();
    if len < 3 || (marker == b'`' && trimmed[len..].contains('`')) {
        return None;
    }
    Some(Fence { marker, len })
}
