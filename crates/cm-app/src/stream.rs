//! Feeding solver output from streams and files.

use std::io::BufRead;

use cm_monitor::SeriesSink;

use crate::error::{AppError, AppResult};
use crate::session::MonitorSession;

/// Holds back a trailing partial line until the rest of it arrives.
///
/// Non-blocking pipe reads can split a line, or a multibyte character, across
/// two reads; the parser treats every piece as a complete line, so reads go
/// through here first. Completed lines are decoded lossily: solver banners are
/// not guaranteed to be UTF-8 and the parser only looks at ASCII tokens.
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    pending: Vec<u8>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw read and return all newly completed lines, if any.
    pub fn push(&mut self, bytes: &[u8]) -> Option<String> {
        self.pending.extend_from_slice(bytes);
        let cut = self.pending.iter().rposition(|&b| b == b'\n')? + 1;
        let rest = self.pending.split_off(cut);
        let complete = std::mem::replace(&mut self.pending, rest);
        Some(String::from_utf8_lossy(&complete).into_owned())
    }

    /// Flush the final unterminated line once the stream has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            let rest = std::mem::take(&mut self.pending);
            Some(String::from_utf8_lossy(&rest).into_owned())
        }
    }

    /// Bytes of the unterminated line held so far.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub lines: usize,
    pub chunks: usize,
}

/// Replay a finished log in chunks of `chunk_lines` lines.
///
/// Lines that are not valid UTF-8 are decoded lossily rather than rejected.
pub fn replay_reader<R, S>(
    session: &mut MonitorSession,
    mut reader: R,
    chunk_lines: usize,
    sink: &mut S,
) -> AppResult<ReplayStats>
where
    R: BufRead,
    S: SeriesSink + ?Sized,
{
    if chunk_lines == 0 {
        return Err(AppError::InvalidInput(
            "chunk size must be at least one line".to_string(),
        ));
    }

    let mut stats = ReplayStats::default();
    let mut chunk = String::new();
    let mut line = Vec::new();
    let mut in_chunk = 0;
    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line)?;
        if read > 0 {
            chunk.push_str(&String::from_utf8_lossy(&line));
            stats.lines += 1;
            in_chunk += 1;
        }
        let eof = read == 0;
        if (eof && in_chunk > 0) || in_chunk == chunk_lines {
            session.feed(&chunk, sink)?;
            stats.chunks += 1;
            chunk.clear();
            in_chunk = 0;
        }
        if eof {
            break;
        }
    }
    Ok(stats)
}
