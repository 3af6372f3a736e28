//! Line-oriented prompter for plain terminals, pipes and tests

use super::prompt::Prompter;
use std::io::{self, BufRead, Write};

/// Prompts on `output`, reads answers from `input`
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
    /// First write failure from `say`, reported by the next `read_line`
    pending: Option<io::Error>,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompter {
            input,
            output,
            pending: None,
        }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if let Some(e) = self.pending.take() {
            return Err(e);
        }
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.output, "{}", line) {
            self.pending.get_or_insert(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_and_echoes_prompts() {
        let mut console = ConsolePrompter::new(Cursor::new("first\r\nsecond\n"), Vec::new());
        assert_eq!(console.read_line("a> ").unwrap().as_deref(), Some("first"));
        console.say("hello");
        assert_eq!(console.read_line("b> ").unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line("c> ").unwrap(), None);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "a> hello\nb> c> ");
    }

    /// Fails the first write, accepts everything after
    struct FlakyWriter {
        failed: bool,
        written: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            self.written.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_say_surfaces_on_next_read() {
        let writer = FlakyWriter {
            failed: false,
            written: Vec::new(),
        };
        let mut console = ConsolePrompter::new(Cursor::new("answer\n"), writer);
        console.say("lost");

        let err = console.read_line("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        // Reported once, then prompting carries on
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("answer"));
        assert_eq!(console.into_output().written, b"> ");
    }
}
