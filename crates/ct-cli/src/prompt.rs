//! Console prompts for values not supplied as flags.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

/// Asks questions on `output` and reads answers line by line from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}").context("failed to write to console")
    }

    /// Asks `question` and returns the trimmed answer.
    ///
    /// Fails if input is closed before an answer arrives.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question} ").context("failed to write to console")?;
        self.output.flush().context("failed to write to console")?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("failed to read from console")?;
        if read == 0 {
            bail!("input closed while waiting for: {question}");
        }
        Ok(answer.trim().to_string())
    }

    /// Asks `question` until `parse` accepts the answer, explaining each
    /// rejection.
    pub fn ask_until<T, F>(&mut self, question: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T>,
    {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(format_args!("Invalid input: {err:#}. Please try again."))?,
            }
        }
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_trims_answer() {
        let mut p = prompter("  Asha \n");
        assert_eq!(p.ask("Name:").unwrap(), "Asha");
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "Name: ");
    }

    #[test]
    fn ask_fails_on_closed_input() {
        let mut p = prompter("");
        let err = p.ask("Name:").unwrap_err();
        assert_eq!(err.to_string(), "input closed while waiting for: Name:");
    }

    #[test]
    fn ask_until_retries_rejected_answers() {
        let mut p = prompter("abc\n-1\n12.5\n");
        let value = p
            .ask_until("Rate:", |s| {
                let v: f64 = s.parse().context("not a number")?;
                if v < 0.0 {
                    bail!("must not be negative");
                }
                Ok(v)
            })
            .unwrap();

        assert!((value - 12.5).abs() < f64::EPSILON);
        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Rate: ").count(), 3);
        assert!(output.contains("Invalid input: not a number: "));
        assert!(output.contains("Invalid input: must not be negative. Please try again."));
    }

    #[test]
    fn ask_until_gives_up_when_input_closes() {
        let mut p = prompter("abc\n");
        let result = p.ask_until("Hours:", |s| s.parse::<f64>().context("not a number"));
        assert!(result.is_err());
    }
}
