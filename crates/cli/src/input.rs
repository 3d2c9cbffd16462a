// FILE: crates/cli/src/input.rs

use bookshelf_core::ValidationError;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Why a line of user input was rejected
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Введено не число")]
    NotANumber,

    #[error("Допустимые значения: {}", .0.join(", "))]
    NotAllowed(Vec<String>),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Parses a trimmed line as an integer, optionally restricted to `allowed`
pub fn parse_int(line: &str, allowed: Option<&RangeInclusive<i64>>) -> Result<i64, InputError> {
    let value: i64 = line.trim().parse().map_err(|_| InputError::NotANumber)?;

    match allowed {
        Some(range) if !range.contains(&value) => Err(InputError::NotAllowed(
            range.clone().map(|v| v.to_string()).collect(),
        )),
        _ => Ok(value),
    }
}

/// Trims a line, optionally requiring it to be one of `allowed`
pub fn parse_str(line: &str, allowed: Option<&[&str]>) -> Result<String, InputError> {
    let value = line.trim();

    match allowed {
        Some(allowed) if !allowed.contains(&value) => Err(InputError::NotAllowed(
            allowed.iter().map(|v| v.to_string()).collect(),
        )),
        _ => Ok(value.to_string()),
    }
}

/// Line-oriented prompts that repeat until the answer parses
///
/// End of input surfaces as [`io::ErrorKind::UnexpectedEof`].
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompts until `parse` accepts the line, reporting each rejection
    pub fn retry<T, E, F>(&mut self, prompt: &str, mut parse: F) -> io::Result<T>
    where
        E: fmt::Display,
        F: FnMut(&str) -> Result<T, E>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.writer, "Ошибка: {}. Попробуйте снова", e)?,
            }
        }
    }

    pub fn read_int(
        &mut self,
        prompt: &str,
        allowed: Option<RangeInclusive<i64>>,
    ) -> io::Result<i64> {
        self.retry(prompt, |line| parse_int(line, allowed.as_ref()))
    }

    pub fn read_str(&mut self, prompt: &str, allowed: Option<&[&str]>) -> io::Result<String> {
        self.retry(prompt, |line| parse_str(line, allowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    fn output(prompter: Prompter<&[u8], Vec<u8>>) -> String {
        String::from_utf8(prompter.into_writer()).unwrap()
    }

    #[test]
    fn test_read_int_retries_until_valid() {
        let mut p = prompter("abc\n9\n 3 \n");
        let value = p.read_int("> ", Some(1..=6)).unwrap();
        assert_eq!(value, 3);

        let out = output(p);
        assert!(out.contains("Ошибка: Введено не число. Попробуйте снова"));
        assert!(out.contains("Ошибка: Допустимые значения: 1, 2, 3, 4, 5, 6. Попробуйте снова"));
        assert_eq!(out.matches("> ").count(), 3);
    }

    #[test]
    fn test_read_int_unrestricted_accepts_negative() {
        let mut p = prompter("-5\n");
        assert_eq!(p.read_int("> ", None).unwrap(), -5);
    }

    #[test]
    fn test_read_str_with_allowed_values() {
        let mut p = prompter("publisher\nauthor\n");
        let value = p
            .read_str("> ", Some(&["title", "author", "year"]))
            .unwrap();
        assert_eq!(value, "author");
        assert!(output(p).contains("Допустимые значения: title, author, year"));
    }

    #[test]
    fn test_read_str_trims() {
        let mut p = prompter("  толст  \r\n");
        assert_eq!(p.read_str("> ", None).unwrap(), "толст");
    }

    #[test]
    fn test_eof_is_unexpected_eof() {
        let mut p = prompter("");
        let err = p.read_int("> ", None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let mut p = prompter("oops\n");
        let err = p.read_int("> ", None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_retry_reports_validation_messages() {
        let mut p = prompter("1\nВойна и мир\n");
        let title = p
            .retry("> ", |line| bookshelf_core::validation::validate_title(line))
            .unwrap();
        assert_eq!(title, "Война и мир");
        assert!(output(p).starts_with("> Ошибка: "));
    }
}
