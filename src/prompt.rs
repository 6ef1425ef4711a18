//! Interactive prompt front end
//!
//! Each prompt validates the answer against a fixed vocabulary and
//! re-prompts on anything else; rejection never propagates as an error.
//! Input is trimmed and lowercased before matching. End-of-input (EOF)
//! surfaces as `None` so the session can end cleanly when stdin closes.
//!
//! The prompter is generic over its reader and writer so tests can drive
//! it with in-memory buffers.

use crate::error::Result;
use crate::types::{City, Month, parse_weekday, weekday_name};
use chrono::Weekday;
use std::io::{BufRead, Write};

/// Interactive prompter over arbitrary input/output streams
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter reading answers from `input` and writing prompts
    /// to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line to the prompt output
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Ask once; returns the trimmed, lowercased answer, or `None` on EOF
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Ask repeatedly until the answer parses, re-prompting on rejects
    fn ask_until<T>(
        &mut self,
        message: &str,
        reject: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(message)? else {
                return Ok(None);
            };
            if let Some(value) = parse(&answer) {
                return Ok(Some(value));
            }
            writeln!(self.output, "{reject}")?;
        }
    }

    /// Prompt for a city
    pub fn city(&mut self) -> Result<Option<City>> {
        let choices = City::ALL.map(|c| c.name()).join(" / ");
        self.ask_until(
            &format!("Enter the name of the city: {choices}:"),
            "This is not a valid city name, try again.",
            City::parse,
        )
    }

    /// Prompt for a month criterion; `Some(None)` means "all"
    pub fn month(&mut self) -> Result<Option<Option<Month>>> {
        let choices = Month::ALL.map(|m| m.name()).join(" / ");
        self.ask_until(
            &format!("Enter the name of the month you would like to explore: all / {choices}:"),
            "This is not a valid month name, try again.",
            |answer| {
                if answer == "all" {
                    Some(None)
                } else {
                    Month::parse(answer).map(Some)
                }
            },
        )
    }

    /// Prompt for a weekday criterion; `Some(None)` means "all"
    pub fn weekday(&mut self) -> Result<Option<Option<Weekday>>> {
        let choices = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .map(|d| weekday_name(d).to_lowercase())
        .join(" / ");
        self.ask_until(
            &format!("Enter the name of the weekday you would like to explore: all / {choices}:"),
            "This is not a valid weekday name, try again.",
            |answer| {
                if answer == "all" {
                    Some(None)
                } else {
                    parse_weekday(answer).map(Some)
                }
            },
        )
    }

    /// Ask a yes/no question; `true` only for exactly "yes"
    /// (case-insensitive). EOF counts as "no".
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        Ok(self.ask(message)?.is_some_and(|answer| answer == "yes"))
    }
}
