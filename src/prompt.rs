//! Line-oriented questions asked on the console.

use anyhow::{Result, bail};
use std::fmt::Display;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::city::City;
use crate::filter::{DayFilter, MonthFilter, TripFilter};

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

/// City and filters chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub filter: TripFilter,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `question` and returns the trimmed answer.
    ///
    /// # Errors
    ///
    /// Fails if the input is closed before a line arrives.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for an answer");
        }
        Ok(line.trim().to_string())
    }

    /// Repeats the question until `parse` accepts the answer.
    pub fn ask_until<T, E, F>(&mut self, question: &str, retry: &str, parse: F) -> Result<T>
    where
        E: Display,
        F: Fn(&str) -> Result<T, E>,
    {
        let mut question = question;
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(answer = %answer, error = %e, "Rejected answer");
                    question = retry;
                }
            }
        }
    }

    /// Only "yes", in any case, counts as agreement.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("yes"))
    }
}

/// Asks for the city, month and day to explore.
pub fn get_filters<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Selection> {
    writeln!(prompter.output(), "Hello! Let's explore some US bikeshare data!")?;

    let cities = City::choices();
    let city = prompter.ask_until(
        &format!("Enter city name ({cities}): "),
        &format!("Invalid city: type one of ({cities}): "),
        str::parse::<City>,
    )?;

    let months = MonthFilter::choices();
    let month = prompter.ask_until(
        &format!("Enter month name ({months}): "),
        &format!("Invalid month: type one of ({months}): "),
        str::parse::<MonthFilter>,
    )?;

    let days = DayFilter::choices();
    let day = prompter.ask_until(
        &format!("Enter day of week ({days}): "),
        &format!("Invalid day: type one of ({days}): "),
        str::parse::<DayFilter>,
    )?;

    writeln!(prompter.output(), "{}", "-".repeat(40))?;
    Ok(Selection {
        city,
        filter: TripFilter::new(month, day),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_get_filters_first_try() {
        let mut p = prompter("Chicago\nmarch\nMONDAY\n");
        let selection = get_filters(&mut p).unwrap();

        assert_eq!(selection.city, City::Chicago);
        assert_eq!(
            selection.filter,
            TripFilter::new(MonthFilter::Only(3), DayFilter::Only(Weekday::Mon))
        );
    }

    #[test]
    fn test_get_filters_reprompts_on_invalid_answers() {
        let mut p = prompter("boston\n\nnew york city\njuly\nall\nfunday\nsunday\n");
        let selection = get_filters(&mut p).unwrap();

        assert_eq!(selection.city, City::NewYorkCity);
        assert_eq!(selection.filter.month, MonthFilter::All);
        assert_eq!(selection.filter.day, DayFilter::Only(Weekday::Sun));

        let text = String::from_utf8(p.output().clone()).unwrap();
        assert_eq!(text.matches("Invalid city").count(), 2);
        assert_eq!(text.matches("Invalid month").count(), 1);
        assert_eq!(text.matches("Invalid day").count(), 1);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut p = prompter("washington\n");
        assert!(get_filters(&mut p).is_err());
    }

    #[test]
    fn test_confirm_only_accepts_yes() {
        let mut p = prompter("yes\nYES\ny\nno\n");
        assert!(p.confirm("?").unwrap());
        assert!(p.confirm("?").unwrap());
        assert!(!p.confirm("?").unwrap());
        assert!(!p.confirm("?").unwrap());
        assert!(p.confirm("?").is_err());
    }
}
