//! Prompting and validation of user-entered payroll values

use crate::payroll::{PayDate, PayPeriod, DATE_FORMAT};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Name that ends record entry, matched case-insensitively
pub const SENTINEL: &str = "end";

pub const MIN_HOURS: Decimal = dec!(0.0);
pub const MIN_HOURLY_RATE: Decimal = dec!(0.01);
pub const MIN_TAX_RATE: Decimal = dec!(0.0);
pub const MAX_TAX_RATE: Decimal = dec!(1.0);

const NAME_PROMPT: &str = "\nEnter Employee Name (or type 'End' to finish): ";
const START_DATE_PROMPT: &str = "Enter Pay Period Start Date (mm/dd/yyyy): ";
const END_DATE_PROMPT: &str = "Enter Pay Period End Date (mm/dd/yyyy): ";
const HOURS_PROMPT: &str = "Enter Total Hours Worked: ";
const RATE_PROMPT: &str = "Enter Hourly Pay Rate ($): ";
const TAX_RATE_PROMPT: &str = "Enter Income Tax Rate (as decimal, e.g., 0.15): ";

/// Rejected input. The message is shown to the user before re-prompting.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input. Please enter a valid number.")]
    InvalidNumber(String),
    #[error("Value must be non-negative (>= {min}). Please try again.")]
    BelowMinimum { value: Decimal, min: Decimal },
    #[error("Tax rate must be entered as a decimal (max 1.0). Please try again.")]
    TaxRateTooHigh(Decimal),
    #[error("ERROR: Date must be in the mm/dd/yyyy format. Please try again.")]
    InvalidDate(String),
    #[error("Name cannot be empty. Please try again.")]
    EmptyName,
    #[error("Pay for these figures is too large to calculate. Please re-enter hours, rate and tax rate.")]
    PayOutOfRange,
}

impl InputError {
    /// The rejected text or value, empty when there is nothing to show
    pub fn rejected(&self) -> String {
        match self {
            InputError::InvalidNumber(input) | InputError::InvalidDate(input) => input.clone(),
            InputError::BelowMinimum { value, .. } | InputError::TaxRateTooHigh(value) => {
                value.to_string()
            }
            InputError::EmptyName | InputError::PayOutOfRange => String::new(),
        }
    }
}

/// Failure to obtain any input at all
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("standard input was closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result of reading an employee name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntry {
    Employee(String),
    End,
}

/// Parse a number, accepting plain decimals and scientific notation
pub fn parse_amount(input: &str) -> Result<Decimal, InputError> {
    let input = input.trim();
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| InputError::InvalidNumber(input.to_string()))
}

pub fn check_minimum(value: Decimal, min: Decimal) -> Result<Decimal, InputError> {
    if value >= min {
        Ok(value)
    } else {
        Err(InputError::BelowMinimum { value, min })
    }
}

pub fn check_tax_rate_ceiling(rate: Decimal) -> Result<Decimal, InputError> {
    if rate <= MAX_TAX_RATE {
        Ok(rate)
    } else {
        Err(InputError::TaxRateTooHigh(rate))
    }
}

/// Parse a month/day/year date such as `01/15/2024`. The year must be four
/// digits; the entered text is kept for display.
pub fn parse_date(input: &str) -> Result<PayDate, InputError> {
    let input = input.trim();
    let invalid = || InputError::InvalidDate(input.to_string());

    let year = input.rsplit('/').next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(|date| PayDate::new(date, input))
        .map_err(|_| invalid())
}

pub fn classify_name(input: &str) -> Result<NameEntry, InputError> {
    let name = input.trim();
    if name.eq_ignore_ascii_case(SENTINEL) {
        Ok(NameEntry::End)
    } else if name.is_empty() {
        Err(InputError::EmptyName)
    } else {
        Ok(NameEntry::Employee(name.to_string()))
    }
}

/// Line-oriented prompter. Every `get_*` method re-prompts until the input is
/// valid; only a closed input stream or an I/O failure ends it early.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Tell the user why their input was rejected
    pub fn reject(&mut self, err: InputError) -> Result<(), PromptError> {
        log::debug!("Rejected input {:?}: {}", err.rejected(), err);
        writeln!(self.output, "{err}")?;
        Ok(())
    }

    pub fn get_validated_float(&mut self, prompt: &str, min: Decimal) -> Result<Decimal, PromptError> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_amount(&line).and_then(|value| check_minimum(value, min)) {
                Ok(value) => return Ok(value),
                Err(err) => self.reject(err)?,
            }
        }
    }

    /// Read the pay period start and end dates. A bad date restarts both.
    pub fn get_dates(&mut self) -> Result<PayPeriod, PromptError> {
        loop {
            let from = self.read_line(START_DATE_PROMPT)?;
            let from_date = match parse_date(&from) {
                Ok(date) => date,
                Err(err) => {
                    self.reject(err)?;
                    continue;
                }
            };

            let to = self.read_line(END_DATE_PROMPT)?;
            match parse_date(&to) {
                Ok(to_date) => return Ok(PayPeriod { from_date, to_date }),
                Err(err) => self.reject(err)?,
            }
        }
    }

    pub fn get_employee_name(&mut self) -> Result<NameEntry, PromptError> {
        loop {
            let line = self.read_line(NAME_PROMPT)?;
            match classify_name(&line) {
                Ok(entry) => return Ok(entry),
                Err(err) => self.reject(err)?,
            }
        }
    }

    pub fn get_total_hours(&mut self) -> Result<Decimal, PromptError> {
        self.get_validated_float(HOURS_PROMPT, MIN_HOURS)
    }

    pub fn get_hourly_rate(&mut self) -> Result<Decimal, PromptError> {
        self.get_validated_float(RATE_PROMPT, MIN_HOURLY_RATE)
    }

    pub fn get_income_tax_rate(&mut self) -> Result<Decimal, PromptError> {
        loop {
            let rate = self.get_validated_float(TAX_RATE_PROMPT, MIN_TAX_RATE)?;
            match check_tax_rate_ceiling(rate) {
                Ok(rate) => return Ok(rate),
                Err(err) => self.reject(err)?,
            }
        }
    }
}
