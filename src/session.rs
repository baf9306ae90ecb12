//! Interactive entry session: collect records until the sentinel, then
//! process and summarise them once.

use crate::input::{InputError, NameEntry, PromptError, Prompter};
use crate::payroll::{calculate_employee_pay, process_all_employees, EmployeeRecord, GrandTotals};
use crate::report;
use std::io::{BufRead, Write};

/// Extra output produced after the grand totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub register: bool,
    pub csv: bool,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Collecting,
    Processing,
    Done,
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    records: Vec<EmployeeRecord>,
    /// Running totals of the records entered so far, used to refuse entries
    /// whose pay could not be calculated or summed.
    entered: GrandTotals,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, options: SessionOptions) -> Self {
        Session {
            prompter,
            records: Vec::new(),
            entered: GrandTotals::default(),
            options,
        }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        self.prompter.output()
    }

    /// Run the session to completion. Returns the grand totals when at least
    /// one record was entered.
    pub fn run(&mut self) -> anyhow::Result<Option<GrandTotals>> {
        self.write_welcome()?;

        let mut state = SessionState::Collecting;
        let mut totals = None;
        loop {
            state = match state {
                SessionState::Collecting => self.collect()?,
                SessionState::Processing => {
                    totals = self.process()?;
                    SessionState::Done
                }
                SessionState::Done => {
                    writeln!(self.prompter.output_mut(), "\nApplication session finished.")?;
                    return Ok(totals);
                }
            };
            log::trace!("Session state: {:?}", state);
        }
    }

    fn write_welcome(&mut self) -> std::io::Result<()> {
        let out = self.prompter.output_mut();
        let rule = "-".repeat(50);
        writeln!(out, "{rule}")?;
        writeln!(out, "Welcome to the Modular Payroll System")?;
        writeln!(out, "{rule}")
    }

    fn collect(&mut self) -> anyhow::Result<SessionState> {
        let name = match self.prompter.get_employee_name() {
            Ok(NameEntry::Employee(name)) => name,
            Ok(NameEntry::End) => {
                log::info!("Entry finished with {} records", self.records.len());
                return Ok(SessionState::Processing);
            }
            Err(PromptError::Closed) => {
                log::info!("Input closed with {} records", self.records.len());
                return Ok(SessionState::Processing);
            }
            Err(PromptError::Io(err)) => return Err(err.into()),
        };

        match self.read_record(name) {
            Ok(record) => {
                log::debug!("Recorded {} for {}", record.name, record.period);
                self.records.push(record);
                writeln!(
                    self.prompter.output_mut(),
                    "\nEmployee data recorded. Ready for next employee."
                )?;
                Ok(SessionState::Collecting)
            }
            Err(PromptError::Closed) => {
                log::warn!("Input closed part way through a record, discarding it");
                Ok(SessionState::Processing)
            }
            Err(PromptError::Io(err)) => Err(err.into()),
        }
    }

    /// Dates are always requested first, then hours, rate and tax rate.
    /// Figures whose pay is out of range are requested again.
    fn read_record(&mut self, name: String) -> Result<EmployeeRecord, PromptError> {
        let period = self.prompter.get_dates()?;
        loop {
            let hours = self.prompter.get_total_hours()?;
            let rate = self.prompter.get_hourly_rate()?;
            let tax_rate = self.prompter.get_income_tax_rate()?;

            let entered = calculate_employee_pay(hours, rate, tax_rate)
                .and_then(|pay| self.entered.checked_add(hours, &pay));
            match entered {
                Some(entered) => {
                    self.entered = entered;
                    return Ok(EmployeeRecord::new(name, period, hours, rate, tax_rate));
                }
                None => self.prompter.reject(InputError::PayOutOfRange)?,
            }
        }
    }

    fn process(&mut self) -> anyhow::Result<Option<GrandTotals>> {
        let out = self.prompter.output_mut();
        if self.records.is_empty() {
            writeln!(out, "\nNo employee records entered.")?;
            return Ok(None);
        }

        let totals = process_all_employees(&mut self.records, out)?;
        report::display_grand_totals(&totals, out)?;

        if self.options.register {
            let rows = report::payroll_register(&self.records);
            if self.options.csv {
                writeln!(out)?;
                report::write_register_csv(&rows, &mut *out)?;
            } else {
                report::write_register_table(&rows, out)?;
            }
        }
        if self.options.json {
            report::write_totals_json(&totals, out)?;
        }

        Ok(Some(totals))
    }
}
