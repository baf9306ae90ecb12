use crate::input::Prompter;
use crate::session::{Session, SessionOptions};
use clap::Parser;
use std::io;

/// Enter employee pay periods interactively, then print each payroll report
/// and the grand totals.
#[derive(Parser, Debug)]
#[command(name = "payroll", version, about)]
pub struct PayrollCommand {
    /// Print a payroll register after the grand totals
    #[arg(long)]
    register: bool,

    /// Output the register as CSV instead of a formatted table
    #[arg(long, requires = "register")]
    csv: bool,

    /// Also print the grand totals as JSON
    #[arg(long)]
    json: bool,
}

impl PayrollCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let prompter = Prompter::new(stdin.lock(), stdout.lock());

        let mut session = Session::new(prompter, self.options());
        if let Some(totals) = session.run()? {
            log::info!(
                "Session processed {} of {} records",
                totals.total_employees,
                session.records().len()
            );
        }
        Ok(())
    }

    fn options(&self) -> SessionOptions {
        SessionOptions {
            register: self.register,
            csv: self.csv,
            json: self.json,
        }
    }
}
