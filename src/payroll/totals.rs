use super::employee::EmployeeRecord;
use super::pay::PayBreakdown;
use crate::report;
use rust_decimal::Decimal;
use std::io::{self, Write};

#[derive(Debug, thiserror::Error)]
pub enum PayrollError {
    #[error("pay for {name} is outside the supported range")]
    PayOutOfRange { name: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Aggregate figures across every record processed in a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrandTotals {
    pub total_employees: usize,
    pub total_hours: Decimal,
    pub total_gross_pay: Decimal,
    pub total_tax: Decimal,
    pub total_net_pay: Decimal,
}

impl GrandTotals {
    /// Totals with one more employee added, or `None` if any sum would
    /// overflow.
    pub fn checked_add(&self, hours: Decimal, pay: &PayBreakdown) -> Option<GrandTotals> {
        Some(GrandTotals {
            total_employees: self.total_employees + 1,
            total_hours: self.total_hours.checked_add(hours)?,
            total_gross_pay: self.total_gross_pay.checked_add(pay.gross_pay)?,
            total_tax: self.total_tax.checked_add(pay.income_tax)?,
            total_net_pay: self.total_net_pay.checked_add(pay.net_pay)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total_employees == 0
    }
}

/// Calculate pay for each record in insertion order, write its report and
/// accumulate the grand totals.
pub fn process_all_employees<W: Write>(
    records: &mut [EmployeeRecord],
    out: &mut W,
) -> Result<GrandTotals, PayrollError> {
    let mut totals = GrandTotals::default();

    report::write_reports_banner(out)?;

    for record in records.iter_mut() {
        let Some(pay) = record.calculate_pay() else {
            return Err(PayrollError::PayOutOfRange {
                name: record.name.clone(),
            });
        };
        log::debug!(
            "Calculated pay for {}: gross {} tax {} net {}",
            record.name,
            pay.gross_pay,
            pay.income_tax,
            pay.net_pay
        );

        report::display_employee_details(record, out)?;
        totals = totals
            .checked_add(record.hours, &pay)
            .ok_or_else(|| PayrollError::PayOutOfRange {
                name: record.name.clone(),
            })?;
    }

    log::info!("Processed {} employee records", totals.total_employees);
    Ok(totals)
}
