//! Text, table, CSV and JSON rendering of processed payroll records

use crate::payroll::{calculate_employee_pay, EmployeeRecord, GrandTotals, PayBreakdown};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::io::{self, Write};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

const REPORT_WIDTH: usize = 65;
const SUMMARY_WIDTH: usize = 70;

/// Format an amount rounded to two places with thousands separators,
/// e.g. `1234567.891` → `1,234,567.89`
pub fn format_amount(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{fraction}")
}

pub fn format_currency(amount: Decimal) -> String {
    let formatted = format_amount(amount);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${formatted}"),
    }
}

/// Tax rate fraction as a percentage, e.g. `0.175` → `17.50%`
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", (rate * dec!(100)).round_dp(2))
}

pub(crate) fn write_reports_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n\n{}", "#".repeat(SUMMARY_WIDTH))?;
    writeln!(out, "        *** INDIVIDUAL EMPLOYEE PAYROLL REPORTS ***")?;
    writeln!(out, "{}", "#".repeat(SUMMARY_WIDTH))
}

/// Write the full report block for a single employee
pub fn display_employee_details<W: Write>(record: &EmployeeRecord, out: &mut W) -> io::Result<()> {
    let pay = record
        .pay()
        .copied()
        .or_else(|| calculate_employee_pay(record.hours, record.rate, record.tax_rate));
    let money = |amount: fn(&PayBreakdown) -> Decimal| {
        pay.as_ref()
            .map_or_else(|| "n/a".to_string(), |pay| format_currency(amount(pay)))
    };
    let rule = "=".repeat(REPORT_WIDTH);

    writeln!(out, "\n{rule}")?;
    writeln!(out, "PAYROLL REPORT FOR: {}", record.name.to_uppercase())?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{:<25} {}", "Pay Period:", record.period)?;
    writeln!(out, "{:<25} {}", "Total Hours Worked:", format_amount(record.hours))?;
    writeln!(out, "{:<25} {}", "Hourly Rate:", format_currency(record.rate))?;
    writeln!(out, "{}", "-".repeat(REPORT_WIDTH))?;
    writeln!(out, "{:<25} {}", "Gross Pay:", money(|pay| pay.gross_pay))?;
    writeln!(out, "{:<25} {}", "Income Tax Rate:", format_percent(record.tax_rate))?;
    writeln!(out, "{:<25} {}", "Income Tax Withheld:", money(|pay| pay.income_tax))?;
    writeln!(out, "{:<25} {}", "Net Pay:", money(|pay| pay.net_pay))?;
    writeln!(out, "{rule}")
}

/// Write the grand totals summary, or a notice when nothing was processed
pub fn display_grand_totals<W: Write>(totals: &GrandTotals, out: &mut W) -> io::Result<()> {
    let rule = "*".repeat(SUMMARY_WIDTH);

    writeln!(out, "\n{rule}")?;
    writeln!(out, "                 *** GRAND TOTALS SUMMARY ***")?;
    writeln!(out, "{rule}")?;

    if totals.is_empty() {
        writeln!(out, "No employee data was processed.")?;
        return writeln!(out, "{rule}");
    }

    writeln!(out, "{:<30} {}", "Total Number of Employees:", totals.total_employees)?;
    writeln!(out, "{:<30} {}", "Total Hours Worked:", format_amount(totals.total_hours))?;
    writeln!(out, "{}", "-".repeat(SUMMARY_WIDTH))?;
    writeln!(out, "{:<30} {}", "Total Gross Pay:", format_currency(totals.total_gross_pay))?;
    writeln!(out, "{:<30} {}", "Total Tax Withheld:", format_currency(totals.total_tax))?;
    writeln!(out, "{:<30} {}", "Total Net Pay:", format_currency(totals.total_net_pay))?;
    writeln!(out, "{rule}")
}

/// Row for the payroll register output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RegisterRow {
    #[tabled(rename = "Employee")]
    pub name: String,
    #[tabled(rename = "Pay Period")]
    pub pay_period: String,
    #[tabled(rename = "Hours")]
    pub hours: String,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Gross Pay")]
    pub gross_pay: String,
    #[tabled(rename = "Tax Rate")]
    pub tax_rate: String,
    #[tabled(rename = "Tax Withheld")]
    pub income_tax: String,
    #[tabled(rename = "Net Pay")]
    pub net_pay: String,
}

/// One register row per processed record. Unprocessed records are skipped.
pub fn payroll_register(records: &[EmployeeRecord]) -> Vec<RegisterRow> {
    records
        .iter()
        .filter_map(|record| {
            let pay = record.pay()?;
            Some(RegisterRow {
                name: record.name.clone(),
                pay_period: record.period.display(),
                hours: format_amount(record.hours),
                rate: format_currency(record.rate),
                gross_pay: format_currency(pay.gross_pay),
                tax_rate: format_percent(record.tax_rate),
                income_tax: format_currency(pay.income_tax),
                net_pay: format_currency(pay.net_pay),
            })
        })
        .collect()
}

pub fn write_register_table<W: Write>(rows: &[RegisterRow], out: &mut W) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No employee records to list");
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    writeln!(out, "\n{}", table)
}

pub fn write_register_csv<W: Write>(rows: &[RegisterRow], out: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Grand totals for JSON output
#[derive(Debug, Serialize)]
struct TotalsData {
    total_employees: usize,
    total_hours: String,
    total_gross_pay: String,
    total_tax: String,
    total_net_pay: String,
}

impl From<&GrandTotals> for TotalsData {
    fn from(totals: &GrandTotals) -> Self {
        TotalsData {
            total_employees: totals.total_employees,
            total_hours: format!("{:.2}", totals.total_hours.round_dp(2)),
            total_gross_pay: format!("{:.2}", totals.total_gross_pay.round_dp(2)),
            total_tax: format!("{:.2}", totals.total_tax.round_dp(2)),
            total_net_pay: format!("{:.2}", totals.total_net_pay.round_dp(2)),
        }
    }
}

pub fn write_totals_json<W: Write>(totals: &GrandTotals, out: &mut W) -> anyhow::Result<()> {
    let data = TotalsData::from(totals);
    writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::PayPeriod;
    use chrono::NaiveDate;

    fn jane_doe() -> EmployeeRecord {
        let period = PayPeriod {
            from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().into(),
            to_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().into(),
        };
        let mut record =
            EmployeeRecord::new("Jane Doe", period, dec!(40), dec!(20.00), dec!(0.10));
        record.calculate_pay();
        record
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out: Vec<u8> = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn amounts_have_thousands_separators() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(999.999)), "1,000.00");
        assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_amount(dec!(100000)), "100,000.00");
        assert_eq!(format_amount(dec!(-4321.5)), "-4,321.50");
    }

    #[test]
    fn amounts_round_half_to_even() {
        assert_eq!(format_amount(dec!(0.125)), "0.12");
        assert_eq!(format_amount(dec!(0.135)), "0.14");
    }

    #[test]
    fn currency_and_percent() {
        assert_eq!(format_currency(dec!(2500)), "$2,500.00");
        assert_eq!(format_currency(dec!(-12.3)), "-$12.30");
        assert_eq!(format_percent(dec!(0.10)), "10.00%");
        assert_eq!(format_percent(dec!(0.175)), "17.50%");
        assert_eq!(format_percent(dec!(1)), "100.00%");
    }

    #[test]
    fn employee_details_block() {
        let text = render(|out| display_employee_details(&jane_doe(), out));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(65));
        assert_eq!(lines[2], "PAYROLL REPORT FOR: JANE DOE");
        assert_eq!(lines[4], "Pay Period:               01/01/2024 - 01/15/2024");
        assert_eq!(lines[5], "Total Hours Worked:       40.00");
        assert_eq!(lines[6], "Hourly Rate:              $20.00");
        assert_eq!(lines[7], "-".repeat(65));
        assert_eq!(lines[8], "Gross Pay:                $800.00");
        assert_eq!(lines[9], "Income Tax Rate:          10.00%");
        assert_eq!(lines[10], "Income Tax Withheld:      $80.00");
        assert_eq!(lines[11], "Net Pay:                  $720.00");
        assert_eq!(lines[12], "=".repeat(65));
    }

    #[test]
    fn grand_totals_block() {
        let totals = GrandTotals {
            total_employees: 2,
            total_hours: dec!(1520.5),
            total_gross_pay: dec!(30410),
            total_tax: dec!(3041),
            total_net_pay: dec!(27369),
        };
        let text = render(|out| display_grand_totals(&totals, out));

        assert!(text.contains("*** GRAND TOTALS SUMMARY ***"));
        assert!(text.contains("Total Number of Employees:     2\n"));
        assert!(text.contains("Total Hours Worked:            1,520.50\n"));
        assert!(text.contains("Total Gross Pay:               $30,410.00\n"));
        assert!(text.contains("Total Tax Withheld:            $3,041.00\n"));
        assert!(text.contains("Total Net Pay:                 $27,369.00\n"));
        assert!(!text.contains("No employee data was processed."));
    }

    #[test]
    fn empty_grand_totals() {
        let text = render(|out| display_grand_totals(&GrandTotals::default(), out));
        assert!(text.contains("No employee data was processed."));
        assert!(!text.contains("Total Gross Pay:"));
        assert!(text.trim_end().ends_with(&"*".repeat(70)));
    }

    #[test]
    fn register_rows_skip_unprocessed_records() {
        let processed = jane_doe();
        let unprocessed =
            EmployeeRecord::new("Pending", processed.period.clone(), dec!(8), dec!(15), dec!(0.2));

        let rows = payroll_register(&[processed, unprocessed]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Jane Doe");
        assert_eq!(rows[0].pay_period, "01/01/2024 - 01/15/2024");
        assert_eq!(rows[0].gross_pay, "$800.00");
        assert_eq!(rows[0].tax_rate, "10.00%");
        assert_eq!(rows[0].net_pay, "$720.00");
    }

    #[test]
    fn details_fall_back_to_calculated_pay() {
        let record = EmployeeRecord::new(
            "Pending",
            jane_doe().period,
            dec!(10),
            dec!(1250),
            dec!(0.25),
        );
        let text = render(|out| display_employee_details(&record, out));
        assert!(text.contains("Gross Pay:                $12,500.00"));
        assert!(text.contains("Net Pay:                  $9,375.00"));
        assert!(record.pay().is_none());
    }

    #[test]
    fn details_show_unavailable_pay_for_out_of_range_figures() {
        let huge = dec!(100000000000000000000);
        let record = EmployeeRecord::new("Big", jane_doe().period, huge, huge, dec!(0.1));
        let text = render(|out| display_employee_details(&record, out));
        assert!(text.contains("Gross Pay:                n/a"));
        assert!(text.contains("Net Pay:                  n/a"));
        assert!(text.contains("Hourly Rate:              $100,000,000,000,000,000,000.00"));
    }

    #[test]
    fn register_table_and_csv() {
        let rows = payroll_register(&[jane_doe()]);

        let table = render(|out| write_register_table(&rows, out));
        assert!(table.contains("Employee"));
        assert!(table.contains("Jane Doe"));
        assert!(table.contains("$720.00"));

        let empty = render(|out| write_register_table(&[], out));
        assert!(empty.contains("No employee records to list"));

        let mut csv_out: Vec<u8> = Vec::new();
        write_register_csv(&rows, &mut csv_out).unwrap();
        let csv_text = String::from_utf8(csv_out).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next(),
            Some("name,pay_period,hours,rate,gross_pay,tax_rate,income_tax,net_pay")
        );
        assert_eq!(
            lines.next(),
            Some("Jane Doe,01/01/2024 - 01/15/2024,40.00,$20.00,$800.00,10.00%,$80.00,$720.00")
        );
    }

    #[test]
    fn totals_as_json() {
        let totals = GrandTotals {
            total_employees: 1,
            total_hours: dec!(40),
            total_gross_pay: dec!(800),
            total_tax: dec!(80),
            total_net_pay: dec!(720),
        };
        let mut out: Vec<u8> = Vec::new();
        write_totals_json(&totals, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["total_employees"], 1);
        assert_eq!(value["total_hours"], "40.00");
        assert_eq!(value["total_gross_pay"], "800.00");
        assert_eq!(value["total_net_pay"], "720.00");
    }
}
