use super::pay::{calculate_employee_pay, PayBreakdown};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Date format used for pay period entry
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A validated date that displays exactly as it was entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayDate {
    date: NaiveDate,
    entered: String,
}

impl PayDate {
    pub fn new(date: NaiveDate, entered: impl Into<String>) -> Self {
        PayDate {
            date,
            entered: entered.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl From<NaiveDate> for PayDate {
    fn from(date: NaiveDate) -> Self {
        PayDate::new(date, date.format(DATE_FORMAT).to_string())
    }
}

impl std::fmt::Display for PayDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entered)
    }
}

/// Pay period covered by a record. No ordering is enforced between the dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPeriod {
    pub from_date: PayDate,
    pub to_date: PayDate,
}

impl PayPeriod {
    /// Display as "01/01/2024 - 01/15/2024"
    pub fn display(&self) -> String {
        format!("{} - {}", self.from_date, self.to_date)
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A single employee's pay period entry.
///
/// `pay` stays `None` until the record has been processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub name: String,
    pub period: PayPeriod,
    pub hours: Decimal,
    pub rate: Decimal,
    pub tax_rate: Decimal,
    pay: Option<PayBreakdown>,
}

impl EmployeeRecord {
    pub fn new(
        name: impl Into<String>,
        period: PayPeriod,
        hours: Decimal,
        rate: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        EmployeeRecord {
            name: name.into(),
            period,
            hours,
            rate,
            tax_rate,
            pay: None,
        }
    }

    /// Derived pay, if the record has been processed
    pub fn pay(&self) -> Option<&PayBreakdown> {
        self.pay.as_ref()
    }

    /// Calculate pay from the entered figures and store it on the record.
    /// `None` if the figures are outside `Decimal` range.
    pub fn calculate_pay(&mut self) -> Option<PayBreakdown> {
        self.pay = calculate_employee_pay(self.hours, self.rate, self.tax_rate);
        self.pay
    }
}
