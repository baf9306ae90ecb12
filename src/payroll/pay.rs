use rust_decimal::Decimal;

/// Gross pay, tax withheld and net pay for a single pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayBreakdown {
    pub gross_pay: Decimal,
    pub income_tax: Decimal,
    pub net_pay: Decimal,
}

/// Calculate pay from hours worked, hourly rate and tax rate (a fraction).
///
/// No rounding is applied here, so `net_pay == gross_pay - income_tax` holds
/// exactly. Returns `None` when the result does not fit in a `Decimal`.
pub fn calculate_employee_pay(
    hours: Decimal,
    rate: Decimal,
    tax_rate: Decimal,
) -> Option<PayBreakdown> {
    let gross_pay = hours.checked_mul(rate)?;
    let income_tax = gross_pay.checked_mul(tax_rate)?;
    let net_pay = gross_pay.checked_sub(income_tax)?;

    Some(PayBreakdown {
        gross_pay,
        income_tax,
        net_pay,
    })
}
