pub mod employee;
pub mod pay;
pub mod totals;

pub use employee::{EmployeeRecord, PayDate, PayPeriod, DATE_FORMAT};
pub use pay::{calculate_employee_pay, PayBreakdown};
pub use totals::{process_all_employees, GrandTotals};
