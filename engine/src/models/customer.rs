// One row of the customer registration export, as typed by the operator.
// Fields stay raw strings; validation happens in the audit service.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// 1-based line number in the source file, header included.
    pub line: usize,
    pub name: String,
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registered_on: Option<NaiveDate>,
}
