mod audit;

pub use audit::{Auditor, ReportKind};
