pub mod attendance_service;
pub mod payout_service;
pub mod repayment_service;

pub use attendance_service::{AttendanceService, AttendanceSource};
pub use payout_service::{ImplementerRunResult, PayoutService};
pub use repayment_service::RepaymentService;
