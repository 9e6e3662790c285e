//! Scheduler-facing trigger endpoints. All routes here sit behind the
//! shared-secret bearer check in `middleware::trigger`.

pub mod payout;
pub mod repayment;
