pub mod attendance;
pub mod implementer;
pub mod repayment;
