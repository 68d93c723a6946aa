//! HTTP API module for the payslip parser.
//!
//! This module exposes the payslip and schedule parsers over REST:
//! `POST /payslip`, `POST /schedule` and `POST /archive-name`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ArchiveNameRequest, PayslipRequest, ScheduleRequest};
pub use response::{ApiError, ArchiveNameResponse};
pub use state::AppState;
