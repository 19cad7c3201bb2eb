//! 邮箱验证码（OTP）模块

pub mod api;
pub mod cells;
pub mod cooldown;
pub mod service;

pub use api::{OtpApi, VerifyOtpRequest};
pub use cells::{OtpCells, OTP_LENGTH};
pub use cooldown::{CountdownHandle, ResendCooldown, RESEND_COOLDOWN_SECS};
pub use service::{OtpVerifier, VerificationState};
