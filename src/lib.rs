pub mod portal;

// 重新导出常用类型，方便外部使用
pub use portal::{
    auth::{CredentialExchange, SignupForm},
    client::{ClientConfig, PortalClient},
    context::{AppContext, ViewScope},
    error::{PortalError, PortalResult},
    listener::{Notification, NotificationKind, PortalListener},
    otp::{OtpVerifier, VerificationState},
    project::{Project, ProjectEditor, ProjectStatus},
    routing::{PageId, Route},
    session::{SessionOutcome, SessionResolver},
};
