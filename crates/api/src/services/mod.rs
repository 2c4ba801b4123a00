//! Request-scoped services and outbound integrations.

pub mod auth;
pub mod customer;
pub mod doctor;
pub mod mailer;
pub mod notification;
pub mod schedule;

pub use auth::AuthService;
pub use customer::CustomerService;
pub use doctor::DoctorService;
pub use mailer::{Mailer, MailerError};
pub use notification::NotificationService;
pub use schedule::ScheduleService;

/// Page/limit combinations whose list-cache keys are invalidated on every
/// mutation. Other combinations go stale until their own TTL expires; the
/// short list TTL bounds that window. See DESIGN.md.
pub(crate) const INVALIDATED_LIST_PAGES: [(i64, i64); 3] = [(1, 10), (1, 20), (1, 50)];
