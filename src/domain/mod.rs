pub mod catalog;
pub mod payment;
pub mod user;

pub use catalog::{AccessTier, Course, CourseType, Lesson};
pub use payment::PaymentEvent;
pub use user::User;
