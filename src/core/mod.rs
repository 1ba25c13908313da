pub mod admin;
pub mod enrollments;
pub mod login;
pub mod paging;
pub mod student;
pub mod teacher;

pub use crate::domain::model::{Classroom, Enrollment, Role, Session, Student, Teacher};
pub use crate::domain::ports::{ConfigProvider, RecordsGateway, SessionStore};
pub use crate::utils::error::Result;
