use crate::domain::model::{
    Classroom, Enrollment, EnrollStudent, NewStudent, NewTeacher, Session, Signup, Student,
    Teacher, UpdateStudent, UpdateTeacher,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// The REST backend as the client sees it. One method per endpoint; no
/// business rules on this side of the wire.
#[async_trait]
pub trait RecordsGateway: Send + Sync {
    async fn list_classes(&self) -> Result<Vec<Classroom>>;
    async fn create_class(&self, name: &str) -> Result<Classroom>;
    async fn rename_class(&self, id: i64, name: &str) -> Result<Classroom>;
    async fn delete_class(&self, id: i64) -> Result<()>;

    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn create_teacher(&self, req: &NewTeacher) -> Result<Teacher>;
    async fn update_teacher(&self, id: i64, req: &UpdateTeacher) -> Result<Teacher>;
    async fn delete_teacher(&self, id: i64) -> Result<()>;

    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn create_student(&self, req: &NewStudent) -> Result<Student>;
    async fn update_student(&self, id: i64, req: &UpdateStudent) -> Result<Student>;
    async fn delete_student(&self, id: i64) -> Result<()>;

    async fn enroll(&self, req: &EnrollStudent) -> Result<Enrollment>;
    /// Route order is class first, student second.
    async fn unenroll(&self, class_id: i64, student_id: i64) -> Result<()>;

    async fn students_of_teacher(&self, teacher_id: i64) -> Result<Vec<Student>>;
    async fn set_mark(
        &self,
        teacher_id: i64,
        class_id: i64,
        student_id: i64,
        mark: &str,
    ) -> Result<Enrollment>;
    async fn marks_of_student(&self, student_id: i64) -> Result<Vec<Enrollment>>;

    async fn sign_up(&self, req: &Signup) -> Result<()>;
}

/// Local storage for the session flag. Loading a store that has never been
/// written yields `None`, not an error.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn session_path(&self) -> &Path;
    fn page_size(&self) -> usize;
}
