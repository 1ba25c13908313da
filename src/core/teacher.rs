use crate::domain::model::{Classroom, Enrollment, Student};
use crate::domain::ports::RecordsGateway;
use crate::utils::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct RosterRow {
    pub student: Student,
    pub mark: Option<String>,
}

/// The teacher's view: their students joined with the mark each one holds in
/// the teacher's own class. The class is resolved from the teacher directory
/// because the roster endpoint does not carry it.
pub struct TeacherScreen<G> {
    gateway: G,
    teacher_id: i64,
    pub classroom: Option<Classroom>,
    pub rows: Vec<RosterRow>,
}

impl<G: RecordsGateway> TeacherScreen<G> {
    pub fn new(gateway: G, teacher_id: i64) -> Self {
        Self {
            gateway,
            teacher_id,
            classroom: None,
            rows: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let (students, teachers) = tokio::try_join!(
            self.gateway.students_of_teacher(self.teacher_id),
            self.gateway.list_teachers()
        )?;

        let classroom = teachers
            .into_iter()
            .find(|t| t.id == self.teacher_id)
            .and_then(|t| t.classroom);

        let mut rows = Vec::with_capacity(students.len());
        match &classroom {
            Some(class) => {
                for student in students {
                    // A failed marks lookup leaves the cell empty rather than
                    // failing the whole roster.
                    let mark = match self.gateway.marks_of_student(student.id).await {
                        Ok(marks) => marks
                            .into_iter()
                            .find(|e| e.id.class_id == class.id)
                            .and_then(|e| e.mark),
                        Err(e) => {
                            tracing::warn!("Marks lookup failed for student #{}: {}", student.id, e);
                            None
                        }
                    };
                    rows.push(RosterRow { student, mark });
                }
            }
            None => {
                tracing::warn!("Teacher #{} has no assigned class", self.teacher_id);
                rows.extend(
                    students
                        .into_iter()
                        .map(|student| RosterRow { student, mark: None }),
                );
            }
        }

        self.classroom = classroom;
        self.rows = rows;
        Ok(())
    }

    pub fn class_label(&self) -> String {
        crate::core::admin::class_label(self.classroom.as_ref())
    }

    /// Set or replace the mark for one of this teacher's students in the
    /// teacher's own class. Covers both "enter" and "edit"; the backend
    /// upserts on the (student, class) pair.
    pub async fn set_mark(&mut self, student_id: i64, mark: &str) -> Result<Enrollment> {
        let class_id = self
            .classroom
            .as_ref()
            .map(|c| c.id)
            .ok_or_else(|| ClientError::NotFound {
                what: "assigned class for this teacher".to_string(),
            })?;
        let updated = self
            .gateway
            .set_mark(self.teacher_id, class_id, student_id, mark)
            .await?;
        if let Some(row) = self.rows.iter_mut().find(|r| r.student.id == student_id) {
            row.mark = updated.mark.clone();
        }
        Ok(updated)
    }
}
