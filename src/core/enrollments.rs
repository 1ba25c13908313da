use crate::domain::model::{Classroom, EnrollStudent, Enrollment, Student};
use crate::domain::ports::RecordsGateway;
use crate::utils::error::{ClientError, Result};
use std::collections::HashSet;

/// Enrollment editing for one student: their enrollments plus the class list
/// for name resolution and the "addable" filter. Mutations patch the local
/// list after the API call succeeds.
pub struct EnrollmentEditor<G> {
    gateway: G,
    pub student: Student,
    pub enrollments: Vec<Enrollment>,
    pub classes: Vec<Classroom>,
}

impl<G: RecordsGateway> EnrollmentEditor<G> {
    pub async fn load(gateway: G, student_id: i64) -> Result<Self> {
        let (classes, students, enrollments) = tokio::try_join!(
            gateway.list_classes(),
            gateway.list_students(),
            gateway.marks_of_student(student_id)
        )?;
        let student = students
            .into_iter()
            .find(|s| s.id == student_id)
            .ok_or_else(|| ClientError::NotFound {
                what: format!("student #{}", student_id),
            })?;
        Ok(Self {
            gateway,
            student,
            enrollments,
            classes,
        })
    }

    fn enrolled_ids(&self) -> HashSet<i64> {
        self.enrollments.iter().map(|e| e.id.class_id).collect()
    }

    /// Classes the student is not yet enrolled in.
    pub fn addable_classes(&self) -> Vec<&Classroom> {
        let enrolled = self.enrolled_ids();
        self.classes
            .iter()
            .filter(|c| !enrolled.contains(&c.id))
            .collect()
    }

    pub fn class_name(&self, class_id: i64) -> String {
        self.classes
            .iter()
            .find(|c| c.id == class_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Class #{}", class_id))
    }

    /// New enrollments start with no mark.
    pub async fn add(&mut self, class_id: i64) -> Result<Enrollment> {
        if !self.classes.iter().any(|c| c.id == class_id) {
            return Err(ClientError::NotFound {
                what: format!("class #{}", class_id),
            });
        }
        if self.enrolled_ids().contains(&class_id) {
            return Err(ClientError::Validation {
                message: format!(
                    "{} is already enrolled in {}",
                    self.student.name,
                    self.class_name(class_id)
                ),
            });
        }
        let req = EnrollStudent {
            student_id: self.student.id,
            class_id,
        };
        let created = self.gateway.enroll(&req).await?;
        self.enrollments.push(created.clone());
        Ok(created)
    }

    pub async fn remove(&mut self, class_id: i64) -> Result<()> {
        if !self.enrolled_ids().contains(&class_id) {
            return Err(ClientError::Validation {
                message: format!(
                    "{} is not enrolled in class #{}",
                    self.student.name, class_id
                ),
            });
        }
        self.gateway.unenroll(class_id, self.student.id).await?;
        self.enrollments.retain(|e| e.id.class_id != class_id);
        Ok(())
    }
}
