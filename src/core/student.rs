use crate::domain::model::Enrollment;
use crate::domain::ports::RecordsGateway;
use crate::utils::error::Result;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct MarkRow {
    pub class_label: String,
    pub mark: Option<String>,
}

/// The student's grades view: enrollments with class names resolved from the
/// class list, plus the student's own name from the directory.
pub struct StudentScreen<G> {
    gateway: G,
    student_id: i64,
    pub student_name: Option<String>,
    pub marks: Vec<Enrollment>,
    class_names: HashMap<i64, String>,
}

impl<G: RecordsGateway> StudentScreen<G> {
    pub fn new(gateway: G, student_id: i64) -> Self {
        Self {
            gateway,
            student_id,
            student_name: None,
            marks: Vec::new(),
            class_names: HashMap::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let (marks, classes, students) = tokio::try_join!(
            self.gateway.marks_of_student(self.student_id),
            self.gateway.list_classes(),
            self.gateway.list_students()
        )?;

        self.class_names = classes.into_iter().map(|c| (c.id, c.name)).collect();
        self.student_name = students
            .into_iter()
            .find(|s| s.id == self.student_id)
            .map(|s| s.name);
        self.marks = marks;
        Ok(())
    }

    pub fn class_name(&self, class_id: i64) -> String {
        self.class_names
            .get(&class_id)
            .cloned()
            .unwrap_or_else(|| format!("Class #{}", class_id))
    }

    pub fn rows(&self) -> Vec<MarkRow> {
        self.marks
            .iter()
            .map(|e| MarkRow {
                class_label: self.class_name(e.id.class_id),
                mark: e.mark.clone(),
            })
            .collect()
    }
}
