use crate::domain::model::{
    Classroom, NewStudent, NewTeacher, Student, Teacher, UpdateStudent, UpdateTeacher,
};
use crate::domain::ports::RecordsGateway;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_non_empty_string;

/// Admin dashboard state: the three lists, each mirroring its last successful
/// fetch. Mutations call the API first and then patch the local list, so what
/// gets rendered afterwards is the optimistic view, not a refetch.
pub struct AdminScreen<G> {
    gateway: G,
    pub classes: Vec<Classroom>,
    pub teachers: Vec<Teacher>,
    pub students: Vec<Student>,
}

impl<G: RecordsGateway> AdminScreen<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            classes: Vec::new(),
            teachers: Vec::new(),
            students: Vec::new(),
        }
    }

    pub async fn refresh_classes(&mut self) -> Result<()> {
        self.classes = self.gateway.list_classes().await?;
        tracing::debug!("Fetched {} classes", self.classes.len());
        Ok(())
    }

    pub async fn refresh_teachers(&mut self) -> Result<()> {
        self.teachers = self.gateway.list_teachers().await?;
        tracing::debug!("Fetched {} teachers", self.teachers.len());
        Ok(())
    }

    pub async fn refresh_students(&mut self) -> Result<()> {
        self.students = self.gateway.list_students().await?;
        tracing::debug!("Fetched {} students", self.students.len());
        Ok(())
    }

    // ---- Classes ----

    pub async fn add_class(&mut self, name: &str) -> Result<Classroom> {
        let name = name.trim();
        validate_non_empty_string("class name", name)?;
        let created = self.gateway.create_class(name).await?;
        self.classes.push(created.clone());
        Ok(created)
    }

    pub async fn rename_class(&mut self, id: i64, name: &str) -> Result<Classroom> {
        let name = name.trim();
        validate_non_empty_string("class name", name)?;
        let updated = self.gateway.rename_class(id, name).await?;
        if let Some(slot) = self.classes.iter_mut().find(|c| c.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn remove_class(&mut self, id: i64) -> Result<()> {
        self.gateway.delete_class(id).await?;
        self.classes.retain(|c| c.id != id);
        Ok(())
    }

    // ---- Teachers ----

    /// A teacher is always created into an existing class; the class list
    /// must have been refreshed first.
    pub async fn create_teacher(&mut self, req: &NewTeacher) -> Result<Teacher> {
        validate_non_empty_string("name", &req.name)?;
        validate_non_empty_string("email", &req.email)?;
        validate_non_empty_string("password", &req.password)?;
        if !self.classes.iter().any(|c| c.id == req.class_id) {
            return Err(ClientError::NotFound {
                what: format!("class #{}", req.class_id),
            });
        }
        let created = self.gateway.create_teacher(req).await?;
        self.teachers.push(created.clone());
        Ok(created)
    }

    /// Merge the requested changes over the teacher's current record; fields
    /// the caller left out keep their fetched values. `class_id: None` keeps
    /// the current class assignment.
    pub async fn update_teacher(
        &mut self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
        class_id: Option<i64>,
    ) -> Result<Teacher> {
        let current = self
            .teachers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::NotFound {
                what: format!("teacher #{}", id),
            })?;
        let req = UpdateTeacher {
            name: name.unwrap_or_else(|| current.name.clone()),
            email: email.unwrap_or_else(|| current.email.clone()),
            class_id,
        };
        let updated = self.gateway.update_teacher(id, &req).await?;
        if let Some(slot) = self.teachers.iter_mut().find(|t| t.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn remove_teacher(&mut self, id: i64) -> Result<()> {
        self.gateway.delete_teacher(id).await?;
        self.teachers.retain(|t| t.id != id);
        Ok(())
    }

    // ---- Students ----

    pub async fn create_student(&mut self, req: &NewStudent) -> Result<Student> {
        validate_non_empty_string("name", &req.name)?;
        validate_non_empty_string("email", &req.email)?;
        validate_non_empty_string("password", &req.password)?;
        let created = self.gateway.create_student(req).await?;
        self.students.push(created.clone());
        Ok(created)
    }

    pub async fn update_student(
        &mut self,
        id: i64,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<Student> {
        let current = self
            .students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ClientError::NotFound {
                what: format!("student #{}", id),
            })?;
        let req = UpdateStudent {
            name: name.unwrap_or_else(|| current.name.clone()),
            email: email.unwrap_or_else(|| current.email.clone()),
        };
        let updated = self.gateway.update_student(id, &req).await?;
        if let Some(slot) = self.students.iter_mut().find(|s| s.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn remove_student(&mut self, id: i64) -> Result<()> {
        self.gateway.delete_student(id).await?;
        self.students.retain(|s| s.id != id);
        Ok(())
    }
}

/// "Class #id" when the teacher has a class with no resolvable name.
pub fn class_label(classroom: Option<&Classroom>) -> String {
    match classroom {
        Some(c) if !c.name.is_empty() => c.name.clone(),
        Some(c) => format!("Class #{}", c.id),
        None => "—".to_string(),
    }
}
