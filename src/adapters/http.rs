use crate::domain::model::{
    Classroom, EnrollStudent, Enrollment, MarkUpdate, NewClassroom, NewStudent, NewTeacher,
    Signup, Student, Teacher, UpdateStudent, UpdateTeacher,
};
use crate::domain::ports::{ConfigProvider, RecordsGateway};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Shared HTTP client: fixed base URL, JSON headers, request timeout. All
/// endpoint paths in the backend surface go through here.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: String,
}

impl HttpGateway {
    pub fn new(config: &impl ConfigProvider) -> Result<Self> {
        validate_url("base_url", config.base_url())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let checked = Self::check(response)?;
        Ok(checked.json().await?)
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("PUT {}", url);
        let response = self.client.put(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::check(response).map(|_| ())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::check(response).map(|_| ())
    }
}

#[async_trait]
impl RecordsGateway for HttpGateway {
    async fn list_classes(&self) -> Result<Vec<Classroom>> {
        self.get_json("/admin/classes").await
    }

    async fn create_class(&self, name: &str) -> Result<Classroom> {
        let req = NewClassroom {
            name: name.to_string(),
        };
        self.post_json("/admin/classes", &req).await
    }

    async fn rename_class(&self, id: i64, name: &str) -> Result<Classroom> {
        let req = NewClassroom {
            name: name.to_string(),
        };
        self.put_json(&format!("/admin/classes/{}", id), &req).await
    }

    async fn delete_class(&self, id: i64) -> Result<()> {
        self.delete(&format!("/admin/classes/{}", id)).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.get_json("/admin/teachers").await
    }

    async fn create_teacher(&self, req: &NewTeacher) -> Result<Teacher> {
        self.post_json("/admin/teachers", req).await
    }

    async fn update_teacher(&self, id: i64, req: &UpdateTeacher) -> Result<Teacher> {
        self.put_json(&format!("/admin/teachers/{}", id), req).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<()> {
        self.delete(&format!("/admin/teachers/{}", id)).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.get_json("/admin/students").await
    }

    async fn create_student(&self, req: &NewStudent) -> Result<Student> {
        self.post_json("/admin/students", req).await
    }

    async fn update_student(&self, id: i64, req: &UpdateStudent) -> Result<Student> {
        self.put_json(&format!("/admin/students/{}", id), req).await
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.delete(&format!("/admin/students/{}", id)).await
    }

    async fn enroll(&self, req: &EnrollStudent) -> Result<Enrollment> {
        self.post_json("/admin/enrollments", req).await
    }

    async fn unenroll(&self, class_id: i64, student_id: i64) -> Result<()> {
        self.delete(&format!("/admin/enrollments/{}/{}", class_id, student_id))
            .await
    }

    async fn students_of_teacher(&self, teacher_id: i64) -> Result<Vec<Student>> {
        self.get_json(&format!("/teachers/{}/students", teacher_id))
            .await
    }

    async fn set_mark(
        &self,
        teacher_id: i64,
        class_id: i64,
        student_id: i64,
        mark: &str,
    ) -> Result<Enrollment> {
        let req = MarkUpdate {
            mark: mark.to_string(),
        };
        self.put_json(
            &format!(
                "/teachers/{}/classes/{}/students/{}/mark",
                teacher_id, class_id, student_id
            ),
            &req,
        )
        .await
    }

    async fn marks_of_student(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        self.get_json(&format!("/students/{}/marks", student_id))
            .await
    }

    async fn sign_up(&self, req: &Signup) -> Result<()> {
        self.post_no_content("/signup", req).await
    }
}
