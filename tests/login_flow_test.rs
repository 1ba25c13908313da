use httpmock::prelude::*;
use school_records::core::login::{login, sign_up};
use school_records::domain::model::{Role, Signup};
use school_records::domain::ports::SessionStore;
use school_records::{ClientError, FileSessionStore, HttpGateway, Settings};
use serde_json::json;
use tempfile::TempDir;

fn gateway_for(server: &MockServer) -> HttpGateway {
    let settings = Settings {
        base_url: server.base_url(),
        ..Settings::default()
    };
    HttpGateway::new(&settings).unwrap()
}

fn store_in(dir: &TempDir) -> FileSessionStore {
    FileSessionStore::new(dir.path().join("session.json"))
}

fn teacher_directory() -> serde_json::Value {
    json!([
        {
            "id": 7,
            "name": "Amy Santiago",
            "email": "amy@school.edu",
            "role": "TEACHER",
            "classroom": { "id": 3, "name": "Math" }
        }
    ])
}

fn student_directory() -> serde_json::Value {
    json!([
        { "id": 4, "name": "Joe Bell", "email": "joe@school.edu", "role": "STUDENT" },
        // same email as the teacher above, to pin the precedence rule
        { "id": 5, "name": "Amy Imposter", "email": "amy@school.edu", "role": "STUDENT" }
    ])
}

#[tokio::test]
async fn login_matches_teachers_before_students() {
    let server = MockServer::start();
    let teachers = server.mock(|when, then| {
        when.method(GET).path("/admin/teachers");
        then.status(200).json_body(teacher_directory());
    });
    let students = server.mock(|when, then| {
        when.method(GET).path("/admin/students");
        then.status(200).json_body(student_directory());
    });

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let session = login(&gateway_for(&server), &store, "amy@school.edu")
        .await
        .unwrap();

    assert_eq!(session.role, Role::Teacher);
    assert_eq!(session.teacher_id, Some(7));
    assert_eq!(session.student_id, None);
    teachers.assert();
    students.assert();

    // the trust-on-faith flag is persisted
    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.role, Role::Teacher);
    assert_eq!(stored.teacher_id, Some(7));
}

#[tokio::test]
async fn login_normalizes_the_email_before_matching() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/admin/teachers");
        then.status(200).json_body(teacher_directory());
    });
    server.mock(|when, then| {
        when.method(GET).path("/admin/students");
        then.status(200).json_body(student_directory());
    });

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let session = login(&gateway_for(&server), &store, "  JOE@School.EDU  ")
        .await
        .unwrap();

    assert_eq!(session.role, Role::Student);
    assert_eq!(session.student_id, Some(4));
}

#[tokio::test]
async fn unmatched_email_falls_back_to_admin() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/admin/teachers");
        then.status(200).json_body(teacher_directory());
    });
    server.mock(|when, then| {
        when.method(GET).path("/admin/students");
        then.status(200).json_body(student_directory());
    });

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let session = login(&gateway_for(&server), &store, "ops@school.edu")
        .await
        .unwrap();

    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.teacher_id, None);
    assert_eq!(session.student_id, None);
}

#[tokio::test]
async fn directory_failure_is_a_login_failure_not_an_admin_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/admin/teachers");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/admin/students");
        then.status(200).json_body(student_directory());
    });

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let err = login(&gateway_for(&server), &store, "amy@school.edu")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    // no session flag was written
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn signup_posts_the_form_payload() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/signup").json_body(json!({
            "name": "Jane Doe",
            "email": "jane@school.edu",
            "role": "ADMIN",
            "password": "hunter2"
        }));
        then.status(200);
    });

    let req = Signup {
        name: "Jane Doe".to_string(),
        email: "jane@school.edu".to_string(),
        role: Role::Admin,
        password: "hunter2".to_string(),
    };
    sign_up(&gateway_for(&server), &req).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn signup_rejects_blank_fields_before_the_wire() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/signup");
        then.status(200);
    });

    let req = Signup {
        name: "   ".to_string(),
        email: "jane@school.edu".to_string(),
        role: Role::Student,
        password: "hunter2".to_string(),
    };
    let err = sign_up(&gateway_for(&server), &req).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(mock.hits(), 0);
}
