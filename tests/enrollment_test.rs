use httpmock::prelude::*;
use school_records::core::enrollments::EnrollmentEditor;
use school_records::{ClientError, HttpGateway, Settings};
use serde_json::json;

fn gateway_for(server: &MockServer) -> HttpGateway {
    let settings = Settings {
        base_url: server.base_url(),
        ..Settings::default()
    };
    HttpGateway::new(&settings).unwrap()
}

fn mock_directories(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/admin/classes");
        then.status(200).json_body(json!([
            { "id": 1, "name": "Math" },
            { "id": 2, "name": "Bio" },
            { "id": 3, "name": "Art" }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/admin/students");
        then.status(200).json_body(json!([
            { "id": 5, "name": "Joe Bell", "email": "joe@school.edu", "role": "STUDENT" }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/students/5/marks");
        then.status(200).json_body(json!([
            { "id": { "studentId": 5, "classId": 1 }, "mark": "B" }
        ]));
    });
}

#[tokio::test]
async fn editor_resolves_names_and_filters_addable_classes() {
    let server = MockServer::start();
    mock_directories(&server);

    let editor = EnrollmentEditor::load(gateway_for(&server), 5).await.unwrap();

    assert_eq!(editor.student.name, "Joe Bell");
    assert_eq!(editor.enrollments.len(), 1);
    assert_eq!(editor.class_name(1), "Math");
    assert_eq!(editor.class_name(42), "Class #42");

    let addable: Vec<i64> = editor.addable_classes().iter().map(|c| c.id).collect();
    assert_eq!(addable, vec![2, 3]);
}

#[tokio::test]
async fn loading_an_unknown_student_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/admin/classes");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/admin/students");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/students/42/marks");
        then.status(200).json_body(json!([]));
    });

    let err = EnrollmentEditor::load(gateway_for(&server), 42)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn add_enrollment_posts_the_pair_and_appends_locally() {
    let server = MockServer::start();
    mock_directories(&server);
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/admin/enrollments")
            .json_body(json!({ "studentId": 5, "classId": 2 }));
        then.status(200).json_body(json!({
            "id": { "studentId": 5, "classId": 2 },
            "mark": null
        }));
    });

    let mut editor = EnrollmentEditor::load(gateway_for(&server), 5).await.unwrap();
    let created = editor.add(2).await.unwrap();

    // a fresh enrollment carries no mark
    assert!(created.mark.is_none());
    assert_eq!(editor.enrollments.len(), 2);
    post.assert();

    // second attempt is rejected locally, the API is not called again
    let err = editor.add(2).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(post.hits(), 1);
}

#[tokio::test]
async fn add_into_an_unknown_class_is_rejected() {
    let server = MockServer::start();
    mock_directories(&server);

    let mut editor = EnrollmentEditor::load(gateway_for(&server), 5).await.unwrap();
    let err = editor.add(99).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn remove_enrollment_uses_class_then_student_route_order() {
    let server = MockServer::start();
    mock_directories(&server);
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/admin/enrollments/1/5");
        then.status(204);
    });

    let mut editor = EnrollmentEditor::load(gateway_for(&server), 5).await.unwrap();
    editor.remove(1).await.unwrap();

    assert!(editor.enrollments.is_empty());
    delete.assert();

    // removing a class the student is not in never hits the API
    let err = editor.remove(3).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(delete.hits(), 1);
}
