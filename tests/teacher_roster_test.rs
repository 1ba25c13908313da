use httpmock::prelude::*;
use school_records::core::teacher::TeacherScreen;
use school_records::{ClientError, HttpGateway, Settings};
use serde_json::json;

fn gateway_for(server: &MockServer) -> HttpGateway {
    let settings = Settings {
        base_url: server.base_url(),
        ..Settings::default()
    };
    HttpGateway::new(&settings).unwrap()
}

fn mock_roster_base(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/teachers/7/students");
        then.status(200).json_body(json!([
            { "id": 5, "name": "Joe Bell", "email": "joe@school.edu", "role": "STUDENT" },
            { "id": 6, "name": "Ann Lee", "email": "ann@school.edu", "role": "STUDENT" },
            { "id": 8, "name": "Pat Kim", "email": "pat@school.edu", "role": "STUDENT" }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/admin/teachers");
        then.status(200).json_body(json!([{
            "id": 7,
            "name": "Amy Santiago",
            "email": "amy@school.edu",
            "role": "TEACHER",
            "classroom": { "id": 3, "name": "Math" }
        }]));
    });
}

#[tokio::test]
async fn roster_joins_each_student_with_their_mark_in_the_class() {
    let server = MockServer::start();
    mock_roster_base(&server);
    // Joe has a mark in class 3 and in some other class
    server.mock(|when, then| {
        when.method(GET).path("/students/5/marks");
        then.status(200).json_body(json!([
            { "id": { "studentId": 5, "classId": 3 }, "mark": "A" },
            { "id": { "studentId": 5, "classId": 9 }, "mark": "C" }
        ]));
    });
    // Ann is enrolled elsewhere only
    server.mock(|when, then| {
        when.method(GET).path("/students/6/marks");
        then.status(200).json_body(json!([
            { "id": { "studentId": 6, "classId": 9 }, "mark": "B" }
        ]));
    });
    // Pat's marks lookup blows up; the roster row survives with an empty cell
    server.mock(|when, then| {
        when.method(GET).path("/students/8/marks");
        then.status(500);
    });

    let mut screen = TeacherScreen::new(gateway_for(&server), 7);
    screen.refresh().await.unwrap();

    assert_eq!(screen.class_label(), "Math");
    let marks: Vec<Option<&str>> = screen.rows.iter().map(|r| r.mark.as_deref()).collect();
    assert_eq!(marks, vec![Some("A"), None, None]);
}

#[tokio::test]
async fn set_mark_targets_the_teachers_own_class_and_patches_the_row() {
    let server = MockServer::start();
    mock_roster_base(&server);
    for student in [5, 6, 8] {
        server.mock(|when, then| {
            when.method(GET).path(format!("/students/{}/marks", student));
            then.status(200).json_body(json!([]));
        });
    }
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/teachers/7/classes/3/students/6/mark")
            .json_body(json!({ "mark": "A-" }));
        then.status(200).json_body(json!({
            "id": { "studentId": 6, "classId": 3 },
            "mark": "A-"
        }));
    });

    let mut screen = TeacherScreen::new(gateway_for(&server), 7);
    screen.refresh().await.unwrap();

    let updated = screen.set_mark(6, "A-").await.unwrap();
    assert_eq!(updated.mark.as_deref(), Some("A-"));

    let ann = screen.rows.iter().find(|r| r.student.id == 6).unwrap();
    assert_eq!(ann.mark.as_deref(), Some("A-"));
    put.assert();
}

#[tokio::test]
async fn teacher_without_a_class_still_lists_students_but_cannot_mark() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/teachers/7/students");
        then.status(200).json_body(json!([
            { "id": 5, "name": "Joe Bell", "email": "joe@school.edu", "role": "STUDENT" }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/admin/teachers");
        then.status(200).json_body(json!([{
            "id": 7,
            "name": "Amy Santiago",
            "email": "amy@school.edu",
            "role": "TEACHER",
            "classroom": null
        }]));
    });

    let mut screen = TeacherScreen::new(gateway_for(&server), 7);
    screen.refresh().await.unwrap();

    // rows render, marks are simply unknown
    assert_eq!(screen.rows.len(), 1);
    assert!(screen.rows[0].mark.is_none());

    let err = screen.set_mark(5, "A").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}
