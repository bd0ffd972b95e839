mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use reqwest::{Method, StatusCode};
use serde_json::json;

use campus_portal::api::MemoryApiClient;
use campus_portal::models::{ChangePasswordRequest, CourseInfo, PaymentStatus, StudentInfo};
use campus_portal::portal::{
    CREATE_PAYMENT_PROMPT, PaymentDesk, ScholarshipBoard, StudentPortal, TeacherPortal,
    average_gpa,
};

use common::RecordingShell;

fn student_portal(api: &Arc<MemoryApiClient>, confirm: bool) -> (StudentPortal, Arc<RecordingShell>) {
    let shell = Arc::new(RecordingShell::new(confirm));
    (StudentPortal::new(api.clone(), shell.clone()), shell)
}

#[tokio::test]
async fn schedule_comes_with_grid_events() {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(
        Method::GET,
        "student/schedule",
        json!({
            "studentId": 7,
            "studentCode": "SV001",
            "studentName": "Nguyễn Văn A",
            "semester": "2024-1",
            "totalCredits": 6,
            "scheduleItems": [
                { "courseId": 1, "courseCode": "IT01", "courseName": "Lập trình C", "credit": 3,
                  "period": "1-3", "dayOfWeek": "Monday", "lecturerName": "GV A", "className": "CNTT01", "room": "A101" },
                { "courseId": 2, "courseCode": "MA01", "courseName": "Giải tích", "credit": 3,
                  "period": "7", "dayOfWeek": "Thứ 6", "lecturerName": "GV B", "className": "CNTT01", "room": "", "classroom": null }
            ]
        }),
    );
    let (portal, _) = student_portal(&api, true);

    let timetable = portal.schedule("2024-1").await.expect("schedule");

    assert_eq!(timetable.schedule.total_credits, 6);
    let events = timetable.events;
    assert_eq!((events[0].day, events[0].start, events[0].end), (1, 1, 4));
    assert_eq!(events[0].title, "IT01 - Lập trình C");
    assert_eq!((events[1].day, events[1].start, events[1].end), (5, 7, 8));
    assert_eq!(events[1].room, "Chưa xác định");
    assert_ne!(events[0].color, events[1].color);
}

#[tokio::test]
async fn semesters_fall_back_when_unavailable() {
    let api = Arc::new(MemoryApiClient::new());
    let (portal, _) = student_portal(&api, true);

    let semesters = portal.semesters().await;

    assert_eq!(
        semesters.iter().map(|s| s.semester.as_str()).collect::<Vec<_>>(),
        vec!["2024-2", "2024-1", "2024-3"]
    );
    assert_eq!(semesters[2].display(), "Học kỳ hè (2024-2025)");
}

#[tokio::test]
async fn registration_board_hides_completed_courses() {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(
        Method::GET,
        "student/grades",
        json!({
            "studentId": 7, "studentCode": "SV001", "studentName": "A", "gpa": 3.1,
            "gradeItems": [
                { "courseId": 1, "courseCode": "IT01", "courseName": "Lập trình C", "credit": 3,
                  "grade": "A", "semester": "2023-2", "status": "Đã hoàn thành" }
            ]
        }),
    );
    api.respond(
        Method::GET,
        "student/available-courses",
        json!([
            { "courseId": 1, "courseCode": "IT01", "courseName": "Lập trình C", "credit": 3, "canRegister": true },
            { "courseId": 2, "courseCode": "IT02", "courseName": "Cấu trúc dữ liệu", "credit": 4, "canRegister": true },
            { "courseId": 3, "courseCode": "IT03", "courseName": "Mạng", "credit": 3, "canUnregister": true }
        ]),
    );
    let (portal, _) = student_portal(&api, true);

    let board = portal.registration_board("2024-1").await.expect("board");

    assert_eq!(board.available.iter().map(|c| c.course_id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(board.enrolled.iter().map(|c| c.course_id).collect::<Vec<_>>(), vec![3]);
    assert_eq!(board.completed.len(), 1);
    assert_eq!(board.registrable_count(), 1);
}

#[tokio::test]
async fn unregister_needs_confirmation() {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(
        Method::DELETE,
        "student/courses/3",
        json!({ "success": true, "message": "Hủy đăng ký thành công" }),
    );
    let course = CourseInfo {
        course_id: 3,
        course_code: "IT03".to_string(),
        course_name: "Mạng".to_string(),
        ..Default::default()
    };

    let (portal, shell) = student_portal(&api, false);
    assert_eq!(portal.unregister_course(&course).await.expect("declined"), None);
    assert!(api.calls().is_empty());
    assert_eq!(shell.prompts(), vec!["🤔 Bạn có chắc chắn muốn hủy đăng ký môn \"Mạng\" (IT03)?".to_string()]);

    shell.answer(true);
    let response = portal.unregister_course(&course).await.expect("unregister").expect("confirmed");
    assert!(response.success);
    assert_eq!(api.write_calls()[0].path, "student/courses/3");
}

#[tokio::test]
async fn payment_request_is_confirmed_first() {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(Method::POST, "student/payment/create", json!("Payment created"));
    let (portal, shell) = student_portal(&api, true);

    let ack = portal.create_payment(Some("2024-1")).await.expect("create");

    assert_eq!(ack.as_deref(), Some("Payment created"));
    assert_eq!(shell.prompts(), vec![CREATE_PAYMENT_PROMPT.to_string()]);
    assert_eq!(api.write_calls()[0].body, None);
}

#[tokio::test]
async fn invalid_password_change_stays_local() {
    let api = Arc::new(MemoryApiClient::new());
    let (portal, _) = student_portal(&api, true);

    let response = portal
        .change_password(&ChangePasswordRequest::new("secret1", "secret2"))
        .await
        .expect("change");

    assert!(!response.success);
    assert_eq!(response.message, "Xác nhận mật khẩu không khớp");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn teacher_classes_are_merged_per_course() {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(
        Method::GET,
        "teacher/classes",
        json!([
            { "teachingId": 1, "courseId": 10, "courseCode": "DB01", "courseName": "Cơ sở dữ liệu", "credit": 3,
              "period": "1-3", "dayOfWeek": "Monday", "classroom": "A1" },
            { "teachingId": 2, "courseId": 10, "courseCode": "DB01", "courseName": "Cơ sở dữ liệu", "credit": 3,
              "period": "4-5", "dayOfWeek": "Wednesday", "classroom": "A2" }
        ]),
    );
    let portal = TeacherPortal::new(api.clone());

    let classes = portal.classes(Some("2024-1")).await.expect("classes");
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].period, "Monday (1-3), Wednesday (4-5)");

    let events = portal.class_events(Some("2024-1")).await.expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!((events[1].day, events[1].start, events[1].end), (3, 4, 6));
}

#[tokio::test]
async fn saving_all_scores_reports_each_student() {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(
        Method::POST,
        "teacher/grade",
        json!({ "id": 1, "studentId": 1, "courseId": 10, "grade": "8.1" }),
    );
    let portal = TeacherPortal::new(api.clone());
    let mut students = vec![
        StudentInfo {
            student_id: 1,
            student_code: "SV001".to_string(),
            component_score1: Some(8.0),
            ..Default::default()
        },
        StudentInfo {
            student_id: 2,
            student_code: "SV002".to_string(),
            ..Default::default()
        },
    ];

    let summary = portal.save_all_scores(10, &mut students).await;
    assert_eq!((summary.saved, summary.total), (2, 2));
    assert_eq!(students[1].grade.as_deref(), Some("8.1"));
    assert_eq!(
        api.write_calls()[0].body,
        Some(json!({
            "studentId": 1, "courseId": 10,
            "componentScore1": 8.0, "componentScore2": null, "finalExamScore": null
        }))
    );

    api.fail(Method::POST, "teacher/grade", StatusCode::BAD_REQUEST);
    let summary = portal.save_all_scores(10, &mut students).await;
    assert_eq!(summary.failed, vec!["SV001".to_string(), "SV002".to_string()]);
    assert_eq!(summary.message(), "❌ Lỗi khi lưu điểm cho tất cả sinh viên!");
}

fn payments_api() -> Arc<MemoryApiClient> {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(
        Method::GET,
        "admin/payments",
        json!([
            { "id": 3, "studentId": 7, "studentCode": "SV001", "semesterId": 1, "semesterName": "2024-1", "status": "PENDING" },
            { "id": 4, "studentId": 8, "studentCode": "SV002", "semesterId": 1, "semesterName": "2024-1", "status": "PAID" }
        ]),
    );
    api.respond(
        Method::PUT,
        "admin/payments/3/status",
        json!({ "success": true, "message": "Cập nhật thành công" }),
    );
    api.respond(
        Method::GET,
        "admin/payments/statistics",
        json!({
            "totalPayments": 2, "paidPayments": 2, "pendingPayments": 0, "failedPayments": 0,
            "totalAmount": 12000000.0, "paidAmount": 12000000.0, "pendingAmount": 0.0
        }),
    );
    api
}

#[tokio::test]
async fn payment_status_change_flow() {
    let api = payments_api();
    let shell = Arc::new(RecordingShell::new(false));
    let desk = PaymentDesk::new(api.clone(), shell.clone());
    let payments = desk.load(Some(PaymentStatus::Pending), None).await.expect("load");
    let pending = payments[0].clone();

    assert_eq!(desk.update_status(&pending, PaymentStatus::Pending, None).await.expect("same"), None);
    assert!(shell.prompts().is_empty());

    assert_eq!(desk.update_status(&pending, PaymentStatus::Paid, None).await.expect("declined"), None);
    assert_eq!(
        shell.prompts()[0],
        "🔄 Bạn có chắc chắn muốn thay đổi trạng thái thanh toán từ \"Chờ thanh toán\" thành \"Đã thanh toán\"?"
    );
    assert!(api.write_calls().is_empty());

    shell.answer(true);
    api.clear_calls();
    let response = desk
        .update_status(&pending, PaymentStatus::Paid, Some("Chuyển khoản"))
        .await
        .expect("update")
        .expect("confirmed");

    assert!(response.success);
    let calls = api.calls();
    assert_eq!(calls[0].body, Some(json!({ "status": "PAID", "reason": "Chuyển khoản" })));
    assert_eq!(calls[1].method, Method::GET);
    assert_eq!(calls[1].path, "admin/payments");
    assert_eq!(calls[2].path, "admin/payments/statistics");
    assert_eq!(desk.last_statistics().map(|s| s.paid_payments), Some(2));
    assert_eq!(desk.apply_filters("sv002", None, "").len(), 1);
}

#[tokio::test]
async fn scholarship_candidates() {
    let api = Arc::new(MemoryApiClient::new());
    api.respond(
        Method::GET,
        "admin/enrollments/scholarships/eligible-students",
        json!([
            { "studentId": 1, "studentCode": "SV001", "fullName": "A", "gpa": 3.7, "totalCredits": 100, "completedCredits": 80 },
            { "studentId": 2, "studentCode": "SV002", "fullName": "B", "gpa": 3.9, "totalCredits": 100, "completedCredits": 90 }
        ]),
    );
    let board = ScholarshipBoard::new(api.clone());

    let candidates = board.eligible(Some(2), Some("2024-1")).await.expect("eligible");

    assert_eq!(candidates.len(), 2);
    assert!((average_gpa(&candidates) - 3.8).abs() < 1e-9);
    assert!(board.departments().await.is_err());
}
