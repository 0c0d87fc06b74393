mod support;

use chrono::NaiveDate;
use rusqlite::Connection;
use school_erp_core::db::{open_db, open_db_in_memory};
use school_erp_core::repo::attendance_repo::SqliteAttendanceRepository;
use school_erp_core::{
    AttendanceService, AttendanceState, AttendanceStatus, NewTeacher, RecordError,
};
use std::sync::{Arc, Barrier};
use std::thread;

fn ledger(conn: &Connection) -> AttendanceService<SqliteAttendanceRepository<'_>> {
    AttendanceService::new(SqliteAttendanceRepository::new(conn))
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM attendance;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn toggle_alternates_present_absent_present() {
    let conn = open_db_in_memory().unwrap();
    let class = support::seed_class(&conn);
    let ledger = ledger(&conn);

    assert_eq!(
        ledger
            .get_status(class.student_id, class.subject_id, day(1))
            .unwrap(),
        AttendanceState::NotMarked
    );

    let statuses: Vec<AttendanceStatus> = (0..3)
        .map(|_| {
            ledger
                .toggle(class.student_id, class.subject_id, class.teacher_id, day(1))
                .unwrap()
        })
        .collect();

    assert_eq!(
        statuses,
        vec![
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Present
        ]
    );
    assert_eq!(
        ledger
            .get_status(class.student_id, class.subject_id, day(1))
            .unwrap(),
        AttendanceState::Marked(AttendanceStatus::Present)
    );
    assert_eq!(row_count(&conn), 1);
}

#[test]
fn different_dates_are_independent_records() {
    let conn = open_db_in_memory().unwrap();
    let class = support::seed_class(&conn);
    let ledger = ledger(&conn);

    ledger
        .toggle(class.student_id, class.subject_id, class.teacher_id, day(1))
        .unwrap();
    ledger
        .toggle(class.student_id, class.subject_id, class.teacher_id, day(1))
        .unwrap();
    let second_day = ledger
        .toggle(class.student_id, class.subject_id, class.teacher_id, day(2))
        .unwrap();

    assert_eq!(second_day, AttendanceStatus::Present);
    assert_eq!(row_count(&conn), 2);
}

#[test]
fn toggle_records_last_teacher() {
    let conn = open_db_in_memory().unwrap();
    let class = support::seed_class(&conn);
    let substitute = support::directory(&conn)
        .add_teacher(&NewTeacher::new("Sub", "555-0009", "sub@school.test"))
        .unwrap();
    let ledger = ledger(&conn);

    ledger
        .toggle(class.student_id, class.subject_id, class.teacher_id, day(3))
        .unwrap();
    ledger
        .toggle(class.student_id, class.subject_id, substitute, day(3))
        .unwrap();

    let views = ledger.list_all().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].status, AttendanceStatus::Absent);
    assert_eq!(views[0].marked_by, "Sub");
}

#[test]
fn toggle_for_unknown_student_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let class = support::seed_class(&conn);

    let err = ledger(&conn)
        .toggle(999, class.subject_id, class.teacher_id, day(1))
        .unwrap_err();
    assert!(matches!(err, RecordError::NotFound(_)));
    assert_eq!(row_count(&conn), 0);
}

#[test]
fn student_view_is_newest_first_and_limited() {
    let conn = open_db_in_memory().unwrap();
    let class = support::seed_class(&conn);
    let ledger = ledger(&conn);
    for d in 1..=4 {
        ledger
            .toggle(class.student_id, class.subject_id, class.teacher_id, day(d))
            .unwrap();
    }

    let rows = ledger.list_for_student(class.student_id, Some(3)).unwrap();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(4), day(3), day(2)]);
    assert!(rows.iter().all(|r| r.subject_name == "Mathematics"));

    assert_eq!(ledger.list_for_student(class.student_id, None).unwrap().len(), 4);
    assert!(ledger.list_for_student(class.student_id, Some(0)).is_err());
}

#[test]
fn roster_reports_state_and_current_marks_per_student() {
    let conn = open_db_in_memory().unwrap();
    let class = support::seed_class(&conn);
    let other = support::directory(&conn)
        .add_student(&school_erp_core::NewStudent::new(
            "S0",
            "R-000",
            "555-0100",
            "s0@school.test",
            "Science",
        ))
        .unwrap();
    let ledger = ledger(&conn);
    ledger
        .toggle(class.student_id, class.subject_id, class.teacher_id, day(5))
        .unwrap();
    conn.execute(
        "INSERT INTO marks (student_id, subject_id, teacher_id, marks, exam_type, created_at)
         VALUES (?1, ?2, ?3, 40, 'Quiz', 1000), (?1, ?2, ?3, 85, 'Final', 2000);",
        [class.student_id, class.subject_id, class.teacher_id],
    )
    .unwrap();

    let roster = ledger.roster(class.subject_id, day(5)).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].student_id, other);
    assert_eq!(roster[0].attendance, AttendanceState::NotMarked);
    assert_eq!(roster[0].current_marks, None);
    assert_eq!(roster[1].student_id, class.student_id);
    assert_eq!(
        roster[1].attendance,
        AttendanceState::Marked(AttendanceStatus::Present)
    );
    assert_eq!(roster[1].current_marks, Some(85));
}

#[test]
fn concurrent_first_toggles_never_create_duplicate_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("school.db");
    let class = {
        let conn = open_db(&path).unwrap();
        support::seed_class(&conn)
    };

    let (student_id, subject_id, teacher_id) =
        (class.student_id, class.subject_id, class.teacher_id);
    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                barrier.wait();
                ledger(&conn)
                    .toggle(student_id, subject_id, teacher_id, day(7))
                    .unwrap()
            })
        })
        .collect();
    let mut results: Vec<AttendanceStatus> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    results.sort_by_key(|status| status.as_str());

    assert_eq!(
        results,
        vec![AttendanceStatus::Absent, AttendanceStatus::Present]
    );
    let conn = open_db(&path).unwrap();
    assert_eq!(row_count(&conn), 1);
    assert_eq!(
        ledger(&conn)
            .get_status(student_id, subject_id, day(7))
            .unwrap(),
        AttendanceState::Marked(AttendanceStatus::Absent)
    );
}
