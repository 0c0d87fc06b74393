use rusqlite::Connection;
use school_erp_core::credential::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
use school_erp_core::{
    open_db_in_memory, AdminContext, AttendanceStatus, AuthError, NewStudent, NewSubject,
    NewTeacher, RecordError, Role, Session, SessionContext, StudentContext, TeacherContext,
};

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn admin<'conn>(session: &Session<'conn>) -> AdminContext<'conn> {
    match session.context().unwrap() {
        SessionContext::Admin(ctx) => ctx,
        other => panic!("expected admin context, got {:?}", other.role()),
    }
}

fn teacher<'conn>(session: &Session<'conn>) -> TeacherContext<'conn> {
    match session.context().unwrap() {
        SessionContext::Teacher(ctx) => ctx,
        other => panic!("expected teacher context, got {:?}", other.role()),
    }
}

fn student<'conn>(session: &Session<'conn>) -> StudentContext<'conn> {
    match session.context().unwrap() {
        SessionContext::Student(ctx) => ctx,
        other => panic!("expected student context, got {:?}", other.role()),
    }
}

struct School {
    teacher_id: i64,
    student_id: i64,
    math_id: i64,
    physics_id: i64,
}

/// Admin sets up T1 on MATH101, an unassigned PHY101, student S1, and logins.
fn set_up_school(conn: &Connection) -> School {
    let session = Session::login(conn, DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();
    let directory = admin(&session).directory();

    let teacher_id = directory
        .add_teacher(&NewTeacher::new("T1", "555-0001", "t1@school.test"))
        .unwrap();
    let math_id = directory
        .add_subject(&NewSubject::new("Mathematics", "MATH101"))
        .unwrap();
    let physics_id = directory
        .add_subject(&NewSubject::new("Physics", "PHY101"))
        .unwrap();
    directory
        .assign_teacher_to_subject(teacher_id, math_id)
        .unwrap();
    directory
        .create_login(Role::Teacher, teacher_id, "t1", "pass1")
        .unwrap();

    let student_id = directory
        .add_student(&NewStudent::new(
            "S1",
            "R-001",
            "555-0101",
            "s1@school.test",
            "Science",
        ))
        .unwrap();
    directory
        .create_login(Role::Student, student_id, "s1", "pass2")
        .unwrap();
    session.logout();

    School {
        teacher_id,
        student_id,
        math_id,
        physics_id,
    }
}

#[test]
fn teacher_marks_attendance_and_admin_sees_it() {
    let conn = open_db_in_memory().unwrap();
    let school = set_up_school(&conn);

    let teacher_session = Session::login(&conn, "t1", "pass1").unwrap();
    let ctx = teacher(&teacher_session);
    assert_eq!(ctx.teacher().id, school.teacher_id);

    let subjects = ctx.assigned_subjects().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].code, "MATH101");

    let status = ctx
        .toggle_attendance(school.student_id, school.math_id, today())
        .unwrap();
    assert_eq!(status, AttendanceStatus::Present);
    teacher_session.logout();

    let admin_session =
        Session::login(&conn, DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();
    let report = admin(&admin_session).attendance_report().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].student_name, "S1");
    assert_eq!(report[0].subject_name, "Mathematics");
    assert_eq!(report[0].status, AttendanceStatus::Present);
    assert_eq!(report[0].marked_by, "T1");
    assert_eq!(report[0].date, today());
}

#[test]
fn teacher_cannot_write_for_unassigned_subject() {
    let conn = open_db_in_memory().unwrap();
    let school = set_up_school(&conn);
    let session = Session::login(&conn, "t1", "pass1").unwrap();
    let ctx = teacher(&session);

    let err = ctx
        .toggle_attendance(school.student_id, school.physics_id, today())
        .unwrap_err();
    assert!(matches!(
        err,
        RecordError::NotAssigned { teacher_id, subject_id }
            if teacher_id == school.teacher_id && subject_id == school.physics_id
    ));
    let err = ctx
        .record_marks(school.student_id, school.physics_id, 80, None)
        .unwrap_err();
    assert!(matches!(err, RecordError::NotAssigned { .. }));
    assert!(matches!(
        ctx.roster(school.physics_id, today()),
        Err(RecordError::NotAssigned { .. })
    ));

    let admin_session =
        Session::login(&conn, DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();
    let admin = admin(&admin_session);
    assert!(admin.attendance_report().unwrap().is_empty());
    assert!(admin.marks_report().unwrap().is_empty());
}

#[test]
fn student_sees_only_own_records() {
    let conn = open_db_in_memory().unwrap();
    let school = set_up_school(&conn);

    let teacher_session = Session::login(&conn, "t1", "pass1").unwrap();
    let ctx = teacher(&teacher_session);
    ctx.toggle_attendance(school.student_id, school.math_id, today())
        .unwrap();
    ctx.record_marks(school.student_id, school.math_id, 72, Some("Quiz"))
        .unwrap();
    ctx.record_marks(school.student_id, school.math_id, 88, Some("Final"))
        .unwrap();
    assert_eq!(
        ctx.marks_history(school.student_id, school.math_id)
            .unwrap()
            .len(),
        2
    );
    let roster = ctx.roster(school.math_id, today()).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].current_marks, Some(88));

    let student_session = Session::login(&conn, "s1", "pass2").unwrap();
    let own = student(&student_session);
    assert_eq!(own.student().roll_no, "R-001");
    let marks = own.marks().unwrap();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].marks, 88);
    let attendance = own.attendance(None).unwrap();
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0].status, AttendanceStatus::Present);
}

#[test]
fn sessions_are_independent_values() {
    let conn = open_db_in_memory().unwrap();
    set_up_school(&conn);

    let admin_session =
        Session::login(&conn, DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();
    let teacher_session = Session::login(&conn, "t1", "pass1").unwrap();
    let student_session = Session::login(&conn, "s1", "pass2").unwrap();

    assert_eq!(admin_session.context().unwrap().role(), Role::Admin);
    assert_eq!(teacher_session.context().unwrap().role(), Role::Teacher);
    assert_eq!(student_session.context().unwrap().role(), Role::Student);

    let teacher_user = teacher_session.logout();
    assert_eq!(teacher_user.username, "t1");
    assert_eq!(admin_session.user().role, Role::Admin);
    assert_eq!(student_session.context().unwrap().role(), Role::Student);
}

#[test]
fn login_with_missing_directory_record_fails_dispatch() {
    let conn = open_db_in_memory().unwrap();
    let school = set_up_school(&conn);
    conn.execute("PRAGMA foreign_keys = OFF;", []).unwrap();
    conn.execute(
        "DELETE FROM assignments WHERE teacher_id = ?1;",
        [school.teacher_id],
    )
    .unwrap();
    conn.execute(
        "DELETE FROM teachers WHERE teacher_id = ?1;",
        [school.teacher_id],
    )
    .unwrap();

    let session = Session::login(&conn, "t1", "pass1").unwrap();
    let err = session.context().err().unwrap();
    assert!(matches!(
        err,
        AuthError::MissingReference {
            role: Role::Teacher,
            reference_id: Some(id),
        } if id == school.teacher_id
    ));
}

#[test]
fn wrong_password_never_opens_a_session() {
    let conn = open_db_in_memory().unwrap();
    set_up_school(&conn);

    assert!(matches!(
        Session::login(&conn, "t1", "PASS1"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        Session::login(&conn, "T1", "pass1"),
        Err(AuthError::InvalidCredentials)
    ));
}
