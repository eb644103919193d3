//! Enrollment guard service.
//!
//! Enforces the two enrollment invariants: the course must be published and
//! active at enrollment time, and at most one non-archived enrollment may
//! exist per (student, course) pair. The pair invariant is ultimately decided
//! by the store's unique constraint; the service's pre-check only improves
//! the common-case error, so a lost race still surfaces as
//! `duplicate_enrollment` with exactly one persisted row.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::enrollment::StudentEnrollment;
use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, EnrollRequest, EnrollmentCommand, EnrollmentQuery,
    EnrollmentRepository, EnrollmentRepositoryError, StudentRepository, StudentRepositoryError,
};
use crate::domain::{Error, Lifecycle};

/// Enrollment service implementing the driving ports.
#[derive(Clone)]
pub struct EnrollmentService<E, C, S> {
    enrollments: Arc<E>,
    courses: Arc<C>,
    students: Arc<S>,
}

impl<E, C, S> EnrollmentService<E, C, S> {
    /// Create a new service with the given repositories.
    pub fn new(enrollments: Arc<E>, courses: Arc<C>, students: Arc<S>) -> Self {
        Self {
            enrollments,
            courses,
            students,
        }
    }
}

fn map_enrollment_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment repository unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment repository error: {message}"))
        }
        EnrollmentRepositoryError::DuplicatePair {
            student_id,
            course_id,
        } => duplicate_enrollment_error(EnrollRequest {
            student_id,
            course_id,
        }),
    }
}

fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::DuplicateTitle { title } => {
            Error::internal(format!("unexpected title conflict while reading: {title}"))
        }
    }
}

fn map_student_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { email } => {
            Error::internal(format!("unexpected email conflict while reading: {email}"))
        }
    }
}

fn duplicate_enrollment_error(request: EnrollRequest) -> Error {
    Error::duplicate_enrollment("this student is already enrolled in this course").with_details(
        json!({
            "studentId": request.student_id,
            "courseId": request.course_id,
        }),
    )
}

fn course_not_available_error() -> Error {
    Error::course_not_available("cannot enroll in an unpublished course")
}

#[async_trait]
impl<E, C, S> EnrollmentCommand for EnrollmentService<E, C, S>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    async fn enroll(&self, request: EnrollRequest) -> Result<StudentEnrollment, Error> {
        let student = self
            .students
            .find_student(request.student_id)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| Error::not_found("student not found"))?;
        if student.lifecycle == Lifecycle::Archived {
            return Err(Error::not_found("student is archived"));
        }

        let course = self
            .courses
            .find_by_id(request.course_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;
        if !course.is_available() {
            return Err(course_not_available_error());
        }

        // Friendly pre-check; the unique constraint decides under races.
        if self
            .enrollments
            .exists_active(request.student_id, request.course_id)
            .await
            .map_err(map_enrollment_error)?
        {
            return Err(duplicate_enrollment_error(request));
        }

        self.enrollments
            .insert(request.student_id, request.course_id)
            .await
            .map_err(map_enrollment_error)
    }
}

#[async_trait]
impl<E, C, S> EnrollmentQuery for EnrollmentService<E, C, S>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    async fn list(&self) -> Result<Vec<StudentEnrollment>, Error> {
        self.enrollments
            .list_active()
            .await
            .map_err(map_enrollment_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::catalog::{Course, Price};
    use crate::domain::identity::Student;
    use crate::domain::ports::{
        MockCourseRepository, MockEnrollmentRepository, MockStudentRepository,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn service(
        enrollments: MockEnrollmentRepository,
        courses: MockCourseRepository,
        students: MockStudentRepository,
    ) -> EnrollmentService<MockEnrollmentRepository, MockCourseRepository, MockStudentRepository>
    {
        EnrollmentService::new(Arc::new(enrollments), Arc::new(courses), Arc::new(students))
    }

    fn course(published: bool) -> Course {
        let mut course = Course::new(
            "Intro",
            "An introductory course.",
            Price::from_minor_units(0).expect("non-negative"),
            Uuid::new_v4(),
        )
        .expect("valid course");
        course.is_published = published;
        course
    }

    fn enrollment(request: EnrollRequest) -> StudentEnrollment {
        StudentEnrollment {
            id: Uuid::new_v4(),
            student_id: request.student_id,
            course_id: request.course_id,
            enrolled_at: Utc::now(),
            lifecycle: Lifecycle::Active,
        }
    }

    fn stubbed_student(students: &mut MockStudentRepository, student: Student) {
        students
            .expect_find_student()
            .times(1)
            .return_once(move |_| Ok(Some(student)));
    }

    #[tokio::test]
    async fn enrolls_into_a_published_course() {
        let request = EnrollRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        };
        let mut students = MockStudentRepository::new();
        stubbed_student(&mut students, Student::new(Uuid::new_v4()));
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(course(true))));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_exists_active()
            .times(1)
            .return_once(|_, _| Ok(false));
        let persisted = enrollment(request);
        let expected_id = persisted.id;
        enrollments
            .expect_insert()
            .times(1)
            .return_once(move |_, _| Ok(persisted));

        let result = service(enrollments, courses, students)
            .enroll(request)
            .await
            .expect("enroll succeeds");

        assert_eq!(result.id, expected_id);
        assert_eq!(result.student_id, request.student_id);
    }

    #[tokio::test]
    async fn rejects_unpublished_courses_without_inserting() {
        let request = EnrollRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        };
        let mut students = MockStudentRepository::new();
        stubbed_student(&mut students, Student::new(Uuid::new_v4()));
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(course(false))));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_exists_active().times(0);
        enrollments.expect_insert().times(0);

        let err = service(enrollments, courses, students)
            .enroll(request)
            .await
            .expect_err("unpublished course rejected");

        assert_eq!(err.code, ErrorCode::CourseNotAvailable);
    }

    #[tokio::test]
    async fn rejects_archived_courses() {
        let request = EnrollRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        };
        let mut students = MockStudentRepository::new();
        stubbed_student(&mut students, Student::new(Uuid::new_v4()));
        let mut archived = course(true);
        archived.lifecycle = Lifecycle::Archived;
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(archived)));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_insert().times(0);

        let err = service(enrollments, courses, students)
            .enroll(request)
            .await
            .expect_err("archived course rejected");

        assert_eq!(err.code, ErrorCode::CourseNotAvailable);
    }

    #[tokio::test]
    async fn rejects_a_second_enrollment_for_the_pair() {
        let request = EnrollRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        };
        let mut students = MockStudentRepository::new();
        stubbed_student(&mut students, Student::new(Uuid::new_v4()));
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(course(true))));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_exists_active()
            .times(1)
            .return_once(|_, _| Ok(true));
        enrollments.expect_insert().times(0);

        let err = service(enrollments, courses, students)
            .enroll(request)
            .await
            .expect_err("duplicate rejected");

        assert_eq!(err.code, ErrorCode::DuplicateEnrollment);
    }

    #[tokio::test]
    async fn maps_lost_uniqueness_race_to_duplicate_enrollment() {
        // Both concurrent requests pass the pre-check; the loser's insert
        // hits the unique constraint and must surface the same rejection.
        let request = EnrollRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        };
        let mut students = MockStudentRepository::new();
        stubbed_student(&mut students, Student::new(Uuid::new_v4()));
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(course(true))));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_exists_active()
            .times(1)
            .return_once(|_, _| Ok(false));
        enrollments.expect_insert().times(1).return_once(move |s, c| {
            Err(EnrollmentRepositoryError::duplicate_pair(s, c))
        });

        let err = service(enrollments, courses, students)
            .enroll(request)
            .await
            .expect_err("race loser rejected");

        assert_eq!(err.code, ErrorCode::DuplicateEnrollment);
    }

    #[tokio::test]
    async fn rejects_unknown_students() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_student()
            .times(1)
            .return_once(|_| Ok(None));
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_insert().times(0);

        let err = service(enrollments, MockCourseRepository::new(), students)
            .enroll(EnrollRequest {
                student_id: Uuid::new_v4(),
                course_id: Uuid::new_v4(),
            })
            .await
            .expect_err("unknown student rejected");

        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
