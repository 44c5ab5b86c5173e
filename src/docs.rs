use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::modules::classes::model::{
    ClassLevel, ClassStatus, ClassTeacherView, ClassType, ClassWithTeachers, CreateClassDto,
    DanceClass, DayOfWeek, ScheduleSlot, TeacherAssignmentDto,
};
use crate::modules::enrollments::model::{
    EnrollStudentDto, Enrollment, EnrollmentStatus, EnrollmentWithClass, EnrollmentWithStudent,
    PaymentStatus,
};
use crate::modules::staff::model::{CreateStaffProfileDto, StaffMember, StaffRole};
use crate::modules::students::model::{
    CreateStudentProfileDto, Gender, ProfileStatus, Student, UpdateStudentStatusDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::students::controller::create_student_profile,
        crate::modules::students::controller::get_my_student_profile,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::update_student_status,
        crate::modules::staff::controller::create_staff_profile,
        crate::modules::staff::controller::get_my_staff_profile,
        crate::modules::staff::controller::list_staff,
        crate::modules::staff::controller::list_active_teachers,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::list_active_classes,
        crate::modules::classes::controller::get_class_by_id,
        crate::modules::enrollments::controller::enroll_student,
        crate::modules::enrollments::controller::get_my_enrollments,
        crate::modules::enrollments::controller::get_enrollments_by_class,
        crate::modules::enrollments::controller::cancel_enrollment,
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            Student,
            Gender,
            ProfileStatus,
            CreateStudentProfileDto,
            UpdateStudentStatusDto,
            StaffMember,
            StaffRole,
            CreateStaffProfileDto,
            DanceClass,
            ClassLevel,
            ClassType,
            ClassStatus,
            DayOfWeek,
            ScheduleSlot,
            ClassTeacherView,
            ClassWithTeachers,
            CreateClassDto,
            TeacherAssignmentDto,
            Enrollment,
            EnrollmentStatus,
            PaymentStatus,
            EnrollStudentDto,
            EnrollmentWithClass,
            EnrollmentWithStudent,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Students", description = "Student profile management"),
        (name = "Staff", description = "Staff profile management"),
        (name = "Classes", description = "Class and teacher assignment management"),
        (name = "Enrollments", description = "Enrollment lifecycle")
    ),
    info(
        title = "Compasso API",
        version = "0.1.0",
        description = "Administrative REST API for a dance school: students, staff, classes, and enrollments.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
