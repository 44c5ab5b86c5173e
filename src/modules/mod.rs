pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod staff;
pub mod students;
