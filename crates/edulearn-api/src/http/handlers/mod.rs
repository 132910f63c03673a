pub mod course;
pub mod enroll;
pub mod lesson;
