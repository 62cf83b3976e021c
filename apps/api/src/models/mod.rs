pub mod job;
pub mod subscription;
