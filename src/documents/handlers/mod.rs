// src/documents/handlers/mod.rs

pub mod generated;
pub mod job_descriptions;
pub mod resumes;
