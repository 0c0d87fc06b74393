//! Core use-case services.
//!
//! # Responsibility
//! - Validate input and orchestrate repository calls into use-case APIs.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - Services stay storage-agnostic; they only see repository traits.

pub mod attendance_service;
pub mod auth_service;
pub mod credential_admin;
pub mod directory_service;
pub mod marks_service;
pub mod notice_service;
