//! Domain entities, invariants, and services.
//!
//! Purpose: define the strongly typed entities of the catalog and enrollment
//! model, the validation that guards their invariants, and the services that
//! implement the driving ports. Everything here is transport and storage
//! agnostic; adapters live under `inbound` and `outbound`.

pub mod catalog;
pub mod category_service;
pub mod course_service;
pub mod credentials;
pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod ports;
pub mod registration_service;
pub mod upload;

pub use self::category_service::CategoryService;
pub use self::course_service::CourseService;
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode};
pub use self::lifecycle::Lifecycle;
pub use self::registration_service::RegistrationService;

/// Convenient result alias for operations surfacing domain errors.
pub type ApiResult<T> = Result<T, Error>;
