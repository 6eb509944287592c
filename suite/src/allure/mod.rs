//! Allure 1 (`ns2:test-suite`) reports.
//!
//! [`assembler::SuiteParser`] builds a [`model::TestSuite`] from a report;
//! [`aggregate`] and [`html`] derive what a test-management backend needs
//! from it.

pub mod aggregate;
pub mod assembler;
pub mod extractor;
pub mod html;
pub mod model;
pub mod normalizer;
pub mod observer;
pub mod tms_link;

pub use aggregate::get_step_status;
pub use assembler::SuiteParser;
pub use model::{Label, Link, Parameter, StatusDetails, Step, StepToUpdate, TestCase, TestSuite};
pub use tms_link::{TmsLabel, TmsLink};
