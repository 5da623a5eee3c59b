//! Input validation gates.
//!
//! Stateless predicates over raw form values. Rejections are reported as
//! data (`FieldCheck`), never as errors.

pub mod habit_form;
