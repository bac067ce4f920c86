//! Integration tests for the syllabus checklist and CLI

mod checklist_properties;
mod cli_contracts;
mod support;
