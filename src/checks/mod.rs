//! Schema-aware checks over composed dependencies.yaml documents

pub mod alpha_spec;
