//! Batch orchestration for PDF text extraction.
//!
//! Jobs are planned by [`builder`], validated by [`check_file`], executed one
//! at a time by [`batch::BatchRunner`], which hands each file to a
//! [`extractor::TextExtractor`].

pub mod batch;
pub mod builder;
pub mod check_file;
pub mod error;
pub mod extractor;
pub mod job;
pub mod options;
pub mod path_delta;
