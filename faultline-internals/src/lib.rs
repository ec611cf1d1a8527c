#![no_std]
#![forbid(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
//! Internal implementation crate for [`faultline`].
//!
//! # Overview
//!
//! This crate contains the pure text machinery behind the [`faultline`]
//! diagnostics library. Nothing in here touches global state, the OS or
//! the exception chain, which keeps it `no_std` and easy to test.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`faultline`] crate,
//! not this one.
//!
//! # Architecture
//!
//! - **[`args`]**: Recovers the source text of each argument from the
//!   flattened argument list of a macro invocation
//!   - [`split_arguments`]: Top-level comma splitting, aware of nesting and
//!     string literals
//!   - [`ArgumentNames`]/[`ArgumentNameSpan`]: The recovered names, borrowed
//!     from the argument list
//!
//! - **[`assemble`]**: Builds the final description string
//!   - [`Head`]: The log, assertion or syscall prefix
//!   - [`assemble()`]: Sizes the description, then fills it in one pass
//!   - [`strip_assignment`]: Drops `n = ` from the text of a syscall
//!
//! [`faultline`]: https://docs.rs/faultline/latest/faultline/
//! [`split_arguments`]: args::split_arguments
//! [`ArgumentNames`]: args::ArgumentNames
//! [`ArgumentNameSpan`]: args::ArgumentNameSpan
//! [`Head`]: assemble::Head
//! [`assemble()`]: assemble::assemble
//! [`strip_assignment`]: assemble::strip_assignment

extern crate alloc;

pub mod args;
pub mod assemble;
