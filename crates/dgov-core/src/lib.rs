//! # dgov-core: Foundational Types for the Data Governance Stack
//!
//! This crate defines the input records the compliance analyzer consumes and
//! the small set of primitives every other crate in the workspace shares.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Absent is not an error.** Company and filing records arrive from a
//!    scraper and a relational store; every optional field may be missing or
//!    `null`. Records deserialize leniently and expose accessors that apply
//!    the "present and non-empty" rule in one place.
//!
//! 2. **Single `Industry` enum.** One closed taxonomy with an ordered keyword
//!    table. Classification is first-match, so the order of
//!    [`Industry::all()`] is part of the contract.
//!
//! 3. **Pinned digests.** The per-company variance seed is MD5 over UTF-8
//!    bytes, first 32 bits big-endian ([`name_seed()`]). Content digests for
//!    cache keys flow through [`CanonicalBytes`] and SHA-256.
//!
//! 4. **Explicit reference year.** Recency rules compare filings against a
//!    [`ReferenceYear`], either the current UTC year or a fixed one.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dgov-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod company;
pub mod digest;
pub mod error;
pub mod identity;
pub mod industry;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use company::{CompanyProfile, CompanyRecord, FilingRecord};
pub use digest::{name_seed, sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, DgovError};
pub use identity::CompanyId;
pub use industry::{Industry, INDUSTRY_COUNT};
pub use temporal::ReferenceYear;
