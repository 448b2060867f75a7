//! # storage
//!
//! Per-user encrypted wallet credential persistence.
//!
//! [`Cipher`] encrypts exported wallet payloads with AES-256-CBC under a
//! server-held key and a fresh per-record [`Iv`]. [`KvStore`] is the
//! injected persistence seam (SQLite for production, in-memory for tests).
//! [`CredentialStore`] ties the two together behind `get_or_create`.

pub mod cipher;
pub mod credential_store;
pub mod kv;

pub use cipher::{Cipher, Iv};
pub use credential_store::{CredentialRecord, CredentialStore};
pub use kv::{KvStore, MemoryKvStore, SqliteKvStore};
