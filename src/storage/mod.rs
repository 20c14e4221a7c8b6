//!  Storage is organized through [repository::DocumentRepository].
//!  The basic idea is:
//!   - Everything lives in one JSON document, read fully at the start of a command.
//!   - Mutations happen in memory and the whole document is written back afterwards.
//!   - Where the bytes end up is decided by a [document_storage::DocumentStorage].

pub mod document_storage;
pub mod entities;
pub mod repository;
