//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `migrations/` exactly. The schema is applied outside the
//! service; `diesel print-schema` regenerates this file from a live database.

diesel::table! {
    /// Administrator accounts.
    users (id) {
        /// Primary key; generated by the database when omitted on insert.
        id -> Text,
        name -> Text,
        /// Alternate lookup key, unique by convention only.
        email -> Text,
        /// Write-only secret; never read back by the adapter.
        password -> Text,
    }
}
