//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the deployed schema exactly. The `custom_domains` table carries
//! a unique index on `(owner_id, name)`; that index, not the application
//! check, is the authoritative guard for owner-scoped name uniqueness.

diesel::table! {
    /// Registered users, keyed by login email.
    users (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Login email, lowercase, unique.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Custom domains owned by users.
    ///
    /// Unique index: `custom_domains_owner_name_idx (owner_id, name)`.
    custom_domains (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Owning user; never updated after insert.
        owner_id -> Uuid,
        /// Domain name, unique per owner.
        name -> Varchar,
        /// Verification status: ACTIVE, PENDING, or ERROR.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(custom_domains -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(custom_domains, users);
