//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `username` and `email` carry unique constraints
    /// named `users_username_key` and `users_email_key`.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
        /// Maintained by the `users_set_updated_at` trigger.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Stored calculations with their cached result.
    calculations (id) {
        id -> Uuid,
        /// Owner, if the calculation was created with a session.
        user_id -> Nullable<Uuid>,
        a -> Float8,
        b -> Float8,
        /// Lower-case operation tag.
        calculation_type -> Varchar,
        result -> Float8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(calculations -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(calculations, users);
