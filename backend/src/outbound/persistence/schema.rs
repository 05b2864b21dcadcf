//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        id -> Uuid,
        /// Unique business key.
        email -> Varchar,
        display_name -> Varchar,
        credential -> Varchar,
        /// Set exactly while the account owns a row in `active_runs`.
        active_run_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Runs in progress; at most one per account.
    active_runs (id) {
        id -> Uuid,
        account_id -> Uuid,
        origin_lat -> Float8,
        origin_lng -> Float8,
        destination_lat -> Float8,
        destination_lng -> Float8,
        started_at -> Timestamptz,
        target_arrival_at -> Timestamptz,
        required_pace -> Varchar,
        /// Null while the route lookup is pending.
        distance_meters -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Archived runs.
    historical_runs (id) {
        id -> Uuid,
        account_id -> Uuid,
        origin_lat -> Float8,
        origin_lng -> Float8,
        destination_lat -> Float8,
        destination_lng -> Float8,
        distance_meters -> Int4,
        average_pace -> Varchar,
        completed_at -> Timestamptz,
    }
}

diesel::joinable!(active_runs -> accounts (account_id));
diesel::joinable!(historical_runs -> accounts (account_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, active_runs, historical_runs);
