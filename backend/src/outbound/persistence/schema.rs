//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes a table, regenerate this file with `diesel print-schema` or update
//! it by hand.

diesel::table! {
    /// Registered accounts with their point balances and profile details.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        avatar -> Text,
        custom_avatar_seed -> Nullable<Text>,
        /// Current balance; may be negative.
        points -> Int8,
        is_onboarded -> Bool,
        full_name -> Nullable<Text>,
        contact_number -> Nullable<Text>,
        branch -> Nullable<Text>,
        /// Year of study, 1 through 4.
        year -> Nullable<Int2>,
        college_name -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posted questions with their stake and engagement counters.
    questions (id) {
        id -> Uuid,
        author_id -> Uuid,
        title -> Varchar,
        content -> Text,
        subject -> Text,
        branch -> Text,
        /// Study year label such as `2nd Year`.
        year -> Text,
        grade -> Text,
        tags -> Array<Text>,
        /// Stake fixed at creation.
        points -> Int4,
        is_resolved -> Bool,
        views -> Int8,
        upvotes -> Array<Uuid>,
        /// Answer ids in append order.
        answer_ids -> Array<Uuid>,
        ai_answer -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    answers (id) {
        id -> Uuid,
        author_id -> Uuid,
        question_id -> Uuid,
        content -> Text,
        /// JSON array of attachment metadata.
        attachments -> Jsonb,
        is_ai -> Bool,
        is_accepted -> Bool,
        upvotes -> Array<Uuid>,
        /// JSON array of AI verification records.
        verifications -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    comments (id) {
        id -> Uuid,
        author_id -> Uuid,
        question_id -> Uuid,
        answer_id -> Nullable<Uuid>,
        parent_comment_id -> Nullable<Uuid>,
        content -> Varchar,
        upvotes -> Array<Uuid>,
        is_verified -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        recipient_id -> Uuid,
        sender_id -> Uuid,
        kind -> Text,
        message -> Text,
        question_id -> Uuid,
        answer_id -> Nullable<Uuid>,
        comment_id -> Nullable<Uuid>,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(questions -> users (author_id));
diesel::joinable!(answers -> questions (question_id));

diesel::allow_tables_to_appear_in_same_query!(users, questions, answers, comments, notifications);
