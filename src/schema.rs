// Kept in sync with the DDL in `db::init_schema`.

diesel::table! {
    review_records (learner_id, content_type, content_id) {
        learner_id -> Text,
        content_type -> Text,
        content_id -> Text,
        interval_days -> Integer,
        ease_factor -> Double,
        due_at -> Timestamp,
        correct_streak -> Integer,
        incorrect_count -> Integer,
        last_seen_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    progress_summaries (learner_id) {
        learner_id -> Text,
        total_reviews -> BigInt,
        correct_reviews -> BigInt,
        last_study_date -> Nullable<Date>,
        streak_days -> Integer,
        points -> BigInt,
        level -> Integer,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    review_records,
    progress_summaries,
);
