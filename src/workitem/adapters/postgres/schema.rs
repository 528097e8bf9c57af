//! Diesel schema for work-item persistence.

diesel::table! {
    /// Top-level epics.
    epics (id) {
        /// Epic identifier.
        id -> Uuid,
        /// Epic title.
        #[max_length = 200]
        title -> Varchar,
        /// Detailed description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Owning user.
        owner_id -> Uuid,
        /// Optional reporting user.
        reporter_id -> Nullable<Uuid>,
        /// Optional planned start date.
        start_date -> Nullable<Date>,
        /// Optional planned due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User stories grouped under epics.
    user_stories (id) {
        /// Story identifier.
        id -> Uuid,
        /// Parent epic (cascade delete).
        epic_id -> Uuid,
        /// Story title.
        #[max_length = 200]
        title -> Varchar,
        /// Detailed description.
        description -> Text,
        /// Agile "as a" fragment.
        #[max_length = 100]
        as_a -> Varchar,
        /// Agile "I want" fragment.
        #[max_length = 200]
        i_want -> Varchar,
        /// Agile "so that" fragment.
        #[max_length = 200]
        so_that -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional assigned user.
        assigned_to_id -> Nullable<Uuid>,
        /// Optional reporting user.
        reporter_id -> Nullable<Uuid>,
        /// Optional story-point estimate.
        story_points -> Nullable<Int2>,
        /// Optional planned start date.
        start_date -> Nullable<Date>,
        /// Optional planned due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks grouped under user stories.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent story (cascade delete).
        story_id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Detailed description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional assigned user.
        assigned_to_id -> Nullable<Uuid>,
        /// Optional reporting user.
        reporter_id -> Nullable<Uuid>,
        /// Optional effort estimate in whole minutes.
        estimated_minutes -> Nullable<Int4>,
        /// Optional recorded effort in whole minutes.
        actual_minutes -> Nullable<Int4>,
        /// Optional due timestamp.
        due_date -> Nullable<Timestamptz>,
        /// Optional completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(user_stories -> epics (epic_id));
diesel::joinable!(tasks -> user_stories (story_id));

diesel::allow_tables_to_appear_in_same_query!(epics, user_stories, tasks);
