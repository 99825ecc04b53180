//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Website-build task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Job name.
        job_name -> Text,
        /// Site identifier.
        site_id -> Text,
        /// Platform code (`WP` or `DUDA`).
        #[max_length = 16]
        platform -> Varchar,
        /// Assigned developer name.
        developer -> Text,
        /// Request type label.
        #[max_length = 64]
        type_of_request -> Varchar,
        /// Number of pages.
        number_of_pages -> Int8,
        /// Salesforce link.
        salesforce_link -> Text,
        /// Whether comments were mandatory at creation.
        comments_required -> Bool,
        /// Creation comments.
        comments -> Nullable<Text>,
        /// Additional creation comments.
        additional_comments -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Number of transitions applied since creation.
        revision -> Int8,
        /// Developer notes.
        dev_notes -> Nullable<Text>,
        /// QC notes.
        qc_notes -> Nullable<Text>,
        /// Development start timestamp.
        dev_start_time -> Nullable<Timestamptz>,
        /// Development completion timestamp.
        dev_completed_time -> Nullable<Timestamptz>,
        /// QC start timestamp.
        qc_start_time -> Nullable<Timestamptz>,
        /// QC completion timestamp.
        qc_completed_time -> Nullable<Timestamptz>,
        /// Most recent failed QC round.
        previous_review -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Developers available for assignment.
    developers (id) {
        /// Developer identifier.
        id -> Uuid,
        /// Developer name.
        name -> Text,
    }
}
