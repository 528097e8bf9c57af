//! Diesel schema for account persistence.

diesel::table! {
    /// User accounts referenced by work items.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique username.
        #[max_length = 150]
        username -> Varchar,
        /// Optional contact email address.
        #[max_length = 254]
        email -> Nullable<Varchar>,
        /// First name (possibly empty).
        #[max_length = 150]
        first_name -> Varchar,
        /// Last name (possibly empty).
        #[max_length = 150]
        last_name -> Varchar,
    }
}
