// Booking database

diesel::table! {
    artists (id) {
        id -> Int4,
        name -> Varchar,
        city -> Varchar,
        #[max_length = 2]
        state -> Bpchar,
        phone -> Nullable<Varchar>,
        image_link -> Nullable<Varchar>,
        genres -> Array<Text>,
        facebook_link -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        seeking_venue -> Bool,
        seeking_description -> Nullable<Varchar>,
    }
}

diesel::table! {
    shows (id) {
        id -> Int4,
        artist_id -> Int4,
        venue_id -> Int4,
        start_time -> Timestamptz,
    }
}

diesel::table! {
    venues (id) {
        id -> Int4,
        name -> Varchar,
        city -> Varchar,
        #[max_length = 2]
        state -> Bpchar,
        address -> Varchar,
        phone -> Nullable<Varchar>,
        image_link -> Nullable<Varchar>,
        genres -> Array<Text>,
        facebook_link -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        seeking_talent -> Bool,
        seeking_description -> Nullable<Varchar>,
    }
}

diesel::joinable!(shows -> artists (artist_id));
diesel::joinable!(shows -> venues (venue_id));

diesel::allow_tables_to_appear_in_same_query!(artists, shows, venues,);

// Trivia database

diesel::table! {
    categories (id) {
        id -> Int4,
        #[sql_name = "type"]
        type_ -> Varchar,
    }
}

diesel::table! {
    questions (id) {
        id -> Int4,
        question -> Varchar,
        answer -> Varchar,
        category -> Int4,
        difficulty -> Int4,
    }
}
