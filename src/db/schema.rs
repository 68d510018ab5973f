table! {
    dm_details (incident_id) {
        incident_id -> Integer,
        user_id -> Integer,
        location -> Varchar,
        x_cord -> Nullable<Numeric>,
        y_cord -> Nullable<Numeric>,
        day_of_week -> Nullable<Varchar>,
        datetime -> Date,
        month -> Nullable<Varchar>,
        time -> Nullable<Time>,
        hour -> Nullable<Varchar>,
        category -> Nullable<Varchar>,
        raw_text -> Varchar,
        data_source -> Nullable<Varchar>,
        to_safety -> Varchar,
    }
}

table! {
    ngo_info (org_id) {
        org_id -> Integer,
        org_name -> Varchar,
        name -> Varchar,
        twitter_handle -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        x_cord -> Numeric,
        y_cord -> Numeric,
        address -> Varchar,
        description -> Varchar,
        category -> Varchar,
        twitter_user_id -> Nullable<Varchar>,
        twitter_user_token -> Nullable<Varchar>,
        twitter_user_secret -> Nullable<Varchar>,
    }
}

table! {
    connection_status (connection_id) {
        connection_id -> Integer,
        user_id -> Varchar,
        #[sql_name = "NGO_id"]
        ngo_id -> Varchar,
        description -> Varchar,
        status_code -> Varchar,
        category -> Varchar,
    }
}

table! {
    category_info (category_id) {
        category_id -> Integer,
        category -> Varchar,
        category_description -> Varchar,
    }
}

table! {
    status_codes (status_id) {
        status_id -> Integer,
        status_code -> Varchar,
        status_description -> Varchar,
    }
}

// connection_status.NGO_id references ngo_info.twitter_user_id, which is not
// the primary key, so there is no joinable! here. Joins spell out the ON clause.
allow_tables_to_appear_in_same_query!(connection_status, ngo_info);
