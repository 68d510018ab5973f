//! Table definitions executed by the bootstrap.
//!
//! Every statement is guarded with `IF NOT EXISTS`, so running the whole
//! script against an initialized database is a no-op. `ngo_info` has to be
//! created before `connection_status` because of the foreign key.

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS dm_details (
    incident_id SERIAL PRIMARY KEY,
    user_id     INTEGER      NOT NULL,
    location    VARCHAR(60)  NOT NULL,
    x_cord      NUMERIC,
    y_cord      NUMERIC,
    day_of_week VARCHAR(10),
    "datetime"  DATE         NOT NULL,
    month       VARCHAR(10),
    "time"      TIME,
    hour        VARCHAR(10),
    category    VARCHAR(60),
    raw_text    VARCHAR(140) NOT NULL,
    data_source VARCHAR(60),
    to_safety   VARCHAR(60)  NOT NULL,
    CONSTRAINT dm_details_cord_pair CHECK ((x_cord IS NULL) = (y_cord IS NULL))
);

CREATE TABLE IF NOT EXISTS ngo_info (
    org_id              SERIAL PRIMARY KEY,
    org_name            VARCHAR(60)  NOT NULL,
    name                VARCHAR(60)  NOT NULL,
    twitter_handle      VARCHAR(60)  NOT NULL,
    email               VARCHAR(60)  NOT NULL,
    phone               VARCHAR(60)  NOT NULL,
    x_cord              NUMERIC      NOT NULL,
    y_cord              NUMERIC      NOT NULL,
    address             VARCHAR(60)  NOT NULL,
    description         VARCHAR(500) NOT NULL,
    category            VARCHAR(60)  NOT NULL,
    twitter_user_id     VARCHAR(60),
    twitter_user_token  VARCHAR(60),
    twitter_user_secret VARCHAR(60),
    CONSTRAINT ngo_info_twitter_user_id_key UNIQUE (twitter_user_id)
);

CREATE TABLE IF NOT EXISTS connection_status (
    connection_id SERIAL PRIMARY KEY,
    user_id       VARCHAR(60) NOT NULL,
    "NGO_id"      VARCHAR(60) NOT NULL REFERENCES ngo_info (twitter_user_id),
    description   VARCHAR(60) NOT NULL,
    status_code   VARCHAR(60) NOT NULL,
    category      VARCHAR(60) NOT NULL
);

CREATE TABLE IF NOT EXISTS category_info (
    category_id          SERIAL PRIMARY KEY,
    category             VARCHAR(60) NOT NULL,
    category_description VARCHAR(60) NOT NULL
);

CREATE TABLE IF NOT EXISTS status_codes (
    status_id          SERIAL PRIMARY KEY,
    status_code        VARCHAR(60) NOT NULL,
    status_description VARCHAR(60) NOT NULL
);
"#;

/// Table names in creation order.
pub const TABLE_NAMES: [&str; 5] = [
    "dm_details",
    "ngo_info",
    "connection_status",
    "category_info",
    "status_codes",
];
