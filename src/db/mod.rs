pub mod ddl;
pub mod models;
pub mod schema;


use std::time::Duration;

use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::QueryResult;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::feature::{make_feature_object, Feature, FeatureText, IncidentPoint};

use models::*;
use schema::category_info::dsl::{self as c_dsl};
use schema::connection_status::dsl::{self as cs_dsl};
use schema::dm_details::dsl::{self as d_dsl};
use schema::ngo_info::dsl::{self as n_dsl};
use schema::status_codes::dsl::{self as s_dsl};


pub type PgPool = Pool<ConnectionManager<PgConnection>>;


/// Handle to the iSafe database.
///
/// Cloning shares the same pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// Connects with `config` and makes sure every table exists.
pub fn connect_to_db(config: &Config) -> Result<Database> {
    Database::connect(config)
}

impl Database {
    pub fn connect(config: &Config) -> Result<Self> {
        // r2d2 panics on either of these.
        if config.pool_size == 0 {
            return Err(Error::Config("pool size must be at least 1".into()));
        }
        if config.connect_timeout == Duration::new(0, 0) {
            return Err(Error::Config("connect timeout must be positive".into()));
        }

        let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connect_timeout)
            .build(manager)?;
        info!("Database pool ready (size {})", config.pool_size);

        let db = Database { pool };
        db.create_all()?;

        Ok(db)
    }

    /// Creates missing tables. Safe to call any number of times.
    pub fn create_all(&self) -> Result<()> {
        self.with_conn(|conn| conn.batch_execute(ddl::CREATE_TABLES))?;
        info!("Schema ready: {}", ddl::TABLE_NAMES.join(", "));
        Ok(())
    }

    /// Runs `job` on a pooled connection.
    ///
    /// The connection goes back to the pool when this returns, whether `job`
    /// succeeded or not.
    pub fn with_conn<T, F>(&self, job: F) -> Result<T> where
        F: FnOnce(&PgConnection) -> QueryResult<T> {

        let conn = self.pool.get()?;
        Ok(job(&*conn)?)
    }


    pub fn insert_incident(&self, report: &NewIncidentReport) -> Result<IncidentReport> {
        if let Some(err) = report.verify_error() {
            return Err(Error::Invalid(err));
        }

        self.with_conn(|conn| {
            diesel::insert_into(schema::dm_details::table)
                .values(report)
                .get_result::<IncidentReport>(conn)
        })
    }

    pub fn get_incident(&self, id: i32) -> Result<IncidentReport> {
        self.with_conn(|conn| {
            d_dsl::dm_details
                .find(id)
                .first(conn)
        })
    }

    /// Incidents dated on or after `date`, oldest first.
    pub fn get_incidents_since(&self, date: NaiveDate) -> Result<Vec<IncidentReport>> {
        self.with_conn(|conn| {
            d_dsl::dm_details
                .filter(d_dsl::datetime.ge(date))
                .order((d_dsl::datetime.asc(), d_dsl::incident_id.asc()))
                .load::<IncidentReport>(conn)
        })
    }


    /// Loads an incident and formats it for the map.
    pub fn get_incident_feature(&self, id: i32, text: FeatureText) -> Result<Feature> {
        let report = self.get_incident(id)?;
        let feature = make_feature_object(&IncidentPoint::from_report(&report, text))?;
        Ok(feature)
    }


    pub fn insert_ngo(&self, ngo: &NewNgo) -> Result<Ngo> {
        if let Some(err) = ngo.verify_error() {
            return Err(Error::Invalid(err));
        }

        self.with_conn(|conn| {
            diesel::insert_into(schema::ngo_info::table)
                .values(ngo)
                .get_result::<Ngo>(conn)
        })
    }

    pub fn get_ngo(&self, org_id: i32) -> Result<Ngo> {
        self.with_conn(|conn| {
            n_dsl::ngo_info
                .find(org_id)
                .first(conn)
        })
    }

    pub fn find_ngo_by_twitter_id(&self, twitter_user_id: &str) -> Result<Option<Ngo>> {
        self.with_conn(|conn| {
            n_dsl::ngo_info
                .filter(n_dsl::twitter_user_id.eq(twitter_user_id))
                .first(conn)
                .optional()
        })
    }


    pub fn insert_connection(&self, connection: &NewConnectionStatus) -> Result<ConnectionStatus> {
        if let Some(err) = connection.verify_error() {
            return Err(Error::Invalid(err));
        }

        self.with_conn(|conn| {
            diesel::insert_into(schema::connection_status::table)
                .values(connection)
                .get_result::<ConnectionStatus>(conn)
        })
    }

    /// Referrals made to the organization whose external id is `twitter_user_id`.
    pub fn get_connections_for_ngo(&self, twitter_user_id: &str) -> Result<Vec<ConnectionStatus>> {
        self.with_conn(|conn| {
            cs_dsl::connection_status
                .filter(cs_dsl::ngo_id.eq(twitter_user_id))
                .order(cs_dsl::connection_id.asc())
                .load::<ConnectionStatus>(conn)
        })
    }

    /// A user's referrals, each with the organization it points at.
    pub fn get_connections_with_ngo(&self, user_id: &str) -> Result<Vec<(ConnectionStatus, Ngo)>> {
        self.with_conn(|conn| {
            cs_dsl::connection_status
                .inner_join(n_dsl::ngo_info.on(
                    n_dsl::twitter_user_id.eq(cs_dsl::ngo_id.nullable())
                ))
                .filter(cs_dsl::user_id.eq(user_id))
                .order(cs_dsl::connection_id.asc())
                .load::<(ConnectionStatus, Ngo)>(conn)
        })
    }


    pub fn insert_category(&self, category: &NewCategory) -> Result<Category> {
        if let Some(err) = category.verify_error() {
            return Err(Error::Invalid(err));
        }

        self.with_conn(|conn| {
            diesel::insert_into(schema::category_info::table)
                .values(category)
                .get_result::<Category>(conn)
        })
    }

    pub fn get_categories(&self) -> Result<Vec<Category>> {
        self.with_conn(|conn| {
            c_dsl::category_info
                .order(c_dsl::category_id.asc())
                .load::<Category>(conn)
        })
    }

    pub fn insert_status(&self, status: &NewStatus) -> Result<Status> {
        if let Some(err) = status.verify_error() {
            return Err(Error::Invalid(err));
        }

        self.with_conn(|conn| {
            diesel::insert_into(schema::status_codes::table)
                .values(status)
                .get_result::<Status>(conn)
        })
    }

    pub fn get_statuses(&self) -> Result<Vec<Status>> {
        self.with_conn(|conn| {
            s_dsl::status_codes
                .order(s_dsl::status_id.asc())
                .load::<Status>(conn)
        })
    }
}
