use diesel::prelude::*;
use diesel::PgConnection;

use crate::data::import::error::ImportError;
use crate::data::models::ShelterRecord;
use crate::data::schema::shelters;

/// Receives inserts inside an open transaction.
pub trait ShelterSink {
    fn insert_shelter(&mut self, shelter: &ShelterRecord) -> QueryResult<()>;
}

/// Something able to run a unit of work atomically: everything `f` inserted
/// is committed when it returns `Ok`, and rolled back when it returns `Err`.
pub trait ShelterStore {
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, ImportError>
    where
        F: FnOnce(&mut dyn ShelterSink) -> Result<T, ImportError>;
}

impl ShelterSink for PgConnection {
    fn insert_shelter(&mut self, shelter: &ShelterRecord) -> QueryResult<()> {
        diesel::insert_into(shelters::table)
            .values(shelter)
            .execute(self)
            .map(|_| ())
    }
}

impl ShelterStore for PgConnection {
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T, ImportError>
    where
        F: FnOnce(&mut dyn ShelterSink) -> Result<T, ImportError>,
    {
        self.transaction(|conn| f(conn as &mut dyn ShelterSink))
    }
}
