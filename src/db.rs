use diesel::pg::PgConnection;
use diesel::prelude::*;
use log::info;

/// Opens the single connection a run works with. It is closed when dropped.
pub fn establish_connection(database_url: &str) -> ConnectionResult<PgConnection> {
    let conn = PgConnection::establish(database_url)?;
    info!("Connected to the database");
    Ok(conn)
}
