mod changes;
mod collections;
mod connection;
mod error;
mod library;
mod migrations;
mod models;
mod schema;
mod stations;

pub use changes::{Cached, Change, ChangeAction, ChangeToken, ChangeTracker};
pub use collections::CollectionKind;
pub use connection::DB_PATH;
pub use error::Error;
pub use library::{Library, LibraryStatus};
pub use migrations::{current_version, latest_version, migrate, Migration, MIGRATIONS};
pub use models::{is_standard_name, Collection, Membership, NewStation, Station, FAVORITES_COLLECTION_NAME, RECENTS_COLLECTION_NAME};

no_arg_sql_function!(last_insert_rowid, diesel::sql_types::BigInt, "Rowid of the last inserted row on this connection");
