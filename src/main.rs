#[macro_use]
extern crate log;

use std::convert::TryFrom;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use thiserror::Error;
use url::Url;

use airwaves::api::{self, Client, StationRequest};
use airwaves::config;
use airwaves::database::{self, Collection, CollectionKind, Library, NewStation};
use airwaves::settings::{Key, SettingsManager};

#[derive(Parser, Debug)]
#[command(name = "airwaves", version)]
#[command(about = "Local radio station library", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all collections with their station count
    #[command(alias = "ls")]
    Collections,

    /// List the stations of a collection
    Members {
        /// Name of the collection
        collection: String,
    },

    /// Create a new collection
    Create {
        /// Name of the new collection
        name: String,
    },

    /// Search the station directory
    Search {
        /// Station name to look for
        name: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 25)]
        limit: u32,
    },

    /// Add a station of the directory to a collection, creating the
    /// collection when needed
    Add {
        /// Name of the collection
        collection: String,

        /// UUID of the station in the directory
        uuid: String,
    },
}

#[derive(Error, Debug)]
enum CommandError {
    #[error(transparent)]
    Library(#[from] database::Error),
    #[error(transparent)]
    Api(#[from] api::Error),
    #[error("No collection named \"{0}\"")]
    UnknownCollection(String),
}

fn main() {
    // Initialize logger
    pretty_env_logger::init();
    let cli = Cli::parse();

    info!("{} ({})", config::NAME, config::APP_ID);
    info!("Version: {}", config::VERSION);

    let settings = SettingsManager::load_default();
    settings.list_keys();

    let path = PathBuf::from(settings.string(Key::DatabasePath));
    let library = match Library::open(&path) {
        Ok(library) => library,
        Err(err) => {
            if err.is_schema_error() {
                error!("Unable to update the database schema: {}", err);
            } else {
                error!("Unable to open the database: {}", err);
            }
            process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Collections) {
        Commands::Collections => list_collections(&library),
        Commands::Members { collection } => list_members(&library, &collection),
        Commands::Create { name } => create_collection(&library, &name),
        Commands::Search { name, limit } => async_std::task::block_on(search(&settings, &name, limit)),
        Commands::Add { collection, uuid } => async_std::task::block_on(add(&library, &settings, &collection, &uuid)),
    };

    if let Err(err) = result {
        error!("{}", err);
        process::exit(1);
    }
}

fn list_collections(library: &Library) -> Result<(), CommandError> {
    for (collection, count) in library.collection_counts(CollectionKind::All)? {
        println!("{:<32} {:>5}", collection.name, count);
    }
    Ok(())
}

fn list_members(library: &Library, name: &str) -> Result<(), CommandError> {
    let collection = named_collection(library, name, false)?;
    for (station, _) in library.members(&collection)? {
        println!("{:<36} {:<40} {}", station.stationuuid.as_deref().unwrap_or("-"), station.name, station.url);
    }
    Ok(())
}

fn create_collection(library: &Library, name: &str) -> Result<(), CommandError> {
    let collection = library.create_collection(name, None)?;
    println!("Created collection \"{}\"", collection.name);
    Ok(())
}

async fn search(settings: &SettingsManager, name: &str, limit: u32) -> Result<(), CommandError> {
    let request = StationRequest::search_for_name(name, limit).hide_broken(settings.boolean(Key::HideBroken));
    let stations = client(settings)?.search(&request).await?;

    for station in stations {
        println!("{:<36} {:<40} {}", station.stationuuid, station.name.trim(), station.countrycode);
    }
    Ok(())
}

async fn add(library: &Library, settings: &SettingsManager, name: &str, uuid: &str) -> Result<(), CommandError> {
    let collection = named_collection(library, name, true)?;
    let metadata = client(settings)?.station_by_uuid(uuid).await?;
    let station = library.add_new_station(NewStation::try_from(&metadata)?, &collection)?;

    println!("Added \"{}\" to \"{}\"", station.name, collection.name);
    Ok(())
}

fn client(settings: &SettingsManager) -> Result<Client, api::Error> {
    let server = Url::parse(&settings.string(Key::ApiServer))?;
    Client::new(server)
}

fn named_collection(library: &Library, name: &str, create: bool) -> Result<Collection, CommandError> {
    library.collection_named_or_create(name, create)?.ok_or_else(|| CommandError::UnknownCollection(name.to_string()))
}
