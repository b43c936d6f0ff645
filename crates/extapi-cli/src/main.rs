//! extapi CLI
//!
//! Command-line interface for querying a Godot `extension_api.json`

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use extapi_core::logging_facility::{self, Profile};
use extapi_core::ExError;

mod commands;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    /// Human-readable logs on stderr
    Dev,
    /// JSON logs on stderr
    Prod,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Dev => Profile::Development,
            LogProfile::Prod => Profile::Production,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "extapi")]
#[command(about = "extapi - Query the Godot extension API model", long_about = None)]
struct Cli {
    /// Path to the extension API document
    #[arg(
        long,
        global = true,
        env = "EXTAPI_JSON",
        default_value = "extension_api.json"
    )]
    api: PathBuf,

    /// Emit operation logs on stderr (off when omitted)
    #[arg(long, global = true, value_enum)]
    log_profile: Option<LogProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Document version, digest, entity counts and configurations
    Info,
    /// Rank entities against free text
    Route(commands::model::RouteArgs),
    /// Entity by kind and qualified name
    Entity(commands::model::EntityArgs),
    /// Size, alignment and field offsets of a builtin
    Layout(commands::layout::LayoutArgs),
    /// Offset of one builtin field
    Offset(commands::layout::OffsetArgs),
    /// Class details
    Class(commands::lookup::NameArg),
    /// Parent chain of a class
    Ancestors(commands::lookup::NameArg),
    /// Method by hash
    MethodHash(commands::lookup::HashArg),
    /// Methods by unqualified name
    Methods(commands::lookup::MethodsArgs),
    /// Enum values (global or Owner.Enum)
    Enum(commands::lookup::NameArg),
    /// Utility functions by name or category
    Utility(commands::lookup::UtilityArgs),
    /// Builtin details
    Builtin(commands::lookup::NameArg),
    /// Sorted builtin names
    Builtins,
    /// Singleton listing
    Singletons,
    /// Global constant by name, or all constant names
    Constants(commands::lookup::ConstantArgs),
    /// Native structure listing
    NativeStructures,
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile.into());
    }

    let query = match cli.command {
        Commands::Info => commands::model::summary(),
        Commands::Route(args) => args.into_query(),
        Commands::Entity(args) => args.into_query(),
        Commands::Layout(args) => args.into_query(),
        Commands::Offset(args) => args.into_query(),
        Commands::Class(args) => commands::lookup::class(args),
        Commands::Ancestors(args) => commands::lookup::ancestors(args),
        Commands::MethodHash(args) => args.into_query(),
        Commands::Methods(args) => args.into_query(),
        Commands::Enum(args) => commands::lookup::enumeration(args),
        Commands::Utility(args) => args.into_query(),
        Commands::Builtin(args) => commands::lookup::builtin(args),
        Commands::Builtins => commands::lookup::builtins(),
        Commands::Singletons => commands::lookup::singletons(),
        Commands::Constants(args) => args.into_query(),
        Commands::NativeStructures => commands::lookup::native_structures(),
    };

    if let Err(e) = commands::execute(&cli.api, query) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.downcast_ref::<ExError>().and_then(commands::hint) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}
