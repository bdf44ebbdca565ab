mod analyze;
mod dict;
mod files;
mod prompt;
mod worlds;

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use langlens_cli::config::{CliOverrides, Config};
use langlens_cli::validation::Target;

use crate::analyze::{run_analyze_command, run_spellcheck_command};
use crate::dict::{run_dict_add_command, run_dict_list_command};
use crate::files::{run_export_file_command, run_files_command, run_view_command};
use crate::prompt::run_prompt_command;
use crate::worlds::{
    run_delete_command, run_export_command, run_import_command, run_list_command,
    run_repack_command, run_unpack_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./langlens.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding imported world archives
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Directory holding unpacked worlds
    #[arg(long, global = true)]
    unpacked: Option<PathBuf>,

    /// Word list file used for spell checking instead of the bundled English list
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Custom domain dictionary file
    #[arg(long, global = true)]
    custom_dictionary: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a .mcworld or .mctemplate archive into the store.
    Import {
        /// The archive to import
        file: PathBuf,
        /// Name recorded as the uploader
        #[arg(long)]
        user: Option<String>,
    },

    /// List imported and unpacked worlds.
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Unpack an imported world.
    Unpack {
        /// World id
        id: u32,
        #[arg(long)]
        user: Option<String>,
    },

    /// Repack an unpacked world into a new versioned archive.
    Repack {
        /// Unpacked world id
        id: u32,
        #[arg(long)]
        user: Option<String>,
    },

    /// Delete an imported world archive.
    Delete {
        /// World id
        id: u32,
    },

    /// Copy an imported world archive out of the store.
    Export {
        /// World id
        id: u32,
        /// Destination directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// List the .lang files of an unpacked world.
    Files {
        /// Unpacked world id
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a .lang file of an unpacked world.
    View {
        /// Unpacked world id
        id: u32,
        /// Path of the file relative to the unpacked world
        path: String,
    },

    /// Copy a .lang file out of an unpacked world.
    ExportFile {
        /// Unpacked world id
        id: u32,
        /// Path of the file relative to the unpacked world
        path: String,
        /// Destination directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Readability analysis of an unpacked world.
    Analyze {
        /// Unpacked world id
        #[arg(required_unless_present = "dir", conflicts_with = "dir")]
        id: Option<u32>,
        /// Analyze this directory instead of a stored world
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spell check of an unpacked world.
    Spellcheck {
        /// Unpacked world id
        #[arg(required_unless_present = "dir", conflicts_with = "dir")]
        id: Option<u32>,
        /// Check this directory instead of a stored world
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the custom domain dictionary.
    Dict {
        #[command(subcommand)]
        command: DictCommands,
    },

    /// Print the document-generation prompt for an unpacked world.
    Prompt {
        /// lesson-plan, quiz or parent-letter
        kind: String,
        /// Unpacked world id
        id: u32,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// Add a word to the custom dictionary.
    Add { word: String },
    /// List the words of the custom dictionary.
    List,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Commands::Completions { shell } = args.commands {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        generate(shell, &mut command, name, &mut io::stdout());
        return;
    }

    let overrides = CliOverrides {
        store_dir: args.store,
        unpacked_dir: args.unpacked,
        dictionary_path: args.dictionary,
        custom_dictionary_path: args.custom_dictionary,
    };
    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config.with_overrides(overrides),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.commands {
        Commands::Import { file, user } => run_import_command(&config, &file, user),
        Commands::List { json } => run_list_command(&config, json),
        Commands::Unpack { id, user } => run_unpack_command(&config, id, user),
        Commands::Repack { id, user } => run_repack_command(&config, id, user),
        Commands::Delete { id } => run_delete_command(&config, id),
        Commands::Export { id, out } => run_export_command(&config, id, &out),
        Commands::Files { id, json } => run_files_command(&config, id, json),
        Commands::View { id, path } => run_view_command(&config, id, &path),
        Commands::ExportFile { id, path, out } => {
            run_export_file_command(&config, id, &path, &out)
        }
        Commands::Analyze { id, dir, json } => {
            run_analyze_command(&config, Target::from_args(id, dir), json)
        }
        Commands::Spellcheck { id, dir, json } => {
            run_spellcheck_command(&config, Target::from_args(id, dir), json)
        }
        Commands::Dict { command } => match command {
            DictCommands::Add { word } => run_dict_add_command(&config, &word),
            DictCommands::List => run_dict_list_command(&config),
        },
        Commands::Prompt { kind, id } => run_prompt_command(&config, &kind, id),
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
