//! `petreg` command-line front end.
//!
//! # Responsibility
//! - Trim raw arguments, call core services, print feedback and tables.
//! - Keep all validation and storage rules inside `petreg_core`.

use clap::{Args, Parser, Subcommand};
use log::error;
use petreg_core::{
    init_logging, ConfigOverrides, Feedback, ListingService, OwnerForm, PetForm,
    RegistrationService, RegistryConfig, SqliteStore, SystemClock, NO_OWNERS_MESSAGE,
    NO_PETS_MESSAGE, OWNER_PLACEHOLDER,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "petreg", version, about = "Pet owner and pet registry")]
struct Cli {
    /// SQLite store file (env: PETREG_DATA_PATH).
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,
    /// trace|debug|info|warn|error (env: PETREG_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (env: PETREG_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new owner.
    RegisterOwner(OwnerArgs),
    /// Register a new pet.
    RegisterPet(PetArgs),
    /// Show owners selectable for pet registration.
    Owners,
    /// Show every pet with its owner's name.
    List,
}

#[derive(Args, Debug)]
struct OwnerArgs {
    #[arg(long)]
    identification: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
}

#[derive(Args, Debug)]
struct PetArgs {
    #[arg(long)]
    pet_id: String,
    #[arg(long)]
    pet_name: String,
    #[arg(long)]
    pet_type: String,
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: String,
    #[arg(long)]
    owner_id: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match RegistryConfig::from_env(ConfigOverrides {
        data_path: cli.data_path,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = match SqliteStore::open(&config.data_path) {
        Ok(store) => store,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!(
                "cannot open store `{}`: {err}",
                config.data_path.display()
            );
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Command::RegisterOwner(args) => {
            let form = OwnerForm {
                identification: args.identification,
                name: args.name,
                email: args.email,
                phone: args.phone,
                address: args.address,
            }
            .trimmed();
            let service = RegistrationService::new(&store, SystemClock);
            report(Feedback::from_owner_result(&service.register_owner(&form)))
        }
        Command::RegisterPet(args) => {
            let form = PetForm {
                pet_id: args.pet_id,
                pet_name: args.pet_name,
                pet_type: args.pet_type,
                birth_date: args.birth_date,
                owner_id: args.owner_id,
            }
            .trimmed();
            let service = RegistrationService::new(&store, SystemClock);
            report(Feedback::from_pet_result(&service.register_pet(&form)))
        }
        Command::Owners => {
            let options = ListingService::new(&store).owner_options();
            if options.is_empty() {
                println!("{NO_OWNERS_MESSAGE}");
                return ExitCode::SUCCESS;
            }
            println!("\t{OWNER_PLACEHOLDER}");
            for option in options {
                println!("{}\t{}", option.value, option.label);
            }
            ExitCode::SUCCESS
        }
        Command::List => {
            let rows = ListingService::new(&store).listing();
            if rows.is_empty() {
                println!("{NO_PETS_MESSAGE}");
                return ExitCode::SUCCESS;
            }
            println!("OWNER\tPET\tTYPE\tBIRTH DATE");
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.owner_name, row.pet_name, row.pet_type, row.birth_date
                );
            }
            ExitCode::SUCCESS
        }
    }
}

fn report(feedback: Feedback) -> ExitCode {
    let line = format!("[{}] {}", feedback.severity.as_str(), feedback.message);
    if feedback.is_success() {
        println!("{line}");
        ExitCode::SUCCESS
    } else {
        eprintln!("{line}");
        ExitCode::FAILURE
    }
}
