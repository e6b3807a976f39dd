//! Main CLI application

use crate::attributes::QuotaInput;
use crate::config::{load_settings, looks_like_pool_id, validate_settings, Overrides, Settings};
use crate::error::{CogError, ConfigError};
use crate::provider::CognitoClient;
use crate::runner::{execute, Context, Invocation, Verbosity};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
}

impl App {
    /// Create a new app
    pub fn new() -> Self {
        App {
            command: build_command(),
        }
    }

    /// Run the application with the process arguments
    pub fn run(self) -> Result<(), CogError> {
        self.run_from(std::env::args_os())
    }

    /// Run the application with explicit arguments
    pub fn run_from<I, T>(mut self, args: I) -> Result<(), CogError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().get_matches_from(args);

        let (name, sub_matches) = match matches.subcommand() {
            Some((name, sub_matches)) => (name.to_string(), sub_matches),
            None => {
                self.command.print_help()?;
                println!();
                return Ok(());
            }
        };

        if name == "completions" {
            if let Some(shell) = sub_matches.get_one::<Shell>("shell").copied() {
                clap_complete::generate(shell, &mut self.command, "cogctl", &mut io::stdout());
            }
            return Ok(());
        }

        let verbosity = get_verbosity(sub_matches);
        let explicit = sub_matches.get_one::<String>("config").map(PathBuf::from);
        let (settings, settings_path) = load_settings(explicit.as_deref())?;
        let settings = settings.with_overrides(get_overrides(sub_matches));
        validate_settings(&settings)?;

        let ctx = Context::new()
            .with_settings(settings)
            .with_settings_path(settings_path)
            .with_verbosity(verbosity);

        if let Some(path) = &ctx.settings_path {
            ctx.print_info(&format!("Using settings from {}", path.display()));
        }
        load_env_file(&ctx);

        let invocation = invocation_from(&name, sub_matches, &ctx.settings)?;

        if let Some(pool_id) = invocation.user_pool_id() {
            if !looks_like_pool_id(pool_id) {
                ctx.print_warning(&format!("'{}' does not look like a user pool id", pool_id));
            }
        }

        let client = CognitoClient::from_settings(&ctx.settings, invocation.user_pool_id())?;
        ctx.print_debug(&format!(
            "Region: {}, endpoint: {}",
            client.region().unwrap_or("none"),
            client.endpoint_url().unwrap_or("regional")
        ));

        let outcome = execute(&invocation, &client, &ctx)?;
        if ctx.prints_status() {
            println!("{}", outcome);
        }

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("cogctl")
        .version(crate::VERSION)
        .about("Manage Cognito users for auth testing")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("username")
                .long("username")
                .value_name("USERNAME")
                .help("User to act on (also used as the email address)")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to cogctl.yml settings file")
                .global(true),
        )
        .arg(
            Arg::new("region")
                .long("region")
                .value_name("REGION")
                .help("Region of the user pool")
                .global(true),
        )
        .arg(
            Arg::new("endpoint-url")
                .long("endpoint-url")
                .value_name("URL")
                .help("Send requests to this endpoint instead of the regional one")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print the result and errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("create")
                .about("Create a cognito user")
                .arg(pool_id_arg())
                .arg(
                    Arg::new("num-dapps")
                        .long("num-dapps")
                        .value_name("N")
                        .help("Number of dapps; default for every limit")
                        .value_parser(value_parser!(u32))
                        .required(true),
                )
                .arg(limit_arg("standard-limit", "Standard tier limit"))
                .arg(limit_arg("professional-limit", "Professional tier limit"))
                .arg(limit_arg("enterprise-limit", "Enterprise tier limit"))
                .arg(
                    Arg::new("temp-password")
                        .long("temp-password")
                        .value_name("PASSWORD")
                        .help("Temporary password instead of a generated one"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a cognito user")
                .arg(pool_id_arg()),
        )
        .subcommand(
            Command::new("login")
                .about("Login as a cognito user")
                .arg(
                    Arg::new("client-id")
                        .long("client-id")
                        .value_name("ID")
                        .help("App client id (defaults to client_id from settings)"),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .value_name("PASSWORD")
                        .help("Password of the user")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Print a shell completion script")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .value_parser(value_parser!(Shell))
                        .required(true),
                ),
        )
}

fn pool_id_arg() -> Arg {
    Arg::new("user-pool-id")
        .long("user-pool-id")
        .value_name("ID")
        .help("User pool id (defaults to user_pool_id from settings)")
}

fn limit_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("N")
        .help(help)
        .value_parser(value_parser!(u32))
}

/// Load variables from a `.env` file; a missing file is fine
fn load_env_file(ctx: &Context) {
    match dotenvy::dotenv() {
        Ok(path) => ctx.print_debug(&format!("Loaded environment from {}", path.display())),
        Err(e) if e.not_found() => {}
        Err(e) => ctx.print_warning(&format!("Ignoring .env file: {}", e)),
    }
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Get settings overrides from matches
fn get_overrides(matches: &ArgMatches) -> Overrides {
    Overrides {
        region: matches.get_one::<String>("region").cloned(),
        endpoint_url: matches.get_one::<String>("endpoint-url").cloned(),
    }
}

/// Read a required string argument, falling back to a settings value
fn required(
    matches: &ArgMatches,
    name: &str,
    fallback: Option<&String>,
) -> Result<String, ConfigError> {
    matches
        .get_one::<String>(name)
        .or(fallback)
        .cloned()
        .ok_or_else(|| ConfigError::MissingArgument(name.to_string()))
}

/// Build the invocation for a command from its matches
pub fn invocation_from(
    name: &str,
    matches: &ArgMatches,
    settings: &Settings,
) -> Result<Invocation, CogError> {
    let invocation = match name {
        "create" => Invocation::Create {
            username: required(matches, "username", None)?,
            user_pool_id: required(matches, "user-pool-id", settings.user_pool_id.as_ref())?,
            quota: QuotaInput {
                num_dapps: matches
                    .get_one::<u32>("num-dapps")
                    .copied()
                    .ok_or_else(|| ConfigError::MissingArgument("num-dapps".to_string()))?,
                standard_limit: matches.get_one::<u32>("standard-limit").copied(),
                professional_limit: matches.get_one::<u32>("professional-limit").copied(),
                enterprise_limit: matches.get_one::<u32>("enterprise-limit").copied(),
            },
            temp_password: matches.get_one::<String>("temp-password").cloned(),
        },
        "delete" => Invocation::Delete {
            username: required(matches, "username", None)?,
            user_pool_id: required(matches, "user-pool-id", settings.user_pool_id.as_ref())?,
        },
        "login" => Invocation::Login {
            username: required(matches, "username", None)?,
            client_id: required(matches, "client-id", settings.client_id.as_ref())?,
            password: required(matches, "password", None)?,
        },
        other => return Err(ConfigError::UnknownCommand(other.to_string()).into()),
    };

    Ok(invocation)
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), CogError> {
    App::new().run()
}
