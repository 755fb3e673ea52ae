#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::AuthSession;
use crate::domain::models::Route;
use crate::domain::services::actions::upload_file;
use crate::domain::services::inspect_file;
use crate::domain::services::DocumentList;
use crate::domain::services::Uploader;
use crate::infrastructure::api::ApiManager;
use crate::infrastructure::auth::cognito::Cognito;
use crate::infrastructure::auth::AuthManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// The root matches followed by each nested subcommand's matches.
pub fn matches_chain(matches: &ArgMatches) -> Vec<&ArgMatches> {
    let mut chain = vec![matches];
    let mut current = matches;
    while let Some((_, sub_matches)) = current.subcommand() {
        chain.push(sub_matches);
        current = sub_matches;
    }

    return chain;
}

async fn start_session() -> AuthSession {
    return AuthSession::start(AuthManager::get()).await;
}

async fn login(username: Option<&String>) -> Result<()> {
    if !Config::get(ConfigKey::Token).is_empty() {
        bail!("A static token is configured through --token or DOCCHAT_TOKEN, unset it to sign in.");
    }

    let username = match username {
        Some(username) => username.to_string(),
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    Cognito::from_config().login(&username, &password).await?;
    println!("Signed in as {username}");

    return Ok(());
}

async fn whoami() -> Result<()> {
    match start_session().await.user_email {
        Some(email) => println!("{email}"),
        None => println!("Not signed in. Run `docchat auth login` to sign in."),
    }

    return Ok(());
}

async fn load_documents(session: AuthSession) -> Result<(DocumentList, ApiBox)> {
    let api = ApiManager::get(session)?;
    let mut list = DocumentList::default();

    if let Action::ListDocuments(generation) = list.refresh() {
        let res = api.list_documents().await;
        list.apply_list(generation, res);
    }
    if let Some(err) = &list.error {
        bail!(err.to_string());
    }

    return Ok((list, api));
}

async fn list_documents() -> Result<()> {
    let (list, _) = load_documents(start_session().await).await?;
    if list.documents.is_empty() {
        println!("There's nothing here yet... Upload your first document with `docchat documents upload --file PATH`.");
        return Ok(());
    }

    for document in list.documents.iter() {
        println!(
            "{} {}",
            Paint::new(&document.documentid).bold(),
            list.document_lines(document).join("\n")
        );
    }

    return Ok(());
}

async fn delete_document(document_id: &str) -> Result<()> {
    let (mut list, api) = load_documents(start_session().await).await?;

    if !list.documents.iter().any(|e| return e.documentid == document_id) {
        bail!(format!("No document with id {document_id}"));
    }
    if list.delete(document_id).is_none() {
        bail!(format!(
            "Document {document_id} is still being processed, only ready documents can be deleted"
        ));
    }

    let res = api.delete_document(document_id).await;
    list.apply_delete(document_id, res);
    if let Some(err) = &list.error {
        bail!(err.to_string());
    }

    println!("Deleted document {document_id}");
    return Ok(());
}

async fn upload_document(file_path: &str) -> Result<()> {
    let file = inspect_file(file_path).await?;
    let mut uploader = Uploader::default();
    if !uploader.select(file) {
        bail!(format!("{file_path} is not a PDF. Only .pdf accepted"));
    }

    let api = ApiManager::get(start_session().await)?;
    if let Some(Action::UploadDocument(file)) = uploader.upload() {
        let res = upload_file(&api, &file).await;
        if !uploader.apply_upload(res) {
            bail!(uploader.error.unwrap_or_default());
        }
        println!("Uploaded {}. It will be ready to chat once processed.", file.name);
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_auth() -> Command {
    return Command::new("auth")
        .about("Sign in and out of the user pool.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("login")
                .about("Sign in with your email and password.")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Email to sign in with. Prompted for when omitted.")
                        .num_args(1),
                ),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the cached session."))
        .subcommand(Command::new("whoami").about("Print the email of the signed in user."));
}

fn subcommand_documents() -> Command {
    return Command::new("documents")
        .about("Manage uploaded documents without starting the UI.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List documents with their processing status."))
        .subcommand(
            Command::new("delete").about("Delete a ready document.").arg(
                Arg::new("id")
                    .short('i')
                    .long("id")
                    .help("Document ID")
                    .num_args(1)
                    .required(true),
            ),
        )
        .subcommand(
            Command::new("upload").about("Upload a PDF document.").arg(
                Arg::new("file")
                    .short('f')
                    .long("file")
                    .help("Path to the PDF")
                    .num_args(1)
                    .required(true),
            ),
        );
}

fn subcommand_open() -> Command {
    return Command::new("open")
        .about("Start the UI at a route. Defaults to the document list.")
        .arg(
            Arg::new("route")
                .help("'/' or '/doc/DOCUMENT_ID/CONVERSATION_ID'")
                .num_args(1)
                .required(false),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("docchat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_auth())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_documents())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_open())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("DOCCHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("DOCCHAT_API_URL")
                .num_args(1)
                .help("Base URL of the document chat backend.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ApiRegion.to_string())
                .long(ConfigKey::ApiRegion.to_string())
                .env("DOCCHAT_API_REGION")
                .num_args(1)
                .help(format!("AWS region hosting the user pool. [default: {}]", Config::default(ConfigKey::ApiRegion)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::UserPoolID.to_string())
                .long(ConfigKey::UserPoolID.to_string())
                .env("DOCCHAT_USER_POOL_ID")
                .num_args(1)
                .help("ID of the user pool accounts live in.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::UserPoolClientID.to_string())
                .long(ConfigKey::UserPoolClientID.to_string())
                .env("DOCCHAT_USER_POOL_CLIENT_ID")
                .num_args(1)
                .help("App client ID used to sign in to the user pool.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::CredentialsFile.to_string())
                .long(ConfigKey::CredentialsFile.to_string())
                .env("DOCCHAT_CREDENTIALS_FILE")
                .num_args(1)
                .help(format!("Where the signed in session is cached. [default: {}]", Config::default(ConfigKey::CredentialsFile)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Token.to_string())
                .long(ConfigKey::Token.to_string())
                .env("DOCCHAT_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Bearer token to use instead of signing in to the user pool.")
                .global(true),
        );
}

/// Runs the requested command. Returns the route to start the UI at, or
/// `None` when the command already did its work.
pub async fn parse() -> Result<Option<Route>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("auth", subcmd_matches)) => {
            Config::load(matches_chain(&matches)).await?;
            match subcmd_matches.subcommand() {
                Some(("login", login_matches)) => {
                    login(login_matches.get_one::<String>("username")).await?;
                }
                Some(("logout", _)) => {
                    AuthManager::get().sign_out().await?;
                    println!("Signed out.");
                }
                Some(("whoami", _)) => {
                    whoami().await?;
                }
                _ => {
                    subcommand_auth().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("documents", subcmd_matches)) => {
            Config::load(matches_chain(&matches)).await?;
            match subcmd_matches.subcommand() {
                Some(("list", _)) => {
                    list_documents().await?;
                }
                Some(("delete", delete_matches)) => {
                    if let Some(document_id) = delete_matches.get_one::<String>("id") {
                        delete_document(document_id).await?;
                    }
                }
                Some(("upload", upload_matches)) => {
                    if let Some(file_path) = upload_matches.get_one::<String>("file") {
                        upload_document(file_path).await?;
                    }
                }
                _ => {
                    subcommand_documents().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }

            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(None);
        }
        Some(("open", subcmd_matches)) => {
            Config::load(matches_chain(&matches)).await?;
            return Ok(Some(start_route(subcmd_matches)?));
        }
        _ => {
            Config::load(matches_chain(&matches)).await?;
            return Ok(Some(Route::Documents));
        }
    }
}

pub fn start_route(open_matches: &ArgMatches) -> Result<Route> {
    match open_matches.get_one::<String>("route") {
        Some(route) => return Route::parse(route),
        None => return Ok(Route::Documents),
    }
}
