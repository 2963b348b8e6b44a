//! CLI for the cloudops facades.
//!
//! Every subcommand maps to one facade operation: build config -> pick a
//! collaborator -> call the facade -> print the trimmed result.

use clap::{Parser, Subcommand};
use cloudops_core::{ErrorPolicy, FacadeConfig, DEFAULT_MODEL_ID};
use cloudops_facade::{IdentityFacade, ModelFacade, StorageFacade};
use cloudops_provider::memory::sample_catalog;
use cloudops_provider::{AwsCollaborator, Collaborator, InMemoryCollaborator};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cloudops",
    version,
    about = "Model, identity, and storage helpers over AWS"
)]
struct Cli {
    /// AWS region; falls back to the SDK's region chain when unset.
    #[arg(long, global = true, env = "AWS_REGION")]
    region: Option<String>,

    #[arg(long, global = true, env = "CLOUDOPS_DEFAULT_MODEL", default_value = DEFAULT_MODEL_ID)]
    default_model: String,

    /// What model commands do with service faults: "degrade" or "propagate".
    #[arg(long, global = true, env = "CLOUDOPS_ERROR_POLICY", default_value_t = ErrorPolicy::Degrade)]
    error_policy: ErrorPolicy,

    /// Run against an in-process collaborator instead of AWS. State lives
    /// only for the duration of the command.
    #[arg(long, global = true, default_value_t = false)]
    in_memory: bool,

    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Foundation model listing and invocation.
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },
    /// Identity store users, groups, and memberships.
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },
    /// S3 buckets and objects.
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

#[derive(Subcommand, Debug)]
enum ModelAction {
    List,
    Invoke {
        #[arg(short, long)]
        prompt: String,

        /// Defaults to --default-model.
        #[arg(short, long)]
        model: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum IdentityAction {
    CreateUser {
        #[arg(long, env = "CLOUDOPS_IDENTITY_STORE_ID")]
        identity_store_id: String,
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        given_name: String,
        #[arg(long)]
        family_name: String,
    },
    CreateGroup {
        #[arg(long, env = "CLOUDOPS_IDENTITY_STORE_ID")]
        identity_store_id: String,
        #[arg(long)]
        display_name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    AssignUserToGroup {
        #[arg(long, env = "CLOUDOPS_IDENTITY_STORE_ID")]
        identity_store_id: String,
        #[arg(long)]
        group_id: String,
        #[arg(long)]
        user_id: String,
    },
    AssignGroupToUser {
        #[arg(long, env = "CLOUDOPS_IDENTITY_STORE_ID")]
        identity_store_id: String,
        #[arg(long)]
        group_id: String,
        #[arg(long)]
        user_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum StorageAction {
    CreateBucket {
        name: String,
    },
    Upload {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
        /// Local file whose bytes become the object body.
        #[arg(long)]
        file: PathBuf,
    },
    Read {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
        /// Write the body here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Exists {
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = FacadeConfig::new()
        .with_default_model(cli.default_model.clone())
        .with_error_policy(cli.error_policy);
    if let Some(region) = &cli.region {
        config = config.with_region(region.clone());
    }

    let collaborator: Box<dyn Collaborator> = if cli.in_memory {
        tracing::info!("using in-memory collaborator");
        Box::new(InMemoryCollaborator::new().with_models(sample_catalog()))
    } else {
        let aws = AwsCollaborator::connect(&config).await?;
        // A profile-only region still needs a LocationConstraint on CreateBucket.
        config = config.with_resolved_region(aws.region());
        Box::new(aws)
    };
    let client = collaborator.as_ref();

    tracing::debug!(policy = %config.error_policy, command = ?cli.command, "dispatching");

    match cli.command {
        Commands::Models { action } => {
            let models = ModelFacade::new(client, &config);
            match action {
                ModelAction::List => {
                    let summaries = models.list_available_models().await?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&summaries)?);
                    } else {
                        for m in &summaries {
                            println!(
                                "{}\t{}",
                                m.model_id,
                                m.provider_name.as_deref().unwrap_or("-")
                            );
                        }
                    }
                }
                ModelAction::Invoke { prompt, model } => {
                    let model = model.unwrap_or_else(|| config.default_model_id.clone());
                    let result = models.invoke_model(&prompt, &model).await?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("{}", result.text);
                    }
                }
            }
        }

        Commands::Identity { action } => {
            let identity = IdentityFacade::new(client);
            let output = match action {
                IdentityAction::CreateUser {
                    identity_store_id,
                    user_name,
                    email,
                    given_name,
                    family_name,
                } => serde_json::to_value(
                    identity
                        .create_user(
                            &identity_store_id,
                            &user_name,
                            &email,
                            &given_name,
                            &family_name,
                        )
                        .await?,
                )?,
                IdentityAction::CreateGroup {
                    identity_store_id,
                    display_name,
                    description,
                } => serde_json::to_value(
                    identity
                        .create_group(&identity_store_id, &display_name, &description)
                        .await?,
                )?,
                IdentityAction::AssignUserToGroup {
                    identity_store_id,
                    group_id,
                    user_id,
                } => serde_json::to_value(
                    identity
                        .assign_user_to_group(&identity_store_id, &group_id, &user_id)
                        .await?,
                )?,
                IdentityAction::AssignGroupToUser {
                    identity_store_id,
                    group_id,
                    user_id,
                } => serde_json::to_value(
                    identity
                        .assign_group_to_user(&identity_store_id, &group_id, &user_id)
                        .await?,
                )?,
            };
            print_record(cli.json, &output)?;
        }

        Commands::Storage { action } => {
            let storage = StorageFacade::new(client, &config);
            match action {
                StorageAction::CreateBucket { name } => {
                    let created = storage.create_bucket(&name).await?;
                    print_record(cli.json, &json!({ "Bucket": name, "Created": created }))?;
                }
                StorageAction::Upload { bucket, key, file } => {
                    let body = std::fs::read(&file)?;
                    let size = body.len();
                    let uploaded = storage.upload_file(&bucket, &key, body).await?;
                    print_record(
                        cli.json,
                        &json!({ "Bucket": bucket, "Key": key, "Size": size, "Uploaded": uploaded }),
                    )?;
                }
                StorageAction::Read { bucket, key, out } => {
                    let object = storage.read_object(&bucket, &key).await?;
                    match out {
                        Some(path) => {
                            std::fs::write(&path, &object.body)?;
                            tracing::info!(path = %path.display(), bytes = object.body.len(), "object written");
                        }
                        None => std::io::stdout().write_all(&object.body)?,
                    }
                }
                StorageAction::Exists { name } => {
                    let exists = storage.bucket_exists(&name).await?;
                    print_record(cli.json, &json!({ "Bucket": name, "Exists": exists }))?;
                }
            }
        }
    }

    Ok(())
}

/// Pretty JSON with `--json`, otherwise one `Field: value` line per field.
fn print_record(json: bool, value: &serde_json::Value) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }
    if let Some(fields) = value.as_object() {
        for (name, field) in fields {
            match field.as_str() {
                Some(s) => println!("{name}: {s}"),
                None => println!("{name}: {field}"),
            }
        }
    }
    Ok(())
}
