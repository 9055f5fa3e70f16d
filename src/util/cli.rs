use std::str::FromStr;

use clap::Parser;
use url::Url;

use crate::core::models::{Client, Role, Secret, User};
use crate::core::types::{ClientId, ClientSecret, HashedClientSecret, Scope};
use crate::db::{DbStore, DEFAULT_POOL_SIZE};
use crate::mapping::{self, Model};
use crate::store::ClientStore;
use crate::util::hash::sha256;
use crate::util::random::FromRandom;
use crate::Error;

#[derive(Parser)]
#[clap(
    name = "identity-util",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    #[clap(long, env = "DATABASE_URL")]
    database_url: String,
    #[clap(long, env = "DATABASE_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: u32,
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    Migrate,
    PrintSchema(PrintSchema),
    VerifySchema,
    CleanUp(CleanUp),
    ListClients,
    ShowClient(ShowClient),
    CreateClient(CreateClient),
    DeleteClient(DeleteClient),
    ListClientUris(ListClientUris),
    AddClientUri(AddClientUri),
    DeleteClientUri(DeleteClientUri),
    AddClientScope(AddClientScope),
    DeleteClientScope(DeleteClientScope),
    AddClientGrantType(AddClientGrantType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyType {
    String,
    Int,
    BigInt,
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(KeyType::String),
            "int" => Ok(KeyType::Int),
            "bigint" => Ok(KeyType::BigInt),
            other => Err(format!("unknown key type: {}", other)),
        }
    }
}

impl KeyType {
    fn model(self) -> Model {
        match self {
            KeyType::String => mapping::build::<String, User, Role>(),
            KeyType::Int => mapping::build::<i32, User, Role>(),
            KeyType::BigInt => mapping::build::<i64, User, Role>(),
        }
    }
}

#[derive(Parser)]
struct PrintSchema {
    /// string, int or bigint
    #[clap(short, long, default_value = "string")]
    key_type: KeyType,
    /// Print the DROP statements instead.
    #[clap(long)]
    drop: bool,
}

#[derive(Parser)]
struct CleanUp {
    #[clap(short, long, default_value = "100")]
    batch_size: u32,
}

#[derive(Parser)]
struct ShowClient {
    #[clap(short, long)]
    id: ClientId,
}

#[derive(Parser)]
struct CreateClient {
    #[clap(short, long)]
    id: ClientId,
    #[clap(short, long)]
    name: Option<String>,
    /// Generated and printed when omitted.
    #[clap(short, long)]
    secret: Option<String>,
    #[clap(short, long)]
    grant_type: Vec<String>,
}

#[derive(Parser)]
struct DeleteClient {
    #[clap(short, long)]
    id: ClientId,
}

#[derive(Parser)]
struct ListClientUris {
    #[clap(short, long)]
    id: ClientId,
}

#[derive(Parser)]
struct AddClientUri {
    #[clap(short, long)]
    id: ClientId,
    #[clap(short, long)]
    uri: String,
    /// Register as a post-logout redirect URI.
    #[clap(long)]
    post_logout: bool,
}

#[derive(Parser)]
struct DeleteClientUri {
    #[clap(short, long)]
    id: ClientId,
    #[clap(short, long)]
    uri: String,
    #[clap(long)]
    post_logout: bool,
}

#[derive(Parser)]
struct AddClientScope {
    #[clap(short, long)]
    id: ClientId,
    #[clap(short, long)]
    scope: String,
}

#[derive(Parser)]
struct DeleteClientScope {
    #[clap(short, long)]
    id: ClientId,
    #[clap(short, long)]
    scope: String,
}

#[derive(Parser)]
struct AddClientGrantType {
    #[clap(short, long)]
    id: ClientId,
    #[clap(short, long)]
    grant_type: String,
}

fn get_client(store: &DbStore, id: &ClientId) -> Result<Client, Error> {
    store
        .find_client_by_id(id)?
        .ok_or(Error::NotFound("client"))
}

fn uris_of(client: &mut Client, post_logout: bool) -> &mut Vec<String> {
    if post_logout {
        &mut client.post_logout_redirect_uris
    } else {
        &mut client.redirect_uris
    }
}

fn print_schema(c: &PrintSchema) -> Result<(), Error> {
    let model = c.key_type.model();
    model.validate()?;

    if c.drop {
        print!("{}", model.render_drop());
    } else {
        print!("{}", model.render_ddl());
    }
    Ok(())
}

fn verify_schema(store: &DbStore) -> Result<(), Error> {
    let mismatches = store.verify_schema()?;
    for mismatch in &mismatches {
        println!("{}", mismatch);
    }

    if !mismatches.is_empty() {
        return Err(Error::SchemaDrift(mismatches.len()));
    }
    println!("Schema matches the model");
    Ok(())
}

fn clean_up(c: &CleanUp, store: &DbStore) -> Result<(), Error> {
    let report = store.remove_expired(c.batch_size)?;
    println!(
        "Removed {} grants and {} device codes",
        report.grants, report.device_codes
    );
    Ok(())
}

fn list_clients(store: &DbStore) -> Result<(), Error> {
    for client in store.list_clients()? {
        println!(
            "{} (name: \"{}\"{})",
            client.client_id.0,
            client.client_name.as_deref().unwrap_or_default(),
            if client.enabled { "" } else { ", disabled" }
        );
    }
    Ok(())
}

fn show_client(c: &ShowClient, store: &DbStore) -> Result<(), Error> {
    let client = get_client(store, &c.id)?;
    println!("{}", serde_json::to_string_pretty(&client)?);
    Ok(())
}

fn create_client(c: &CreateClient, store: &DbStore) -> Result<(), Error> {
    let (secret, generated) = match &c.secret {
        Some(secret) => (ClientSecret(secret.clone()), false),
        None => (ClientSecret::from_random(), true),
    };
    let hashed: HashedClientSecret = sha256(&secret);

    let mut client = Client::new(c.id.clone());
    client.client_name = c.name.clone();
    client.allowed_grant_types = c.grant_type.clone();
    client.client_secrets.push(Secret::shared(hashed));

    let client = store.put_client(&client)?;
    if generated {
        println!("Client secret: {}", secret.0);
    }
    println!("Created client {} (id {})", client.client_id.0, client.id);
    Ok(())
}

fn delete_client(c: &DeleteClient, store: &DbStore) -> Result<(), Error> {
    store.delete_client(&c.id)
}

fn list_client_uris(c: &ListClientUris, store: &DbStore) -> Result<(), Error> {
    let client = get_client(store, &c.id)?;

    for uri in &client.redirect_uris {
        println!("{}", uri);
    }
    for uri in &client.post_logout_redirect_uris {
        println!("{} (post logout)", uri);
    }
    Ok(())
}

fn add_client_uri(c: &AddClientUri, store: &DbStore) -> Result<(), Error> {
    let uri = Url::parse(&c.uri)?;
    let mut client = get_client(store, &c.id)?;

    let uris = uris_of(&mut client, c.post_logout);
    if !uris.iter().any(|u| u.as_str() == uri.as_str()) {
        uris.push(uri.into());
        store.update_client(&client)?;
    }
    Ok(())
}

fn delete_client_uri(c: &DeleteClientUri, store: &DbStore) -> Result<(), Error> {
    let uri = Url::parse(&c.uri)?;
    let mut client = get_client(store, &c.id)?;

    let uris = uris_of(&mut client, c.post_logout);
    let before = uris.len();
    uris.retain(|u| u.as_str() != uri.as_str() && u != &c.uri);
    if uris.len() == before {
        return Err(Error::NotFound("client URI"));
    }

    store.update_client(&client)?;
    Ok(())
}

fn add_client_scope(c: &AddClientScope, store: &DbStore) -> Result<(), Error> {
    let mut client = get_client(store, &c.id)?;

    for scope in Scope::from_delimited_parts(&c.scope).as_parts() {
        if !client.allowed_scopes.contains(&scope) {
            client.allowed_scopes.push(scope);
        }
    }
    store.update_client(&client)?;
    Ok(())
}

fn delete_client_scope(c: &DeleteClientScope, store: &DbStore) -> Result<(), Error> {
    let mut client = get_client(store, &c.id)?;
    let scope = Scope::from_delimited_parts(&c.scope);

    client.allowed_scopes.retain(|s| !scope.contains(s));
    store.update_client(&client)?;
    Ok(())
}

fn add_client_grant_type(c: &AddClientGrantType, store: &DbStore) -> Result<(), Error> {
    let mut client = get_client(store, &c.id)?;

    if !client.allowed_grant_types.contains(&c.grant_type) {
        client.allowed_grant_types.push(c.grant_type.clone());
        store.update_client(&client)?;
    }
    Ok(())
}

pub fn run_cli_action(opts: Options) -> Result<(), Error> {
    use SubCommand as C;

    if let C::PrintSchema(c) = &opts.command {
        return print_schema(c);
    }

    let store = DbStore::acquire_with_size(&opts.database_url, opts.pool_size)?;

    match &opts.command {
        C::Migrate => store.migrate(),
        C::PrintSchema(c) => print_schema(c),
        C::VerifySchema => verify_schema(&store),
        C::CleanUp(c) => clean_up(c, &store),
        C::ListClients => list_clients(&store),
        C::ShowClient(c) => show_client(c, &store),
        C::CreateClient(c) => create_client(c, &store),
        C::DeleteClient(c) => delete_client(c, &store),
        C::ListClientUris(c) => list_client_uris(c, &store),
        C::AddClientUri(c) => add_client_uri(c, &store),
        C::DeleteClientUri(c) => delete_client_uri(c, &store),
        C::AddClientScope(c) => add_client_scope(c, &store),
        C::DeleteClientScope(c) => delete_client_scope(c, &store),
        C::AddClientGrantType(c) => add_client_grant_type(c, &store),
    }
}
