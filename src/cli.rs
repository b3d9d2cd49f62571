//! CLI: scan a page → authenticate → introspect → browse
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use url::Url;

use crate::browse::Browser;
use crate::cache::SchemaCache;
use crate::discovery::{discover, retrieve, Pattern};
use crate::error::Error;
use crate::prompt::{pick, Prompter, Terminal};
use crate::report;
use crate::schema::{OperationKind, Schema};
use crate::transport::{fetch_page, Auth, HttpTransport, Transport};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// discover an AppSync GraphQL endpoint on a web page and browse its schema interactively
#[derive(Parser, Debug)]
#[command(name = "countersync", version)]
pub struct CommandLineInterface {
    /// page to scan for endpoints and credentials
    url: Url,

    /// reserved
    #[arg(long)]
    interactive: Option<String>,

    /// where introspection responses are cached (default: $HOME/.countersync)
    #[arg(long, env = "COUNTERSYNC_CACHE_DIR")]
    cache_dir: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let cache = match &self.cache_dir {
            Some(dir) => SchemaCache::new(dir),
            None => SchemaCache::in_home()?,
        };
        let mut prompter = Terminal;

        let page = fetch_page(&self.url)
            .await
            .with_context(|| format!("cannot fetch {}", self.url))?;

        let endpoint = retrieve(&mut prompter, &page, Pattern::AppSyncGraphql)?.ok_or(Error::NoEndpoint)?;
        report::success(format!("Found AppSync GraphQL Endpoint: {endpoint}"));
        let endpoint = Url::parse(&endpoint).with_context(|| format!("endpoint {endpoint} is not a URL"))?;

        let auth = choose_auth(&mut prompter, &page)?;
        report_cognito(&page);
        report::success(format!("Authenticating with {auth}..."));

        let transport = HttpTransport::new(endpoint, &auth)?;
        let schema = load_schema(&transport, &cache, transport.endpoint()).await?;
        report::success("Successfully retrieved GraphQL Schema.");
        report_actions(&schema);
        report::blank();

        Browser::new(&schema, prompter, transport).run().await?;
        Ok(())
    }
}

/// Collect usable credentials from the page and let the operator choose between them.
pub fn choose_auth<P: Prompter + ?Sized>(prompter: &mut P, page: &str) -> Result<Auth, Error> {
    let mut options = Vec::new();

    if let Some(key) = retrieve(prompter, page, Pattern::GraphqlApiKey)? {
        options.push(Auth::ApiKey(key));
    }
    if let Some(access_key_id) = retrieve(prompter, page, Pattern::AccessKeyId)? {
        if let Some(secret_access_key) = retrieve(prompter, page, Pattern::SecretAccessKey)? {
            options.push(Auth::Iam { access_key_id, secret_access_key });
        }
    }
    for line in options.iter().flat_map(found_lines) {
        report::success(line);
    }

    let labels = options.iter().map(Auth::to_string).collect();
    let chosen = pick(prompter, labels, "Which authentication type do you want to use?")?;
    options
        .into_iter()
        .find(|auth| chosen.as_deref() == Some(auth.to_string().as_str()))
        .ok_or(Error::NoAuthMechanism)
}

/// Read the schema from the cache, or introspect the endpoint and cache the raw response.
pub async fn load_schema<T: Transport>(transport: &T, cache: &SchemaCache, endpoint: &Url) -> Result<Schema, Error> {
    if let Some(cached) = cache.load(endpoint.as_str())? {
        tracing::info!(%endpoint, "using cached schema");
        return Ok(crate::introspection::parse_response(cached)?);
    }
    let response = transport
        .post(&crate::introspection::request_body())
        .await
        .map_err(Error::Introspection)?;
    let schema = crate::introspection::parse_response(response.clone())?;
    let path = cache.store(endpoint.as_str(), &response)?;
    tracing::info!(path = %path.display(), "schema cached");
    Ok(schema)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn found_lines(auth: &Auth) -> Vec<String> {
    match auth {
        Auth::ApiKey(key) => vec![format!("Found API Key: {key}")],
        Auth::Iam { access_key_id, secret_access_key } => vec![
            format!("Found Access Key ID: {access_key_id}"),
            format!("Found Secret Access Key: {secret_access_key}"),
        ],
    }
}

fn report_cognito(page: &str) {
    for pattern in Pattern::COGNITO {
        for found in discover(page, pattern) {
            report::info(format!("Found {pattern}: {found}"));
        }
    }
}

fn report_actions(schema: &Schema) {
    for kind in [OperationKind::Query, OperationKind::Mutation] {
        let count = schema.actions(kind).len();
        if count > 0 {
            report::success(format!("Found {count} {kind} action(s)"));
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
