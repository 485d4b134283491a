use crate::cli::{DEFAULT_CONFIG_PATH, GlobalArgs};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use hal_client::{
    ClientConfig, HalClient, HalLink, HalResource, Outcome, RequestOptions, VarValue, Variables,
};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::runtime::Runtime;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ShowArgs {
    pub uri: Option<String>,
    pub rels: Vec<String>,
    pub vars: Vec<String>,
    pub raw: bool,
}

pub fn execute_show(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let client = build_client(global)?;
    let output = runtime()?.block_on(show(&client, &args))?;
    println!("{}", output);
    Ok(())
}

pub fn execute_links(global: &GlobalArgs, uri: Option<String>) -> Result<()> {
    let client = build_client(global)?;
    let output = runtime()?.block_on(links(&client, uri.as_deref()))?;
    println!("{}", output);
    Ok(())
}

fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))
}

/// Client from the configuration file and command-line overrides
pub fn build_client(global: &GlobalArgs) -> Result<HalClient> {
    let mut config = load_config(global)?;

    if let Some(root) = &global.root {
        config = Some(match config {
            Some(mut config) => {
                config.root_url = root.clone();
                config
            }
            None => ClientConfig::new(root.clone()),
        });
    }

    let config = config.ok_or_else(|| {
        CliError::Other(format!(
            "No root URL configured. Pass --root or create {} with `hal init --root <url>`",
            DEFAULT_CONFIG_PATH
        ))
    })?;

    let mut client = HalClient::from_config(&config)?;
    for header in &global.headers {
        let (name, value) = parse_header(header)?;
        client = client.with_header(&name, &[value.as_str()])?;
    }

    debug!(root_url = %client.root_url(), "client ready");
    Ok(client)
}

/// Load the explicit `--config` file, or `hal.toml` if it exists
fn load_config(global: &GlobalArgs) -> Result<Option<ClientConfig>> {
    let path = match &global.config {
        Some(path) => path.as_path(),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Path::new(DEFAULT_CONFIG_PATH),
        None => return Ok(None),
    };

    let config = if global.root.is_some() {
        // validated after the root override
        ClientConfig::load_from_file(path)
    } else {
        ClientConfig::load_with_validation(path)
    };

    config
        .map(Some)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Parse a `Name: value` header argument
pub fn parse_header(header: &str) -> Result<(String, String)> {
    match header.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(CliError::InvalidArgument(format!(
            "header '{}' must look like \"Name: value\"",
            header
        ))),
    }
}

/// Parse `KEY=VALUE` template variables; repeated keys become a list
pub fn parse_variables(vars: &[String]) -> Result<Variables> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for var in vars {
        let (key, value) = var.split_once('=').ok_or_else(|| {
            CliError::InvalidArgument(format!("variable '{}' must look like KEY=VALUE", var))
        })?;
        grouped
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    Ok(grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                VarValue::String(values.remove(0))
            } else {
                VarValue::List(values)
            };
            (key, value)
        })
        .collect())
}

/// Fetch `uri`, follow each relation in turn and render the final resource
pub async fn show(client: &HalClient, args: &ShowArgs) -> Result<String> {
    let variables = parse_variables(&args.vars)?;
    let uri = args.uri.as_deref().unwrap_or("");

    let mut outcome = client
        .get(uri, RequestOptions::new().return_raw_response(args.raw && args.rels.is_empty()))
        .await?;

    for (index, rel) in args.rels.iter().enumerate() {
        let resource = expect_resource(outcome)?;
        let link = resource
            .first_link(rel)?
            .ok_or_else(|| CliError::Other(format!("Relation \"{}\" has no links", rel)))?;

        debug!(rel = %rel, href = %link.href(), "following relation");
        let last = index + 1 == args.rels.len();
        outcome = link
            .get(&variables, RequestOptions::new().return_raw_response(args.raw && last))
            .await?;
    }

    match outcome {
        Outcome::Resource(resource) => Ok(serde_json::to_string_pretty(&resource.to_value())?),
        Outcome::Raw(response) => response
            .text()
            .map_err(|e| CliError::Other(format!("Failed to read response body: {}", e))),
    }
}

/// List every relation and embedded resource of the resource at `uri`
pub async fn links(client: &HalClient, uri: Option<&str>) -> Result<String> {
    let resource = expect_resource(client.get(uri.unwrap_or(""), RequestOptions::new()).await?)?;
    Ok(render_links(&resource))
}

fn expect_resource(outcome: Outcome) -> Result<HalResource> {
    outcome
        .into_resource()
        .ok_or_else(|| CliError::Other("Expected a HAL resource".to_string()))
}

fn render_links(resource: &HalResource) -> String {
    let mut lines = Vec::new();

    for (rel, links) in resource.links() {
        lines.push(ui::section_line(&rel, ""));
        lines.extend(links.iter().map(render_link));
    }

    for (name, resources) in resource.resources() {
        let count = format!("[embedded: {}]", resources.len());
        lines.push(ui::section_line(&name, &count));
    }

    if lines.is_empty() {
        lines.push(ui::item_line("no links", None));
    }

    lines.join("\n")
}

fn render_link(link: &HalLink) -> String {
    let mut text = link.href().to_string();
    if let Some(title) = link.title() {
        text = format!("{} \"{}\"", text, title);
    }
    ui::item_line(&text, link.templated().then_some("templated"))
}
