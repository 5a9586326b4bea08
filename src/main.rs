//! search-kit - drive the search core from a JSON catalogue
//!
//! The catalogue stands in for the platform providers:
//!
//! ```json
//! { "apps": [...], "contacts": [...], "files": [...], "settings": [...],
//!   "shortcuts": [...], "installedPackages": ["com.whatsapp"] }
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::debug;

use search_kit_core::actions::{InstalledPackages, StaticPermissions};
use search_kit_core::config::{self, Config};
use search_kit_core::customization::{default_preferences_path, JsonPreferenceStore};
use search_kit_core::domains::{
    AppEntry, AppShortcutEntry, ContactEntry, DeviceSettingEntry, Domain, FileEntry, IdentityKey,
    SearchableEntity,
};
use search_kit_core::logging;
use search_kit_core::recent::{RecentEntry, RecentLedger};
use search_kit_core::{Platform, SearchKit};

#[derive(Parser, Debug)]
#[command(name = "search-kit", version, about = "Device-local search core driver")]
struct Cli {
    /// Catalogue of candidates (JSON)
    #[arg(long, short = 'c', global = true, default_value = "catalogue.json")]
    catalogue: PathBuf,

    /// Config file (defaults to ~/.searchkit/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preference file (defaults to ~/.searchkit/preferences.json)
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,

    /// Grant the phone-call permission for action resolution
    #[arg(long, global = true)]
    call_permission: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank every domain (or one) against a query
    Search {
        query: String,
        #[arg(long, short = 'd')]
        domain: Option<Domain>,
    },
    /// List pinned and excluded items of a domain
    Pinned { domain: Domain },
    /// Pin an item by identity key
    Pin { domain: Domain, key: String },
    /// Exclude an item by identity key
    Exclude { domain: Domain, key: String },
    /// Restore an excluded item
    Include { domain: Domain, key: String },
    /// Set (or clear, when omitted) a nickname
    Nickname {
        domain: Domain,
        key: String,
        nickname: Option<String>,
    },
    /// Resolve messaging and calling channels for a contact
    Resolve {
        contact_id: i64,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show recent activity
    Recent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Catalogue {
    apps: Vec<AppEntry>,
    contacts: Vec<ContactEntry>,
    files: Vec<FileEntry>,
    settings: Vec<DeviceSettingEntry>,
    shortcuts: Vec<AppShortcutEntry>,
    installed_packages: Vec<String>,
}

fn read_catalogue(path: &Path) -> Result<Catalogue> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalogue: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalogue JSON: {}", path.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let _guard = logging::init(&config.logging);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_kit(cli: &Cli, config: &Config) -> Result<SearchKit> {
    let catalogue = read_catalogue(&cli.catalogue)?;
    let preferences = cli
        .preferences
        .clone()
        .unwrap_or_else(default_preferences_path);

    let platform = Platform {
        preferences: Arc::new(JsonPreferenceStore::new(preferences)),
        packages: Arc::new(InstalledPackages::new(catalogue.installed_packages)),
        permissions: Arc::new(StaticPermissions {
            call_phone: cli.call_permission,
            read_contacts: true,
        }),
    };
    let kit = SearchKit::new(config, platform, RecentLedger::new(&config.recent));

    kit.apps().replace_candidates(catalogue.apps);
    kit.contacts().replace_candidates(catalogue.contacts);
    kit.files().replace_candidates(catalogue.files);
    kit.settings().replace_candidates(catalogue.settings);
    kit.shortcuts().replace_candidates(catalogue.shortcuts);
    debug!(catalogue = %cli.catalogue.display(), "Catalogue loaded");
    Ok(kit)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let kit = build_kit(cli, config)?;

    match &cli.command {
        Command::Search { query, domain } => {
            let sections: Vec<(Domain, Vec<SearchableEntity>)> = match domain {
                Some(domain) => vec![(*domain, kit.search(*domain, query))],
                None => kit
                    .search_all(query)
                    .into_iter()
                    .map(|s| (s.domain, s.results))
                    .collect(),
            };
            if cli.json {
                let json: serde_json::Map<String, serde_json::Value> = sections
                    .iter()
                    .map(|(d, results)| serde_json::to_value(results).map(|v| (d.to_string(), v)))
                    .collect::<Result<_, serde_json::Error>>()?;
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                for (domain, results) in &sections {
                    println!("{}:", domain);
                    for entity in results {
                        println!("  {}  [{}]", entity.display_name(), entity.identity());
                    }
                }
            }
            kit.record_recent(RecentEntry::query(query.as_str()));
        }
        Command::Pinned { domain } => {
            let (pinned, excluded) = kit.pinned_and_excluded(*domain);
            print_list("pinned", &pinned);
            print_list("excluded", &excluded);
        }
        Command::Pin { domain, key } => {
            let outcome = kit.pin(*domain, &IdentityKey::new(key.as_str()))?;
            println!("{:?}", outcome);
        }
        Command::Exclude { domain, key } => {
            let outcome = kit.exclude(*domain, &IdentityKey::new(key.as_str()))?;
            println!("{:?}", outcome);
        }
        Command::Include { domain, key } => {
            let outcome = kit.include(*domain, &IdentityKey::new(key.as_str()))?;
            println!("{:?}", outcome);
        }
        Command::Nickname {
            domain,
            key,
            nickname,
        } => {
            let outcome =
                kit.set_nickname(*domain, &IdentityKey::new(key.as_str()), nickname.as_deref())?;
            println!("{:?}", outcome);
        }
        Command::Resolve { contact_id, phone } => {
            let contact = kit
                .contacts()
                .get(&IdentityKey::contact(*contact_id))
                .with_context(|| format!("No contact with id {}", contact_id))?;
            println!("messaging: {}", kit.resolve_messaging_channel(&contact));
            println!(
                "calling:   {}",
                kit.resolve_calling_channel(&contact, phone.as_deref())
            );
            match kit.message_intent(&contact) {
                Ok(intent) => println!("message intent: {}", serde_json::to_string(&intent)?),
                Err(failure) => println!("message intent unavailable: {}", failure.reason_code()),
            }
        }
        Command::Recent => {
            for entry in kit.recent() {
                println!("{}", entry.label());
            }
        }
    }
    Ok(())
}

fn print_list(title: &str, items: &[SearchableEntity]) {
    println!("{} ({}):", title, items.len());
    for entity in items {
        println!("  {}  [{}]", entity.display_name(), entity.identity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_sections_are_optional() {
        let catalogue: Catalogue = serde_json::from_str(
            r#"{"apps": [{"packageName": "com.android.camera", "label": "Camera"}],
                "installedPackages": ["com.whatsapp"]}"#,
        )
        .unwrap();
        assert_eq!(catalogue.apps.len(), 1);
        assert!(catalogue.contacts.is_empty());
        assert_eq!(catalogue.installed_packages, vec!["com.whatsapp".to_string()]);
    }

    #[test]
    fn test_search_subcommand_parses_domain() {
        let cli = Cli::try_parse_from(["search-kit", "search", "cam", "--domain", "apps"]).unwrap();
        match cli.command {
            Command::Search { query, domain } => {
                assert_eq!(query, "cam");
                assert_eq!(domain, Some(Domain::Apps));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_domain_is_rejected() {
        assert!(Cli::try_parse_from(["search-kit", "pinned", "widgets"]).is_err());
    }
}
