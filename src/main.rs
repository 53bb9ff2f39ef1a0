use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use relaytip::controller::{Location, is_bitcoin_address};
use relaytip::formatters::format_relay_set;
use relaytip::interactive::InteractiveApp;
use relaytip::pages::{
    ControlKind, FormControl, LegacyPage, SortTrigger, build_sort_links, load_results_fragment,
    prefill_form_from_address,
};
use relaytip::{
    ApiClient, ExitFilter, ForwardOutcome, SearchQuery, SortKey, forward_failure_text,
    parse_query_string, trace,
};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "relaytip",
    version,
    about = "Search Tor relays accepting donations and tip their operators",
    long_about = None
)]
struct Cli {
    /// Saved-search link to replay; its parameters prefill the query
    link: Option<String>,

    /// Base URL of the donation service
    #[arg(long, env = "RELAYTIP_URL", default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Relay slice to search (all_relays, fast_exits, almost_fast_exits,
    /// exits_only, guards_only)
    #[arg(long, value_parser = parse_exit_filter)]
    exit_filter: Option<ExitFilter>,

    /// Filter relays by two-letter country code
    #[arg(short, long)]
    country: Option<String>,

    /// Sort column (cw, adv_bw, p_guard, p_middle, p_exit, nick, cc)
    #[arg(short, long, value_parser = parse_sort_key)]
    sort: Option<SortKey>,

    /// Sort ascending instead of descending
    #[arg(long)]
    ascending: bool,

    /// Print bare fingerprints instead of Atlas links
    #[arg(long)]
    no_links: bool,

    /// Number of relays to select
    #[arg(short = 'n', long)]
    top: Option<u32>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Interactive mode
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Request a donation forwarding address for the selection
    #[arg(long)]
    donate: bool,

    /// Check whether a donation sent to ADDRESS has been forwarded
    #[arg(long, value_name = "ADDRESS")]
    check: Option<String>,

    /// Fetch the server-rendered results fragment instead of the JSON table
    #[arg(long)]
    html: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_exit_filter(raw: &str) -> Result<ExitFilter, String> {
    raw.parse().map_err(|_| {
        let known: Vec<_> = ExitFilter::all().iter().map(|f| f.as_str()).collect();
        format!("unknown exit filter '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    raw.parse().map_err(|_| {
        let known: Vec<_> = SortKey::all().iter().map(|k| k.as_str()).collect();
        format!("unknown sort column '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    trace::init_tracing();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.interactive {
        let mut app = InteractiveApp::new(&cli.url)?;
        return app.run(cli.link.as_deref());
    }

    // Link parameters first, explicit flags on top
    let mut query = match cli.link.as_deref() {
        Some(link) => {
            let params = parse_query_string(link);
            SearchQuery::from_params(params.iter().map(|(n, v)| (n.as_str(), v.as_str())))
        }
        None => SearchQuery::default(),
    };
    if let Some(exit_filter) = cli.exit_filter {
        query.exit_filter = exit_filter;
    }
    if cli.no_links {
        query.links = false;
    }
    if let Some(sort) = cli.sort {
        query.sort = sort;
    }
    if cli.ascending {
        query.sort_reverse = false;
    }
    if let Some(country) = cli.country {
        query.country = Some(country.to_lowercase());
    }
    if let Some(top) = cli.top {
        query.top = Some(top);
    }

    let client = ApiClient::new(&cli.url)?;

    if let Some(address) = cli.check {
        return check_transaction(&client, &address);
    }

    if cli.html {
        return fetch_fragment(&client, &query);
    }

    if cli.donate {
        return request_donation_address(&client, &query);
    }

    run_search(&client, &query, cli.format)
}

fn run_search(client: &ApiClient, query: &SearchQuery, format: OutputFormat) -> Result<()> {
    let set = client.search(query)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
        OutputFormat::Text => {
            if set.is_empty() {
                println!("{}", "No relays matched your criteria.".red());
            } else {
                print!("{}", format_relay_set(&set, query.links));
                print_share_and_sort_links(client, query);
            }
        }
    }

    Ok(())
}

/// The share link reproduces this search when opened; the sort links are the
/// same search re-sorted by each column, the way the server-rendered page
/// offers them.
fn print_share_and_sort_links(client: &ApiClient, query: &SearchQuery) {
    let location = Location::new(client.base_url());
    let share = location.share_link(query);
    println!("\nshare this search: {}", share.blue());

    let mut page = LegacyPage::at(share);
    page.sort_triggers = SortKey::all()
        .iter()
        .map(|key| SortTrigger::new(key.as_str()))
        .collect();
    build_sort_links(&mut page);

    println!("re-sort:");
    for trigger in &page.sort_triggers {
        println!("  {:<9} {}", trigger.id, trigger.href.dimmed());
    }
}

fn request_donation_address(client: &ApiClient, query: &SearchQuery) -> Result<()> {
    let reply = client.payment(query)?;

    match reply.bitcoin_address() {
        Some(address) => {
            println!("send your donation to: {}", address.yellow().bold());
            if let Some(data) = &reply.data {
                if !data.message.is_empty() {
                    println!("{}", data.message);
                }
            }
            println!(
                "{}",
                format!(
                    "check forwarding later with: relaytip --check {address}"
                )
                .dimmed()
            );
        }
        None => {
            println!("{}", "No relay in this selection accepts donations.".red());
        }
    }

    Ok(())
}

fn check_transaction(client: &ApiClient, address: &str) -> Result<()> {
    if !is_bitcoin_address(address) {
        eprintln!(
            "{}",
            format!("'{address}' does not look like a bitcoin address.").red()
        );
        std::process::exit(1);
    }

    match client.forward(address) {
        ForwardOutcome::Success(reply) => {
            println!("{}", reply.data_message().green());
            Ok(())
        }
        ForwardOutcome::Failure(failure) => {
            eprintln!("{}", forward_failure_text(&failure).red());
            std::process::exit(1);
        }
    }
}

/// The legacy page lifecycle: prefill the form from the address, then fetch
/// and splice the rendered results fragment.
fn fetch_fragment(client: &ApiClient, query: &SearchQuery) -> Result<()> {
    let location = Location::new(client.base_url());
    let mut page = LegacyPage::at(location.share_link(query));
    page.controls = vec![
        FormControl::radio("exit_filter", query.exit_filter.as_str()),
        FormControl::checkbox("links", "true"),
        FormControl::text("sort"),
        FormControl::text("country"),
        FormControl::text("top"),
    ];
    prefill_form_from_address(&mut page);

    let applied: Vec<String> = page
        .controls
        .iter()
        .filter(|c| match c.kind {
            ControlKind::Checkbox | ControlKind::Radio => c.checked,
            ControlKind::Text => !c.value.is_empty(),
        })
        .map(|c| format!("{}={}", c.name, c.value))
        .collect();
    if !applied.is_empty() {
        eprintln!("{}", format!("form prefilled: {}", applied.join(" ")).dimmed());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("loading results fragment...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let loaded = load_results_fragment(&mut page, client)?;
    spinner.finish_and_clear();

    if loaded {
        println!("{}", page.fragment.unwrap_or_default());
    } else {
        eprintln!("nothing to fetch: the address has no query string");
    }

    Ok(())
}
