//! OpenCorporates CLI
//!
//! Thin command-line front end over the client library: search the registry
//! by name or show a single company by number and jurisdiction.

use clap::{Parser, Subcommand};
use opencorporates::{Client, Error, LookupRequest, Result, SearchRequest};

#[derive(Parser)]
#[command(name = "opencorporates", version, about = "Query the OpenCorporates company registry")]
struct Cli {
    /// API token (defaults to the OPENCORPORATES_API_TOKEN environment variable)
    #[arg(long, global = true)]
    api_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search companies by name
    Search {
        /// Name to search for
        query: String,
        /// Restrict results to a jurisdiction code, e.g. "fr"
        #[arg(long, short)]
        jurisdiction: Option<String>,
        /// Stop after the first N results
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Show one company by registry number
    Show {
        /// Registry number, e.g. "529591737"
        number: String,
        /// Jurisdiction code, e.g. "fr"
        jurisdiction: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut builder = Client::builder();
    if let Some(token) = cli.api_token {
        builder = builder.api_token(token);
    }
    let client = builder.build()?;

    match cli.command {
        Command::Search {
            query,
            jurisdiction,
            limit,
        } => {
            let mut request = SearchRequest::new(query);
            if let Some(code) = jurisdiction {
                request = request.jurisdiction(code);
            }
            let mut companies = client.search(request);
            let mut shown = 0;
            loop {
                if limit.is_some_and(|limit| shown >= limit) {
                    break;
                }
                match companies.next().await {
                    Ok(company) => {
                        println!("{} ({})", company.name, company.number);
                        shown += 1;
                    }
                    Err(Error::EndOfSequence) => break,
                    Err(err) => return Err(err),
                }
            }
            let info = companies.info();
            eprintln!(
                "{} of {} result(s), page {} of {}",
                shown,
                info.total_count(),
                info.current_page(),
                info.total_pages()
            );
        }
        Command::Show {
            number,
            jurisdiction,
        } => {
            let company = client.lookup(&LookupRequest::new(number, jurisdiction)).await?;
            if company.number.is_empty() {
                eprintln!("no matching company");
            } else {
                println!("{} ({})", company.name, company.number);
                if !company.address.city.is_empty() {
                    println!("{}", company.address);
                }
                if !company.creation_date.is_zero() {
                    println!("incorporated {}", company.creation_date);
                }
            }
        }
    }
    Ok(())
}
