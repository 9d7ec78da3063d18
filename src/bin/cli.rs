//! Mooners CLI
//!
//! Command-line client for a running Mooners API server:
//! - Check status
//! - Inspect the dashboard and feed
//! - Navigate views and toggle the session
//! - Change the feed interval

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mooners")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mooners community dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8086", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server and feed status
    Status,

    /// Show the full dashboard view-model
    Dashboard,

    /// Show the active view, or switch to NAME
    View {
        /// home, analytics, leaderboard, events or profile
        name: Option<String>,
    },

    /// Log in (session flag only)
    Login,

    /// Log out
    Logout,

    /// List feed posts, newest first
    Posts {
        /// Only this platform (telegram, twitter, whatsapp)
        #[arg(short, long)]
        platform: Option<String>,
        /// Maximum number of posts
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Restart the feed with a new interval
    Interval {
        /// Milliseconds between synthetic posts
        ms: u64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let root = base_url(&cli.api_url);
    let api = format!("{}/api/v1", root);
    let as_json = cli.format == "json";

    match cli.command {
        Commands::Status => {
            let response = client.get(format!("{}/health", root)).send().await;

            let health: Value = match response {
                Ok(resp) if resp.status().is_success() => resp.json().await?,
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Mooners API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Mooners API server is running:");
                    eprintln!("  cargo run --bin mooners-api");
                    std::process::exit(1);
                }
            };
            let feed = fetch(client.get(format!("{}/feed/status", api))).await?;

            if as_json {
                print_json(&json!({ "health": health, "feed": feed }))?;
            } else {
                println!("Mooners v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("API Status: {}", str_field(&health, "status"));
                println!("WebSocket clients: {}", health["ws_connections"]);
                println!();
                println!("Feed:");
                println!("  Running: {}", feed["running"]);
                println!("  Interval: {} ms", feed["interval_ms"]);
                println!("  Posts: {}", feed["posts"]);
                println!(
                    "  Ticks: {} ({} skipped)",
                    feed["ticks"], feed["skipped_ticks"]
                );
                if let Some(uptime) = health["uptime_seconds"].as_u64() {
                    println!();
                    println!("Uptime: {}", format_duration(uptime));
                }
            }
        }

        Commands::Dashboard => {
            let model = fetch(client.get(format!("{}/dashboard", api))).await?;

            if as_json {
                print_json(&model)?;
            } else {
                print_dashboard(&model);
            }
        }

        Commands::View { name } => {
            let request = match name {
                Some(name) => client
                    .put(format!("{}/view", api))
                    .json(&json!({ "view": name })),
                None => client.get(format!("{}/view", api)),
            };
            let view = fetch(request).await?;

            if as_json {
                print_json(&view)?;
            } else {
                println!(
                    "View: {} ({})",
                    str_field(&view, "active_view"),
                    str_field(&view, "resolved")
                );
                println!("Logged in: {}", view["logged_in"]);
                if let Some(message) = view["content"]["message"].as_str() {
                    println!();
                    println!("{}", message);
                }
            }
        }

        Commands::Login => set_session(&client, &api, "login", as_json).await?,

        Commands::Logout => set_session(&client, &api, "logout", as_json).await?,

        Commands::Posts { platform, limit } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(platform) = platform {
                query.push(("platform", platform));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }

            let body = fetch(client.get(format!("{}/posts", api)).query(&query)).await?;

            if as_json {
                print_json(&body)?;
            } else {
                print_posts(body["posts"].as_array().map(Vec::as_slice).unwrap_or(&[]));
            }
        }

        Commands::Interval { ms } => {
            let status = fetch(
                client
                    .put(format!("{}/feed/interval", api))
                    .json(&json!({ "interval_ms": ms })),
            )
            .await?;

            if as_json {
                print_json(&status)?;
            } else {
                println!("Feed restarted: one post every {} ms", status["interval_ms"]);
            }
        }

        Commands::Config { output } => {
            let config = mooners::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn set_session(
    client: &reqwest::Client,
    api: &str,
    action: &str,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = fetch(client.post(format!("{}/session/{}", api, action))).await?;

    if as_json {
        print_json(&session)?;
    } else if let Some(card) = session.get("session_card") {
        println!(
            "Logged in as {} (reputation {}, {} day streak)",
            str_field(card, "username"),
            card["reputation"],
            card["streak"]
        );
    } else {
        println!("Logged out");
    }
    Ok(())
}

/// Send a request and decode the JSON body, exiting with the API's error message on failure
async fn fetch(request: reqwest::RequestBuilder) -> Result<Value, Box<dyn std::error::Error>> {
    let response = request.send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = body["error"]["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        eprintln!("Request failed ({}): {}", status, message);
        std::process::exit(1);
    }

    Ok(body)
}

/// Server root without a trailing slash, so joined paths never double it
fn base_url(api_url: &str) -> &str {
    api_url.trim_end_matches('/')
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or("-")
}

fn print_dashboard(model: &Value) {
    println!(
        "View: {}    Logged in: {}",
        str_field(model, "active_view"),
        model["logged_in"]
    );
    println!();

    let digest = &model["digest"];
    println!(
        "Daily digest ({}, {}%):",
        str_field(digest, "sentiment"),
        digest["sentiment_score"]
    );
    println!("  {}", str_field(digest, "summary"));
    println!();

    println!("{:<6} {:<16} {:>6}", "Rank", "Member", "Score");
    println!("{}", "-".repeat(30));
    for row in model["leaderboard"].as_array().into_iter().flatten() {
        let marker = if row["highlighted"].as_bool().unwrap_or(false) {
            "*"
        } else {
            " "
        };
        println!(
            "{}{:<5} {:<16} {:>6}",
            marker,
            row["rank"],
            str_field(row, "username"),
            row["score"]
        );
    }
    println!();

    print_posts(model["posts"].as_array().map(Vec::as_slice).unwrap_or(&[]));
}

fn print_posts(posts: &[Value]) {
    if posts.is_empty() {
        println!("No posts.");
        return;
    }

    println!(
        "{:<15} {:<10} {:<16} {:<12} {:>5}  {}",
        "ID", "Platform", "Author", "When", "Likes", "Content"
    );
    println!("{}", "-".repeat(90));

    for post in posts {
        println!(
            "{:<15} {:<10} {:<16} {:<12} {:>5}  {}",
            post["id"],
            str_field(post, "platform"),
            str_field(post, "author"),
            str_field(post, "timestamp"),
            post["likes"],
            truncate(str_field(post, "content"), 40)
        );
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars - 1).collect();
        format!("{}…", head)
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        assert_eq!(base_url("http://host:8086/"), "http://host:8086");
        assert_eq!(base_url("http://host:8086//"), "http://host:8086");
        assert_eq!(base_url("http://host:8086"), "http://host:8086");
        assert_eq!(
            format!("{}/health", base_url("http://host:8086/")),
            "http://host:8086/health"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }
}
