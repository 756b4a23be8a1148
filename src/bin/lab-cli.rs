use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "lab-cli")]
#[command(about = "Probe the running lab services", long_about = None)]
struct Cli {
    /// Base URL of the target service.
    #[arg(short, long, default_value = "http://localhost:4000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a file through the file service
    Read {
        filename: String,
        /// Use the unguarded route instead of the validated one
        #[arg(long)]
        unvalidated: bool,
    },
    /// Write the sample files on the file service
    Setup,
    /// Log in to the auth service
    Login { username: String, password: String },
    /// Show who a session token belongs to
    Me {
        #[arg(short, long)]
        token: String,
    },
    /// End a session
    Logout {
        #[arg(short, long)]
        token: String,
    },
    /// Fetch an order from the order service as a given user
    Order {
        id: String,
        #[arg(short = 'U', long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let url = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Read { filename, unvalidated } => {
            let route = if unvalidated { "read-no-validate" } else { "read" };
            client.post(format!("{}/{}", url, route))
                .json(&json!({ "filename": filename }))
                .send()
                .await?
        }
        Commands::Setup => {
            client.post(format!("{}/setup-sample", url))
                .send()
                .await?
        }
        Commands::Login { username, password } => {
            client.post(format!("{}/api/login", url))
                .json(&json!({ "username": username, "password": password }))
                .send()
                .await?
        }
        Commands::Me { token } => {
            client.get(format!("{}/api/me", url))
                .headers(session_cookie(&token)?)
                .send()
                .await?
        }
        Commands::Logout { token } => {
            client.post(format!("{}/api/logout", url))
                .headers(session_cookie(&token)?)
                .send()
                .await?
        }
        Commands::Order { id, user } => {
            client.get(format!("{}/orders/{}", url, id))
                .header("X-User-Id", user)
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn session_cookie(token: &str) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(&format!("session={}", token))?);
    Ok(headers)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("HTTP {}", status);

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    Ok(())
}
