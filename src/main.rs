// src/main.rs
// DOCUMENTATION: Command-line entry point
// PURPOSE: Initialize config, logging and the authenticated client, then run
// one command against the backend

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use places_client::config::{init_http_client, Config};
use places_client::http::{with_auth, LoginRedirect, PipelineOptions, ReqwestTransport};
use places_client::models::LoginRequest;
use places_client::services::{
    evaluate_now, filters, ApiClient, AuthService, CommunityService, FavoritesService,
    GooglePlacesClient, PlacesCache, UserPlacesService,
};
use places_client::storage::FileTokenStore;
use places_client::views::CommunityFeed;
use places_client::ClientError;
use std::env;
use std::process;
use std::sync::Arc;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

const USAGE: &str = "Usage: places-client <command> [args]

Commands:
  login <email> <password>      Log in and store credentials
  logout                        Log out and clear credentials
  me                            Show the current user
  community [city] [category]   List community places
  mine                          List your places
  favorites [filter]            List your favorites
  search <query>                Search the maps provider
  hours <json>                  Evaluate an opening-hours schedule now";

/// Everything a command needs
struct App {
    config: Config,
    api: ApiClient,
    store: Arc<FileTokenStore>,
    navigator: Arc<LoginRedirect>,
}

impl App {
    fn build(config: Config) -> Result<Self> {
        let store = Arc::new(
            FileTokenStore::open(&config.token_store_path)
                .context("Failed to open the token store")?,
        );
        let navigator = Arc::new(LoginRedirect::new(config.login_route.clone()));
        let client = init_http_client(&config).context("Failed to build the HTTP client")?;

        let transport = with_auth(
            Arc::new(ReqwestTransport::new(client)),
            store.clone(),
            navigator.clone(),
            PipelineOptions::from_config(&config),
        );
        let api = ApiClient::new(transport, config.api_base_url.clone());

        Ok(Self {
            config,
            api,
            store,
            navigator,
        })
    }

    async fn run(&self, command: &str, args: &[String]) -> Result<()> {
        match command {
            "login" => {
                let (Some(email), Some(password)) = (args.first(), args.get(1)) else {
                    bail!("login needs <email> <password>");
                };
                let auth = AuthService::new(self.api.clone(), self.store.clone());
                auth.login(&LoginRequest {
                    email: email.clone(),
                    password: password.clone(),
                })
                .await?;
                println!("{}✅ Logged in as {}{}", GREEN, email, RESET);
            }
            "logout" => {
                AuthService::new(self.api.clone(), self.store.clone())
                    .logout()
                    .await?;
                println!("{}Logged out{}", GREEN, RESET);
            }
            "me" => {
                let user = AuthService::new(self.api.clone(), self.store.clone())
                    .me()
                    .await?;
                println!("{}{}{} <{}>", BOLD, user.name, RESET, user.email);
                if let Some(city) = user.city {
                    println!("  City: {}", city);
                }
            }
            "community" => {
                let mut feed = CommunityFeed::new(
                    CommunityService::new(self.api.clone()),
                    self.config.api_base_url.clone(),
                );
                feed.set_filters(
                    args.first().map(String::as_str).unwrap_or(""),
                    args.get(1).map(String::as_str).unwrap_or(""),
                )
                .await;
                if let Some(error) = feed.error() {
                    bail!("{}", error);
                }

                let now = chrono::Local::now().naive_local();
                for place in feed.items() {
                    let status = feed.status_for(place, now);
                    println!(
                        "{}{}{} {} [{}] {}",
                        BOLD,
                        place.name,
                        RESET,
                        feed.price_for(place).unwrap_or(""),
                        status,
                        place.city.as_deref().unwrap_or("")
                    );
                }
                if !feed.is_last() {
                    println!("{}More places available{}", YELLOW, RESET);
                }
            }
            "mine" => {
                let places = UserPlacesService::new(self.api.clone()).list_mine().await?;
                for place in &places {
                    println!(
                        "#{} {} ({})",
                        place.id,
                        place.name,
                        filters::image_url(place.image_url.as_deref(), &self.config.api_base_url)
                    );
                }
                println!("{} place(s)", places.len());
            }
            "favorites" => {
                let favorites = FavoritesService::new(self.api.clone()).list().await?;
                let term = args.first().map(String::as_str).unwrap_or("");
                for favorite in filters::filter_favorites(&favorites, term) {
                    println!(
                        "{} {}",
                        favorite.name.as_deref().unwrap_or(&favorite.place_id),
                        favorite.address.as_deref().unwrap_or("")
                    );
                }
            }
            "search" => {
                let query = args.join(" ");
                let google = GooglePlacesClient::new(
                    self.api.transport(),
                    self.config.google_places_api_key.clone(),
                    PlacesCache::new(self.config.search_cache_ttl_secs),
                );
                for place in google.text_search(&query).await? {
                    match place.location {
                        Some(at) => println!(
                            "{} ({:.5}, {:.5})",
                            place.name().unwrap_or("?"),
                            at.latitude,
                            at.longitude
                        ),
                        None => println!("{}", place.name().unwrap_or("?")),
                    }
                }
            }
            "hours" => {
                let Some(schedule) = args.first() else {
                    bail!("hours needs a JSON schedule");
                };
                let status = evaluate_now(Some(schedule.as_str()));
                println!("{} ({})", status, status.css_class());
            }
            other => bail!("Unknown command: {}\n\n{}", other, USAGE),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("{}Configuration error: {}{}", RED, e, RESET);
        process::exit(1);
    }

    // 3. Initialize logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        process::exit(2);
    };

    let app = match App::build(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}❌ {:#}{}", RED, e, RESET);
            process::exit(1);
        }
    };

    if let Err(e) = app.run(command, &args[1..]).await {
        match e.downcast_ref::<ClientError>() {
            Some(ClientError::SessionExpired) => eprintln!(
                "{}Session expired. Log in again ({}).{}",
                YELLOW,
                app.navigator.login_route(),
                RESET
            ),
            Some(client_error) => {
                let message = if command == "login" {
                    client_error.login_message()
                } else {
                    client_error.user_message()
                };
                eprintln!("{}❌ {}{}", RED, message, RESET)
            }
            None => eprintln!("{}❌ {:#}{}", RED, e, RESET),
        }
        process::exit(1);
    }
}
