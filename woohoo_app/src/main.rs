use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use woohoo_client::logging::{init_logging, DEFAULT_LOG_DIRECTIVES};
use woohoo_client::{time_ago, ClientConfig, ClientError, WoohooApp, WoohooEvent};

/// Walk through onboarding, tap some phones and watch for banners.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value = "5551234567")]
    phone: String,

    #[arg(long, default_value = "123456")]
    code: String,

    #[arg(long, default_value = "Sam")]
    name: String,

    #[arg(long, default_value = "sam_smith")]
    username: String,

    /// Friend ids to add during onboarding.
    #[arg(long, value_delimiter = ',', default_value = "8,9")]
    friends: Vec<String>,

    /// How many phone taps to simulate.
    #[arg(long, default_value_t = 1)]
    taps: u32,

    /// Seconds to keep pumping events for notification banners.
    #[arg(long, default_value_t = 0)]
    watch_secs: u64,

    /// Forget any stored session before starting.
    #[arg(long)]
    logout: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(DEFAULT_LOG_DIRECTIVES) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let config = ClientConfig::from_env()?;
    let mut app = WoohooApp::new(config);

    if args.logout && app.auth().is_authenticated() {
        app.logout().await;
    }

    if app.auth().is_authenticated() {
        info!("Welcome back");
    } else {
        onboard(&mut app, &args).await?;
    }

    for _ in 0..args.taps {
        match app.tap_phones().await {
            Ok(woohoo) => info!("Woohoo'd with {} at {}", woohoo.user2.name, woohoo.location),
            Err(e) => error!("Tap failed: {}", e),
        }
    }

    let now = Utc::now();
    for woohoo in app.feed() {
        println!(
            "{:>8}  {} + {} @ {}",
            time_ago(woohoo.timestamp, now),
            woohoo.user1.name,
            woohoo.user2.name,
            woohoo.location
        );
    }
    app.pump();

    if args.watch_secs > 0 {
        watch(&mut app, Duration::from_secs(args.watch_secs)).await;
    }

    Ok(())
}

async fn onboard(app: &mut WoohooApp, args: &Args) -> Result<(), ClientError> {
    app.submit_phone(&args.phone).await?;
    app.submit_code(&args.code).await?;
    app.submit_name(&args.name)?;
    app.submit_username(&args.username)?;
    app.submit_profile_pic(None);
    for id in &args.friends {
        app.picker_mut().toggle(id);
    }
    app.submit_friends().await;
    app.finish_onboarding();
    info!("Onboarded as {}", args.username);
    Ok(())
}

async fn watch(app: &mut WoohooApp, duration: Duration) {
    let ticker = app.ticker().spawn();
    let deadline = tokio::time::Instant::now() + duration;

    // Periodically run the pump function
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    while tokio::time::Instant::now() < deadline {
        interval.tick().await;

        for event in app.pump() {
            match event {
                WoohooEvent::BannerShown(banner) => {
                    info!("Banner: {} {}", banner.title, banner.message);
                }
                WoohooEvent::BannerHidden => info!("Banner hidden"),
                WoohooEvent::Navigate(route) => info!("Navigate to {:?}", route),
                WoohooEvent::WoohooCreated(woohoo) => info!("New woohoo {}", woohoo.id),
                WoohooEvent::ScanFailed(reason) => info!("Scan failed: {}", reason),
                WoohooEvent::LoggedOut => info!("Logged out"),
            }
        }
    }

    ticker.abort();
}
