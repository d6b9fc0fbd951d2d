//! Captcha Console - Entry Point
//!
//! Interactive console mapping typed commands onto the auth, dashboard and
//! admin controllers. One command is one user action; every outcome renders
//! through the terminal view.

use captcha_console::{
    AdminController, ApiClient, AuthController, CleanupKind, Config, DashboardController,
    EditorMode, TerminalView, UserEditor,
};
use std::io::{BufRead, Write};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let log_level = std::env::var("RUST_LOG")
        .map(|s| match s.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    info!("using backend {}", config.base_url);

    let client = ApiClient::from_config(&config)?;
    let auth = AuthController::new(client.clone());
    let mut dashboard = DashboardController::new(client.clone());
    let admin = AdminController::new(client);
    let mut view = TerminalView::new();

    println!("Captcha Console v{}", env!("CARGO_PKG_VERSION"));
    println!("Backend: {} (type 'help' for commands)", config.base_url);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, rest)) = parts.split_first() else {
            continue;
        };

        match command {
            "help" => print_usage(),
            "quit" | "exit" => break,

            // Auth
            "login" => match rest {
                [username, password] => {
                    auth.login(&mut view, username, password, &config.default_login_type)
                        .await
                }
                [username, password, login_type] => {
                    auth.login(&mut view, username, password, login_type).await
                }
                _ => println!("usage: login <username> <password> [user|admin]"),
            },
            "signup" => match rest {
                [username, email, password, confirm] => {
                    auth.register(&mut view, username, email, password, confirm)
                        .await
                }
                _ => println!("usage: signup <username> <email> <password> <confirm>"),
            },

            // Dashboard
            "generate" => {
                let difficulty = rest.first().copied().unwrap_or("medium");
                let length = rest.get(1).and_then(|v| v.parse().ok()).unwrap_or(5);
                dashboard.generate(&mut view, difficulty, length).await;
            }
            "recognize" => match rest {
                [method] => dashboard.recognize(&mut view, method).await,
                _ => println!("usage: recognize <tesseract|template|ml>"),
            },
            "validate" => {
                dashboard.validate(&mut view, &rest.join(" ")).await;
            }
            "batch" => match rest.first().and_then(|v| v.parse().ok()) {
                Some(count) => {
                    let length = rest.get(1).and_then(|v| v.parse().ok()).unwrap_or(5);
                    let difficulty = rest.get(2).copied().unwrap_or("medium");
                    dashboard
                        .batch_generate(&mut view, count, length, difficulty)
                        .await;
                }
                None => println!("usage: batch <count> [length] [difficulty]"),
            },
            "history" => dashboard.show_history(&mut view).await,
            "stats" => dashboard.show_statistics(&mut view).await,
            "train" => {
                let dataset_path = rest.first().copied().unwrap_or("data/dataset");
                let model_type = rest.get(1).copied().unwrap_or("knn");
                dashboard.train(&mut view, dataset_path, model_type).await;
            }
            "clear" => dashboard.clear_history(&mut view).await,

            // Admin
            "users" => admin.load_users(&mut view).await,
            "allhistory" => {
                let usernames = admin.load_history(&mut view, rest.first().copied()).await;
                if !usernames.is_empty() {
                    println!("  filter by: {}", usernames.join(", "));
                }
            }
            "sysstats" => admin.load_statistics(&mut view).await,
            "storage" => admin.load_storage(&mut view).await,
            "logs" => admin.load_logs(&mut view).await,
            "adduser" => match rest {
                [username, email, password, rest @ ..] => {
                    let editor = UserEditor {
                        mode: EditorMode::Create,
                        username: username.to_string(),
                        email: email.to_string(),
                        password: password.to_string(),
                        is_admin: rest.first() == Some(&"admin"),
                    };
                    admin.save_user(&mut view, &editor).await;
                }
                _ => println!("usage: adduser <username> <email> <password> [admin]"),
            },
            "edituser" => match rest {
                [username, email, rest @ ..] => {
                    let editor = UserEditor {
                        mode: EditorMode::Edit,
                        username: username.to_string(),
                        email: email.to_string(),
                        password: rest
                            .iter()
                            .find(|v| **v != "admin")
                            .unwrap_or(&"")
                            .to_string(),
                        is_admin: rest.contains(&"admin"),
                    };
                    admin.save_user(&mut view, &editor).await;
                }
                _ => println!("usage: edituser <username> <email> [password] [admin]"),
            },
            "deluser" => match rest {
                [username] => admin.delete_user(&mut view, username).await,
                _ => println!("usage: deluser <username>"),
            },
            "cleanup" => match rest.first().copied() {
                Some("captchas") => admin.cleanup(&mut view, CleanupKind::Captchas).await,
                Some("history") => admin.cleanup(&mut view, CleanupKind::History).await,
                Some("models") => admin.cleanup(&mut view, CleanupKind::Models).await,
                Some("all") => admin.cleanup(&mut view, CleanupKind::All).await,
                _ => println!("usage: cleanup <captchas|history|models|all>"),
            },

            other => println!("unknown command '{}', type 'help'", other),
        }
    }

    Ok(())
}

fn print_usage() {
    println!("Captcha Console v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Auth:");
    println!("  login <username> <password> [user|admin]");
    println!("  signup <username> <email> <password> <confirm>");
    println!();
    println!("Dashboard:");
    println!("  generate [difficulty] [length]     new captcha (simple|medium|hard)");
    println!("  recognize <tesseract|template|ml>  run a recognizer");
    println!("  validate <text>                    check a manual guess");
    println!("  batch <count> [length] [difficulty]");
    println!("  history | stats                    this user's records");
    println!("  train [dataset_path] [model_type]  knn|svm|random_forest");
    println!("  clear                              clear history (confirmed)");
    println!();
    println!("Admin:");
    println!("  users | allhistory [user] | sysstats | storage | logs");
    println!("  adduser <username> <email> <password> [admin]");
    println!("  edituser <username> <email> [password] [admin]");
    println!("  deluser <username>");
    println!("  cleanup <captchas|history|models|all>");
    println!();
    println!("Environment variables:");
    println!("  CAPTCHA_BACKEND_URL           backend base URL (default http://127.0.0.1:5000)");
    println!("  CAPTCHA_REQUEST_TIMEOUT_SECS  HTTP timeout (default 30)");
    println!("  CAPTCHA_LOGIN_TYPE            default login kind (user|admin)");
}
