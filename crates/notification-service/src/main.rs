use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use webpush_notification_service::{
    Completion, Delivery, IncomingPush, NotificationHandler, ServiceConfig,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Fatal: invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let deadline = config.deadline;
    let keys = match config.keys.into_keys() {
        Ok(keys) => keys,
        Err(e) => {
            error!("Fatal: invalid key material: {}", e);
            std::process::exit(1);
        }
    };
    let handler = NotificationHandler::new(keys, deadline);

    info!("Notification service reading pushes from stdin (deadline {:?})", deadline);
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line_buffer = String::new();

    loop {
        line_buffer.clear();
        match reader.read_line(&mut line_buffer).await {
            Ok(0) => {
                info!("Stdin closed (EOF). Exiting.");
                break;
            }
            Ok(_) => {
                let trimmed_line = line_buffer.trim();
                if trimmed_line.is_empty() {
                    continue;
                }

                let push: IncomingPush = match serde_json::from_str(trimmed_line) {
                    Ok(push) => push,
                    Err(e) => {
                        warn!("Ignoring malformed push ({} bytes): {}", trimmed_line.len(), e);
                        continue;
                    }
                };

                let (completion, delivered) = Completion::channel();
                let delivery = Delivery::new(completion, push.fallback_content());
                let outcome = handler.handle(&push, delivery).await;
                info!("Push handled: {:?}", outcome);

                let content = match delivered.await {
                    Ok(content) => content,
                    Err(e) => {
                        error!("Delivery dropped without content: {}", e);
                        continue;
                    }
                };
                let line = match serde_json::to_string(&content) {
                    Ok(line) => line,
                    Err(e) => {
                        error!("Failed to serialize notification: {}", e);
                        continue;
                    }
                };
                if let Err(e) = stdout.write_all(format!("{}\n", line).as_bytes()).await {
                    error!("Failed to write notification: {}", e);
                    break;
                }
                if let Err(e) = stdout.flush().await {
                    error!("Failed to flush stdout: {}", e);
                    break;
                }
            }
            Err(e) => {
                error!("Error reading stdin: {}", e);
                break;
            }
        }
    }
}
