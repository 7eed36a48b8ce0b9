use quickserve::config::Config;
use quickserve::{Method, Request, create_server};

fn echo(req: &mut Request) {
    if req.method == Method::OPTIONS {
        if let Err(e) = req.send_preflight() {
            tracing::warn!("preflight not sent: {:#}", e);
        }
        return;
    }

    let body = serde_json::json!({
        "method": req.method.as_str(),
        "path": req.path,
        "query": req.query_params(),
        "body": req.text(),
    });
    if let Err(e) = req.send_text(&body.to_string()) {
        tracing::warn!("response not sent: {:#}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    let level: tracing::Level = cfg.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .init();

    let server = create_server(cfg.port, echo).await?;

    tokio::select! {
        res = server.wait() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
