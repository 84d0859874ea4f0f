//! Browser chat UI served as a separate process
//!
//! The page talks to the Q&A server directly from the browser, so the only
//! thing this process does is hand out HTML with the API address filled in.

use axum::{response::Html, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::UiConfig;
use crate::error::{Error, Result};

const PAGE_TEMPLATE: &str = include_str!("index.html");

/// Render the page with `api_base_url` embedded as a JavaScript string
pub fn render_page(api_base_url: &str) -> Result<String> {
    let base = api_base_url.trim_end_matches('/');
    // A JSON string is a valid JS literal; escape "</" so it cannot close the script tag
    let literal = serde_json::to_string(base)?.replace("</", "<\\/");
    Ok(PAGE_TEMPLATE.replace("{{API_BASE_URL}}", &literal))
}

/// Build the UI router
pub fn build_ui_router(config: &UiConfig) -> Result<Router> {
    let page = Arc::new(render_page(&config.api_base_url)?);

    Ok(Router::new()
        .route(
            "/",
            get(move || {
                let page = Arc::clone(&page);
                async move { Html(page.as_str().to_owned()) }
            }),
        )
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http()))
}

/// Serve the UI until Ctrl-C
pub async fn serve(config: &UiConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

    let router = build_ui_router(config)?;

    tracing::info!("Starting PDF Q&A UI on http://{}", addr);
    tracing::info!("Using API at {}", config.api_base_url);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(crate::server::shutdown_signal())
        .await
        .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_base_url() {
        let page = render_page("http://localhost:8000/").unwrap();
        assert!(page.contains(r#"const API_BASE_URL = "http://localhost:8000";"#));
        assert!(!page.contains("{{API_BASE_URL}}"));
    }

    #[test]
    fn test_render_escapes_script_close() {
        let page = render_page("http://x/</script><script>alert(1)").unwrap();
        assert!(!page.contains("</script><script>alert(1)"));
    }

    #[test]
    fn test_page_uses_api_endpoints() {
        let page = render_page("http://api").unwrap();
        for path in ["'/documents'", "'/question'", "'/reset_index'"] {
            assert!(page.contains(path), "page does not call {}", path);
        }
    }
}
