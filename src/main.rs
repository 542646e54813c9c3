use tracing::{info, warn};

use yandex_mcp_server::client::{Service, YandexClient};
use yandex_mcp_server::config::ServerConfig;
use yandex_mcp_server::logging;
use yandex_mcp_server::server::McpServer;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("yandex-mcp-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    if config.direct_token().is_none() {
        warn!(
            "no Yandex Direct token; set {} or YANDEX_TOKEN to use direct_* tools",
            Service::Direct.token_var()
        );
    }
    if config.metrika_token().is_none() {
        warn!(
            "no Yandex Metrika token; set {} or YANDEX_TOKEN to use metrika_* tools",
            Service::Metrika.token_var()
        );
    }
    info!(
        direct_url = %config.direct_base_url(),
        metrika_url = %config.metrika_base_url(),
        sandbox = config.use_sandbox,
        "yandex-mcp-server starting"
    );

    let client = match YandexClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("yandex-mcp-server: {e}");
            std::process::exit(1);
        }
    };

    let mut server = McpServer::new(client);
    if let Err(e) = server.run().await {
        eprintln!("yandex-mcp-server: fatal error: {e}");
        std::process::exit(1);
    }
}
