use std::{future::IntoFuture, net::SocketAddr, sync::Arc};

use axum::Router;
use serenity::all::Client;

use crate::{announce::ChannelSender, config::Config, scheduler::start_scheduler};

/// Runs the gateway client, the HTTP server and (optionally) the weekly
/// scheduler side by side. Returns as soon as either the client or the server
/// stops.
pub struct StudyBot {
    pub config: Arc<Config>,
    pub client: Client,
    pub router: Router,
}

#[shuttle_runtime::async_trait]
impl shuttle_runtime::Service for StudyBot {
    async fn bind(self, addr: SocketAddr) -> Result<(), shuttle_runtime::Error> {
        self.run(addr).await?;
        Ok(())
    }
}

impl StudyBot {
    async fn run(self, addr: SocketAddr) -> anyhow::Result<()> {
        let Self {
            config,
            mut client,
            router,
        } = self;

        // PORT wins over whatever the runtime picked.
        let addr = match config.port {
            Some(port) => SocketAddr::new(addr.ip(), port),
            None => addr,
        };

        let _scheduler = if config.announce_trigger.runs_scheduler() {
            let sender: Arc<dyn ChannelSender> = client.http.clone();
            Some(start_scheduler(config.clone(), sender).await?)
        } else {
            tracing::info!("In-process scheduler disabled, waiting for GET /execute");
            None
        };

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server is running on http://{}", addr);

        tokio::select! {
            res = client.start_autosharded() => res?,
            res = axum::serve(listener, router).into_future() => res?,
        }

        Ok(())
    }
}
