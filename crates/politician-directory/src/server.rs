use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use directory_core::model::{Page, PoliticianQuery, PoliticianRecord};
use directory_core::query::{desired_state, query_politicians};
use directory_core::states::resolve_zip_to_state;

use crate::config::Config;

#[derive(Clone)]
pub struct PoliticianDirectoryServer {
    config: Arc<Config>,
    tool_router: ToolRouter<PoliticianDirectoryServer>,
}

impl PoliticianDirectoryServer {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ResolveStateParams {
    /// ZIP code; its first five digits are looked up first.
    zip: Option<String>,
    /// Full state name or two-letter code, used when the ZIP does not resolve.
    state: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
enum StateSource {
    Zip,
    State,
    Unresolved,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ResolveStateResponse {
    code: Option<String>,
    source: StateSource,
}

#[tool_router]
impl PoliticianDirectoryServer {
    #[tool(description = "Look up crypto-stance records for US politicians. Filters by name substring, state (name or code), ZIP (takes precedence over state), party, role and stance; returns one page of results with total/totalPages.")]
    async fn query_politicians(
        &self,
        Parameters(params): Parameters<PoliticianQuery>,
    ) -> Result<Json<Page<PoliticianRecord>>, String> {
        let page = query_politicians(self.config.csv_path(), &params)
            .await
            .map_err(|e| {
                warn!(error = %e, "politician query failed");
                e.to_string()
            })?;
        Ok(Json(page))
    }

    #[tool(description = "Normalize a ZIP code and/or state name into a two-letter state code, using the same ZIP-first precedence as query_politicians.")]
    async fn resolve_state(
        &self,
        Parameters(params): Parameters<ResolveStateParams>,
    ) -> Result<Json<ResolveStateResponse>, String> {
        let code = desired_state(params.zip.as_deref(), params.state.as_deref());
        let from_zip = params
            .zip
            .as_deref()
            .and_then(resolve_zip_to_state)
            .is_some();
        let source = match code {
            Some(_) if from_zip => StateSource::Zip,
            Some(_) => StateSource::State,
            None => StateSource::Unresolved,
        };
        Ok(Json(ResolveStateResponse {
            code: code.map(str::to_string),
            source,
        }))
    }
}

#[tool_handler]
impl ServerHandler for PoliticianDirectoryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "politician-directory".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Crypto-friendly politician directory. Use query_politicians to filter and page \
through the dataset; use resolve_state to check how a ZIP or state name will be interpreted."
                    .to_string(),
            ),
        }
    }
}
