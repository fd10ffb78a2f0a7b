use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::analysis::analyze;
use crate::report::{persist, Artifacts};
use crate::settings::Settings;
use crate::store::{self, ObjectStore};

pub const SUCCESS_BODY: &str = "Successful, the text was analyzed and saved in files";
pub const FAILURE_BODY: &str = "Issue while text-analysis";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Request {
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl Response {
    fn success() -> Self {
        Response {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
        }
    }

    /// The body is a JSON string literal, quotes included.
    fn failure() -> Self {
        Response {
            status_code: 500,
            body: serde_json::Value::from(FAILURE_BODY).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Connect, analyze, persist. Never fails; causes are logged, not returned.
pub fn handle(request: &Request, settings: &Settings) -> Response {
    let result = store::connect(settings)
        .context("Failed to connect to object store")
        .and_then(|store| run(request, store.as_ref(), &settings.key_prefix));
    respond(result)
}

pub fn handle_with_store(request: &Request, store: &dyn ObjectStore, key_prefix: &str) -> Response {
    respond(run(request, store, key_prefix))
}

fn run(request: &Request, store: &dyn ObjectStore, key_prefix: &str) -> Result<Artifacts> {
    let text = request.body.as_deref().context("request has no body")?;
    let analysis = analyze(text).context("Failed to analyze text")?;
    persist(store, &analysis, key_prefix)
}

fn respond(result: Result<Artifacts>) -> Response {
    match result {
        Ok(artifacts) => {
            info!(id = %artifacts.id, "text analysis complete");
            Response::success()
        }
        Err(e) => {
            error!("Issue while text-analysis: {:#}", e);
            Response::failure()
        }
    }
}
