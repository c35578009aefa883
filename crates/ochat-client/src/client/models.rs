//! Model listing, deletion and server version.

use ochat_core::ModelList;
use serde_json::Value;
use tracing::info;

use super::{InferenceClient, check_status, decode_body};
use crate::error::{ClientError, ClientResult, Operation};
use crate::wire::DeleteRequest;

impl InferenceClient {
    /// List locally installed models.
    ///
    /// Fails with `Format` if the body has no array-typed `models` field,
    /// even when it is otherwise valid JSON.
    pub async fn list_models(&self) -> ClientResult<ModelList> {
        let url = self.config.endpoint("tags");
        let budget = self.config.list_timeout;

        self.bounded(Operation::ListModels, budget, None, async {
            let request = self.http.get(&url);
            let response = self.send(Operation::ListModels, budget, &url, request).await?;
            let response = check_status(response).await?;
            let body: Value = decode_body(Operation::ListModels, &url, budget, response).await?;

            if !body.get("models").is_some_and(Value::is_array) {
                return Err(ClientError::format(
                    "response lacks an array-typed `models` field",
                ));
            }
            serde_json::from_value(body).map_err(|e| ClientError::format(e.to_string()))
        })
        .await
    }

    /// Delete a locally installed model.
    pub async fn delete_model(&self, name: &str) -> ClientResult<()> {
        let url = self.config.endpoint("delete");
        let budget = self.config.delete_timeout;

        self.bounded(Operation::DeleteModel, budget, None, async {
            let request = self.http.delete(&url).json(&DeleteRequest { name });
            let response = self.send(Operation::DeleteModel, budget, &url, request).await?;
            check_status(response).await?;
            info!(model = name, "Deleted model");
            Ok(())
        })
        .await
    }

    /// Version string reported by the server.
    pub async fn server_version(&self) -> ClientResult<String> {
        let url = self.config.endpoint("version");
        let budget = self.config.list_timeout;

        self.bounded(Operation::Version, budget, None, async {
            let response = self
                .send(Operation::Version, budget, &url, self.http.get(&url))
                .await?;
            let response = check_status(response).await?;
            let body: Value = decode_body(Operation::Version, &url, budget, response).await?;
            body.get("version")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ClientError::format("response lacks a `version` string"))
        })
        .await
    }
}
