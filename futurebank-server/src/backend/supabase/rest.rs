//! PostgREST endpoints

use async_trait::async_trait;
use serde_json::Value;

use super::SupabaseClient;
use crate::backend::error::{BackendError, Result};
use crate::backend::{DataStore, Query, Table};

impl SupabaseClient {
    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }
}

/// PostgREST conflicts do not name the table; fill it in
fn in_table(err: BackendError, table: Table) -> BackendError {
    match err {
        BackendError::Conflict { message, .. } => BackendError::Conflict {
            table: table.to_string(),
            message,
        },
        other => other,
    }
}

#[async_trait]
impl DataStore for SupabaseClient {
    async fn select(&self, token: Option<&str>, query: &Query) -> Result<Vec<Value>> {
        let response = self
            .authorize(self.client.get(self.table_url(query.table())), token)
            .query(&query.to_params())
            .send()
            .await?;

        self.handle_response(response)
            .await
            .map_err(|e| in_table(e, query.table()))
    }

    async fn insert(
        &self,
        token: Option<&str>,
        table: Table,
        rows: Vec<Value>,
    ) -> Result<Vec<Value>> {
        let response = self
            .authorize(self.client.post(self.table_url(table)), token)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;

        self.handle_response(response)
            .await
            .map_err(|e| in_table(e, table))
    }

    async fn update(&self, token: Option<&str>, query: &Query, patch: Value) -> Result<Vec<Value>> {
        let response = self
            .authorize(self.client.patch(self.table_url(query.table())), token)
            .header("Prefer", "return=representation")
            .query(&query.to_params())
            .json(&patch)
            .send()
            .await?;

        self.handle_response(response)
            .await
            .map_err(|e| in_table(e, query.table()))
    }
}
