//! Command table
//!
//! Maps operation names to typed handlers. Every request is checked against
//! the handler's input schema before it is deserialized, so handlers only
//! ever see well-formed input.

use crate::error::CommunityError;
use crate::input::{
    AddReply, CommunityRef, CreateCommunity, CreateDiscussion, ListCommunities, Membership,
    UpdateCommunity,
};
use crate::service::CommunityService;
use async_trait::async_trait;
use jsonschema::JSONSchema;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

#[async_trait]
trait Handler: Send + Sync {
    async fn call(&self, service: Arc<CommunityService>, input: Value)
        -> Result<Value, CommunityError>;
}

struct Typed<I, F> {
    f: F,
    _input: PhantomData<fn(I)>,
}

#[async_trait]
impl<I, O, F, Fut> Handler for Typed<I, F>
where
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
    F: Fn(Arc<CommunityService>, I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, CommunityError>> + Send + 'static,
{
    async fn call(
        &self,
        service: Arc<CommunityService>,
        input: Value,
    ) -> Result<Value, CommunityError> {
        let input: I = serde_json::from_value(input)
            .map_err(|e| CommunityError::invalid(e.to_string()))?;
        let output = (self.f)(service, input).await?;
        serde_json::to_value(output).map_err(|e| CommunityError::Encoding(e.to_string()))
    }
}

struct Entry {
    schema: Value,
    validator: JSONSchema,
    handler: Box<dyn Handler>,
}

/// Outcome of a dispatched command, shaped like an HTTP response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Status code
    pub status: u16,
    /// Output on success, `{ "error": ... }` otherwise
    pub body: Value,
}

impl Response {
    /// Check for a 2xx status
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One step of a command script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Operation name
    pub op: String,
    /// Input object
    #[serde(default = "empty_object")]
    pub input: Value,
}

fn empty_object() -> Value {
    json!({})
}

/// Registry of community operations
pub struct CommandTable {
    service: Arc<CommunityService>,
    entries: BTreeMap<&'static str, Entry>,
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("ops", &self.operations())
            .finish_non_exhaustive()
    }
}

impl CommandTable {
    /// Empty table over a service
    #[must_use]
    pub fn new(service: Arc<CommunityService>) -> Self {
        Self {
            service,
            entries: BTreeMap::new(),
        }
    }

    /// Table with every community operation registered
    ///
    /// # Errors
    /// `Encoding` if an input schema fails to compile.
    pub fn with_defaults(service: Arc<CommunityService>) -> Result<Self, CommunityError> {
        let mut table = Self::new(service);
        table.register("list_communities", |s, i: ListCommunities| async move {
            s.list_communities(i).await
        })?;
        table.register("get_community", |s, i: CommunityRef| async move {
            s.get_community(i).await
        })?;
        table.register("create_community", |s, i: CreateCommunity| async move {
            s.create_community(i).await
        })?;
        table.register("update_community", |s, i: UpdateCommunity| async move {
            s.update_community(i).await
        })?;
        table.register("delete_community", |s, i: CommunityRef| async move {
            s.delete_community(i).await
        })?;
        table.register("join_community", |s, i: Membership| async move {
            s.join_community(i).await
        })?;
        table.register("leave_community", |s, i: Membership| async move {
            s.leave_community(i).await
        })?;
        table.register("list_discussions", |s, i: CommunityRef| async move {
            s.list_discussions(i).await
        })?;
        table.register("create_discussion", |s, i: CreateDiscussion| async move {
            s.create_discussion(i).await
        })?;
        table.register("add_reply", |s, i: AddReply| async move { s.add_reply(i).await })?;
        Ok(table)
    }

    /// Register a handler under `op`, replacing any previous one
    ///
    /// # Errors
    /// `Encoding` if the input schema fails to compile.
    pub fn register<I, O, F, Fut>(&mut self, op: &'static str, f: F) -> Result<(), CommunityError>
    where
        I: JsonSchema + DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(Arc<CommunityService>, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, CommunityError>> + Send + 'static,
    {
        let schema = serde_json::to_value(schemars::schema_for!(I))
            .map_err(|e| CommunityError::Encoding(e.to_string()))?;
        let validator = JSONSchema::compile(&schema)
            .map_err(|e| CommunityError::Encoding(format!("schema for {op}: {e}")))?;
        self.entries.insert(
            op,
            Entry {
                schema,
                validator,
                handler: Box::new(Typed {
                    f,
                    _input: PhantomData,
                }),
            },
        );
        Ok(())
    }

    /// Registered operation names, sorted
    #[must_use]
    pub fn operations(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Input schema of an operation
    #[must_use]
    pub fn schema(&self, op: &str) -> Option<&Value> {
        self.entries.get(op).map(|e| &e.schema)
    }

    /// Underlying service
    #[must_use]
    pub fn service(&self) -> &Arc<CommunityService> {
        &self.service
    }

    /// Run an operation
    ///
    /// # Errors
    /// - `UnknownOperation` if nothing is registered under `op`
    /// - `InvalidInput` listing every schema violation
    /// - whatever the handler returns
    pub async fn dispatch(&self, op: &str, input: Value) -> Result<Value, CommunityError> {
        let entry = self
            .entries
            .get(op)
            .ok_or_else(|| CommunityError::UnknownOperation(op.to_string()))?;

        if let Err(errors) = entry.validator.validate(&input) {
            let messages: Vec<String> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{path}: {e}")
                    }
                })
                .collect();
            tracing::debug!("{} rejected: {:?}", op, messages);
            return Err(CommunityError::InvalidInput(messages));
        }

        tracing::info!("Dispatching {}", op);
        entry
            .handler
            .call(Arc::clone(&self.service), input)
            .await
            .map_err(|e| {
                tracing::warn!("{} failed with {}: {}", op, e.status_code(), e);
                e
            })
    }

    /// Run an operation and fold the outcome into a [`Response`]
    pub async fn handle(&self, op: &str, input: Value) -> Response {
        match self.dispatch(op, input).await {
            Ok(body) => Response { status: 200, body },
            Err(e) => Response {
                status: e.status_code(),
                body: json!({ "error": e.to_string() }),
            },
        }
    }

    /// Run requests in order; a failed step does not stop the rest
    pub async fn run_script(&self, requests: Vec<Request>) -> Vec<Response> {
        let mut out = Vec::with_capacity(requests.len());
        for r in requests {
            out.push(self.handle(&r.op, r.input).await);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::CommunitiesConfig;

    fn table() -> CommandTable {
        let service = Arc::new(CommunityService::in_memory(CommunitiesConfig::default()));
        CommandTable::with_defaults(service).unwrap()
    }

    #[test]
    fn every_operation_is_registered() {
        assert_eq!(
            table().operations(),
            vec![
                "add_reply",
                "create_community",
                "create_discussion",
                "delete_community",
                "get_community",
                "join_community",
                "leave_community",
                "list_communities",
                "list_discussions",
                "update_community",
            ]
        );
    }

    #[test]
    fn schema_lists_required_fields() {
        let t = table();
        let schema = t.schema("create_community").unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"name"));
        assert!(required.contains(&"ownerId"));
        assert!(t.schema("nope").is_none());
    }

    #[tokio::test]
    async fn unknown_operation_is_404() {
        let resp = table().handle("drop_tables", json!({})).await;
        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn schema_violations_are_400_and_reach_no_handler() {
        let t = table();
        let resp = t
            .handle("create_community", json!({ "name": "", "ownerId": "t-1" }))
            .await;
        assert_eq!(resp.status, 400);

        let resp = t
            .handle(
                "create_community",
                json!({ "name": "Club", "description": "d", "ownerId": "t-1", "colour": "red" }),
            )
            .await;
        assert_eq!(resp.status, 400);

        let resp = t
            .handle("list_communities", json!({ "keyStage": "KS9" }))
            .await;
        assert_eq!(resp.status, 400);

        let listed = t.dispatch("list_communities", json!({})).await.unwrap();
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn create_then_get() {
        let t = table();
        let created = t
            .dispatch(
                "create_community",
                json!({
                    "name": "History Hub",
                    "description": "Sources and timelines",
                    "ownerId": "t-1",
                    "subject": "HISTORY",
                    "keyStage": "KS3"
                }),
            )
            .await
            .unwrap();
        let id = created["id"].clone();
        let fetched = t
            .dispatch("get_community", json!({ "communityId": id }))
            .await
            .unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched["members"], json!(["t-1"]));
    }
}
