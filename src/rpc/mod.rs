//! Remote-callable controller methods.
//!
//! Controllers are declared once at startup, collected in a
//! [`ControllerRegistry`] and served as `POST /api/<Controller>/<method>`.
//! The registry also owns the explicit response-type registrations the
//! documentation generator reads.

pub mod handler;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use sqlx::PgPool;

use crate::auth::User;
use crate::database::DatabaseError;
use crate::openapi::{ResponseType, ResponseTypes};

pub use handler::routes;

/// Who may invoke a remote method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowed {
    Always,
    Authenticated,
    Role(&'static str),
}

/// Everything a remote method gets to work with.
#[derive(Debug, Clone)]
pub struct RpcCall {
    pub args: Vec<Value>,
    pub user: Option<User>,
    pub pool: PgPool,
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("{0}")]
    Failed(String),
}

type MethodFn = dyn Fn(RpcCall) -> BoxFuture<'static, Result<Value, RpcError>> + Send + Sync;

#[derive(Clone)]
pub struct RemoteMethod {
    name: &'static str,
    allowed: Allowed,
    handler: Arc<MethodFn>,
    returns: Option<ResponseType>,
    action: Option<String>,
}

impl RemoteMethod {
    pub fn new<F, Fut>(name: &'static str, allowed: Allowed, handler: F) -> Self
    where
        F: Fn(RpcCall) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, RpcError>> + Send + 'static,
    {
        Self {
            name,
            allowed,
            handler: Arc::new(move |call| Box::pin(handler(call))),
            returns: None,
            action: None,
        }
    }

    /// Declare the documented response type on the method itself.
    pub fn returns(mut self, response_type: ResponseType) -> Self {
        self.returns = Some(response_type);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn allowed(&self) -> Allowed {
        self.allowed
    }

    pub fn response_type(&self) -> Option<&ResponseType> {
        self.returns.as_ref()
    }

    /// `<Controller>/<method>`; only set once the method is attached to a controller.
    pub fn action_url(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn authorize(&self, user: Option<&User>) -> Result<(), RpcError> {
        match (self.allowed, user) {
            (Allowed::Always, _) => Ok(()),
            (_, None) => Err(RpcError::Unauthorized),
            (Allowed::Authenticated, Some(_)) => Ok(()),
            (Allowed::Role(role), Some(user)) if user.has_role(role) => Ok(()),
            (Allowed::Role(_), Some(_)) => Err(RpcError::Forbidden),
        }
    }

    pub async fn invoke(&self, call: RpcCall) -> Result<Value, RpcError> {
        self.authorize(call.user.as_ref())?;
        (self.handler)(call).await
    }
}

impl fmt::Debug for RemoteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteMethod")
            .field("name", &self.name)
            .field("allowed", &self.allowed)
            .field("returns", &self.returns)
            .field("action", &self.action)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RemoteController {
    name: &'static str,
    methods: Vec<RemoteMethod>,
}

impl RemoteController {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            methods: Vec::new(),
        }
    }

    /// Attach a method, assigning its action path.
    pub fn method(mut self, mut method: RemoteMethod) -> Self {
        if !self.name.is_empty() && !method.name.is_empty() {
            method.action = Some(format!("{}/{}", self.name, method.name));
        }
        self.methods.push(method);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn methods(&self) -> &[RemoteMethod] {
        &self.methods
    }

    pub fn get(&self, name: &str) -> Option<&RemoteMethod> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// All controllers exposed by the API, plus their explicit response types.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: Vec<RemoteController>,
    response_types: ResponseTypes,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, controller: RemoteController) -> Self {
        tracing::debug!(
            "Registered controller {} ({} methods)",
            controller.name(),
            controller.methods().len()
        );
        self.controllers.push(controller);
        self
    }

    /// Record the documented response type of `controller.method`.
    pub fn returns(mut self, controller: &str, method: &str, response_type: ResponseType) -> Self {
        self.response_types.register(controller, method, response_type);
        self
    }

    pub fn controllers(&self) -> &[RemoteController] {
        &self.controllers
    }

    pub fn response_types(&self) -> &ResponseTypes {
        &self.response_types
    }

    pub fn find(&self, action: &str) -> Option<(&RemoteController, &RemoteMethod)> {
        self.controllers.iter().find_map(|controller| {
            controller
                .methods()
                .iter()
                .find(|m| m.action_url() == Some(action))
                .map(|m| (controller, m))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn echo() -> RemoteMethod {
        RemoteMethod::new("echo", Allowed::Always, |call: RpcCall| async move {
            Ok(call.args.into_iter().next().unwrap_or(Value::Null))
        })
    }

    #[test]
    fn attaching_assigns_action_paths() {
        let controller = RemoteController::new("EchoController").method(echo());
        assert_eq!(controller.methods()[0].action_url(), Some("EchoController/echo"));
        assert_eq!(echo().action_url(), None);

        let registry = ControllerRegistry::new().register(controller);
        let (controller, method) = registry.find("EchoController/echo").unwrap();
        assert_eq!(controller.name(), "EchoController");
        assert_eq!(method.name(), "echo");
        assert!(registry.find("EchoController/missing").is_none());
    }

    #[test]
    fn unnamed_controllers_produce_no_action() {
        let controller = RemoteController::new("").method(echo());
        assert_eq!(controller.methods()[0].action_url(), None);
    }

    #[test]
    fn authorization_follows_allowed_policy() {
        let user = User {
            id: uuid::Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            roles: vec!["admin".into()],
            created_at: chrono::Utc::now(),
        };
        let noop = |allowed| RemoteMethod::new("m", allowed, |_| async { Ok(json!(null)) });

        assert!(noop(Allowed::Always).authorize(None).is_ok());
        assert!(matches!(noop(Allowed::Authenticated).authorize(None), Err(RpcError::Unauthorized)));
        assert!(noop(Allowed::Authenticated).authorize(Some(&user)).is_ok());
        assert!(noop(Allowed::Role("admin")).authorize(Some(&user)).is_ok());
        assert!(matches!(noop(Allowed::Role("astronomer")).authorize(Some(&user)), Err(RpcError::Forbidden)));
    }
}
