use log::{debug, info, log, Level};
use serde_json::Value;
use thiserror::Error;
use crate::query::{classify, InvalidInput, QueryTarget};
use crate::viacep::model::Endereco;

/// Failure of the outbound call itself, as opposed to an unwanted payload
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

/// Anything able to GET a JSON document below the lookup service base URL
#[allow(async_fn_in_trait)]
pub trait LookupClient {
    async fn get_json(&self, segments: &[String]) -> Result<Value, FetchError>;
}

/// Where a blocking message to the user ends up
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Prints notifications on stderr, keeping stdout for results
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    PostalCode,
    Address,
}

impl NotFoundKind {
    fn of(target: &QueryTarget) -> Self {
        match target {
            QueryTarget::PostalCode(_) => NotFoundKind::PostalCode,
            QueryTarget::Address(_) => NotFoundKind::Address,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            NotFoundKind::PostalCode => "CEP não encontrado.",
            NotFoundKind::Address => "Endereço não encontrado.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Invalid(#[from] InvalidInput),
    #[error("{}", .0.message())]
    NotFound(NotFoundKind),
    #[error("Erro ao buscar dados. Verifique o formato ou tente novamente.")]
    Unexpected { detail: String },
}

impl SearchError {
    fn unexpected(detail: impl ToString) -> Self {
        SearchError::Unexpected { detail: detail.to_string() }
    }

    /// a miss is an ordinary answer; only unreadable replies deserve a warning
    pub fn log_level(&self) -> Level {
        match self {
            SearchError::Invalid(_) => Level::Debug,
            SearchError::NotFound(_) => Level::Info,
            SearchError::Unexpected { .. } => Level::Warn,
        }
    }
}

/// Issue the single request for `target` and map the payload to a result set.
///
/// A failed call counts as "not found". Only payloads that cannot be read as
/// addresses end up as [`SearchError::Unexpected`].
#[tracing::instrument(skip_all, fields(path = %target.path()))]
pub async fn lookup<C: LookupClient>(client: &C, target: &QueryTarget) -> Result<Vec<Endereco>, SearchError> {
    let not_found = SearchError::NotFound(NotFoundKind::of(target));

    debug!("requesting [{}]", target.path());
    let payload = match client.get_json(&target.path_segments()).await {
        Ok(payload) => payload,
        Err(FetchError::Transport(e)) => {
            debug!("lookup for [{}] failed: {}", target.path(), e);
            return Err(not_found);
        }
        Err(e) => {
            debug!("lookup for [{}] returned garbage: {}", target.path(), e);
            return Err(SearchError::unexpected(e));
        }
    };

    match target {
        QueryTarget::PostalCode(_) => {
            if !payload.is_object() {
                return Err(SearchError::unexpected(format!("expected an object, got: {payload}")));
            }
            if payload.get("erro").is_some_and(is_truthy) {
                return Err(not_found);
            }
            let endereco = serde_json::from_value::<Endereco>(payload).map_err(SearchError::unexpected)?;
            Ok(vec![endereco])
        }
        QueryTarget::Address(_) => match payload {
            Value::Array(items) if !items.is_empty() => items
                .into_iter()
                .map(serde_json::from_value::<Endereco>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(SearchError::unexpected),
            _ => Err(not_found),
        },
    }
}

/// ViaCEP has sent both `true` and `"true"` as the marker
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The two values a user sees: the pending input text and the last results
#[derive(Debug, Default)]
pub struct Session {
    pub input: String,
    pub results: Vec<Endereco>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one search for the current input.
    ///
    /// Invalid input is reported and leaves both the input and the previous results
    /// alone. Once a request has been attempted the input is cleared, and any
    /// failure also clears the results.
    pub async fn search<C, N>(&mut self, client: &C, notifier: &mut N) -> Result<(), SearchError>
    where
        C: LookupClient,
        N: Notifier,
    {
        let target = match classify(&self.input) {
            Ok(target) => target,
            Err(reason) => {
                notifier.notify(&reason.to_string());
                return Err(reason.into());
            }
        };

        let outcome = lookup(client, &target).await;
        self.input.clear();
        match outcome {
            Ok(results) => {
                info!("found [{}] address(es) for [{}]", results.len(), target.path());
                self.results = results;
                Ok(())
            }
            Err(e) => {
                log!(e.log_level(), "search for [{}] failed: {:?}", target.path(), e);
                self.results.clear();
                notifier.notify(&e.to_string());
                Err(e)
            }
        }
    }
}
