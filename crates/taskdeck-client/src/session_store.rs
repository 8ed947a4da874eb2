//! SessionStore: the authentication state holder.
//!
//! Owns the single active session (access token, refresh token, user record),
//! persists it through an injected [`KeyValueStore`], and answers
//! authentication queries for the rest of the client. The access token and
//! the user record are set and cleared together; the store never holds one
//! without the other beyond a failed request.

use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use taskdeck_core::api::{self, ApiRequest, ApiTransport};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::session::AuthSession;
use taskdeck_core::storage::{KeyValueStore, keys};
use taskdeck_core::user::User;

#[derive(Debug, Clone, Default)]
struct SessionState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
}

/// Holds and persists the single active session.
///
/// Shared via `Arc` with the task cache, which reads headers but never
/// mutates session state. The inner lock is held only for synchronous field
/// access, never across an await point.
pub struct SessionStore {
    transport: Arc<dyn ApiTransport>,
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Creates an empty (unauthenticated) session store.
    pub fn new(transport: Arc<dyn ApiTransport>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            transport,
            storage,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Restores a previously persisted session. Run once at startup.
    ///
    /// Missing or unparseable data is a normal unauthenticated start, not an
    /// error, so this never fails and performs no network call. A restored
    /// token may already be stale; that is only discovered on the next API
    /// call.
    pub async fn restore(&self) {
        let token = self.storage.get(keys::ACCESS_TOKEN).await.ok().flatten();
        let refresh = self.storage.get(keys::REFRESH_TOKEN).await.ok().flatten();
        let user = self
            .storage
            .get(keys::USER)
            .await
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok());

        // Token and user only ever come back together; a half-persisted
        // session stays unauthenticated.
        let (Some(token), Some(user)) = (token, user) else {
            return;
        };

        let mut state = self.state.write().unwrap();
        state.access_token = Some(token);
        state.refresh_token = refresh;
        state.user = Some(user);
    }

    /// Authenticates against the login endpoint.
    ///
    /// On success the session is stored in memory and durable storage and the
    /// parsed payload is returned. On any failure — rejection or transport —
    /// no state is mutated.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let request = ApiRequest::post(
            api::LOGIN_PATH,
            json!({"username": username, "password": password}),
        )
        .with_headers(content_type_json());
        self.acquire_session(request).await
    }

    /// Creates an account against the registration endpoint; same contract as
    /// [`login`](Self::login).
    ///
    /// All four fields are submitted as-is — the password confirmation
    /// equality check belongs to the backend, this client performs none.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<AuthSession> {
        let request = ApiRequest::post(
            api::REGISTER_PATH,
            json!({
                "username": username,
                "email": email,
                "password": password,
                "password_confirm": password_confirm,
            }),
        )
        .with_headers(content_type_json());
        self.acquire_session(request).await
    }

    /// Clears the session in memory and removes the three persisted keys.
    ///
    /// Pure local operation, no network call, cannot fail: storage removal
    /// errors are logged and swallowed.
    pub async fn logout(&self) {
        {
            let mut state = self.state.write().unwrap();
            *state = SessionState::default();
        }
        for key in [keys::ACCESS_TOKEN, keys::REFRESH_TOKEN, keys::USER] {
            if let Err(e) = self.storage.remove(key).await {
                tracing::warn!("failed to remove persisted '{}': {}", key, e);
            }
        }
    }

    /// True iff both a non-empty token and a user record are held. The sole
    /// authentication gate for callers.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.read().unwrap();
        state.access_token.as_deref().is_some_and(|t| !t.is_empty()) && state.user.is_some()
    }

    /// Header set for authenticated calls, produced unconditionally: an
    /// absent token renders as an empty bearer, which the server will reject.
    /// Callers that are not authenticated must not invoke operations that
    /// need these headers.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        let token = {
            let state = self.state.read().unwrap();
            state.access_token.clone().unwrap_or_default()
        };
        vec![
            ("Authorization".to_string(), format!("Bearer {}", token)),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }

    /// The last-known server-confirmed user record, if any.
    pub fn current_user(&self) -> Option<User> {
        self.state.read().unwrap().user.clone()
    }

    /// The held access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.state.read().unwrap().access_token.clone()
    }

    /// Shared tail of login/register: one round trip, parse `{user, tokens}`,
    /// install the session.
    async fn acquire_session(&self, request: ApiRequest) -> Result<AuthSession> {
        let response = self.transport.send(request).await?;
        let Some(body) = response.into_result()? else {
            tracing::warn!("credential endpoint returned an empty success body");
            return Err(TaskdeckError::network());
        };
        let session: AuthSession = parse_session(body)?;
        self.install(&session).await;
        Ok(session)
    }

    /// Puts a fresh session into memory and durable storage. Durable writes
    /// are best-effort; in-memory state is authoritative.
    async fn install(&self, session: &AuthSession) {
        {
            let mut state = self.state.write().unwrap();
            state.access_token = Some(session.tokens.access.clone());
            state.refresh_token = Some(session.tokens.refresh.clone());
            state.user = Some(session.user.clone());
        }
        self.persist(keys::ACCESS_TOKEN, &session.tokens.access).await;
        self.persist(keys::REFRESH_TOKEN, &session.tokens.refresh).await;
        match serde_json::to_string(&session.user) {
            Ok(raw) => self.persist(keys::USER, &raw).await,
            Err(e) => tracing::warn!("failed to encode user for persistence: {}", e),
        }
    }

    async fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value).await {
            tracing::warn!("failed to persist '{}': {}", key, e);
        }
    }
}

fn content_type_json() -> Vec<(String, String)> {
    vec![("Content-Type".to_string(), "application/json".to_string())]
}

fn parse_session(body: Value) -> Result<AuthSession> {
    serde_json::from_value(body).map_err(|e| {
        tracing::warn!("malformed credential payload: {}", e);
        TaskdeckError::network()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use taskdeck_core::api::ApiResponse;
    use taskdeck_infrastructure::MemoryKeyValueStore;

    // Scripted transport: answers from a queue and records every request.
    struct MockTransport {
        responses: Mutex<VecDeque<Result<ApiResponse>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn push_response(&self, status: u16, body: Value) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(ApiResponse {
                    status,
                    body: Some(body),
                }));
        }

        fn push_transport_failure(&self) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(TaskdeckError::network()));
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiTransport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left")
        }
    }

    fn login_payload() -> Value {
        json!({
            "user": {"id": 1, "username": "u", "email": "u@example.com"},
            "tokens": {"access": "A", "refresh": "R"}
        })
    }

    fn create_store() -> (Arc<MockTransport>, Arc<MemoryKeyValueStore>, SessionStore) {
        let transport = MockTransport::new();
        let storage = Arc::new(MemoryKeyValueStore::new());
        let store = SessionStore::new(transport.clone(), storage.clone());
        (transport, storage, store)
    }

    #[tokio::test]
    async fn test_fresh_store_is_unauthenticated() {
        let (_transport, _storage, store) = create_store();
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
    }

    #[tokio::test]
    async fn test_login_success_sets_session_and_headers() {
        let (transport, storage, store) = create_store();
        transport.push_response(200, login_payload());

        let session = store.login("u", "p").await.unwrap();
        assert_eq!(session.user.id, 1);
        assert!(store.is_authenticated());

        let headers = store.auth_headers();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer A".to_string())));
        assert!(headers.contains(&("Content-Type".to_string(), "application/json".to_string())));

        // All three keys persisted
        assert_eq!(storage.get(keys::ACCESS_TOKEN).await.unwrap(), Some("A".to_string()));
        assert_eq!(storage.get(keys::REFRESH_TOKEN).await.unwrap(), Some("R".to_string()));
        let raw_user = storage.get(keys::USER).await.unwrap().unwrap();
        let user: User = serde_json::from_str(&raw_user).unwrap();
        assert_eq!(user.username, "u");
    }

    #[tokio::test]
    async fn test_login_sends_credentials_to_login_path() {
        let (transport, _storage, store) = create_store();
        transport.push_response(200, login_payload());
        store.login("u", "p").await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].path, api::LOGIN_PATH);
        assert_eq!(sent[0].body, Some(json!({"username": "u", "password": "p"})));
    }

    #[tokio::test]
    async fn test_login_rejection_mutates_nothing() {
        let (transport, storage, store) = create_store();
        transport.push_response(400, json!({"non_field_errors": ["Invalid credentials"]}));

        let err = store.login("u", "bad").await.unwrap_err();
        assert!(err.is_rejected());
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_login_transport_failure_mutates_nothing() {
        let (transport, storage, store) = create_store();
        transport.push_transport_failure();

        let err = store.login("u", "p").await.unwrap_err();
        assert!(err.is_network());
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_register_submits_all_four_fields() {
        let (transport, _storage, store) = create_store();
        transport.push_response(201, login_payload());

        store
            .register("u", "u@example.com", "pw", "pw")
            .await
            .unwrap();
        assert!(store.is_authenticated());

        let sent = transport.sent();
        assert_eq!(sent[0].path, api::REGISTER_PATH);
        assert_eq!(
            sent[0].body,
            Some(json!({
                "username": "u",
                "email": "u@example.com",
                "password": "pw",
                "password_confirm": "pw",
            }))
        );
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let (transport, storage, store) = create_store();
        transport.push_response(200, login_payload());
        store.login("u", "p").await.unwrap();

        store.logout().await;
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert!(store.access_token().is_none());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout_then_restore_stays_unauthenticated() {
        let (transport, storage, store) = create_store();
        transport.push_response(200, login_payload());
        store.login("u", "p").await.unwrap();
        store.logout().await;

        // Simulated reload: a fresh store over the same (now empty) storage
        let reloaded = SessionStore::new(MockTransport::new(), storage);
        reloaded.restore().await;
        assert!(!reloaded.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_recovers_persisted_session() {
        let (transport, storage, store) = create_store();
        transport.push_response(200, login_payload());
        store.login("u", "p").await.unwrap();

        let reloaded = SessionStore::new(MockTransport::new(), storage);
        reloaded.restore().await;
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.access_token(), Some("A".to_string()));
        assert_eq!(reloaded.current_user().unwrap().username, "u");
    }

    #[tokio::test]
    async fn test_restore_ignores_unparseable_user() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        storage.set(keys::ACCESS_TOKEN, "A").await.unwrap();
        storage.set(keys::USER, "not json").await.unwrap();

        let store = SessionStore::new(MockTransport::new(), storage);
        store.restore().await;
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_requires_both_token_and_user() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        storage
            .set(keys::USER, &json!({"id": 1, "username": "u"}).to_string())
            .await
            .unwrap();

        let store = SessionStore::new(MockTransport::new(), storage);
        store.restore().await;
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_auth_headers_without_token_render_empty_bearer() {
        let (_transport, _storage, store) = create_store();
        let headers = store.auth_headers();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer ".to_string())));
    }
}
