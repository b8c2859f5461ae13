// ── Reconciler ──
//
// Drives one OpenObserve instance toward a desired-state plan. Every
// ensure operation is idempotent: list-then-match for presence,
// create-if-absent, update-if-drifted, and a blind settings overwrite
// for streams. Per-resource failures become report statuses and the
// batch keeps going; a hard error is reserved for the one case where
// nothing below could proceed (org resolution).
//
// All remote calls run sequentially. The instance being provisioned is
// frequently seconds old and single-node; one request in flight at a
// time is deliberate.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use o2ctl_api::models::{
    NewServiceAccount, NewUser, RolePayload, ServiceAccountUpdate, StreamSettingsRequest,
};
use o2ctl_api::transport::{TlsMode, TransportConfig};
use o2ctl_api::{AdminCredentials, ApiClient};

use crate::config::{InstanceConfig, TlsVerification};
use crate::error::CoreError;
use crate::password::generate_password;
use crate::plan::{DesiredOrg, RoleSpec, SaSpec, UserSpec, service_account_email};
use crate::report::{
    EXISTING_PASSWORD, OrgReport, Outcome, RoleReport, ServiceAccountReport, StreamReport,
    UserReport,
};
use crate::resolve::find_named;

/// Interval between readiness probes.
const READY_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Per-probe timeout while polling for readiness; much shorter than the
/// request default so a hung server fails fast.
const READY_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// The reconciliation engine.
///
/// Owns the API client; the CLI owns everything above it (plans,
/// confirmation gates, rendering).
pub struct Reconciler {
    pub(crate) api: ApiClient,
    pub(crate) email_domain: String,
}

impl Reconciler {
    /// Build a reconciler (and its HTTP client) from instance config.
    ///
    /// No network traffic happens until an operation runs.
    pub fn new(config: &InstanceConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: match &config.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: config.timeout,
        };

        let api = ApiClient::new(
            config.url.clone(),
            AdminCredentials {
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
            },
            config.schema,
            &transport,
        )?;

        Ok(Self { api, email_domain: config.email_domain.clone() })
    }

    /// Wrap an existing API client.
    pub fn with_client(api: ApiClient, email_domain: impl Into<String>) -> Self {
        Self { api, email_domain: email_domain.into() }
    }

    /// Domain used for derived addresses (sample users, service accounts).
    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }

    // ── Readiness ────────────────────────────────────────────────────

    /// Poll `/healthz` until the server reports ok or `wait` elapses.
    pub async fn wait_ready(&self, wait: Duration) -> Result<(), CoreError> {
        let deadline = tokio::time::Instant::now() + wait;

        loop {
            match self.api.healthz(READY_PROBE_TIMEOUT).await {
                Ok(health) if health.is_ok() => return Ok(()),
                Ok(_) => debug!("server answered but is not ready yet"),
                Err(e) => debug!("health probe failed: {e}"),
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(CoreError::Timeout { timeout_secs: wait.as_secs() });
            }
            sleep(READY_POLL_INTERVAL).await;
        }
    }

    // ── Organization resolution ──────────────────────────────────────

    /// Resolve an org name to its API identifier, or `None` if absent.
    pub async fn resolve_org_id(&self, name: &str) -> Result<Option<String>, CoreError> {
        let orgs = self.api.list_organizations().await?;
        Ok(find_named(&orgs, name).and_then(|org| org.org_id().map(str::to_owned)))
    }

    /// Ensure an org exists and return its API identifier.
    ///
    /// Created orgs may or may not echo their identifier back; when
    /// they don't, a second list-and-scan resolves it. A create
    /// conflict means someone else just made it, and the scan settles
    /// that too.
    pub async fn ensure_org(&self, name: &str) -> Result<String, CoreError> {
        if let Some(id) = self.resolve_org_id(name).await? {
            debug!("organization {name} already exists ({id})");
            return Ok(id);
        }

        match self.api.create_organization(name).await {
            Ok(Some(id)) => {
                info!("created organization {name} ({id})");
                return Ok(id);
            }
            Ok(None) => info!("created organization {name}"),
            Err(e) if e.is_conflict() => debug!("organization {name} created concurrently"),
            Err(e) => return Err(e.into()),
        }

        self.resolve_org_id(name)
            .await?
            .ok_or_else(|| CoreError::OrgUnresolved { name: name.to_owned() })
    }

    // ── Full-org reconcile ───────────────────────────────────────────

    /// Converge one organization toward `desired`.
    ///
    /// The report always comes back. An org that cannot be created or
    /// resolved yields a report with empty sections -- there is nothing
    /// meaningful to attempt below it.
    pub async fn apply_org(&self, desired: &DesiredOrg) -> OrgReport {
        let mut report = OrgReport::empty(&desired.name);

        info!("reconciling organization {}", desired.name);
        let org_id = match self.ensure_org(&desired.name).await {
            Ok(id) => id,
            Err(e) => {
                warn!("cannot resolve organization {}: {e}", desired.name);
                return report;
            }
        };

        for stream in &desired.streams {
            let name = desired.prefixed_stream(stream);
            let status = self.ensure_stream(&org_id, &name, stream.retention_hours).await;
            report.streams.push(StreamReport { name, status });
        }

        for role in &desired.roles {
            report.roles.push(self.ensure_role(&org_id, role).await);
        }

        for sa in &desired.service_accounts {
            report
                .service_accounts
                .push(self.ensure_service_account(&desired.name, &org_id, sa).await);
        }

        for user in &desired.users {
            report.users.push(self.ensure_user(&org_id, user).await);
        }

        report
    }

    // ── Streams ──────────────────────────────────────────────────────

    /// Post the full settings block for one stream.
    ///
    /// Creates the stream on first touch and overwrites its settings on
    /// every pass after; there is no read-compare step to race against.
    pub async fn ensure_stream(&self, org_id: &str, name: &str, retention_hours: u32) -> Outcome {
        let settings = StreamSettingsRequest::for_retention(retention_hours);
        match self.api.apply_stream_settings(org_id, name, &settings).await {
            Ok(()) => Outcome::Ok,
            Err(e) => {
                warn!("stream {name}: {e}");
                Outcome::Fail
            }
        }
    }

    // ── Custom roles ─────────────────────────────────────────────────

    /// Converge one custom role: create with its full grant list if
    /// absent, otherwise replace the grant list wholesale.
    pub async fn ensure_role(&self, org_id: &str, spec: &RoleSpec) -> RoleReport {
        let status = self.reconcile_role(org_id, spec).await;
        if status.is_failure() {
            warn!("role {}: {status}", spec.name);
        }
        RoleReport { name: spec.name.clone(), status }
    }

    async fn reconcile_role(&self, org_id: &str, spec: &RoleSpec) -> Outcome {
        let payload = RolePayload {
            role: spec.name.clone(),
            permissions: self.api.schema().encode_grants(&spec.grants),
        };

        let existing = match self.api.list_roles(org_id).await {
            Ok(roles) => roles,
            Err(e) => return Outcome::failed(format!("list roles: {e}")),
        };

        let Some(entry) = find_named(&existing, &spec.name) else {
            return match self.api.create_role(org_id, &payload).await {
                Ok(()) => Outcome::Created,
                // The listing lagged behind an earlier create; replace
                // by name instead.
                Err(e) if e.is_conflict() => self.replace_role(org_id, &spec.name, &payload).await,
                Err(e) => Outcome::failed(format!("create role: {e}")),
            };
        };

        // Address the internal id when the listing carries one; if the
        // server rejects the id form, retry once by name.
        match entry.id() {
            Some(id) => match self.api.update_role(org_id, id, &payload).await {
                Ok(()) => Outcome::Updated,
                Err(e) if e.is_unknown_identifier() => {
                    debug!("role id {id} rejected, retrying by name");
                    self.replace_role(org_id, &spec.name, &payload).await
                }
                Err(e) => Outcome::failed(format!("update role: {e}")),
            },
            None => self.replace_role(org_id, &spec.name, &payload).await,
        }
    }

    async fn replace_role(&self, org_id: &str, name: &str, payload: &RolePayload) -> Outcome {
        match self.api.update_role(org_id, name, payload).await {
            Ok(()) => Outcome::Updated,
            Err(e) => Outcome::failed(format!("update role: {e}")),
        }
    }

    // ── Service accounts ─────────────────────────────────────────────

    /// Converge one service account, then fetch its credential.
    ///
    /// An account that converged but yields no credential is a distinct
    /// failure: it exists remotely, but the report cannot hand its
    /// secret to the caller, which is the entire point of managing it.
    pub async fn ensure_service_account(
        &self,
        org: &str,
        org_id: &str,
        spec: &SaSpec,
    ) -> ServiceAccountReport {
        let email = service_account_email(&spec.name, org, &self.email_domain);
        let mut report = ServiceAccountReport::new(&spec.name, &email);

        match self.reconcile_service_account(org_id, &email, spec).await {
            Ok(status) => report.status = status,
            Err(reason) => {
                warn!("service account {}: {reason}", spec.name);
                report.status = Outcome::failed(reason);
                return report;
            }
        }

        match self.api.get_service_account_credential(org_id, &email).await {
            Ok(cred) if !cred.is_empty() => {
                report.token = cred.token;
                report.client_id = cred.client_id;
                report.client_secret = cred.client_secret;
            }
            Ok(_) => report.status = Outcome::failed("credential not retrievable"),
            Err(e) => report.status = Outcome::failed(format!("credential fetch: {e}")),
        }

        report
    }

    /// Create or role-correct the account. Returns the pre-credential
    /// outcome, or the failure reason.
    async fn reconcile_service_account(
        &self,
        org_id: &str,
        email: &str,
        spec: &SaSpec,
    ) -> Result<Outcome, String> {
        let existing = self
            .api
            .list_service_accounts(org_id)
            .await
            .map_err(|e| format!("list service accounts: {e}"))?;

        if let Some(account) = find_named(&existing, &spec.name) {
            if account.role.as_deref() == Some(spec.role.as_str()) {
                return Ok(Outcome::Exists);
            }

            info!(
                "correcting role drift on service account {} ({} -> {})",
                spec.name,
                account.role.as_deref().unwrap_or("<none>"),
                spec.role
            );
            let key = account.update_key().unwrap_or(email);
            let update = ServiceAccountUpdate { name: spec.name.clone(), role: spec.role.clone() };
            self.api
                .update_service_account(org_id, key, &update)
                .await
                .map_err(|e| format!("role update: {e}"))?;
            return Ok(Outcome::Updated);
        }

        let account = NewServiceAccount {
            name: spec.name.clone(),
            email: email.to_owned(),
            role: spec.role.clone(),
        };
        match self.api.create_service_account(org_id, &account).await {
            Ok(()) => Ok(Outcome::Created),
            // Concurrent create, or a listing that lagged: the account
            // is there, which is what we wanted.
            Err(e) if e.is_conflict() => Ok(Outcome::Exists),
            Err(e) => Err(format!("create: {e}")),
        }
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Create a user with a fresh generated password.
    ///
    /// An existing user (create conflict) is idempotent success with
    /// the password redacted -- their real password is unknown here and
    /// must never be guessed at.
    pub async fn ensure_user(&self, org_id: &str, spec: &UserSpec) -> UserReport {
        let password = generate_password();
        let user = NewUser {
            email: spec.email.clone(),
            first_name: "User".into(),
            last_name: "Team".into(),
            is_external: false,
            password: password.clone(),
            role: spec.role.clone(),
            custom_role: Vec::new(),
        };

        match self.api.create_user(org_id, &user).await {
            Ok(()) => UserReport {
                email: spec.email.clone(),
                role: Some(spec.role.clone()),
                password: Some(password),
                status: Outcome::Created,
            },
            Err(e) if e.is_conflict() => UserReport {
                email: spec.email.clone(),
                role: Some(spec.role.clone()),
                password: Some(EXISTING_PASSWORD.to_owned()),
                status: Outcome::Exists,
            },
            Err(e) => {
                warn!("user {}: {e}", spec.email);
                UserReport {
                    email: spec.email.clone(),
                    role: None,
                    password: None,
                    status: Outcome::failed(e.to_string()),
                }
            }
        }
    }
}
